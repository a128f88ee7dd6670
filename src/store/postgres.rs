use anyhow::Context;
use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, types::Json, FromRow, PgPool};
use time::OffsetDateTime;
use tracing::{debug, info};
use uuid::Uuid;

use super::{
    Collection, Document, DocumentStore, NewUser, Record, StoreError, StoreResult, User,
    UserStore,
};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

#[derive(Debug, FromRow)]
struct RecordRow {
    id: Uuid,
    doc: Json<Document>,
    created_at: OffsetDateTime,
}

impl From<RecordRow> for Record {
    fn from(row: RecordRow) -> Self {
        Self {
            id: row.id,
            created_at: row.created_at,
            doc: row.doc.0,
        }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    created_at: OffsetDateTime,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            email: row.email,
            password_hash: row.password_hash,
            created_at: row.created_at,
        }
    }
}

impl PgStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("connect to database")?;
        info!(max_connections, "database pool ready");
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("run database migrations")?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("database pool closed");
    }
}

fn map_unique(e: sqlx::Error, what: &str) -> StoreError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            StoreError::Duplicate(what.to_string())
        }
        _ => StoreError::Database(e),
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(&self, user: NewUser) -> StoreResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, password_hash, created_at
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique(e, "email"))?;
        Ok(row.into())
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Into::into))
    }

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"SELECT id, username, email, password_hash, created_at FROM users WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Into::into))
    }
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn insert(&self, collection: Collection, doc: Document) -> StoreResult<Record> {
        let sql = format!(
            "INSERT INTO {} (doc) VALUES ($1) RETURNING id, doc, created_at",
            collection.table()
        );
        let row = sqlx::query_as::<_, RecordRow>(&sql)
            .bind(Json(&doc))
            .fetch_one(&self.pool)
            .await?;
        debug!(%collection, id = %row.id, "document inserted");
        Ok(row.into())
    }

    async fn find_all(&self, collection: Collection) -> StoreResult<Vec<Record>> {
        let sql = format!(
            "SELECT id, doc, created_at FROM {} ORDER BY created_at",
            collection.table()
        );
        let rows = sqlx::query_as::<_, RecordRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, collection: Collection, id: Uuid) -> StoreResult<Option<Record>> {
        let sql = format!(
            "SELECT id, doc, created_at FROM {} WHERE id = $1",
            collection.table()
        );
        let row = sqlx::query_as::<_, RecordRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Into::into))
    }

    async fn update_by_id(
        &self,
        collection: Collection,
        id: Uuid,
        changes: Document,
    ) -> StoreResult<Option<Record>> {
        // `||` on jsonb replaces top-level keys, leaving the rest untouched.
        let sql = format!(
            "UPDATE {} SET doc = doc || $2 WHERE id = $1 RETURNING id, doc, created_at",
            collection.table()
        );
        let row = sqlx::query_as::<_, RecordRow>(&sql)
            .bind(id)
            .bind(Json(&changes))
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Into::into))
    }

    async fn delete_by_id(&self, collection: Collection, id: Uuid) -> StoreResult<bool> {
        let sql = format!("DELETE FROM {} WHERE id = $1", collection.table());
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
