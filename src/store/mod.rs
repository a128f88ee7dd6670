//! Record store seam.
//!
//! Stations and points are schemaless JSON documents keyed by a
//! store-assigned UUID; users are typed rows. Handlers only ever see the
//! traits below, so the PostgreSQL and in-memory backends are
//! interchangeable.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

pub type Document = serde_json::Map<String, serde_json::Value>;

/// Document collections. Table names come from here, never from input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    ChargingStations,
    ChargingPoints,
}

impl Collection {
    pub fn table(self) -> &'static str {
        match self {
            Self::ChargingStations => "charging_stations",
            Self::ChargingPoints => "charging_points",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

/// A stored document together with its store-assigned fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: Uuid,
    pub created_at: OffsetDateTime,
    pub doc: Document,
}

/// User row. The digest never leaves the process.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{0} already exists")]
    Duplicate(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create_user(&self, user: NewUser) -> StoreResult<User>;
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;
    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn insert(&self, collection: Collection, doc: Document) -> StoreResult<Record>;
    async fn find_all(&self, collection: Collection) -> StoreResult<Vec<Record>>;
    async fn find_by_id(&self, collection: Collection, id: Uuid) -> StoreResult<Option<Record>>;
    /// Shallow-merges `changes` into the document and returns the new state,
    /// or `None` when no document has that id.
    async fn update_by_id(
        &self,
        collection: Collection,
        id: Uuid,
        changes: Document,
    ) -> StoreResult<Option<Record>>;
    /// Returns whether a document was removed.
    async fn delete_by_id(&self, collection: Collection, id: Uuid) -> StoreResult<bool>;
}
