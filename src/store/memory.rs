use std::collections::HashMap;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::{
    Collection, Document, DocumentStore, NewUser, Record, StoreError, StoreResult, User,
    UserStore,
};

/// Process-local store for development and tests. Data is lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    documents: RwLock<HashMap<Collection, HashMap<Uuid, Record>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self, collection: Collection) -> usize {
        self.documents
            .read()
            .await
            .get(&collection)
            .map_or(0, HashMap::len)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, user: NewUser) -> StoreResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(StoreError::Duplicate("email".into()));
        }
        let user = User {
            id: Uuid::new_v4(),
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            created_at: OffsetDateTime::now_utc(),
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, collection: Collection, doc: Document) -> StoreResult<Record> {
        let record = Record {
            id: Uuid::new_v4(),
            created_at: OffsetDateTime::now_utc(),
            doc,
        };
        self.documents
            .write()
            .await
            .entry(collection)
            .or_default()
            .insert(record.id, record.clone());
        debug!(%collection, id = %record.id, "document inserted in memory");
        Ok(record)
    }

    async fn find_all(&self, collection: Collection) -> StoreResult<Vec<Record>> {
        let documents = self.documents.read().await;
        let mut records: Vec<Record> = documents
            .get(&collection)
            .map(|c| c.values().cloned().collect())
            .unwrap_or_default();
        records.sort_by_key(|r| r.created_at);
        Ok(records)
    }

    async fn find_by_id(&self, collection: Collection, id: Uuid) -> StoreResult<Option<Record>> {
        let documents = self.documents.read().await;
        Ok(documents.get(&collection).and_then(|c| c.get(&id)).cloned())
    }

    async fn update_by_id(
        &self,
        collection: Collection,
        id: Uuid,
        changes: Document,
    ) -> StoreResult<Option<Record>> {
        let mut documents = self.documents.write().await;
        let Some(record) = documents.get_mut(&collection).and_then(|c| c.get_mut(&id)) else {
            return Ok(None);
        };
        record.doc.extend(changes);
        Ok(Some(record.clone()))
    }

    async fn delete_by_id(&self, collection: Collection, id: Uuid) -> StoreResult<bool> {
        let mut documents = self.documents.write().await;
        Ok(documents
            .get_mut(&collection)
            .and_then(|c| c.remove(&id))
            .is_some())
    }
}
