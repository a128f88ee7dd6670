use std::sync::Arc;

use crate::config::AppConfig;
use crate::store::{DocumentStore, MemoryStore, PgStore, UserStore};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: Arc<dyn UserStore>,
    pub records: Arc<dyn DocumentStore>,
}

impl AppState {
    pub fn from_parts(
        config: Arc<AppConfig>,
        users: Arc<dyn UserStore>,
        records: Arc<dyn DocumentStore>,
    ) -> Self {
        Self {
            config,
            users,
            records,
        }
    }

    pub fn with_postgres(config: Arc<AppConfig>, store: PgStore) -> Self {
        let store = Arc::new(store);
        Self::from_parts(config, store.clone(), store)
    }

    pub fn in_memory(config: AppConfig) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::from_parts(Arc::new(config), store.clone(), store)
    }
}
