//! Generic CRUD over document-backed resources.
//!
//! A resource type names its collection, its route prefix, and two body
//! schemas: `New` for creation and `Changes` for partial updates. The
//! handlers in [`handlers`] are written once against [`Resource`] and
//! instantiated per type by [`routes`].

pub mod handlers;
pub mod point;
pub mod station;

pub use point::ChargingPoint;
pub use station::ChargingStation;

use axum::{middleware, routing::get, Router};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use validator::Validate;

use crate::{
    auth::require_auth,
    state::AppState,
    store::{Collection, Document, Record},
};

pub trait Resource: Serialize + DeserializeOwned + Send + Sync + 'static {
    const COLLECTION: Collection;
    /// Route prefix under `/api`.
    const PATH: &'static str;
    const NOT_FOUND: &'static str;
    const DELETED: &'static str;

    type New: Serialize + DeserializeOwned + Validate + Send + 'static;
    /// Every field optional; absent fields are left untouched on update.
    type Changes: Serialize + DeserializeOwned + Validate + Send + 'static;

    /// Builds the response shape from a stored record, exposing the store's
    /// `id` and `createdAt` alongside the document fields.
    fn from_record(record: Record) -> anyhow::Result<Self> {
        let Record { id, created_at, mut doc } = record;
        doc.insert("id".into(), Value::String(id.to_string()));
        doc.insert("createdAt".into(), Value::String(created_at.format(&Rfc3339)?));
        Ok(serde_json::from_value(Value::Object(doc))?)
    }
}

/// Serializes a body into the document form kept by the store.
pub fn to_document<T: Serialize>(body: &T) -> anyhow::Result<Document> {
    match serde_json::to_value(body)? {
        Value::Object(doc) => Ok(doc),
        other => anyhow::bail!("expected a JSON object, got {other}"),
    }
}

pub fn routes<R: Resource>(state: &AppState, protected: bool) -> Router<AppState> {
    let item = format!("{}/:id", R::PATH);
    let router = Router::new()
        .route(
            R::PATH,
            get(handlers::list::<R>).post(handlers::create::<R>),
        )
        .route(
            &item,
            get(handlers::get::<R>)
                .put(handlers::update::<R>)
                .delete(handlers::delete::<R>),
        );

    if protected {
        router.route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
    } else {
        router
    }
}
