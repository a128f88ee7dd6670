//! REST backend for charging stations and charging points with
//! password login and JWT-gated routes.

pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod resources;
pub mod state;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;

pub use app::{build_app, serve};
pub use config::AppConfig;
pub use state::AppState;
