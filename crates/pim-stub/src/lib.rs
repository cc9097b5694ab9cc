//! # pim-stub — Imperium PIM API Stub
//!
//! In-memory implementation of the whitelisted methods `pim-client` calls,
//! speaking the same `{message}` / `{exc}` envelope as the real server.
//! Storage is DashMap-backed with no persistence; data is lost on restart.

pub mod error;
pub mod routes;
pub mod seed;
pub mod store;

use axum::Router;
use tower_http::trace::TraceLayer;

pub use error::AppError;
pub use store::AppState;

/// The stub application: all routes plus request tracing.
pub fn app(state: AppState) -> Router {
    routes::router(state).layer(TraceLayer::new_for_http())
}
