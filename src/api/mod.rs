//! HTTP API module for health, metrics, market, portfolio and wallet session endpoints.

pub mod handlers;
pub mod routes;

pub use handlers::{ApiError, AppState};
pub use routes::create_router;
