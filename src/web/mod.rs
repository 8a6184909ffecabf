//! Web server module
//!
//! Provides the HTTP API surface of the gateway.

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
