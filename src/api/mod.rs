//! HTTP front end for the predictor.
//!
//! The router is composable: `api_router()` returns a `Router` that can
//! be mounted on any axum server instance. `start_server()` binds it and
//! hands back a shutdown handle.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use error::ApiError;
pub use router::api_router;
pub use server::{start_server, ServerError, ServerHandle, ServerSession};
pub use types::ApiContext;
