//! Handoff Infrastructure Library
//!
//! Shared HTTP plumbing for the broker and front services:
//! - Error rendering (`HttpAppError`, `ErrorResponse`, `ValidatedJson`)
//! - Middleware (request ID, CORS)
//! - Telemetry initialization
//! - Server startup with graceful shutdown

pub mod error;
pub mod middleware;
pub mod server;
pub mod telemetry;

pub use error::{ErrorResponse, HttpAppError, ValidatedJson};
pub use middleware::{cors_layer, request_id_middleware, RequestId, REQUEST_ID_HEADER};
pub use server::start_server;
pub use telemetry::init_telemetry;
