//! Handoff Front Library
//!
//! Client-facing service. It signs upload metadata for the broker, relays the
//! presigned upload URL, and creates products that reference confirmed images.

pub mod api_doc;
pub mod auth;
pub mod broker_client;
pub mod handlers;
pub mod setup;
pub mod state;

pub use broker_client::{BrokerClient, HttpBrokerClient};
pub use setup::routes::setup_routes;
pub use state::FrontState;
