//! Handoff Broker Library
//!
//! The broker holds the object store credentials. It turns signed upload
//! metadata into presigned PUT URLs and confirms uploads by image id.

pub mod api_doc;
pub mod handlers;
pub mod setup;
pub mod state;

pub use setup::routes::setup_routes;
pub use state::BrokerState;
