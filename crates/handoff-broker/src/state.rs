//! Broker application state.

use handoff_core::MetadataSigner;
use handoff_db::ImageRepository;
use handoff_storage::ObjectStorage;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct BrokerState {
    pub signer: MetadataSigner,
    pub images: Arc<dyn ImageRepository>,
    pub storage: Arc<dyn ObjectStorage>,
    /// Validity window of issued upload URLs
    pub presign_expiry: Duration,
    /// Probe the object store before confirming an upload
    pub verify_object_exists: bool,
}
