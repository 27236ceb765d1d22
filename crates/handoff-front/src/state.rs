//! Front application state.

use crate::auth::JwtAuth;
use crate::broker_client::BrokerClient;
use handoff_core::MetadataSigner;
use handoff_db::ProductRepository;
use std::sync::Arc;

#[derive(Clone)]
pub struct FrontState {
    pub signer: MetadataSigner,
    pub broker: Arc<dyn BrokerClient>,
    pub products: Arc<dyn ProductRepository>,
    pub jwt: Arc<JwtAuth>,
}
