use anyhow::Context;
use handoff_broker::{setup_routes, BrokerState};
use handoff_core::{BrokerConfig, MetadataSigner};
use handoff_db::InMemoryImageRepository;
use handoff_infra::{init_telemetry, start_server};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = BrokerConfig::from_env()?;

    init_telemetry(
        "handoff=debug,handoff_broker=debug,tower_http=debug",
        config.base.is_production(),
    );
    tracing::info!(config = ?config, "Broker configuration loaded");

    let storage = handoff_storage::create_storage(&config)
        .await
        .context("Failed to initialize object storage")?;

    let state = Arc::new(BrokerState {
        signer: MetadataSigner::new(config.base.signing_secret.as_bytes()),
        images: Arc::new(InMemoryImageRepository::new()),
        storage,
        presign_expiry: config.presign_expiry(),
        verify_object_exists: config.verify_object_exists,
    });

    let router = setup_routes(&config.base, state)?;

    start_server("handoff-broker", config.base.server_port, router).await
}
