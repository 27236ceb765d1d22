use handoff_core::{FrontConfig, MetadataSigner};
use handoff_db::InMemoryProductRepository;
use handoff_front::auth::JwtAuth;
use handoff_front::{setup_routes, FrontState, HttpBrokerClient};
use handoff_infra::{init_telemetry, start_server};
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = FrontConfig::from_env()?;

    init_telemetry(
        "handoff=debug,handoff_front=debug,tower_http=debug",
        config.base.is_production(),
    );
    tracing::info!(config = ?config, "Front configuration loaded");

    if config.base.is_production() && config.issue_test_tokens {
        tracing::warn!("ISSUE_TEST_TOKENS is enabled in production; /auth/token is publicly reachable");
    }

    let broker = HttpBrokerClient::new(
        &config.broker_url,
        Duration::from_secs(config.broker_timeout_secs),
    )?;

    let state = Arc::new(FrontState {
        signer: MetadataSigner::new(config.base.signing_secret.as_bytes()),
        broker: Arc::new(broker),
        products: Arc::new(InMemoryProductRepository::new()),
        jwt: Arc::new(JwtAuth::new(&config.jwt_secret, config.jwt_expiry_hours)),
    });

    let router = setup_routes(&config, state)?;

    start_server("handoff-front", config.base.server_port, router).await
}
