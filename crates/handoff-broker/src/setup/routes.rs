use crate::api_doc::ApiDoc;
use crate::handlers;
use crate::state::BrokerState;
use axum::{
    routing::{get, post},
    Json, Router,
};
use handoff_core::BaseConfig;
use handoff_infra::{cors_layer, request_id_middleware};
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

/// Build the broker router.
pub fn setup_routes(config: &BaseConfig, state: Arc<BrokerState>) -> Result<Router, anyhow::Error> {
    let cors = cors_layer(&config.cors_origins)?;

    let app = Router::new()
        .route(
            "/presigned-url",
            post(handlers::presigned_url::issue_presigned_url),
        )
        .route("/verify/{id}", get(handlers::verify::verify_upload))
        .route("/health", get(handlers::health::health_check))
        .route("/api/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .with_state(state)
        .merge(utoipa_rapidoc::RapiDoc::new("/api/openapi.json").path("/docs"))
        .layer(RequestBodyLimitLayer::new(config.max_body_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(request_id_middleware));

    Ok(app)
}
