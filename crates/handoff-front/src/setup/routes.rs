use crate::api_doc::ApiDoc;
use crate::auth::require_bearer;
use crate::handlers;
use crate::state::FrontState;
use axum::{
    routing::{get, post},
    Json, Router,
};
use handoff_core::FrontConfig;
use handoff_infra::{cors_layer, request_id_middleware};
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

/// Build the front router.
pub fn setup_routes(config: &FrontConfig, state: Arc<FrontState>) -> Result<Router, anyhow::Error> {
    let cors = cors_layer(&config.base.cors_origins)?;

    // Protected routes (require a bearer token)
    let protected_routes = Router::new()
        .route(
            "/upload-url",
            post(handlers::upload_url::request_upload_url),
        )
        .route("/products", post(handlers::products::create_product))
        .route_layer(axum::middleware::from_fn_with_state(
            state.jwt.clone(),
            require_bearer,
        ));

    let mut public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/api/openapi.json", get(|| async { Json(ApiDoc::openapi()) }));

    if config.issue_test_tokens {
        tracing::info!("Test token endpoint enabled at /auth/token");
        public_routes = public_routes.route(
            "/auth/token",
            post(handlers::auth_token::issue_test_token),
        );
    }

    let app = public_routes
        .merge(protected_routes)
        .with_state(state)
        .merge(utoipa_rapidoc::RapiDoc::new("/api/openapi.json").path("/docs"))
        .layer(RequestBodyLimitLayer::new(config.base.max_body_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(request_id_middleware));

    Ok(app)
}
