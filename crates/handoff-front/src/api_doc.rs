//! OpenAPI documentation.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::handlers;
use handoff_core::models;
use handoff_infra::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Handoff Front API",
        version = "0.1.0",
        description = "Client-facing API: request direct upload URLs and create products that reference uploaded images."
    ),
    paths(
        handlers::upload_url::request_upload_url,
        handlers::products::create_product,
        handlers::auth_token::issue_test_token,
        handlers::health::health_check,
    ),
    components(schemas(
        models::UploadMetadata,
        models::UploadUrlRequest,
        models::UploadUrlResponse,
        models::CreateProductRequest,
        models::ProductRecord,
        models::AuthTokenRequest,
        models::AuthTokenResponse,
        models::HealthResponse,
        ErrorResponse,
    )),
    tags(
        (name = "uploads", description = "Direct upload URLs"),
        (name = "products", description = "Product management"),
        (name = "auth", description = "Test token issuance"),
        (name = "health", description = "Health check")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Registers the `bearer_token` scheme referenced by the protected paths.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_token",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
