//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::handlers;
use handoff_core::models;
use handoff_infra::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Handoff Broker API",
        version = "0.1.0",
        description = "Issues presigned object store upload URLs for signed metadata and confirms uploads."
    ),
    paths(
        handlers::presigned_url::issue_presigned_url,
        handlers::verify::verify_upload,
        handlers::health::health_check,
    ),
    components(schemas(
        models::UploadMetadata,
        models::PresignedUrlRequest,
        models::PresignedUrlResponse,
        models::VerifyResponse,
        models::HealthResponse,
        ErrorResponse,
    )),
    tags(
        (name = "uploads", description = "Upload URL issuance and confirmation"),
        (name = "health", description = "Health check")
    )
)]
pub struct ApiDoc;
