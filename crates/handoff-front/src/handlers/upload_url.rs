use crate::auth::Claims;
use crate::state::FrontState;
use axum::{extract::State, response::IntoResponse, Extension, Json};
use handoff_core::models::{PresignedUrlRequest, UploadUrlRequest, UploadUrlResponse};
use handoff_core::AppError;
use handoff_infra::{ErrorResponse, HttpAppError, RequestId, ValidatedJson};
use std::sync::Arc;
use validator::Validate;

/// Request a presigned upload URL
///
/// The metadata is signed here and forwarded to the broker. The client then
/// PUTs the file bytes directly to `upload_url`.
#[utoipa::path(
    post,
    path = "/upload-url",
    tag = "uploads",
    request_body = UploadUrlRequest,
    responses(
        (status = 200, description = "Upload URL issued", body = UploadUrlResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 502, description = "Broker unavailable or rejected the request", body = ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
#[tracing::instrument(
    skip(state, claims, request_id, request),
    fields(
        request_id = %request_id.0,
        subject = %claims.sub,
        filename = %request.metadata.filename,
        size = request.metadata.size,
        operation = "request_upload_url"
    )
)]
pub async fn request_upload_url(
    State(state): State<Arc<FrontState>>,
    Extension(claims): Extension<Claims>,
    Extension(request_id): Extension<RequestId>,
    ValidatedJson(request): ValidatedJson<UploadUrlRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    request.metadata.validate().map_err(AppError::from)?;

    let signature = state.signer.sign(&request.metadata);
    let presigned = state
        .broker
        .request_upload_url(
            &PresignedUrlRequest {
                metadata: request.metadata,
                signature: signature.into_string(),
            },
            &request_id.0,
        )
        .await?;

    tracing::info!(image_id = %presigned.image_id, "Upload URL relayed");

    Ok(Json(UploadUrlResponse {
        upload_url: presigned.upload_url,
        image_id: presigned.image_id,
    }))
}
