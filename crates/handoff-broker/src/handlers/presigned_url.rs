use crate::state::BrokerState;
use axum::{extract::State, response::IntoResponse, Json};
use chrono::Utc;
use handoff_core::models::{PresignedUrlRequest, PresignedUrlResponse};
use handoff_core::{AppError, ImageRecord};
use handoff_infra::{ErrorResponse, HttpAppError, ValidatedJson};
use handoff_storage::upload_key;
use std::sync::Arc;
use validator::Validate;

/// Issue a presigned upload URL for signed metadata
///
/// The signature must be the hex HMAC-SHA256 of `filename:size:content_type`
/// under the shared secret. Nothing is recorded unless the URL was issued.
#[utoipa::path(
    post,
    path = "/presigned-url",
    tag = "uploads",
    request_body = PresignedUrlRequest,
    responses(
        (status = 200, description = "Presigned URL generated", body = PresignedUrlResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Invalid signature", body = ErrorResponse),
        (status = 500, description = "Object store failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, request),
    fields(
        filename = %request.metadata.filename,
        size = request.metadata.size,
        content_type = %request.metadata.content_type,
        operation = "issue_presigned_url"
    )
)]
pub async fn issue_presigned_url(
    State(state): State<Arc<BrokerState>>,
    ValidatedJson(request): ValidatedJson<PresignedUrlRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    request.metadata.validate().map_err(AppError::from)?;

    if !state.signer.verify(&request.metadata, &request.signature) {
        tracing::warn!("Rejected upload metadata with invalid signature");
        return Err(AppError::Unauthorized("Invalid signature".to_string()).into());
    }

    let image_id = state.images.next_id().await?;
    let storage_key = upload_key(image_id, &request.metadata.filename).map_err(AppError::from)?;

    let upload_url = state
        .storage
        .presigned_put_url(
            &storage_key,
            &request.metadata.content_type,
            state.presign_expiry,
        )
        .await
        .map_err(AppError::from)?;

    let now = Utc::now();
    let expires_at = chrono::Duration::from_std(state.presign_expiry)
        .ok()
        .map(|window| now + window);

    state
        .images
        .insert(ImageRecord {
            id: image_id,
            metadata: request.metadata,
            signature: request.signature,
            storage_key: storage_key.clone(),
            uploaded: false,
            created_at: now,
        })
        .await?;

    tracing::info!(
        image_id = %image_id,
        key = %storage_key,
        expires_in_secs = state.presign_expiry.as_secs(),
        "Presigned upload URL issued"
    );

    Ok(Json(PresignedUrlResponse {
        upload_url,
        image_id,
        expires_at,
    }))
}
