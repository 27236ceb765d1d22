use crate::state::BrokerState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use handoff_core::models::VerifyResponse;
use handoff_core::AppError;
use handoff_infra::{ErrorResponse, HttpAppError};
use std::sync::Arc;
use uuid::Uuid;

/// Confirm an upload and report whether the image id is valid
///
/// Confirming the same id again is a no-op.
#[utoipa::path(
    get,
    path = "/verify/{id}",
    tag = "uploads",
    params(("id" = String, Path, description = "Image ID")),
    responses(
        (status = 200, description = "Image id known", body = VerifyResponse),
        (status = 404, description = "Unknown image id", body = ErrorResponse),
        (status = 500, description = "Object store failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "verify_upload"))]
pub async fn verify_upload(
    State(state): State<Arc<BrokerState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    let not_found = || AppError::NotFound(format!("Image not found: {}", id));

    let image_id = Uuid::parse_str(&id).map_err(|_| not_found())?;
    let record = state.images.get(image_id).await?.ok_or_else(not_found)?;

    if state.verify_object_exists && !record.uploaded {
        let present = state
            .storage
            .exists(&record.storage_key)
            .await
            .map_err(AppError::from)?;
        if !present {
            tracing::info!(image_id = %image_id, key = %record.storage_key, "Upload not found in object store");
            return Ok(Json(VerifyResponse { valid: false }));
        }
    }

    state
        .images
        .mark_uploaded(image_id)
        .await?
        .ok_or_else(not_found)?;

    tracing::info!(image_id = %image_id, "Upload confirmed");

    Ok(Json(VerifyResponse { valid: true }))
}
