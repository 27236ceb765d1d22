use crate::state::FrontState;
use axum::{extract::State, response::IntoResponse, Json};
use handoff_core::models::{AuthTokenRequest, AuthTokenResponse};
use handoff_core::AppError;
use handoff_infra::{ErrorResponse, HttpAppError, ValidatedJson};
use std::sync::Arc;
use validator::Validate;

/// Issue a bearer token for testing
///
/// Only mounted when `ISSUE_TEST_TOKENS` is enabled.
#[utoipa::path(
    post,
    path = "/auth/token",
    tag = "auth",
    request_body = AuthTokenRequest,
    responses(
        (status = 200, description = "Token issued", body = AuthTokenResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request), fields(subject = %request.subject, operation = "issue_test_token"))]
pub async fn issue_test_token(
    State(state): State<Arc<FrontState>>,
    ValidatedJson(request): ValidatedJson<AuthTokenRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    request.validate().map_err(AppError::from)?;

    let issued = state.jwt.issue(&request.subject)?;
    tracing::info!(expires_at = %issued.expires_at, "Test token issued");

    Ok(Json(issued))
}
