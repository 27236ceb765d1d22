use crate::auth::jwt::JwtAuth;
use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use handoff_core::AppError;
use handoff_infra::HttpAppError;
use std::sync::Arc;

fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".to_string()))?
        .to_str()
        .map_err(|_| AppError::Unauthorized("Invalid authorization header".to_string()))?;

    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            AppError::Unauthorized("Invalid authorization header format. Use: Bearer <token>".to_string())
        })
}

/// Reject requests without a valid bearer token. Validated claims are added to
/// the request extensions.
pub async fn require_bearer(
    State(jwt): State<Arc<JwtAuth>>,
    mut request: Request,
    next: Next,
) -> Response {
    let claims = match bearer_token(request.headers()).and_then(|token| jwt.validate(token)) {
        Ok(claims) => claims,
        Err(e) => return HttpAppError(e).into_response(),
    };

    tracing::debug!(subject = %claims.sub, "Bearer token accepted");
    request.extensions_mut().insert(claims);

    next.run(request).await
}
