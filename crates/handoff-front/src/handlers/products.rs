use crate::auth::Claims;
use crate::state::FrontState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension, Json};
use chrono::Utc;
use handoff_core::models::CreateProductRequest;
use handoff_core::{AppError, ProductRecord};
use handoff_infra::{ErrorResponse, HttpAppError, RequestId, ValidatedJson};
use std::sync::Arc;
use validator::Validate;

/// Create a product referencing an uploaded image
///
/// The image id is confirmed with the broker first. Any failure to confirm it
/// is reported as an invalid image id.
#[utoipa::path(
    post,
    path = "/products",
    tag = "products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductRecord),
        (status = 400, description = "Invalid input or image id", body = ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
#[tracing::instrument(
    skip(state, claims, request_id, request),
    fields(
        request_id = %request_id.0,
        subject = %claims.sub,
        image_id = %request.image_id,
        operation = "create_product"
    )
)]
pub async fn create_product(
    State(state): State<Arc<FrontState>>,
    Extension(claims): Extension<Claims>,
    Extension(request_id): Extension<RequestId>,
    ValidatedJson(request): ValidatedJson<CreateProductRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    request.validate().map_err(AppError::from)?;

    match state
        .broker
        .verify_image(&request.image_id, &request_id.0)
        .await
    {
        Ok(true) => {}
        Ok(false) => {
            tracing::info!("Broker reported image as not uploaded");
            return Err(AppError::InvalidReference("Invalid image ID".to_string()).into());
        }
        Err(e) => {
            tracing::info!(error = %e, "Image verification failed");
            return Err(AppError::InvalidReference("Invalid image ID".to_string()).into());
        }
    }

    let product = ProductRecord {
        id: state.products.next_id().await?,
        name: request.name,
        description: request.description,
        image_id: request.image_id,
        price: request.price,
        created_at: Utc::now(),
    };
    state.products.insert(product.clone()).await?;

    tracing::info!(product_id = %product.id, "Product created");

    Ok((StatusCode::CREATED, Json(product)))
}
