//! Domain models and request/response bodies shared by both services.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// A filename must be a single path segment: non-empty, no `/`, `\` or NUL,
/// and not `.` or `..`.
pub fn validate_filename(filename: &str) -> Result<(), ValidationError> {
    let problem = if filename.is_empty() {
        "Filename is empty"
    } else if filename == "." || filename == ".." {
        "Filename must not be '.' or '..'"
    } else if filename.contains(['/', '\\', '\0']) {
        "Filename must not contain path separators or NUL"
    } else {
        return Ok(());
    };
    Err(ValidationError::new("filename").with_message(Cow::Borrowed(problem)))
}

/// The signed payload: what the front service vouches for and the broker trusts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, Validate)]
pub struct UploadMetadata {
    /// Original filename
    #[validate(length(
        min = 1,
        max = 255,
        message = "Filename must be between 1 and 255 characters"
    ))]
    #[validate(custom(function = "validate_filename"))]
    pub filename: String,
    /// File size in bytes
    #[validate(range(min = 1, message = "File size must be at least 1 byte"))]
    pub size: i64,
    /// Content type (MIME type)
    #[validate(length(
        min = 1,
        max = 255,
        message = "Content type must be between 1 and 255 characters"
    ))]
    pub content_type: String,
}

impl UploadMetadata {
    pub fn new(filename: impl Into<String>, size: i64, content_type: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            size,
            content_type: content_type.into(),
        }
    }
}

/// Image record owned by the broker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    pub id: Uuid,
    pub metadata: UploadMetadata,
    pub signature: String,
    pub storage_key: String,
    pub uploaded: bool,
    pub created_at: DateTime<Utc>,
}

/// Product record owned by the front service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductRecord {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub image_id: String,
    pub price: f64,
    #[serde(skip)]
    pub created_at: DateTime<Utc>,
}

// ----- Broker bodies -----

/// Request to issue a presigned upload URL for signed metadata
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PresignedUrlRequest {
    #[serde(flatten)]
    pub metadata: UploadMetadata,
    /// Hex HMAC-SHA256 of the canonical metadata string
    pub signature: String,
}

/// Presigned upload URL and the identifier assigned to the image
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PresignedUrlResponse {
    pub upload_url: String,
    pub image_id: Uuid,
    /// URL expiration time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Result of an upload confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct VerifyResponse {
    pub valid: bool,
}

// ----- Front bodies -----

/// Client request for an upload URL (unsigned; the front service signs it)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadUrlRequest {
    #[serde(flatten)]
    pub metadata: UploadMetadata,
}

/// Upload URL relayed back to the client
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadUrlResponse {
    pub upload_url: String,
    pub image_id: Uuid,
}

/// Request to create a product referencing an uploaded image
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateProductRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 4096, message = "Description must be at most 4096 characters"))]
    pub description: String,
    #[validate(length(min = 1, message = "Image ID is required"))]
    pub image_id: String,
    #[validate(range(
        min = 0.0,
        max = 1_000_000_000.0,
        message = "Price must be between 0 and 1000000000"
    ))]
    pub price: f64,
}

fn default_subject() -> String {
    "test-user".to_string()
}

/// Request for a short-lived bearer token (test environments only)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct AuthTokenRequest {
    #[serde(default = "default_subject")]
    #[validate(length(
        min = 1,
        max = 255,
        message = "Subject must be between 1 and 255 characters"
    ))]
    pub subject: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthTokenResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Health check body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}
