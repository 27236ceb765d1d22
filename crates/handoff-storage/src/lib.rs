//! Handoff Storage Library
//!
//! Object-store access for the broker. The broker never moves file bytes
//! itself: it asks the store for a presigned PUT URL and, optionally, whether
//! an object exists.
//!
//! # Storage key format
//!
//! `uploads/{image_id}/{filename}`. Filenames must be a single path segment.
//! Key generation is centralized in the `keys` module.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use keys::upload_key;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{ObjectStorage, StorageError, StorageResult};
