//! Handoff Core Library
//!
//! This crate provides the domain models, error types, configuration and the
//! metadata signing contract shared by the broker and front services.

pub mod config;
pub mod error;
pub mod models;
pub mod signing;

// Re-export commonly used types
pub use config::{BaseConfig, BrokerConfig, FrontConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{ImageRecord, ProductRecord, UploadMetadata};
pub use signing::{MetadataSigner, Signature};
