//! Repositories for image and product records
//!
//! Each repository exposes get/put/next-id over one entity. Identifiers are
//! random UUIDs so that several instances can allocate without coordination.

pub mod image;
pub mod product;

pub use image::{ImageRepository, InMemoryImageRepository};
pub use product::{InMemoryProductRepository, ProductRepository};
