//! Record stores for the broker and front services.
//!
//! Services depend on the repository traits only; the in-memory implementations
//! are what the binaries wire in today and what the tests use.

pub mod db;

pub use db::{
    ImageRepository, InMemoryImageRepository, InMemoryProductRepository, ProductRepository,
};
