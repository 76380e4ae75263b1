//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`.
//! This crate contains the document-store adapters.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `mongodb` - MongoDB-backed repositories

pub mod database;

// Re-exports - In-Memory
pub use database::{InMemoryAuthorRepository, InMemoryBlogRepository};

pub use database::MongoConfig;

// Re-exports - MongoDB
#[cfg(feature = "mongodb")]
pub use database::{MongoAuthorRepository, MongoBlogRepository, MongoConnection};
