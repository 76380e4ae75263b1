//! Document-store adapters.

mod connection;
mod memory;

#[cfg(feature = "mongodb")]
mod document;
#[cfg(feature = "mongodb")]
mod mongo_repo;

pub use connection::MongoConfig;
pub use memory::{InMemoryAuthorRepository, InMemoryBlogRepository};

#[cfg(feature = "mongodb")]
pub use connection::MongoConnection;
#[cfg(feature = "mongodb")]
pub use mongo_repo::{MongoAuthorRepository, MongoBlogRepository};
