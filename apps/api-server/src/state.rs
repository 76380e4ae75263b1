//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{AuthorRepository, BlogRepository};
use quill_infra::{InMemoryAuthorRepository, InMemoryBlogRepository, MongoConfig};

#[cfg(feature = "mongodb")]
use quill_infra::{MongoAuthorRepository, MongoBlogRepository, MongoConnection};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub blogs: Arc<dyn BlogRepository>,
    pub authors: Arc<dyn AuthorRepository>,
    /// Which storage backend the repositories are running against.
    pub storage: &'static str,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: Option<&MongoConfig>) -> Self {
        #[cfg(feature = "mongodb")]
        {
            if let Some(config) = db_config {
                match MongoConnection::init(config).await {
                    Ok(conn) => {
                        tracing::info!("Application state initialized (document store)");
                        return Self {
                            blogs: Arc::new(MongoBlogRepository::new(&conn)),
                            authors: Arc::new(MongoAuthorRepository::new(&conn)),
                            storage: "document-store",
                        };
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to document store: {}. Using in-memory fallback.",
                            e
                        );
                    }
                }
            } else {
                tracing::warn!("MONGODB_URL not set. Running without database (in-memory mode).");
            }
        }

        #[cfg(not(feature = "mongodb"))]
        {
            let _ = db_config;
            tracing::info!("Running without the mongodb feature - using in-memory repositories");
        }

        tracing::info!("Application state initialized (in-memory)");
        Self::in_memory()
    }

    /// State backed purely by the in-memory adapters. The fallback when no
    /// database is configured, and the fixture for handler tests.
    pub fn in_memory() -> Self {
        Self {
            blogs: Arc::new(InMemoryBlogRepository::new()),
            authors: Arc::new(InMemoryAuthorRepository::new()),
            storage: "in-memory",
        }
    }
}
