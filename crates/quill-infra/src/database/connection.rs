//! Document-store connection management.

#[cfg(feature = "mongodb")]
use mongodb::{Client, Database, bson::doc, error::Error as MongoError};

/// Configuration for the document store.
#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub url: String,
    pub database: String,
}

/// Connection handle to the document store.
///
/// The driver maintains its own connection pool; one handle is shared across
/// all repositories.
#[cfg(feature = "mongodb")]
pub struct MongoConnection {
    pub db: Database,
}

#[cfg(feature = "mongodb")]
impl MongoConnection {
    /// Connect to the document store and verify the connection.
    pub async fn init(config: &MongoConfig) -> Result<Self, MongoError> {
        tracing::info!("Connecting to document store...");

        let client = Client::with_uri_str(&config.url).await?;
        let db = client.database(&config.database);

        // Round-trip a ping so a bad URL fails at startup, not on the first
        // request.
        db.run_command(doc! { "ping": 1 }).await?;

        tracing::info!(database = %config.database, "Document store connected");

        Ok(Self { db })
    }
}
