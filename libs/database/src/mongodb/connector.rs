use mongodb::{options::ClientOptions, Client};
use std::time::Duration;
use tracing::info;

/// Error type for MongoDB operations
#[derive(Debug, thiserror::Error)]
pub enum MongoError {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
}

/// Connect to MongoDB and return a Client
///
/// # Arguments
/// * `uri` - MongoDB connection string (e.g., "mongodb://localhost:27017")
///
/// # Example
/// ```ignore
/// use database::mongodb::connect;
///
/// let client = connect("mongodb://localhost:27017").await?;
/// let db = client.database("users");
/// ```
pub async fn connect(uri: &str) -> Result<Client, MongoError> {
    info!("Attempting to connect to MongoDB at {}", uri);

    let mut options = ClientOptions::parse(uri).await?;

    // Set reasonable defaults
    options.max_pool_size = Some(100);
    options.min_pool_size = Some(5);
    options.connect_timeout = Some(Duration::from_secs(10));
    options.server_selection_timeout = Some(Duration::from_secs(30));

    let client = Client::with_options(options)?;

    // Verify connection by listing databases (lightweight ping)
    client
        .list_database_names()
        .await
        .map_err(|e| MongoError::ConnectionFailed(e.to_string()))?;

    info!("Successfully connected to MongoDB");
    Ok(client)
}

/// Connect using a MongoConfig
///
/// This is the recommended way to connect when using configuration.
///
/// # Example
/// ```ignore
/// use core_config::{mongodb::MongoConfig, FromEnv};
/// use database::mongodb::connect_from_config;
///
/// let config = MongoConfig::from_env()?;
/// let client = connect_from_config(&config).await?;
/// let db = client.database(config.database());
/// ```
#[cfg(feature = "config")]
pub async fn connect_from_config(
    config: &core_config::mongodb::MongoConfig,
) -> Result<Client, MongoError> {
    connect(config.uri()).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn test_connect() {
        let mongo_uri = std::env::var("MONGO_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());

        let result = connect(&mongo_uri).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_connect_rejects_malformed_uri() {
        let result = connect("not-a-mongodb-uri").await;
        assert!(matches!(result, Err(MongoError::Mongo(_))));
    }
}
