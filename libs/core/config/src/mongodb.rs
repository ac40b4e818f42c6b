use crate::{env_or_default, ConfigError, FromEnv};

/// MongoDB configuration
#[derive(Clone, Debug)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
}

impl MongoConfig {
    pub fn new(uri: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: database.into(),
        }
    }

    /// Get the MongoDB connection URI
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Get the database name
    pub fn database(&self) -> &str {
        &self.database
    }
}

impl FromEnv for MongoConfig {
    /// Reads MONGO_URI and MONGO_DB, both with local-development defaults
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            uri: env_or_default("MONGO_URI", "mongodb://localhost:27017"),
            database: env_or_default("MONGO_DB", "users"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mongo_config_from_env() {
        temp_env::with_vars(
            [
                ("MONGO_URI", Some("mongodb://mongo-host:27017")),
                ("MONGO_DB", Some("testdb")),
            ],
            || {
                let config = MongoConfig::from_env().unwrap();
                assert_eq!(config.uri(), "mongodb://mongo-host:27017");
                assert_eq!(config.database(), "testdb");
            },
        );
    }

    #[test]
    fn test_mongo_config_from_env_defaults() {
        temp_env::with_vars([("MONGO_URI", None::<&str>), ("MONGO_DB", None::<&str>)], || {
            let config = MongoConfig::from_env().unwrap();
            assert_eq!(config.uri(), "mongodb://localhost:27017");
            assert_eq!(config.database(), "users");
        });
    }

    #[test]
    fn test_mongo_config_new() {
        let config = MongoConfig::new("mongodb://prod-host:27017", "app");
        assert_eq!(config.uri(), "mongodb://prod-host:27017");
        assert_eq!(config.database(), "app");
    }
}
