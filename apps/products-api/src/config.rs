//! Configuration for Products API

use core_config::{app_info, env_or_default, server::ServerConfig, AppInfo, FromEnv};
use database::mongodb::MongoConfig;
use domain_products::mongodb::DEFAULT_COLLECTION;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Collection holding product documents (`MONGODB_COLLECTION`)
    pub collection: String,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let app = app_info!();
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env()?.with_app_name(app.name);
        let server = ServerConfig::from_env()?;
        let collection = env_or_default("MONGODB_COLLECTION", DEFAULT_COLLECTION);

        Ok(Self {
            app,
            mongodb,
            server,
            environment,
            collection,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env_defaults() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", Some("mongodb://localhost:27017")),
                ("MONGODB_DATABASE", Some("shop")),
                ("MONGODB_COLLECTION", None),
                ("APP_ENV", None),
                ("PORT", None),
                ("CORS_ALLOWED_ORIGIN", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.server.port, 3000);
                assert_eq!(config.collection, "products");
                assert_eq!(config.environment, Environment::Development);
                assert_eq!(config.mongodb.database(), "shop");
                assert_eq!(config.mongodb.app_name.as_deref(), Some("products_api"));
                assert!(config.server.cors_allowed_origins.is_empty());
            },
        );
    }

    #[test]
    fn test_config_from_env_overrides() {
        temp_env::with_vars(
            [
                ("MONGO_URL", Some("mongodb://mongo:27017")),
                ("MONGODB_URL", None),
                ("MONGO_DATABASE", Some("catalog")),
                ("MONGODB_DATABASE", None),
                ("MONGODB_COLLECTION", Some("items")),
                ("APP_ENV", Some("production")),
                ("PORT", Some("8080")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.mongodb.url(), "mongodb://mongo:27017");
                assert_eq!(config.mongodb.database(), "catalog");
                assert_eq!(config.collection, "items");
                assert!(config.environment.is_production());
                assert_eq!(config.server.port, 8080);
            },
        );
    }

    #[test]
    fn test_config_accepts_mongoose_url() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", None::<&str>),
                ("MONGO_URL", None),
                ("MONGOOSE_URL", Some("mongodb://legacy:27017")),
                ("MONGODB_DATABASE", Some("shop")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.mongodb.url(), "mongodb://legacy:27017");
            },
        );
    }

    #[test]
    fn test_config_requires_mongodb_url() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", None::<&str>),
                ("MONGO_URL", None),
                ("MONGOOSE_URL", None),
                ("MONGODB_DATABASE", Some("shop")),
            ],
            || {
                let err = Config::from_env().unwrap_err();
                assert!(err.to_string().contains("MONGODB_URL"));
            },
        );
    }
}
