//! Configuration management for the Agriculture Assistant
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with AGRI_ prefix
//! 4. Conventional provider variables (DATABASE_URL, OPENAI_API_KEY, OPENWEATHER_API_KEY)

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Document store configuration
    pub database: DatabaseConfig,

    /// Weather API configuration
    pub weather: WeatherConfig,

    /// Language model API configuration
    pub llm: LlmConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

/// Which document store backs the API
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreDriver {
    Postgres,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub driver: StoreDriver,

    /// PostgreSQL connection URL
    #[serde(default)]
    pub url: Option<String>,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Weather API endpoint
    pub api_endpoint: String,

    /// Weather API key
    pub api_key: String,

    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LlmConfig {
    /// OpenAI-compatible API base, without the `/chat/completions` suffix
    pub api_endpoint: String,

    pub api_key: String,

    pub model: String,

    pub timeout_secs: u64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("AGRI_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 8001)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("database.driver", "postgres")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("weather.api_endpoint", "https://api.openweathermap.org/data/2.5")?
            .set_default("weather.timeout_secs", 10)?
            .set_default("llm.api_endpoint", "https://api.openai.com/v1")?
            .set_default("llm.model", "gpt-4o-mini")?
            .set_default("llm.timeout_secs", 60)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (AGRI_ prefix)
            .add_source(
                Environment::with_prefix("AGRI")
                    .separator("__")
                    .try_parsing(true),
            )
            // Conventional variable names win last
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("llm.api_key", std::env::var("OPENAI_API_KEY").ok())?
            .set_override_option("weather.api_key", std::env::var("OPENWEATHER_API_KEY").ok())?
            .build()?;

        let config: Config = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that deserialize but cannot work
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.weather.api_key.trim().is_empty() {
            return Err(ConfigError::Message("weather.api_key must be set".into()));
        }
        if self.llm.api_key.trim().is_empty() {
            return Err(ConfigError::Message("llm.api_key must be set".into()));
        }
        if self.database.driver == StoreDriver::Postgres
            && self.database.url.as_deref().map_or(true, |url| url.trim().is_empty())
        {
            return Err(ConfigError::Message(
                "database.url must be set when database.driver is postgres".into(),
            ));
        }
        Ok(())
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8001,
            host: "0.0.0.0".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Config {
        Config {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            database: DatabaseConfig {
                driver: StoreDriver::Memory,
                url: None,
                max_connections: 10,
                min_connections: 2,
            },
            weather: WeatherConfig {
                api_endpoint: "https://api.openweathermap.org/data/2.5".to_string(),
                api_key: "weather-key".to_string(),
                timeout_secs: 10,
            },
            llm: LlmConfig {
                api_endpoint: "https://api.openai.com/v1".to_string(),
                api_key: "llm-key".to_string(),
                model: "gpt-4o-mini".to_string(),
                timeout_secs: 60,
            },
        }
    }

    #[test]
    fn test_memory_driver_needs_no_url() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_postgres_driver_requires_url() {
        let mut config = sample();
        config.database.driver = StoreDriver::Postgres;
        assert!(config.validate().is_err());

        config.database.url = Some("postgres://localhost/agri".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_api_keys_required() {
        let mut config = sample();
        config.llm.api_key = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = sample();
        config.weather.api_key = String::new();
        assert!(config.validate().is_err());
    }
}
