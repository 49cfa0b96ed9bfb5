//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honored for local runs.

use std::env;
use std::path::PathBuf;

use crate::models::Location;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// JSON file holding persisted workouts
    pub data_file: PathBuf,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Where workouts are pinned when no map position is known
    pub fallback_location: Location,
}

impl Config {
    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            port: 8080,
            data_file: PathBuf::from("data/test-workouts.json"),
            frontend_url: "http://localhost:5173".to_string(),
            fallback_location: Location::new(42.0, 42.0),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            data_file: env::var("DATA_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/workouts.json")),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            fallback_location: Location::new(
                coordinate_from_env("FALLBACK_LAT", 42.0)?,
                coordinate_from_env("FALLBACK_LNG", 42.0)?,
            ),
        })
    }
}

/// Read a coordinate, defaulting when unset. A set but unparsable value is
/// an error.
fn coordinate_from_env(name: &'static str, default: f64) -> Result<f64, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ConfigError::Invalid(name, raw.clone())),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("PORT", "9090");
        env::set_var("DATA_FILE", "/tmp/workouts-test.json");
        env::set_var("FALLBACK_LAT", "37.5");
        env::remove_var("FALLBACK_LNG");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.port, 9090);
        assert_eq!(config.data_file, PathBuf::from("/tmp/workouts-test.json"));
        assert_eq!(config.fallback_location, Location::new(37.5, 42.0));

        env::set_var("FALLBACK_LNG", "east");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid("FALLBACK_LNG", _))
        ));
        env::remove_var("FALLBACK_LNG");
    }
}
