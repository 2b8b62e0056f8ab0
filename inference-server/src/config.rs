//! Configuration module

use std::env;
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Serialized classifier artifact
    pub model_path: PathBuf,

    /// Allowed CORS origins; empty or containing "*" means allow all
    pub cors_origins: Vec<String>,

    /// Bind address
    pub host: IpAddr,

    /// Server port
    pub port: u16,

    /// Retry with named columns when vector invocation fails
    pub tabular_fallback: bool,

    pub log_format: LogFormat,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            model_path: lookup("MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("autism_model.json")),

            cors_origins: parse_origins(&lookup("CORS_ORIGINS").unwrap_or_else(|| "*".to_string())),

            host: lookup("HOST")
                .and_then(|h| h.parse().ok())
                .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),

            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),

            tabular_fallback: lookup("TABULAR_FALLBACK")
                .and_then(|v| parse_bool(&v))
                .unwrap_or(true),

            log_format: match lookup("LOG_FORMAT").as_deref() {
                Some("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },

            environment: lookup("ENVIRONMENT")
                .unwrap_or_else(|| "development".to_string()),
        }
    }

    /// True when every origin is allowed
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o == "*")
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

/// Split a comma-separated origin list, dropping blanks
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.model_path, PathBuf::from("autism_model.json"));
        assert_eq!(config.port, 8000);
        assert!(config.allows_any_origin());
        assert!(config.tabular_fallback);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(!config.is_production());
    }

    #[test]
    fn test_origin_list() {
        let config = config(&[("CORS_ORIGINS", " http://localhost:5173 , ,https://screening.example.org")]);
        assert_eq!(
            config.cors_origins,
            vec!["http://localhost:5173", "https://screening.example.org"]
        );
        assert!(!config.allows_any_origin());
    }

    #[test]
    fn test_wildcard_or_blank_origins_allow_all() {
        assert!(config(&[("CORS_ORIGINS", "")]).allows_any_origin());
        assert!(config(&[("CORS_ORIGINS", " , ")]).allows_any_origin());
        assert!(config(&[("CORS_ORIGINS", "http://a.test,*")]).allows_any_origin());
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("MODEL_PATH", "/models/asd.json"),
            ("PORT", "9090"),
            ("HOST", "127.0.0.1"),
            ("TABULAR_FALLBACK", "off"),
            ("LOG_FORMAT", "json"),
        ]);
        assert_eq!(config.model_path, PathBuf::from("/models/asd.json"));
        assert_eq!(config.port, 9090);
        assert_eq!(config.host, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert!(!config.tabular_fallback);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_bad_values_fall_back_to_defaults() {
        let config = config(&[("PORT", "eighty"), ("TABULAR_FALLBACK", "maybe")]);
        assert_eq!(config.port, 8000);
        assert!(config.tabular_fallback);
    }
}
