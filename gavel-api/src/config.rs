//! API Configuration Module
//!
//! CORS and listener settings. Configuration is loaded from environment
//! variables with sensible defaults for development.

use std::net::SocketAddr;

use crate::error::{ApiError, ApiResult};

// ============================================================================
// API CONFIGURATION
// ============================================================================

/// API configuration for CORS and the listening socket.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Allowed CORS origins (comma-separated in env var).
    /// Empty means allow all origins (dev mode).
    pub cors_origins: Vec<String>,

    /// Max age for CORS preflight cache in seconds.
    pub cors_max_age_secs: u64,

    /// Interface to bind.
    pub bind_host: String,

    /// Port to bind.
    pub port: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            cors_origins: Vec::new(),
            cors_max_age_secs: 86400,
            bind_host: "0.0.0.0".to_string(),
            port: "3000".to_string(),
        }
    }
}

impl ApiConfig {
    /// Create ApiConfig from environment variables.
    ///
    /// Environment variables:
    /// - `GAVEL_CORS_ORIGINS`: Comma-separated allowed origins (empty = allow all)
    /// - `GAVEL_CORS_MAX_AGE_SECS`: Preflight cache duration (default: 86400)
    /// - `GAVEL_API_BIND`: Interface to bind (default: 0.0.0.0)
    /// - `PORT` or `GAVEL_API_PORT`: Port to bind (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let cors_origins = std::env::var("GAVEL_CORS_ORIGINS")
            .ok()
            .map(|s| parse_origins(&s))
            .unwrap_or_default();

        let cors_max_age_secs = std::env::var("GAVEL_CORS_MAX_AGE_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.cors_max_age_secs);

        let bind_host = std::env::var("GAVEL_API_BIND").unwrap_or(defaults.bind_host);
        let port = std::env::var("PORT")
            .ok()
            .or_else(|| std::env::var("GAVEL_API_PORT").ok())
            .unwrap_or(defaults.port);

        Self {
            cors_origins,
            cors_max_age_secs,
            bind_host,
            port,
        }
    }

    /// Check if a given origin is allowed.
    pub fn is_origin_allowed(&self, origin: &str) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o == origin)
    }

    /// Socket address to listen on.
    pub fn bind_addr(&self) -> ApiResult<SocketAddr> {
        let port = self.port.trim().parse::<u16>().map_err(|_| {
            ApiError::invalid_input(format!("Invalid port value: {}", self.port))
        })?;

        let addr = format!("{}:{}", self.bind_host, port);
        addr.parse::<SocketAddr>().map_err(|e| {
            ApiError::invalid_input(format!("Invalid bind address {}: {}", addr, e))
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();
        assert!(config.cors_origins.is_empty());
        assert_eq!(config.cors_max_age_secs, 86400);
        assert_eq!(config.bind_addr().ok(), "0.0.0.0:3000".parse().ok());
    }

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins(" http://localhost:5173 ,,https://gavel.example "),
            vec!["http://localhost:5173", "https://gavel.example"]
        );
        assert!(parse_origins("").is_empty());
    }

    #[test]
    fn test_origin_allowed() {
        let mut config = ApiConfig::default();
        assert!(config.is_origin_allowed("http://anything.test"));

        config.cors_origins = vec!["http://localhost:5173".to_string()];
        assert!(config.is_origin_allowed("http://localhost:5173"));
        assert!(!config.is_origin_allowed("http://evil.test"));
    }

    #[test]
    fn test_bind_addr_rejects_bad_values() {
        let config = ApiConfig {
            port: "eighty".to_string(),
            ..ApiConfig::default()
        };
        assert!(config.bind_addr().is_err());

        let config = ApiConfig {
            bind_host: "not a host".to_string(),
            ..ApiConfig::default()
        };
        assert!(config.bind_addr().is_err());
    }
}
