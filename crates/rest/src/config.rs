//! Server configuration.
//!
//! Every setting can be given as a command line flag or through the
//! environment.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `ROOMKEEPER_SERVER_PORT` | 8080 | Server port |
//! | `ROOMKEEPER_SERVER_HOST` | 127.0.0.1 | Host to bind |
//! | `ROOMKEEPER_LOG_LEVEL` | info | Log level |
//! | `ROOMKEEPER_MAX_BODY_SIZE` | 1048576 | Max request body (bytes) |
//! | `ROOMKEEPER_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `ROOMKEEPER_ENABLE_CORS` | true | Enable CORS |
//! | `ROOMKEEPER_CORS_ORIGINS` | * | Allowed origins |
//! | `ROOMKEEPER_CORS_METHODS` | GET,POST,PUT,PATCH,DELETE,OPTIONS | Allowed methods |
//! | `ROOMKEEPER_CORS_HEADERS` | Content-Type,Authorization,Accept | Allowed headers |
//! | `ROOMKEEPER_BASE_URL` | http://localhost:8080 | Base URL for `Location` and `Link` headers |
//! | `ROOMKEEPER_DATABASE_URL` | roomkeeper.db | SQLite file, or `:memory:` |
//! | `ROOMKEEPER_DB_MAX_CONNECTIONS` | 10 | Connection pool size |
//! | `ROOMKEEPER_ENABLE_REQUEST_ID` | true | Set and propagate `x-request-id` |
//! | `ROOMKEEPER_DEFAULT_PAGE_SIZE` | 20 | Page size when `page` is given without `size` |
//! | `ROOMKEEPER_MAX_PAGE_SIZE` | 1000 | Upper bound for `size` |
//!
//! # Example
//!
//! ```rust
//! use roomkeeper_rest::ServerConfig;
//!
//! let config = ServerConfig {
//!     port: 3000,
//!     host: "0.0.0.0".to_string(),
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use clap::Parser;

/// Default SQLite file when no database URL is configured.
pub const DEFAULT_DATABASE_PATH: &str = "roomkeeper.db";

/// Server configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "roomkeeper")]
#[command(about = "Facility management REST server")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "ROOMKEEPER_SERVER_PORT", default_value = "8080")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "ROOMKEEPER_SERVER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "ROOMKEEPER_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Maximum request body size in bytes.
    #[arg(long, env = "ROOMKEEPER_MAX_BODY_SIZE", default_value = "1048576")]
    pub max_body_size: usize,

    /// Request timeout in seconds.
    #[arg(long, env = "ROOMKEEPER_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Enable CORS.
    #[arg(long, env = "ROOMKEEPER_ENABLE_CORS", default_value = "true", action = clap::ArgAction::Set)]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "ROOMKEEPER_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Allowed CORS methods (comma-separated, or * for all).
    #[arg(
        long,
        env = "ROOMKEEPER_CORS_METHODS",
        default_value = "GET,POST,PUT,PATCH,DELETE,OPTIONS"
    )]
    pub cors_methods: String,

    /// Allowed CORS headers (comma-separated, or * for all).
    #[arg(
        long,
        env = "ROOMKEEPER_CORS_HEADERS",
        default_value = "Content-Type,Authorization,Accept"
    )]
    pub cors_headers: String,

    /// Base URL for the server (used in Location and Link headers).
    #[arg(long, env = "ROOMKEEPER_BASE_URL", default_value = "http://localhost:8080")]
    pub base_url: String,

    /// SQLite database path, or `:memory:`.
    #[arg(long, env = "ROOMKEEPER_DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum pooled database connections.
    #[arg(long, env = "ROOMKEEPER_DB_MAX_CONNECTIONS", default_value = "10")]
    pub db_max_connections: u32,

    /// Enable request ID tracking.
    #[arg(long, env = "ROOMKEEPER_ENABLE_REQUEST_ID", default_value = "true", action = clap::ArgAction::Set)]
    pub enable_request_id: bool,

    /// Page size used when `page` is given without `size`.
    #[arg(long, env = "ROOMKEEPER_DEFAULT_PAGE_SIZE", default_value = "20")]
    pub default_page_size: u32,

    /// Maximum page size.
    #[arg(long, env = "ROOMKEEPER_MAX_PAGE_SIZE", default_value = "1000")]
    pub max_page_size: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            max_body_size: 1024 * 1024,
            request_timeout: 30,
            enable_cors: true,
            cors_origins: "*".to_string(),
            cors_methods: "GET,POST,PUT,PATCH,DELETE,OPTIONS".to_string(),
            cors_headers: "Content-Type,Authorization,Accept".to_string(),
            base_url: "http://localhost:8080".to_string(),
            database_url: None,
            db_max_connections: 10,
            enable_request_id: true,
            default_page_size: 20,
            max_page_size: 1000,
        }
    }
}

impl ServerConfig {
    /// Creates a configuration from environment variables alone, ignoring
    /// command line arguments that do not parse.
    pub fn from_env() -> Self {
        Self::try_parse_from(["roomkeeper"]).unwrap_or_default()
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the SQLite database path.
    pub fn database_path(&self) -> &str {
        self.database_url.as_deref().unwrap_or(DEFAULT_DATABASE_PATH)
    }

    /// Validates the configuration and returns every problem found.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.max_body_size == 0 {
            errors.push("Max body size cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if self.db_max_connections == 0 {
            errors.push("Database max connections cannot be 0".to_string());
        }

        if self.default_page_size == 0 {
            errors.push("Default page size cannot be 0".to_string());
        }

        if self.default_page_size > self.max_page_size {
            errors.push("Default page size cannot exceed max page size".to_string());
        }

        if let Err(e) = url::Url::parse(&self.base_url) {
            errors.push(format!("Invalid base URL '{}': {}", self.base_url, e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    pub fn for_testing() -> Self {
        Self {
            port: 0,
            host: "127.0.0.1".to_string(),
            log_level: "debug".to_string(),
            max_body_size: 1024 * 1024,
            request_timeout: 5,
            enable_cors: false,
            cors_origins: "*".to_string(),
            cors_methods: "*".to_string(),
            cors_headers: "*".to_string(),
            base_url: "http://localhost:8080".to_string(),
            database_url: Some(":memory:".to_string()),
            db_max_connections: 1,
            enable_request_id: false,
            default_page_size: 10,
            max_page_size: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "127.0.0.1");
        assert!(config.enable_cors);
        assert_eq!(config.database_path(), DEFAULT_DATABASE_PATH);
    }

    #[test]
    fn test_parse_flags() {
        let config = ServerConfig::try_parse_from([
            "roomkeeper",
            "--port",
            "9000",
            "--enable-cors",
            "false",
            "--database-url",
            ":memory:",
        ])
        .unwrap();
        assert_eq!(config.port, 9000);
        assert!(!config.enable_cors);
        assert_eq!(config.database_path(), ":memory:");
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig {
            port: 3000,
            host: "0.0.0.0".to_string(),
            ..Default::default()
        };
        assert_eq!(config.socket_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_validate_valid() {
        assert!(ServerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_collects_every_error() {
        let config = ServerConfig {
            port: 0,
            request_timeout: 0,
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().any(|e| e.contains("Port")));
        assert!(errors.iter().any(|e| e.contains("base URL")));
    }

    #[test]
    fn test_validate_invalid_page_sizes() {
        let config = ServerConfig {
            default_page_size: 100,
            max_page_size: 50,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_for_testing() {
        let config = ServerConfig::for_testing();
        assert_eq!(config.port, 0);
        assert!(!config.enable_cors);
        assert_eq!(config.database_path(), ":memory:");
    }
}
