//! Configuration loading and constants.
//!
//! Loads the service configuration from a TOML file and defines defaults for
//! the HTTP listener, TLS, logging and the published API metadata. Every
//! section is optional so an empty file (or no file at all) yields a working
//! plain-HTTP liveness service. `AppConfig` is the root configuration struct.

use const_format::formatcp;
use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;

// =============================================================================
// HTTP Response Headers
// =============================================================================

/// Liveness answers must never be served from an intermediary cache.
pub const CACHE_CONTROL_HEALTH: &str = "no-store";

/// Header carrying the per-request correlation ID.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest client-supplied request ID that is propagated as-is.
pub const REQUEST_ID_MAX_LEN: usize = 128;

// =============================================================================
// Routes
// =============================================================================

pub const HEALTH_PATH: &str = "/health";

pub const OPENAPI_PATH: &str = "/openapi.json";

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Default log filter when neither --log-level nor RUST_LOG is set
pub const DEFAULT_LOG_FILTER: &str =
    formatcp!("{}=debug,tower_http=debug", env!("CARGO_CRATE_NAME"));

/// Title published in the OpenAPI document
pub const DEFAULT_TITLE: &str = "U Can AI - Pilot MVP";

pub const DEFAULT_HTTP_HOST: &str = "0.0.0.0";

pub const DEFAULT_HTTP_PORT: u16 = 8000;

/// Seconds to wait for in-flight connections after SIGTERM/SIGINT
pub const DEFAULT_SHUTDOWN_GRACE_SECS: u64 = 30;

pub const DEFAULT_REDIRECT_PORT: u16 = 80;

/// Version string reported in the OpenAPI document
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server configuration
    pub http: HttpServerConfig,
    /// Published API metadata
    pub app: ApiConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
    pub shutdown_grace_seconds: u64,
    pub tls: TlsConfig,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HTTP_HOST.to_string(),
            port: DEFAULT_HTTP_PORT,
            shutdown_grace_seconds: DEFAULT_SHUTDOWN_GRACE_SECS,
            tls: TlsConfig::default(),
        }
    }
}

/// How the listener terminates TLS.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TlsMode {
    /// Plain HTTP, for development or behind a TLS-terminating proxy
    #[default]
    None,
    /// PEM certificate and key supplied by the operator
    Manual,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TlsConfig {
    pub mode: TlsMode,
    pub cert_path: Option<String>,
    pub key_path: Option<String>,
    /// Spawn a plain listener that permanently redirects to HTTPS
    pub redirect_http: bool,
    pub redirect_port: u16,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            mode: TlsMode::None,
            cert_path: None,
            key_path: None,
            redirect_http: false,
            redirect_port: DEFAULT_REDIRECT_PORT,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Title shown in the OpenAPI document
    pub title: String,
    /// Serve the OpenAPI document at /openapi.json
    pub openapi: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            openapi: true,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Load from `path`, falling back to defaults when the file is absent.
    ///
    /// Only the default path may be missing; an explicitly requested file that
    /// does not exist is still an error.
    pub fn load_or_default(path: &str) -> Result<Self, ConfigError> {
        if path == DEFAULT_CONFIG_PATH && !Path::new(path).exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let tls = &self.http.tls;
        if tls.mode == TlsMode::Manual {
            if tls.cert_path.is_none() || tls.key_path.is_none() {
                return Err(ConfigError::Validation(
                    "http.tls.mode = \"manual\" requires cert_path and key_path".to_string(),
                ));
            }
            if tls.redirect_http && tls.redirect_port == self.http.port {
                return Err(ConfigError::Validation(format!(
                    "http.tls.redirect_port ({}) must differ from http.port",
                    tls.redirect_port
                )));
            }
        } else if tls.redirect_http {
            return Err(ConfigError::Validation(
                "http.tls.redirect_http requires http.tls.mode = \"manual\"".to_string(),
            ));
        }
        Ok(())
    }

    /// Listen address as a socket address; `http.host` must be an IP literal.
    pub fn socket_addr(&self) -> Option<SocketAddr> {
        let ip: IpAddr = self.http.host.parse().ok()?;
        Some(SocketAddr::new(ip, self.http.port))
    }

    /// Listen address for display, with IPv6 hosts bracketed.
    pub fn bind_address(&self) -> String {
        match self.socket_addr() {
            Some(addr) => addr.to_string(),
            None => format!("{}:{}", self.http.host, self.http.port),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.http.host, DEFAULT_HTTP_HOST);
        assert_eq!(config.http.port, DEFAULT_HTTP_PORT);
        assert_eq!(config.http.shutdown_grace_seconds, DEFAULT_SHUTDOWN_GRACE_SECS);
        assert_eq!(config.http.tls.mode, TlsMode::None);
        assert_eq!(config.app.title, DEFAULT_TITLE);
        assert!(config.app.openapi);
        assert_eq!(config.logging.format, LogFormat::Text);
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [http]
            port = 9090

            [logging]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.http.port, 9090);
        assert_eq!(config.http.host, DEFAULT_HTTP_HOST);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.bind_address(), "0.0.0.0:9090");
    }

    #[test]
    fn test_manual_tls_requires_cert_and_key() {
        let err = AppConfig::from_toml(
            r#"
            [http.tls]
            mode = "manual"
            cert_path = "/etc/pilot/cert.pem"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_redirect_port_must_differ_from_https_port() {
        let err = AppConfig::from_toml(
            r#"
            [http]
            port = 443

            [http.tls]
            mode = "manual"
            cert_path = "cert.pem"
            key_path = "key.pem"
            redirect_http = true
            redirect_port = 443
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_redirect_without_tls_is_rejected() {
        let err = AppConfig::from_toml(
            r#"
            [http.tls]
            redirect_http = true
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_ipv6_bind_address_is_bracketed() {
        let config = AppConfig::from_toml("[http]\nhost = \"::1\"\nport = 8000\n").unwrap();
        assert_eq!(config.bind_address(), "[::1]:8000");
        assert_eq!(config.socket_addr(), Some("[::1]:8000".parse().unwrap()));
    }

    #[test]
    fn test_unknown_log_format_is_rejected() {
        let err = AppConfig::from_toml("[logging]\nformat = \"xml\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[app]\ntitle = \"Staging\"\nopenapi = false").unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.app.title, "Staging");
        assert!(!config.app.openapi);
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let err = AppConfig::load_or_default(missing.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_default_log_filter_names_crate() {
        assert!(DEFAULT_LOG_FILTER.starts_with("ucanai_pilot="));
    }
}
