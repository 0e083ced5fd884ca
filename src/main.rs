//! U Can AI pilot: liveness service entry point.
//!
//! Initializes tracing, loads configuration from a TOML file, builds the Axum
//! router and runs the HTTP(S) server until SIGTERM/SIGINT.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ucanai_pilot::config::{AppConfig, LogFormat, DEFAULT_CONFIG_PATH, DEFAULT_LOG_FILTER};
use ucanai_pilot::{create_router, Error};

/// U Can AI pilot backend: liveness service
#[derive(Parser, Debug)]
#[command(name = "ucanai-pilot", version, about)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Log level filter (e.g., "ucanai_pilot=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,

    /// Override http.host from the configuration file
    #[arg(long)]
    host: Option<String>,

    /// Override http.port from the configuration file
    #[arg(long)]
    port: Option<u16>,
}

impl Args {
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.http.host = host.clone();
        }
        if let Some(port) = self.port {
            config.http.port = port;
        }
    }
}

fn init_tracing(filter: &str, format: LogFormat) -> Result<(), Error> {
    let env_filter = EnvFilter::try_new(filter).map_err(|source| Error::LogFilter {
        filter: filter.to_string(),
        source,
    })?;

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let args = Args::parse();

    // Configuration first: it decides the log format
    let mut config = AppConfig::load_or_default(&args.config)?;
    args.apply_overrides(&mut config);
    config.validate()?;

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .clone()
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
    init_tracing(&log_filter, config.logging.format)?;

    tracing::info!(
        config = %args.config,
        title = %config.app.title,
        address = %config.bind_address(),
        tls = ?config.http.tls.mode,
        openapi = config.app.openapi,
        "Loaded configuration"
    );

    let app = create_router(&config);
    ucanai_pilot::http::start_server(app, &config).await?;

    tracing::info!("Server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_host_and_port() {
        let args = Args::parse_from(["ucanai-pilot", "--host", "127.0.0.1", "--port", "9000"]);
        let mut config = AppConfig::default();
        args.apply_overrides(&mut config);
        assert_eq!(config.bind_address(), "127.0.0.1:9000");
    }

    #[test]
    fn test_cli_defaults() {
        let args = Args::parse_from(["ucanai-pilot"]);
        assert_eq!(args.config, DEFAULT_CONFIG_PATH);
        assert!(args.log_level.is_none());

        let mut config = AppConfig::default();
        args.apply_overrides(&mut config);
        assert_eq!(config.http.port, 8000);
    }

    #[test]
    fn test_invalid_log_filter_is_reported() {
        let err = init_tracing("ucanai_pilot=notalevel", LogFormat::Text).unwrap_err();
        assert!(matches!(err, Error::LogFilter { .. }));
    }
}
