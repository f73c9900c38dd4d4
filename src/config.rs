//! Configuration for the stress estimator service.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

/// Main service configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Estimator configuration
    #[serde(default)]
    pub estimator: EstimatorSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: SocketAddr,

    /// Worker threads; 0 lets actix pick one per core
    #[serde(default)]
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            workers: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimatorSettings {
    /// Simulated model latency in milliseconds
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
}

impl EstimatorSettings {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

impl Default for EstimatorSettings {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// JSON format
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8080))
}

fn default_latency_ms() -> u64 {
    1500
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Command-line values that take precedence over file and environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub listen: Option<String>,
    pub latency_ms: Option<u64>,
    pub log_level: Option<String>,
    pub json: bool,
}

impl AppConfig {
    /// Load configuration from defaults, an optional file and `STRESS__` env vars
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        Self::load_with(path, &ConfigOverrides::default())
    }

    /// Like [`AppConfig::load`], with command-line overrides applied last.
    ///
    /// A file named explicitly must exist.
    pub fn load_with(
        path: Option<&str>,
        overrides: &ConfigOverrides,
    ) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        builder = builder.add_source(config::Config::try_from(&AppConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(true));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("STRESS")
                .separator("__")
                .try_parsing(true),
        );

        builder = builder
            .set_override_option("server.listen_addr", overrides.listen.clone())?
            .set_override_option("estimator.latency_ms", overrides.latency_ms.map(|ms| ms as i64))?
            .set_override_option("logging.level", overrides.log_level.clone())?
            .set_override_option("logging.json", overrides.json.then_some(true))?;

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.listen_addr.port(), 8080);
        assert_eq!(config.estimator.latency(), Duration::from_millis(1500));
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
    }

    // The only test that touches STRESS__ variables; everything depending on
    // them stays in this one function.
    #[test]
    fn test_layering_precedence() {
        let defaults = AppConfig::load(None).unwrap();
        assert_eq!(defaults.estimator.latency_ms, 1500);
        assert_eq!(defaults.server.workers, 0);

        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[server]\nlisten_addr = \"0.0.0.0:9090\"\nworkers = 2\n\n[estimator]\nlatency_ms = 800\n"
        )
        .unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let from_file = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(from_file.estimator.latency_ms, 800);
        assert_eq!(from_file.server.workers, 2);
        assert_eq!(from_file.server.listen_addr.port(), 9090);

        std::env::set_var("STRESS__ESTIMATOR__LATENCY_MS", "250");
        let from_env = AppConfig::load(Some(&path));
        let from_cli = AppConfig::load_with(
            Some(&path),
            &ConfigOverrides {
                latency_ms: Some(40),
                log_level: Some("debug".to_string()),
                json: true,
                ..Default::default()
            },
        );
        std::env::remove_var("STRESS__ESTIMATOR__LATENCY_MS");

        let from_env = from_env.unwrap();
        assert_eq!(from_env.estimator.latency_ms, 250);
        assert_eq!(from_env.server.workers, 2);

        let from_cli = from_cli.unwrap();
        assert_eq!(from_cli.estimator.latency_ms, 40);
        assert_eq!(from_cli.server.listen_addr.port(), 9090);
        assert_eq!(from_cli.logging.level, "debug");
        assert!(from_cli.logging.json);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        assert!(AppConfig::load(Some("/nonexistent/stress-config.toml")).is_err());
    }

    #[test]
    fn test_listen_override_parsed_through_config() {
        let overrides = ConfigOverrides {
            listen: Some("127.0.0.1:7000".to_string()),
            ..Default::default()
        };
        let config = AppConfig::load_with(None, &overrides).unwrap();
        assert_eq!(config.server.listen_addr.port(), 7000);

        let overrides = ConfigOverrides {
            listen: Some("not-an-address".to_string()),
            ..Default::default()
        };
        assert!(AppConfig::load_with(None, &overrides).is_err());
    }
}
