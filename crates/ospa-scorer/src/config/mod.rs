use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::workflows::nomination::domain::DEFAULT_PERFORMANCE_RATING;
use crate::workflows::nomination::{
    AttachmentPolicy, RatingBands, RubricError, RubricSet, ScoringEngine,
};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub scoring: ScoringConfig,
    pub submission: SubmissionConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let defaults = RatingBands::default();
        let scoring = ScoringConfig {
            rubric_path: optional_var("OSPA_RUBRIC_PATH").map(PathBuf::from),
            default_rating: parse_number("OSPA_DEFAULT_RATING", DEFAULT_PERFORMANCE_RATING)?,
            bands: RatingBands {
                outstanding: parse_number("OSPA_OUTSTANDING_THRESHOLD", defaults.outstanding)?,
                very_satisfactory: parse_number(
                    "OSPA_VERY_SATISFACTORY_THRESHOLD",
                    defaults.very_satisfactory,
                )?,
            },
        };

        let max_attachment_mb = match optional_var("OSPA_MAX_ATTACHMENT_MB") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidNumber {
                    key: "OSPA_MAX_ATTACHMENT_MB",
                    value: raw,
                })?,
            None => 15,
        };
        let submission = SubmissionConfig {
            endpoint: optional_var("OSPA_SUBMISSION_URL"),
            attachments: AttachmentPolicy::from_megabytes(max_attachment_mb),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            scoring,
            submission,
        })
    }
}

fn optional_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_number(key: &'static str, default: f64) -> Result<f64, ConfigError> {
    match optional_var(key) {
        Some(raw) => raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or(ConfigError::InvalidNumber { key, value: raw }),
        None => Ok(default),
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Rubric source and rating display thresholds.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    pub rubric_path: Option<PathBuf>,
    pub default_rating: f64,
    pub bands: RatingBands,
}

impl ScoringConfig {
    /// Built-in rubric unless a rubric file is configured.
    pub fn rubric(&self) -> Result<RubricSet, RubricError> {
        match &self.rubric_path {
            Some(path) => RubricSet::from_path(path),
            None => Ok(RubricSet::standard()),
        }
    }

    pub fn engine(&self) -> Result<ScoringEngine, RubricError> {
        Ok(ScoringEngine::new(self.rubric()?, self.bands))
    }
}

/// Outbound endpoint and upload limits.
#[derive(Debug, Clone)]
pub struct SubmissionConfig {
    pub endpoint: Option<String>,
    pub attachments: AttachmentPolicy,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { key, value } => {
                write!(f, "{key} must be a number, got '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidNumber { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "OSPA_RUBRIC_PATH",
            "OSPA_DEFAULT_RATING",
            "OSPA_OUTSTANDING_THRESHOLD",
            "OSPA_VERY_SATISFACTORY_THRESHOLD",
            "OSPA_MAX_ATTACHMENT_MB",
            "OSPA_SUBMISSION_URL",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.scoring.default_rating, 4.0);
        assert_eq!(config.scoring.bands, RatingBands::default());
        assert!(config.scoring.rubric_path.is_none());
        assert!(config.submission.endpoint.is_none());
        assert_eq!(config.submission.attachments, AttachmentPolicy::default());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
    }

    #[test]
    fn reads_scoring_and_submission_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("OSPA_DEFAULT_RATING", "4.5");
        env::set_var("OSPA_OUTSTANDING_THRESHOLD", "4.6");
        env::set_var("OSPA_MAX_ATTACHMENT_MB", "25");
        env::set_var("OSPA_SUBMISSION_URL", "https://sheets.example.test/exec");

        let config = AppConfig::load().expect("config loads");

        assert_eq!(config.scoring.default_rating, 4.5);
        assert_eq!(config.scoring.bands.outstanding, 4.6);
        assert_eq!(config.scoring.bands.very_satisfactory, 3.5);
        assert_eq!(config.submission.attachments.max_bytes, 25 * 1024 * 1024);
        assert_eq!(
            config.submission.endpoint.as_deref(),
            Some("https://sheets.example.test/exec")
        );
        reset_env();
    }

    #[test]
    fn rejects_non_numeric_thresholds() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("OSPA_OUTSTANDING_THRESHOLD", "high");

        let err = AppConfig::load().expect_err("threshold must be numeric");

        assert!(err.to_string().contains("OSPA_OUTSTANDING_THRESHOLD"));
        reset_env();
    }
}
