use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

/// Distinguishes runtime behavior for different stages of the client.
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

/// Top-level configuration for the client core and the console tooling.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub api: ApiConfig,
    pub ui: UiConfig,
    pub stub: StubConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("OLAHIRE_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let base_url =
            env::var("OLAHIRE_API_BASE").unwrap_or_else(|_| "http://127.0.0.1:4000".to_string());

        let page_size = env::var("OLAHIRE_PAGE_SIZE")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<usize>()
            .ok()
            .filter(|size| *size > 0)
            .ok_or(ConfigError::InvalidPageSize)?;

        let debounce_ms = env::var("OLAHIRE_DEBOUNCE_MS")
            .unwrap_or_else(|_| "300".to_string())
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidDebounce)?;

        let host = env::var("OLAHIRE_STUB_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("OLAHIRE_STUB_PORT")
            .unwrap_or_else(|_| "4000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("OLAHIRE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            api: ApiConfig { base_url },
            ui: UiConfig {
                page_size,
                debounce_ms,
            },
            stub: StubConfig { host, port },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Location of the backend the client talks to.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
}

/// Knobs for the list engine shared by every screen.
#[derive(Debug, Clone)]
pub struct UiConfig {
    pub page_size: usize,
    pub debounce_ms: u64,
}

impl UiConfig {
    pub fn quiet_interval(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            page_size: 5,
            debounce_ms: 300,
        }
    }
}

/// Bind address for the development stub server.
#[derive(Debug, Clone)]
pub struct StubConfig {
    pub host: String,
    pub port: u16,
}

impl StubConfig {
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

#[derive(Debug)]
pub enum ConfigError {
    InvalidPageSize,
    InvalidDebounce,
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPageSize => {
                write!(f, "OLAHIRE_PAGE_SIZE must be a positive integer")
            }
            ConfigError::InvalidDebounce => {
                write!(f, "OLAHIRE_DEBOUNCE_MS must be a non-negative integer")
            }
            ConfigError::InvalidPort => write!(f, "OLAHIRE_STUB_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "OLAHIRE_STUB_HOST must parse to an IPv4 or IPv6 address")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
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
        env::remove_var("OLAHIRE_ENV");
        env::remove_var("OLAHIRE_API_BASE");
        env::remove_var("OLAHIRE_PAGE_SIZE");
        env::remove_var("OLAHIRE_DEBOUNCE_MS");
        env::remove_var("OLAHIRE_STUB_HOST");
        env::remove_var("OLAHIRE_STUB_PORT");
        env::remove_var("OLAHIRE_LOG_LEVEL");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.ui.page_size, 5);
        assert_eq!(config.ui.debounce_ms, 300);
        assert_eq!(config.stub.port, 4000);
        assert_eq!(config.telemetry.log_level, "info");
    }

    #[test]
    fn rejects_zero_page_size() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("OLAHIRE_PAGE_SIZE", "0");
        let err = AppConfig::load().expect_err("zero page size rejected");
        assert!(matches!(err, ConfigError::InvalidPageSize));
        env::remove_var("OLAHIRE_PAGE_SIZE");
    }

    #[test]
    fn accepts_localhost_stub_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("OLAHIRE_STUB_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.stub.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 4000));
        env::remove_var("OLAHIRE_STUB_HOST");
    }
}
