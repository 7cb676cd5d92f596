use crate::allocation::DEFAULT_BUDGET_MILLIONS;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

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

/// Top-level configuration for the simulator service and CLI.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub simulation: SimulationConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("SIM_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("SIM_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("SIM_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("SIM_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let budget_millions = match env::var("SIM_BUDGET_MILLIONS") {
            Ok(raw) => parse_budget(&raw)?,
            Err(_) => DEFAULT_BUDGET_MILLIONS,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            simulation: SimulationConfig { budget_millions },
        })
    }
}

/// Parses a positive, finite budget expressed in millions of euros.
pub fn parse_budget(raw: &str) -> Result<f64, ConfigError> {
    let invalid = || ConfigError::InvalidBudget {
        value: raw.to_string(),
    };
    let budget = raw.trim().parse::<f64>().map_err(|_| invalid())?;
    if budget.is_finite() && budget > 0.0 {
        Ok(budget)
    } else {
        Err(invalid())
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

/// Inputs shared by the allocation calculator.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub budget_millions: f64,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidBudget { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "SIM_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "SIM_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidBudget { value } => write!(
                f,
                "SIM_BUDGET_MILLIONS must be a positive number (got '{value}')"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidBudget { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
