use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Deployment stage named by `APP_ENV`; unknown names fall back to development.
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

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_DATA_DIR: &str = ".teachteam";

/// Settings shared by the review server and the one-shot CLI commands.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Read `.env` if present, then the `APP_*` variables.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(&env_or("APP_ENV", "development"));

        let port = match env::var("APP_PORT") {
            Ok(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort)?,
            Err(_) => DEFAULT_PORT,
        };
        let server = ServerConfig {
            host: env_or("APP_HOST", DEFAULT_HOST),
            port,
        };

        let data_dir = env_or("APP_DATA_DIR", DEFAULT_DATA_DIR);
        if data_dir.trim().is_empty() {
            return Err(ConfigError::EmptyDataDir);
        }

        Ok(Self {
            environment,
            server,
            telemetry: TelemetryConfig {
                log_level: env_or("APP_LOG_LEVEL", DEFAULT_LOG_LEVEL),
            },
            storage: StorageConfig {
                data_dir: PathBuf::from(data_dir),
            },
        })
    }
}

fn env_or(key: &str, fallback: &str) -> String {
    env::var(key).unwrap_or_else(|_| fallback.to_string())
}

/// Address the review API listens on.
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

/// Default tracing filter; `RUST_LOG` overrides it.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where the directory-backed key-value store keeps its blobs.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    EmptyDataDir,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT is not a port number"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST is neither localhost nor an IP address")
            }
            ConfigError::EmptyDataDir => write!(f, "APP_DATA_DIR is blank"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::EmptyDataDir => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
