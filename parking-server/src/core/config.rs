use crate::auth::JwtConfig;
use crate::otp::DEFAULT_OTP_TTL;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | HTTP_PORT | 8000 | HTTP port |
/// | DATABASE_PATH | parking.db | SQLite file (`:memory:` for a throwaway store) |
/// | ENVIRONMENT | development | development / staging / production |
/// | LOG_LEVEL | info | default log filter |
/// | LOG_JSON | false | JSON console logs |
/// | LOG_DIR | (unset) | rotating log files directory |
/// | ADMIN_AUTH_REQUIRED | false | enforce bearer tokens on `/api/admin/*` |
/// | ADMIN_CREDENTIALS | (built-in) | `email:password,...` admin table |
/// | OTP_TTL_SECONDS | 600 | OTP lifetime |
/// | OTP_PURGE_INTERVAL_SECONDS | 60 | expired OTP sweep interval |
/// | JWT_SECRET | (random) | token signing secret, at least 32 chars |
/// | JWT_EXPIRATION_MINUTES | 1440 | token lifetime |
/// | SHUTDOWN_TIMEOUT_MS | 10000 | graceful shutdown grace period |
///
/// # Example
///
/// ```ignore
/// HTTP_PORT=9000 DATABASE_PATH=/data/parking.db cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API port
    pub http_port: u16,
    /// SQLite database file
    pub database_path: String,
    /// Runtime environment: development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
    /// Require admin bearer tokens on `/api/admin/*`
    pub admin_auth_required: bool,
    /// `email:password,...`; built-in accounts when unset
    pub admin_credentials: Option<String>,
    pub otp_ttl_seconds: u64,
    pub otp_purge_interval_seconds: u64,
    pub jwt: JwtConfig,
    /// Graceful shutdown timeout (ms)
    pub shutdown_timeout_ms: u64,
}

/// In-memory database marker for `DATABASE_PATH`
pub const MEMORY_DATABASE: &str = ":memory:";

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self {
            http_port: env_parse("HTTP_PORT", 8000),
            database_path: std::env::var("DATABASE_PATH").unwrap_or_else(|_| "parking.db".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: env_parse("LOG_JSON", false),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            admin_auth_required: env_parse("ADMIN_AUTH_REQUIRED", false),
            admin_credentials: std::env::var("ADMIN_CREDENTIALS")
                .ok()
                .filter(|c| !c.trim().is_empty()),
            otp_ttl_seconds: env_parse("OTP_TTL_SECONDS", DEFAULT_OTP_TTL.as_secs()),
            otp_purge_interval_seconds: env_parse("OTP_PURGE_INTERVAL_SECONDS", 60),
            jwt: JwtConfig::from_env(),
            shutdown_timeout_ms: env_parse("SHUTDOWN_TIMEOUT_MS", 10000),
        }
    }

    /// In-memory database, fixed JWT secret, development environment
    pub fn for_tests() -> Self {
        Self {
            http_port: 0,
            database_path: MEMORY_DATABASE.into(),
            environment: "development".into(),
            log_level: "debug".into(),
            log_json: false,
            log_dir: None,
            admin_auth_required: false,
            admin_credentials: None,
            otp_ttl_seconds: DEFAULT_OTP_TTL.as_secs(),
            otp_purge_interval_seconds: 60,
            jwt: JwtConfig::with_secret("test-secret-0123456789-abcdefghijklmnop"),
            shutdown_timeout_ms: 1000,
        }
    }

    /// Is this the development environment
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn otp_ttl(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.otp_ttl_seconds)
    }

    pub fn otp_purge_interval(&self) -> std::time::Duration {
        // tokio::time::interval panics on a zero period
        std::time::Duration::from_secs(self.otp_purge_interval_seconds.max(1))
    }

    pub fn shutdown_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.shutdown_timeout_ms)
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
