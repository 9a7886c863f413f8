//! Parking Server - office parking slot requests and approvals
//!
//! # Architecture
//!
//! Employees submit parking requests for a car or a bike, administrators
//! approve or reject them, and each office's slot counters are decremented
//! on approval.
//!
//! - **Database** (`db`): SQLite via sqlx, embedded migrations
//! - **Allocation** (`allocation`): submit / decide, lifecycle, slot ledger
//! - **Dashboard** (`dashboard`): request counts and office utilization
//! - **OTP** (`otp`): one-time passcodes with TTL
//! - **Auth** (`auth`): admin credentials, JWT, middleware
//! - **HTTP API** (`api`): axum routers under `/api`
//!
//! # Module layout
//!
//! ```text
//! parking-server/src/
//! ├── core/          # config, state, server, errors
//! ├── auth/          # credentials, JWT, middleware
//! ├── services/      # HTTP router assembly
//! ├── api/           # HTTP routes and handlers
//! ├── allocation/    # request lifecycle and slot allocation
//! ├── utils/         # logging, validation, dates
//! └── db/            # pool + repositories
//! ```

pub mod allocation;
pub mod api;
pub mod auth;
pub mod core;
pub mod dashboard;
pub mod db;
pub mod otp;
pub mod services;
pub mod utils;

// Re-exports
pub use allocation::{AllocationEngine, AllocationError};
pub use auth::{CredentialVerifier, CurrentUser, JwtService, StaticCredentials};
pub use core::{Config, Server, ServerState};
pub use db::DbService;
pub use otp::{OtpError, OtpStore};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ErrorCategory, ErrorCode, ErrorResponse};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

// Security logging macro
#[macro_export]
macro_rules! security_log {
    (INFO, $event:expr, $($arg:tt)*) => {
        tracing::info!(target: "security", event = $event, $($arg)*)
    };
    (WARN, $event:expr, $($arg:tt)*) => {
        tracing::warn!(target: "security", event = $event, $($arg)*)
    };
}

/// Load `.env`, read [`Config`] and initialise logging from it
pub fn setup_environment() -> anyhow::Result<Config> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    init_logger_with_file(&config.log_level, config.log_json, config.log_dir.as_deref())?;
    Ok(config)
}

pub fn print_banner() {
    println!(
        r#"
    ____             __   _
   / __ \____ ______/ /__(_)___  ____ _
  / /_/ / __ `/ ___/ //_/ / __ \/ __ `/
 / ____/ /_/ / /  / ,< / / / / / /_/ /
/_/    \__,_/_/  /_/|_/_/_/ /_/\__, /
                              /____/
    "#
    );
}
