use std::sync::Arc;

use crate::allocation::{AllocationEngine, office_policy};
use crate::auth::{CredentialVerifier, JwtService, StaticCredentials};
use crate::core::config::MEMORY_DATABASE;
use crate::core::{BackgroundTasks, Config, ServerError, TaskKind};
use crate::db::DbService;
use crate::otp::{self, OtpStore};

/// Server state - shared handles to every service
///
/// Cheap to clone; handlers receive it through `State<ServerState>`.
///
/// | Field | Type | Meaning |
/// |-------|------|---------|
/// | config | Config | configuration (immutable) |
/// | db | DbService | SQLite pool |
/// | engine | AllocationEngine | submit / decide |
/// | otp | OtpStore | one-time passcodes |
/// | credentials | Arc<dyn CredentialVerifier> | admin login check |
/// | jwt_service | Arc<JwtService> | token service |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    pub engine: AllocationEngine,
    pub otp: OtpStore,
    pub credentials: Arc<dyn CredentialVerifier>,
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    /// Assemble state from already opened parts
    pub fn new(config: Config, db: DbService, credentials: Arc<dyn CredentialVerifier>) -> Self {
        Self {
            engine: AllocationEngine::new(db.pool.clone()),
            otp: OtpStore::new(config.otp_ttl()),
            jwt_service: Arc::new(JwtService::with_config(config.jwt.clone())),
            credentials,
            db,
            config,
        }
    }

    /// Initialize server state
    ///
    /// In order:
    /// 1. database (open + migrations)
    /// 2. default office bootstrap (failure is logged, startup continues)
    /// 3. admin credential table
    /// 4. warn when tokens are signed with a throwaway key
    pub async fn initialize(config: &Config) -> crate::core::Result<Self> {
        let db = if config.database_path == MEMORY_DATABASE {
            DbService::in_memory().await
        } else {
            DbService::new(&config.database_path).await
        }
        .map_err(|e| ServerError::Database(e.message))?;

        match office_policy::bootstrap_default_office(&db.pool).await {
            Ok(true) => {}
            Ok(false) => tracing::debug!("Offices present, skipping default office bootstrap"),
            Err(e) => tracing::error!(error = %e, "Failed to bootstrap default office"),
        }

        let credentials = StaticCredentials::from_config(config.admin_credentials.as_deref())?;
        tracing::info!(accounts = credentials.len(), "Admin credentials loaded");

        if config.jwt.ephemeral {
            tracing::warn!(
                "JWT_SECRET missing or shorter than {} characters, using a random key",
                crate::auth::jwt::MIN_SECRET_LEN
            );
        }

        Ok(Self::new(config.clone(), db, Arc::new(credentials)))
    }

    /// Start background tasks
    ///
    /// - OTP purge sweep
    pub fn start_background_tasks(&self) -> BackgroundTasks {
        let mut tasks = BackgroundTasks::new();
        tasks.spawn(
            "otp_purge",
            TaskKind::Periodic,
            otp::run_purge(
                self.otp.clone(),
                self.config.otp_purge_interval(),
                tasks.shutdown_token(),
            ),
        );
        tasks
    }

    pub fn pool(&self) -> &sqlx::SqlitePool {
        &self.db.pool
    }
}
