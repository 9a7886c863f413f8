//! Admin credential verification
//!
//! Login is checked through the [`CredentialVerifier`] trait so the
//! backing table can be swapped without touching the handlers. The
//! default [`StaticCredentials`] holds argon2 hashes of a fixed list of
//! `email:password` pairs.

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use async_trait::async_trait;
use shared::models::UserRole;
use thiserror::Error;

/// Accounts used when `ADMIN_CREDENTIALS` is not set
pub const DEFAULT_ADMIN_CREDENTIALS: &str =
    "admin@parkingsystem.com:admin123,superadmin@parkingsystem.com:super123";

/// A successfully verified admin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminIdentity {
    pub email: String,
    pub role: UserRole,
}

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Malformed credential entry: {0:?} (expected email:password)")]
    Malformed(String),

    #[error("No admin credentials configured")]
    Empty,

    #[error("Password hashing failed: {0}")]
    Hash(String),
}

#[async_trait]
pub trait CredentialVerifier: Send + Sync + std::fmt::Debug {
    /// `Some` identity when `email` / `password` match a known admin
    async fn verify(&self, email: &str, password: &str) -> Option<AdminIdentity>;
}

#[derive(Debug, Clone)]
struct CredentialEntry {
    email: String,
    password_hash: String,
}

/// Fixed admin table with argon2-hashed passwords
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    entries: Vec<CredentialEntry>,
}

impl StaticCredentials {
    /// Build from `email:password,email:password`
    pub fn parse(list: &str) -> Result<Self, CredentialError> {
        let mut entries = Vec::new();
        for item in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let (email, password) = item
                .split_once(':')
                .ok_or_else(|| CredentialError::Malformed(item.to_string()))?;
            let email = normalize(email);
            if email.is_empty() || password.is_empty() {
                return Err(CredentialError::Malformed(item.to_string()));
            }
            entries.push(CredentialEntry {
                email,
                password_hash: hash_password(password)?,
            });
        }

        if entries.is_empty() {
            return Err(CredentialError::Empty);
        }
        Ok(Self { entries })
    }

    /// `ADMIN_CREDENTIALS` when given, otherwise the built-in accounts
    pub fn from_config(value: Option<&str>) -> Result<Self, CredentialError> {
        Self::parse(value.unwrap_or(DEFAULT_ADMIN_CREDENTIALS))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl CredentialVerifier for StaticCredentials {
    async fn verify(&self, email: &str, password: &str) -> Option<AdminIdentity> {
        let email = normalize(email);
        let entry = self.entries.iter().find(|e| e.email == email)?;
        if !verify_password(password, &entry.password_hash) {
            return None;
        }
        Some(AdminIdentity {
            role: role_for(&entry.email),
            email: entry.email.clone(),
        })
    }
}

/// `super_admin` for addresses containing "super", `admin` otherwise
pub fn role_for(email: &str) -> UserRole {
    if email.contains("super") {
        UserRole::SuperAdmin
    } else {
        UserRole::Admin
    }
}

fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}

fn hash_password(password: &str) -> Result<String, CredentialError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| CredentialError::Hash(e.to_string()))?;
    Ok(hash.to_string())
}

fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_builtin_accounts() {
        let creds = StaticCredentials::from_config(None).unwrap();
        assert_eq!(creds.len(), 2);

        let admin = creds.verify("admin@parkingsystem.com", "admin123").await.unwrap();
        assert_eq!(admin.role, UserRole::Admin);

        let sup = creds
            .verify("  SuperAdmin@ParkingSystem.com ", "super123")
            .await
            .unwrap();
        assert_eq!(sup.email, "superadmin@parkingsystem.com");
        assert_eq!(sup.role, UserRole::SuperAdmin);
    }

    #[tokio::test]
    async fn test_wrong_password_or_unknown_email() {
        let creds = StaticCredentials::from_config(None).unwrap();
        assert!(creds.verify("admin@parkingsystem.com", "wrong").await.is_none());
        assert!(creds.verify("nobody@parkingsystem.com", "admin123").await.is_none());
        // Password is case-sensitive
        assert!(creds.verify("admin@parkingsystem.com", "ADMIN123").await.is_none());
    }

    #[tokio::test]
    async fn test_parse_custom_table() {
        let creds = StaticCredentials::parse("ops@corp.in:s3cr3t:with:colons").unwrap();
        let ops = creds.verify("ops@corp.in", "s3cr3t:with:colons").await.unwrap();
        assert_eq!(ops.role, UserRole::Admin);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            StaticCredentials::parse("no-separator"),
            Err(CredentialError::Malformed(_))
        ));
        assert!(matches!(
            StaticCredentials::parse(":password"),
            Err(CredentialError::Malformed(_))
        ));
        assert!(matches!(
            StaticCredentials::parse(" , "),
            Err(CredentialError::Empty)
        ));
    }
}
