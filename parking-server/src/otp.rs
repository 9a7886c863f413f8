//! One-time passcode store
//!
//! Codes live in memory only, keyed by normalized email. Each code is
//! single use and expires after the configured TTL. Expired entries are
//! dropped on verification and by the periodic [`run_purge`] sweep.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use rand::Rng;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Default code lifetime (10 minutes)
pub const DEFAULT_OTP_TTL: Duration = Duration::from_secs(600);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OtpError {
    #[error("OTP not found or expired")]
    NotFound,

    #[error("OTP expired")]
    Expired,

    #[error("Invalid OTP")]
    Invalid,
}

impl From<OtpError> for AppError {
    fn from(err: OtpError) -> Self {
        match err {
            OtpError::NotFound => AppError::new(ErrorCode::OtpNotFound),
            OtpError::Expired => AppError::new(ErrorCode::OtpExpired),
            OtpError::Invalid => AppError::new(ErrorCode::OtpInvalid),
        }
    }
}

#[derive(Debug, Clone)]
struct OtpEntry {
    code: String,
    expires_at: Instant,
}

/// Concurrent TTL map of passcodes
#[derive(Debug, Clone)]
pub struct OtpStore {
    entries: Arc<DashMap<String, OtpEntry>>,
    ttl: Duration,
}

impl OtpStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            ttl,
        }
    }

    /// Issue a fresh 6-digit code for `email`, replacing any previous one
    pub fn issue(&self, email: &str) -> String {
        let code = format!("{:06}", rand::thread_rng().gen_range(0..1_000_000));
        self.entries.insert(
            normalize_email(email),
            OtpEntry {
                code: code.clone(),
                expires_at: Instant::now() + self.ttl,
            },
        );
        code
    }

    /// Check `code` for `email`; a matching code is consumed
    ///
    /// A wrong code leaves the entry in place so the user can retry.
    pub fn verify(&self, email: &str, code: &str) -> Result<(), OtpError> {
        match self.entries.entry(normalize_email(email)) {
            Entry::Vacant(_) => Err(OtpError::NotFound),
            Entry::Occupied(entry) => {
                if entry.get().expires_at <= Instant::now() {
                    entry.remove();
                    Err(OtpError::Expired)
                } else if entry.get().code != code.trim() {
                    Err(OtpError::Invalid)
                } else {
                    entry.remove();
                    Ok(())
                }
            }
        }
    }

    /// Drop every expired entry, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.expires_at > now);
        before.saturating_sub(self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Trimmed, lowercased email used as the store key
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Periodically purge expired codes until `shutdown` fires
pub async fn run_purge(store: OtpStore, interval: Duration, shutdown: CancellationToken) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            _ = ticker.tick() => {
                let removed = store.purge_expired();
                if removed > 0 {
                    tracing::debug!(removed, remaining = store.len(), "Purged expired OTPs");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_verify_once() {
        let store = OtpStore::new(DEFAULT_OTP_TTL);
        let code = store.issue("asha@example.com");

        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(store.verify("asha@example.com", &code), Ok(()));
        // Single use
        assert_eq!(
            store.verify("asha@example.com", &code),
            Err(OtpError::NotFound)
        );
    }

    #[test]
    fn test_wrong_code_keeps_entry() {
        let store = OtpStore::new(DEFAULT_OTP_TTL);
        let code = store.issue("asha@example.com");
        let wrong = if code == "000000" { "111111" } else { "000000" };

        assert_eq!(store.verify("asha@example.com", wrong), Err(OtpError::Invalid));
        assert_eq!(store.verify("asha@example.com", &code), Ok(()));
    }

    #[test]
    fn test_email_is_case_insensitive() {
        let store = OtpStore::new(DEFAULT_OTP_TTL);
        let code = store.issue("  Asha@Example.COM ");
        assert_eq!(store.verify("asha@example.com", &code), Ok(()));
    }

    #[test]
    fn test_reissue_replaces_previous_code() {
        let store = OtpStore::new(DEFAULT_OTP_TTL);
        let first = store.issue("asha@example.com");
        let mut second = store.issue("asha@example.com");
        while second == first {
            second = store.issue("asha@example.com");
        }

        assert_eq!(store.len(), 1);
        assert_eq!(store.verify("asha@example.com", &first), Err(OtpError::Invalid));
        assert_eq!(store.verify("asha@example.com", &second), Ok(()));
    }

    #[test]
    fn test_expired_code_is_removed() {
        let store = OtpStore::new(Duration::ZERO);
        let code = store.issue("asha@example.com");

        assert_eq!(store.verify("asha@example.com", &code), Err(OtpError::Expired));
        assert_eq!(
            store.verify("asha@example.com", &code),
            Err(OtpError::NotFound)
        );
    }

    #[test]
    fn test_purge_expired() {
        let expired = OtpStore::new(Duration::ZERO);
        expired.issue("a@example.com");
        expired.issue("b@example.com");
        assert_eq!(expired.purge_expired(), 2);
        assert!(expired.is_empty());

        let live = OtpStore::new(DEFAULT_OTP_TTL);
        live.issue("a@example.com");
        assert_eq!(live.purge_expired(), 0);
        assert_eq!(live.len(), 1);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::from(OtpError::NotFound).code, ErrorCode::OtpNotFound);
        assert_eq!(AppError::from(OtpError::Expired).code, ErrorCode::OtpExpired);
        assert_eq!(AppError::from(OtpError::Invalid).code, ErrorCode::OtpInvalid);
        assert_eq!(
            AppError::from(OtpError::Invalid).http_status(),
            http::StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn test_purge_task_stops_on_shutdown() {
        let store = OtpStore::new(Duration::ZERO);
        store.issue("a@example.com");
        let token = CancellationToken::new();

        let handle = tokio::spawn(run_purge(
            store.clone(),
            Duration::from_millis(10),
            token.clone(),
        ));
        tokio::time::sleep(Duration::from_millis(50)).await;
        token.cancel();
        handle.await.unwrap();

        assert!(store.is_empty());
    }
}
