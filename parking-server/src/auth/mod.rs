//! Admin authentication
//!
//! - [`CredentialVerifier`] / [`StaticCredentials`] - admin login check
//! - [`JwtService`] - token issue and validation
//! - [`require_admin`] - middleware guarding `/api/admin/*`
//! - [`DecidedBy`] - who a decision is recorded as

pub mod credentials;
pub mod extractor;
pub mod jwt;
pub mod middleware;

pub use credentials::{AdminIdentity, CredentialError, CredentialVerifier, StaticCredentials};
pub use extractor::DecidedBy;
pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::require_admin;
