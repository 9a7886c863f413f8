//! User Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User role
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum UserRole {
    #[default]
    User,
    Admin,
    SuperAdmin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::SuperAdmin => "super_admin",
        }
    }

    /// Admin and super admin may decide requests
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin | Self::SuperAdmin)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User entity (employee who files parking requests)
///
/// Created on the first request of an `emp_id`, never updated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct User {
    pub id: String,
    pub emp_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub team: Option<String>,
    pub shift: Option<String>,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

/// Create user payload (derived from the first parking request)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreate {
    pub emp_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub team: Option<String>,
    pub shift: Option<String>,
}
