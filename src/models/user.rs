//! User model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::constants::roles;

/// User database model (the account and its public profile)
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub role: String,
    pub is_active: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Parsed role, `None` if the stored value is unknown
    pub fn role(&self) -> Option<Role> {
        Role::from_str(&self.role)
    }

    /// Name shown on public pages
    pub fn public_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }
}

/// Platform roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Host,
    Judge,
    Participant,
}

impl Role {
    /// Get role as string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => roles::ADMIN,
            Self::Host => roles::HOST,
            Self::Judge => roles::JUDGE,
            Self::Participant => roles::PARTICIPANT,
        }
    }

    /// Parse role from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            roles::ADMIN => Some(Self::Admin),
            roles::HOST => Some(Self::Host),
            roles::JUDGE => Some(Self::Judge),
            roles::PARTICIPANT => Some(Self::Participant),
            _ => None,
        }
    }

    /// Dashboard a signed-in user lands on
    pub fn home_path(&self) -> &'static str {
        match self {
            Self::Admin => "/admin",
            Self::Host => "/host",
            Self::Judge => "/judge",
            Self::Participant => "/dashboard",
        }
    }

    /// All roles, in display order
    pub fn all() -> [Role; 4] {
        [Self::Admin, Self::Host, Self::Judge, Self::Participant]
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip_and_unknown() {
        for role in Role::all() {
            assert_eq!(Role::from_str(role.as_str()), Some(role));
        }
        assert_eq!(Role::from_str("organizer"), None);
        assert_eq!(Role::from_str("Admin"), None);
    }

    #[test]
    fn test_home_paths_are_distinct() {
        let paths: std::collections::HashSet<_> =
            Role::all().iter().map(|r| r.home_path()).collect();
        assert_eq!(paths.len(), 4);
        assert_eq!(Role::Participant.home_path(), "/dashboard");
    }
}
