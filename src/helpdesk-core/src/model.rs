// SPDX-FileCopyrightText: 2025 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Account role, used for role-gated navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    User,
    Moderator,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Moderator => "MODERATOR",
            Self::Admin => "ADMIN",
        }
    }

    /// Roles that can triage tickets and read analytics.
    pub const STAFF: &'static [UserRole] = &[Self::Moderator, Self::Admin];
    /// Roles that can manage user accounts.
    pub const ADMINS: &'static [UserRole] = &[Self::Admin];

    pub fn can_moderate(&self) -> bool {
        Self::STAFF.contains(self)
    }

    pub fn is_admin(&self) -> bool {
        Self::ADMINS.contains(self)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USER" => Ok(Self::User),
            "MODERATOR" => Ok(Self::Moderator),
            "ADMIN" => Ok(Self::Admin),
            other => Err(format!(
                "unknown role '{other}' (expected one of: USER, MODERATOR, ADMIN)"
            )),
        }
    }
}

/// Identity returned by the "who am I" and login endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub full_name: String,
    pub role: UserRole,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: String,
}

fn default_active() -> bool {
    true
}

impl UserIdentity {
    pub fn display_name(&self) -> &str {
        if self.full_name.trim().is_empty() {
            &self.email
        } else {
            &self.full_name
        }
    }
}

/// Access/refresh credential pair. Both halves are opaque strings.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

impl TokenPair {
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self {
            access: access.into(),
            refresh: refresh.into(),
        }
    }
}

// Never print token contents.
impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access", &"<redacted>")
            .field("refresh", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_json_in_upper_case() {
        let json = serde_json::to_string(&UserRole::Moderator).unwrap();
        assert_eq!(json, "\"MODERATOR\"");
        let role: UserRole = serde_json::from_str("\"ADMIN\"").unwrap();
        assert_eq!(role, UserRole::Admin);
    }

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!("moderator".parse::<UserRole>(), Ok(UserRole::Moderator));
        assert!("root".parse::<UserRole>().is_err());
    }

    #[test]
    fn role_capabilities() {
        assert!(!UserRole::User.can_moderate());
        assert!(UserRole::Moderator.can_moderate());
        assert!(UserRole::Admin.can_moderate());
        assert!(UserRole::Admin.is_admin());
        assert!(!UserRole::Moderator.is_admin());
    }

    #[test]
    fn identity_parses_backend_payload() {
        let user: UserIdentity = serde_json::from_str(
            r#"{
                "id": "8d6f",
                "email": "ana@example.com",
                "first_name": "Ana",
                "last_name": "Souza",
                "full_name": "Ana Souza",
                "role": "USER",
                "is_active": true,
                "created_at": "2026-01-10T12:00:00Z"
            }"#,
        )
        .unwrap();
        assert_eq!(user.role, UserRole::User);
        assert_eq!(user.display_name(), "Ana Souza");
    }

    #[test]
    fn display_name_falls_back_to_email() {
        let user: UserIdentity =
            serde_json::from_str(r#"{"id":"1","email":"ops@example.com","role":"ADMIN"}"#)
                .unwrap();
        assert_eq!(user.display_name(), "ops@example.com");
        assert!(user.is_active);
    }

    #[test]
    fn token_pair_debug_is_redacted() {
        let pair = TokenPair::new("secret-access", "secret-refresh");
        let debug = format!("{pair:?}");
        assert!(!debug.contains("secret"));
    }
}
