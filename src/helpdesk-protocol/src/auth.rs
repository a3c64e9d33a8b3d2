// SPDX-FileCopyrightText: 2025 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Authentication payloads and bearer header handling.

use std::fmt;

use serde::{Deserialize, Serialize};

use helpdesk_core::{TokenPair, UserIdentity};

/// Format an `Authorization` header value for `token`.
pub fn bearer_header(token: &str) -> String {
    format!("Bearer {}", token.trim())
}

/// POST `/auth/login/` body.
#[derive(Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// POST `/auth/login/` response.
#[derive(Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    pub user: UserIdentity,
}

impl LoginResponse {
    pub fn token_pair(&self) -> TokenPair {
        TokenPair::new(self.access.clone(), self.refresh.clone())
    }
}

impl fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginResponse")
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}

/// POST `/auth/token/refresh/` body.
#[derive(Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

/// POST `/auth/token/refresh/` response. `refresh` is present only when the
/// backend rotates refresh tokens.
#[derive(Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

impl RefreshResponse {
    /// Pair to persist: the rotated refresh token, or `current` when the
    /// backend kept the old one.
    pub fn into_pair(self, current: String) -> TokenPair {
        let refresh = self
            .refresh
            .filter(|r| !r.trim().is_empty())
            .unwrap_or(current);
        TokenPair::new(self.access, refresh)
    }
}

/// POST `/auth/logout/` body.
#[derive(Clone, Serialize, Deserialize)]
pub struct LogoutRequest {
    pub refresh: String,
}

/// POST `/auth/password-reset/request/` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordResetRequest {
    pub email: String,
}

/// Plain `{detail}` acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detail {
    pub detail: String,
}
