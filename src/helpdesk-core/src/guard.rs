// SPDX-FileCopyrightText: 2025 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Navigation gates over [`SessionState`].
//!
//! Guards only read session state; they never touch tokens or the network.

use serde::Serialize;

use crate::model::UserRole;
use crate::session::SessionState;

/// Outcome of a route guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardDecision {
    /// Session not resolved yet; show a loading placeholder.
    Pending,
    Allow,
    RedirectToLogin,
    Forbidden,
}

impl GuardDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Gate a route on authentication only.
pub fn require_auth(state: &SessionState) -> GuardDecision {
    if !state.initialized {
        return GuardDecision::Pending;
    }
    if state.user.is_none() {
        return GuardDecision::RedirectToLogin;
    }
    GuardDecision::Allow
}

/// Gate a route on one of `roles`.
///
/// Nested under [`require_auth`], so an uninitialized session is treated as
/// anonymous here.
pub fn require_role(state: &SessionState, roles: &[UserRole]) -> GuardDecision {
    let Some(user) = state.user.as_ref() else {
        return GuardDecision::RedirectToLogin;
    };
    if !roles.contains(&user.role) {
        return GuardDecision::Forbidden;
    }
    GuardDecision::Allow
}
