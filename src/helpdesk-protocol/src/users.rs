// SPDX-FileCopyrightText: 2025 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Admin user management payloads.

use serde::{Deserialize, Serialize};

use helpdesk_core::UserRole;

/// Query filters for `GET /auth/users/`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub page: Option<u32>,
    pub search: Option<String>,
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
}

impl UserFilter {
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = vec![("page".to_string(), self.page.unwrap_or(1).to_string())];
        if let Some(search) = self.search.as_ref().filter(|s| !s.trim().is_empty()) {
            query.push(("search".to_string(), search.clone()));
        }
        if let Some(role) = self.role {
            query.push(("role".to_string(), role.as_str().to_string()));
        }
        if let Some(active) = self.is_active {
            query.push(("is_active".to_string(), active.to_string()));
        }
        query
    }
}

/// POST `/auth/users/` body.
#[derive(Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// PATCH `/auth/users/{id}/` body. Only set fields are sent.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct UpdateUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
