// SPDX-FileCopyrightText: 2025 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

use serde::Serialize;

use crate::model::{UserIdentity, UserRole};

/// Process-wide authentication state.
///
/// `user == None` means anonymous. `initialized` flips to true once the first
/// identity lookup has finished, whatever its outcome; protected content must
/// not be shown before that.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionState {
    pub user: Option<UserIdentity>,
    pub initialized: bool,
    pub loading: bool,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn role(&self) -> Option<UserRole> {
        self.user.as_ref().map(|u| u.role)
    }
}
