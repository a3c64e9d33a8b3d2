// SPDX-FileCopyrightText: 2025 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

use helpdesk_core::{ApiResult, UserIdentity};
use helpdesk_protocol::paths;
use helpdesk_protocol::tickets::Paginated;
use helpdesk_protocol::users::{CreateUser, UpdateUser, UserFilter};

use crate::api::ApiClient;

pub async fn list(api: &ApiClient, filter: &UserFilter) -> ApiResult<Paginated<UserIdentity>> {
    api.get_with_query(paths::USERS, filter.to_query()).await
}

pub async fn create(api: &ApiClient, user: &CreateUser) -> ApiResult<UserIdentity> {
    api.post(paths::USERS, user).await
}

pub async fn update(api: &ApiClient, id: &str, changes: &UpdateUser) -> ApiResult<UserIdentity> {
    api.patch(&paths::user(id), changes).await
}

/// Soft delete: the backend marks the account inactive.
pub async fn deactivate(api: &ApiClient, id: &str) -> ApiResult<()> {
    api.delete(&paths::user(id)).await
}
