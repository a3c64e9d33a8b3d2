// SPDX-FileCopyrightText: 2025 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Typed wrappers over the backend's feature endpoints.
//!
//! Every call goes through [`ApiClient`](crate::api::ApiClient), so bearer
//! auth and silent refresh apply without any extra work here.

pub mod analytics;
pub mod auth;
pub mod tickets;
pub mod users;
