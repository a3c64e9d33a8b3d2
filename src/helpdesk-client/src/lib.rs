// SPDX-FileCopyrightText: 2025 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Helpdesk REST client.
//!
//! [`api::ApiClient`] is the single request path: bearer auth plus one
//! coordinated silent refresh on 401. [`session::SessionController`] owns
//! who-am-I state on top of it, and [`services`] wraps the ticket, user and
//! analytics endpoints.

pub mod api;
pub mod config;
pub mod services;
pub mod session;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use session::SessionController;
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method, ReqwestTransport};
