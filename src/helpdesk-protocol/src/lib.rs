// SPDX-FileCopyrightText: 2025 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Wire types for the helpdesk REST API.
//!
//! This crate holds the request/response DTOs and endpoint paths shared by
//! the HTTP client and its feature services, plus the bearer header helper.

pub mod analytics;
pub mod auth;
pub mod paths;
pub mod tickets;
pub mod users;

// Re-export commonly used items
pub use analytics::DateRange;
pub use auth::{
    bearer_header, Detail, LoginRequest, LoginResponse, LogoutRequest, PasswordResetRequest,
    RefreshRequest, RefreshResponse,
};
pub use tickets::{Paginated, Ticket, TicketCategory, TicketPriority, TicketStatus};
