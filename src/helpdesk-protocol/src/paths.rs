// SPDX-FileCopyrightText: 2025 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Endpoint paths, relative to the configured API base URL.

pub const TOKEN_REFRESH: &str = "/auth/token/refresh/";
pub const ME: &str = "/auth/me/";
pub const LOGIN: &str = "/auth/login/";
pub const LOGOUT: &str = "/auth/logout/";
pub const PASSWORD_RESET_REQUEST: &str = "/auth/password-reset/request/";

pub const USERS: &str = "/auth/users/";
pub const TICKETS: &str = "/tickets/";
pub const TICKET_MESSAGES: &str = "/tickets/messages/";

pub const ANALYTICS_TICKETS_BY_STATUS: &str = "/analytics/tickets-by-status/";
pub const ANALYTICS_TICKETS_BY_PERIOD: &str = "/analytics/tickets-by-period/";
pub const ANALYTICS_TICKETS_BY_MODERATOR: &str = "/analytics/tickets-by-moderator/";
pub const ANALYTICS_AVERAGE_RESPONSE_TIME: &str = "/analytics/average-response-time/";
pub const ANALYTICS_AVERAGE_RESOLUTION_TIME: &str = "/analytics/average-resolution-time/";

pub fn user(id: &str) -> String {
    format!("{USERS}{id}/")
}

pub fn ticket(id: &str) -> String {
    format!("{TICKETS}{id}/")
}

/// Sub-resource or action under a ticket, e.g. `ticket_action(id, "cancel")`.
pub fn ticket_action(id: &str, action: &str) -> String {
    format!("{TICKETS}{id}/{action}/")
}
