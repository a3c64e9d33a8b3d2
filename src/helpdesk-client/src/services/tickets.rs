// SPDX-FileCopyrightText: 2025 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

use helpdesk_core::ApiResult;
use helpdesk_protocol::paths;
use helpdesk_protocol::tickets::{
    AssignTicket, ChangeTicketStatus, CreateTicket, NewTicketMessage, Paginated, Ticket,
    TicketEvent, TicketFilter, TicketMessage, TicketStatus,
};

use crate::api::ApiClient;

pub async fn list(api: &ApiClient, filter: &TicketFilter) -> ApiResult<Paginated<Ticket>> {
    api.get_with_query(paths::TICKETS, filter.to_query()).await
}

pub async fn get(api: &ApiClient, id: &str) -> ApiResult<Ticket> {
    api.get(&paths::ticket(id)).await
}

pub async fn create(api: &ApiClient, ticket: &CreateTicket) -> ApiResult<Ticket> {
    api.post(paths::TICKETS, ticket).await
}

pub async fn cancel(api: &ApiClient, id: &str) -> ApiResult<Ticket> {
    api.post_empty(&paths::ticket_action(id, "cancel")).await
}

/// Timeline of status changes and assignments, oldest first.
pub async fn events(api: &ApiClient, id: &str) -> ApiResult<Vec<TicketEvent>> {
    api.get(&paths::ticket_action(id, "events")).await
}

pub async fn messages(api: &ApiClient, id: &str) -> ApiResult<Paginated<TicketMessage>> {
    api.get_with_query(
        paths::TICKET_MESSAGES,
        vec![("ticket".to_string(), id.to_string())],
    )
    .await
}

pub async fn add_message(api: &ApiClient, message: &NewTicketMessage) -> ApiResult<TicketMessage> {
    api.post(paths::TICKET_MESSAGES, message).await
}

/// Assign to `assignee`, or unassign with `None`.
pub async fn assign(api: &ApiClient, id: &str, assignee: Option<&str>) -> ApiResult<Ticket> {
    let body = AssignTicket {
        assigned_to: assignee.map(str::to_string),
    };
    api.post(&paths::ticket_action(id, "assign"), &body).await
}

pub async fn change_status(api: &ApiClient, id: &str, status: TicketStatus) -> ApiResult<Ticket> {
    api.post(
        &paths::ticket_action(id, "change-status"),
        &ChangeTicketStatus { status },
    )
    .await
}
