// SPDX-FileCopyrightText: 2025 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

use helpdesk_core::ApiResult;
use helpdesk_protocol::analytics::{
    AverageResolutionTime, AverageResponseTime, DateRange, TicketsByModerator, TicketsByPeriod,
    TicketsByStatus,
};
use helpdesk_protocol::paths;

use crate::api::ApiClient;

pub async fn tickets_by_status(api: &ApiClient, range: &DateRange) -> ApiResult<TicketsByStatus> {
    api.get_with_query(paths::ANALYTICS_TICKETS_BY_STATUS, range.to_query())
        .await
}

pub async fn tickets_by_period(api: &ApiClient, range: &DateRange) -> ApiResult<TicketsByPeriod> {
    api.get_with_query(paths::ANALYTICS_TICKETS_BY_PERIOD, range.to_query())
        .await
}

pub async fn tickets_by_moderator(
    api: &ApiClient,
    range: &DateRange,
) -> ApiResult<TicketsByModerator> {
    api.get_with_query(paths::ANALYTICS_TICKETS_BY_MODERATOR, range.to_query())
        .await
}

/// Backend always reports its default window for this one.
pub async fn average_response_time(api: &ApiClient) -> ApiResult<AverageResponseTime> {
    api.get(paths::ANALYTICS_AVERAGE_RESPONSE_TIME).await
}

pub async fn average_resolution_time(
    api: &ApiClient,
    range: &DateRange,
) -> ApiResult<AverageResolutionTime> {
    api.get_with_query(paths::ANALYTICS_AVERAGE_RESOLUTION_TIME, range.to_query())
        .await
}
