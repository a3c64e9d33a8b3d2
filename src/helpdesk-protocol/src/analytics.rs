// SPDX-FileCopyrightText: 2025 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Analytics report responses and the date range filter they share.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Optional inclusive date window. The backend picks its own default window
/// when both ends are absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Self, String> {
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(format!("start date {start} is after end date {end}"));
            }
        }
        Ok(Self { start, end })
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(start) = self.start {
            query.push(("start_date".to_string(), start.format("%Y-%m-%d").to_string()));
        }
        if let Some(end) = self.end {
            query.push(("end_date".to_string(), end.format("%Y-%m-%d").to_string()));
        }
        query
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: String,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketsByStatus {
    pub start_date: String,
    pub end_date: String,
    pub results: Vec<StatusCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: String,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketsByPeriod {
    pub start_date: String,
    pub end_date: String,
    pub total_tickets: u64,
    pub results: Vec<DailyCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeratorLoad {
    pub moderator_id: String,
    pub email: String,
    pub full_name: String,
    pub total_assigned: u64,
    pub total_resolved: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketsByModerator {
    pub start_date: String,
    pub end_date: String,
    pub results: Vec<ModeratorLoad>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AverageResponseTime {
    pub start_date: String,
    pub end_date: String,
    pub tickets_considered: u64,
    pub tickets_with_first_response: u64,
    pub average_response_seconds: Option<f64>,
    pub average_response_hours: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AverageResolutionTime {
    pub start_date: String,
    pub end_date: String,
    pub tickets_resolved: u64,
    pub average_resolution_seconds: Option<f64>,
    pub average_resolution_hours: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_range_has_no_query() {
        assert!(DateRange::default().is_empty());
        assert!(DateRange::default().to_query().is_empty());
    }

    #[test]
    fn range_formats_iso_dates() {
        let range = DateRange::new(Some(date(2026, 1, 5)), None).unwrap();
        assert_eq!(
            range.to_query(),
            vec![("start_date".to_string(), "2026-01-05".to_string())]
        );
    }

    #[test]
    fn rejects_inverted_range() {
        assert!(DateRange::new(Some(date(2026, 3, 1)), Some(date(2026, 2, 1))).is_err());
    }

    #[test]
    fn parses_null_averages() {
        let report: AverageResponseTime = serde_json::from_str(
            r#"{"start_date":"2026-01-01","end_date":"2026-01-31","tickets_considered":0,
                "tickets_with_first_response":0,"average_response_seconds":null,
                "average_response_hours":null}"#,
        )
        .unwrap();
        assert_eq!(report.average_response_hours, None);
    }
}
