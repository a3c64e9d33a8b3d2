// SPDX-FileCopyrightText: 2025 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Ticket, timeline and message DTOs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use helpdesk_core::UserIdentity;

macro_rules! wire_enum {
    ($name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().to_ascii_uppercase().replace('-', "_");
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == wanted)
                    .ok_or_else(|| {
                        let names: Vec<&str> = $name::ALL.iter().map(|v| v.as_str()).collect();
                        format!("invalid value '{}' (expected one of: {})", s, names.join(", "))
                    })
            }
        }
    };
}

wire_enum!(TicketStatus {
    Open => "OPEN",
    InProgress => "IN_PROGRESS",
    WaitingUser => "WAITING_USER",
    Resolved => "RESOLVED",
    Canceled => "CANCELED",
});

wire_enum!(TicketPriority {
    Low => "LOW",
    Medium => "MEDIUM",
    High => "HIGH",
    Critical => "CRITICAL",
});

wire_enum!(TicketCategory {
    General => "GENERAL",
    Technical => "TECHNICAL",
    Billing => "BILLING",
    Access => "ACCESS",
    Bug => "BUG",
    Feature => "FEATURE",
    Other => "OTHER",
});

/// Page envelope used by every list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Paginated<T> {
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub category: TicketCategory,
    pub created_by: UserIdentity,
    pub assigned_to: Option<UserIdentity>,
    pub canceled_at: Option<String>,
    pub closed_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Timeline entry (status change, assignment, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketEvent {
    pub id: String,
    pub event_type: String,
    #[serde(default)]
    pub from_value: String,
    #[serde(default)]
    pub to_value: String,
    pub triggered_by: UserIdentity,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketMessage {
    pub id: String,
    pub ticket: String,
    pub author: UserIdentity,
    pub message: String,
    pub is_internal: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTicket {
    pub title: String,
    pub description: String,
    pub priority: TicketPriority,
    pub category: TicketCategory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTicketMessage {
    pub ticket: String,
    pub message: String,
    #[serde(default)]
    pub is_internal: bool,
}

/// `assigned_to: None` unassigns the ticket (serialized as `null`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignTicket {
    pub assigned_to: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeTicketStatus {
    pub status: TicketStatus,
}

/// Query filters for `GET /tickets/`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketFilter {
    pub page: Option<u32>,
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,
    pub category: Option<TicketCategory>,
    pub assigned_to: Option<String>,
    pub created_by: Option<String>,
    pub search: Option<String>,
    pub ordering: Option<String>,
}

impl TicketFilter {
    /// Query pairs; `page` defaults to 1 and empty strings are skipped.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = vec![("page".to_string(), self.page.unwrap_or(1).to_string())];
        let mut push = |key: &str, value: Option<String>| {
            if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
                query.push((key.to_string(), value));
            }
        };
        push("status", self.status.map(|s| s.as_str().to_string()));
        push("priority", self.priority.map(|p| p.as_str().to_string()));
        push("category", self.category.map(|c| c.as_str().to_string()));
        push("assigned_to", self.assigned_to.clone());
        push("created_by", self.created_by.clone());
        push("search", self.search.clone());
        push("ordering", self.ordering.clone());
        query
    }
}
