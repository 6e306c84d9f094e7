use crate::models::{AgentId, Ticket};
use crate::queue::{filter_tickets, QueueSelector};
use crate::sla;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// File name the export is served under
pub const EXPORT_FILE_NAME: &str = "queue_export.csv";

/// Column order is part of the external contract
pub const EXPORT_HEADER: [&str; 11] = [
    "id",
    "priority",
    "category",
    "requester_name",
    "requester_email",
    "status",
    "assignee",
    "created_at",
    "first_response_due_at",
    "first_response_met_at",
    "sla",
];

/// One flat export row, ready for verbatim serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRow {
    pub id: u64,
    pub priority: String,
    pub category: String,
    pub requester_name: String,
    pub requester_email: String,
    pub status: String,
    /// Assignee display label; empty when unassigned or the lookup misses
    pub assignee: String,
    pub created_at: String,
    pub first_response_due_at: String,
    pub first_response_met_at: String,
    pub sla: String,
}

impl ExportRow {
    /// Columns in contract order
    pub fn columns(&self) -> [String; 11] {
        [
            self.id.to_string(),
            self.priority.clone(),
            self.category.clone(),
            self.requester_name.clone(),
            self.requester_email.clone(),
            self.status.clone(),
            self.assignee.clone(),
            self.created_at.clone(),
            self.first_response_due_at.clone(),
            self.first_response_met_at.clone(),
            self.sla.clone(),
        ]
    }
}

/// Project a ticket snapshot into export rows.
///
/// Applies the queue filter first, then maps every surviving ticket to a
/// row; no row is dropped or reordered relative to the filtered input.
pub fn project(
    tickets: &[Ticket],
    selector: QueueSelector,
    search: &str,
    current_agent: Option<AgentId>,
    agent_directory: &HashMap<AgentId, String>,
    now: DateTime<Utc>,
) -> Vec<ExportRow> {
    filter_tickets(tickets, selector, search, current_agent)
        .into_iter()
        .map(|ticket| project_ticket(&ticket, agent_directory, now))
        .collect()
}

fn project_ticket(
    ticket: &Ticket,
    agent_directory: &HashMap<AgentId, String>,
    now: DateTime<Utc>,
) -> ExportRow {
    let assignee = ticket
        .assignee_id
        .and_then(|id| agent_directory.get(&id).cloned())
        .unwrap_or_default();

    ExportRow {
        id: ticket.id,
        priority: ticket.priority.to_string(),
        category: ticket.category.clone(),
        requester_name: ticket.requester_name.clone(),
        requester_email: ticket.requester_email.clone(),
        status: ticket.status.to_string(),
        assignee,
        created_at: format_timestamp(ticket.created_at),
        first_response_due_at: format_optional(ticket.first_response_due_at),
        first_response_met_at: format_optional(ticket.first_response_met_at),
        sla: sla::describe(
            ticket.first_response_due_at,
            ticket.first_response_met_at,
            now,
        ),
    }
}

/// `YYYY-MM-DD HH:MM`, the export timestamp format
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

fn format_optional(ts: Option<DateTime<Utc>>) -> String {
    ts.map(format_timestamp).unwrap_or_default()
}

/// Serialize rows to CSV, header included
pub fn to_csv(rows: &[ExportRow]) -> String {
    let mut out = String::new();
    out.push_str(&EXPORT_HEADER.join(","));
    out.push('\n');

    for row in rows {
        let line: Vec<String> = row.columns().iter().map(|c| escape_csv(c)).collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }

    out
}

/// Quote a field only when it needs it (comma, quote or newline inside)
fn escape_csv(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_timestamp() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 9, 5, 59).unwrap();
        assert_eq!(format_timestamp(ts), "2024-05-01 09:05");
        assert_eq!(format_optional(None), "");
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("plain"), "plain");
        assert_eq!(escape_csv("a,b"), "\"a,b\"");
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_csv_header() {
        let csv = to_csv(&[]);
        assert_eq!(
            csv,
            "id,priority,category,requester_name,requester_email,status,assignee,created_at,first_response_due_at,first_response_met_at,sla\n"
        );
    }
}
