use crate::models::{Priority, Ticket};
use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Counts and percentage for one slice of the eligible set
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComplianceBucket {
    /// Tickets with a recorded first-response deadline
    pub eligible: u64,

    /// Eligible tickets answered on or before the deadline
    pub met_on_time: u64,

    /// met_on_time / eligible as a whole percentage; absent (never zero)
    /// when there is nothing eligible
    pub pct: Option<u32>,
}

impl ComplianceBucket {
    fn from_counts(eligible: u64, met_on_time: u64) -> Self {
        Self {
            eligible,
            met_on_time,
            pct: percentage(met_on_time, eligible),
        }
    }
}

/// Per-tier compliance slice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriorityCompliance {
    pub priority: Priority,

    #[serde(flatten)]
    pub compliance: ComplianceBucket,
}

/// First-response SLA compliance report for the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceReport {
    /// Whole eligible set
    pub overall: ComplianceBucket,

    /// One slice per priority tier, P1 first
    pub by_priority: Vec<PriorityCompliance>,

    /// Tickets created since the start of the current UTC calendar day,
    /// regardless of SLA eligibility
    pub new_today: u64,

    /// Tickets currently in an open state
    pub open_tickets: u64,
}

impl ComplianceReport {
    /// Look up the slice for a tier
    pub fn for_priority(&self, priority: Priority) -> &ComplianceBucket {
        // by_priority always carries all four tiers in order
        &self.by_priority[priority as usize].compliance
    }
}

/// Compute the compliance report over a ticket snapshot.
///
/// A ticket is eligible when it has a first-response deadline, and
/// met-on-time when its first response landed on or before that deadline
/// (the boundary is inclusive). Lateness of a response that did arrive is
/// visible here and only here; the per-row display collapses it to "Met".
pub fn aggregate(tickets: &[Ticket], now: DateTime<Utc>) -> ComplianceReport {
    let overall = bucket_for(tickets.iter());

    let by_priority = Priority::ALL
        .into_iter()
        .map(|priority| PriorityCompliance {
            priority,
            compliance: bucket_for(tickets.iter().filter(|t| t.priority == priority)),
        })
        .collect();

    let start_of_day = now.date_naive().and_time(NaiveTime::MIN).and_utc();
    let new_today = tickets
        .iter()
        .filter(|t| t.created_at >= start_of_day)
        .count() as u64;
    let open_tickets = tickets.iter().filter(|t| t.is_open()).count() as u64;

    ComplianceReport {
        overall,
        by_priority,
        new_today,
        open_tickets,
    }
}

fn bucket_for<'a>(tickets: impl Iterator<Item = &'a Ticket>) -> ComplianceBucket {
    let mut eligible = 0u64;
    let mut met_on_time = 0u64;

    for ticket in tickets {
        let Some(due) = ticket.first_response_due_at else {
            continue;
        };
        eligible += 1;
        if matches!(ticket.first_response_met_at, Some(met) if met <= due) {
            met_on_time += 1;
        }
    }

    ComplianceBucket::from_counts(eligible, met_on_time)
}

/// Whole percentage, rounded half-up; None when the denominator is zero
fn percentage(met: u64, eligible: u64) -> Option<u32> {
    if eligible == 0 {
        return None;
    }
    Some((met as f64 / eligible as f64 * 100.0).round() as u32)
}
