use crate::models::Priority;
use chrono::{DateTime, Duration, Utc};

/// Maximum time to first response for a priority tier
pub fn response_window(priority: Priority) -> Duration {
    match priority {
        Priority::P1 => Duration::hours(1),
        Priority::P2 => Duration::hours(4),
        Priority::P3 => Duration::hours(24),
        Priority::P4 => Duration::hours(48),
    }
}

/// Compute the first-response deadline for a ticket.
///
/// Called exactly once at ticket creation; the result is stored on the
/// ticket and never recomputed.
pub fn compute_due(priority: Priority, created_at: DateTime<Utc>) -> DateTime<Utc> {
    created_at + response_window(priority)
}

/// Render the first-response SLA state for display.
///
/// Four mutually exclusive states: no deadline recorded, already answered
/// ("Met", regardless of lateness — timeliness is the compliance
/// aggregator's concern), counting down, or breached. A deadline equal to
/// `now` is the non-breached boundary, "0m left".
pub fn describe(
    due_at: Option<DateTime<Utc>>,
    met_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> String {
    let Some(due) = due_at else {
        return "—".to_string();
    };
    if met_at.is_some() {
        return "Met".to_string();
    }

    let delta = due.signed_duration_since(now).num_seconds();
    if delta >= 0 {
        let (h, m) = split_hours_minutes(delta);
        if h > 0 {
            format!("{}h {}m left", h, m)
        } else {
            format!("{}m left", m)
        }
    } else {
        let (h, m) = split_hours_minutes(-delta);
        if h > 0 {
            format!("Breached {}h {}m", h, m)
        } else {
            format!("Breached {}m", m)
        }
    }
}

/// Whole hours and remaining whole minutes, seconds truncated toward zero
fn split_hours_minutes(seconds: i64) -> (i64, i64) {
    (seconds / 3600, (seconds % 3600) / 60)
}
