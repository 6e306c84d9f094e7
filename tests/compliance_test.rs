//! Tests for the first-response compliance aggregator

use chrono::{DateTime, Duration, TimeZone, Utc};
use helpdesk_manager::analytics::aggregate;
use helpdesk_manager::models::{Priority, Ticket, TicketStatus};

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

/// Helper to create an eligible ticket; `met_offset_minutes` positions the
/// first response relative to the deadline (negative = early, zero = exactly
/// on it, None = never answered).
fn ticket(
    id: u64,
    priority: Priority,
    hours_ago: i64,
    met_offset_minutes: Option<i64>,
) -> Ticket {
    let created = base_time() - Duration::hours(hours_ago);
    let mut t = Ticket::new(
        id,
        "Requester".to_string(),
        "requester@example.com".to_string(),
        "General".to_string(),
        priority,
        "Something is wrong".to_string(),
        created,
    );
    if let Some(offset) = met_offset_minutes {
        let due = t.first_response_due_at.unwrap();
        t.first_response_met_at = Some(due + Duration::minutes(offset));
    }
    t
}

#[test]
fn test_empty_set_has_no_percentages() {
    let report = aggregate(&[], base_time());

    assert_eq!(report.overall.eligible, 0);
    assert_eq!(report.overall.pct, None);
    assert_eq!(report.new_today, 0);
    assert_eq!(report.open_tickets, 0);
    for slice in &report.by_priority {
        assert_eq!(slice.compliance.eligible, 0);
        assert_eq!(slice.compliance.pct, None);
    }
}

#[test]
fn test_three_of_four_met_is_75_percent() {
    let tickets = vec![
        ticket(1, Priority::P1, 30, Some(-30)),
        ticket(2, Priority::P1, 30, Some(-5)),
        ticket(3, Priority::P1, 30, Some(0)), // exactly at the deadline
        ticket(4, Priority::P1, 30, None),    // never answered
    ];

    let report = aggregate(&tickets, base_time());

    let p1 = report.for_priority(Priority::P1);
    assert_eq!(p1.eligible, 4);
    assert_eq!(p1.met_on_time, 3);
    assert_eq!(p1.pct, Some(75));
    assert_eq!(report.overall.pct, Some(75));
}

#[test]
fn test_boundary_met_exactly_at_deadline_counts() {
    let tickets = vec![ticket(1, Priority::P2, 30, Some(0))];
    let report = aggregate(&tickets, base_time());

    assert_eq!(report.overall.met_on_time, 1);
    assert_eq!(report.overall.pct, Some(100));
}

#[test]
fn test_late_response_is_not_on_time() {
    let tickets = vec![ticket(1, Priority::P2, 30, Some(1))];
    let report = aggregate(&tickets, base_time());

    assert_eq!(report.overall.eligible, 1);
    assert_eq!(report.overall.met_on_time, 0);
    assert_eq!(report.overall.pct, Some(0));
}

#[test]
fn test_priorities_are_sliced_independently() {
    let tickets = vec![
        ticket(1, Priority::P1, 30, Some(-10)),
        ticket(2, Priority::P2, 30, None),
        ticket(3, Priority::P2, 30, Some(-10)),
    ];

    let report = aggregate(&tickets, base_time());

    assert_eq!(report.for_priority(Priority::P1).pct, Some(100));
    assert_eq!(report.for_priority(Priority::P2).pct, Some(50));
    assert_eq!(report.for_priority(Priority::P3).pct, None);
    assert_eq!(report.for_priority(Priority::P4).pct, None);
    assert_eq!(report.overall.eligible, 3);
    assert_eq!(report.overall.met_on_time, 2);
    assert_eq!(report.overall.pct, Some(67));
}

#[test]
fn test_ticket_without_deadline_is_not_eligible() {
    let mut t = ticket(1, Priority::P3, 5, None);
    t.first_response_due_at = None;

    let report = aggregate(&[t], base_time());
    assert_eq!(report.overall.eligible, 0);
    assert_eq!(report.overall.pct, None);
    // Still counted by the activity counters
    assert_eq!(report.new_today, 1);
    assert_eq!(report.open_tickets, 1);
}

#[test]
fn test_new_today_uses_utc_day_boundary() {
    // base_time is 12:00 UTC, so 11 hours ago is today and 13 hours ago is not
    let tickets = vec![
        ticket(1, Priority::P3, 11, None),
        ticket(2, Priority::P3, 13, None),
    ];

    let report = aggregate(&tickets, base_time());
    assert_eq!(report.new_today, 1);
}

#[test]
fn test_open_ticket_count_follows_status_set() {
    let mut a = ticket(1, Priority::P3, 5, None);
    let mut b = ticket(2, Priority::P3, 5, None);
    let mut c = ticket(3, Priority::P3, 5, None);
    let d = ticket(4, Priority::P3, 5, None); // stays Open
    a.status = TicketStatus::InProgress;
    b.status = TicketStatus::WaitingOnRequester;
    c.status = TicketStatus::Resolved;

    let report = aggregate(&[a, b, c, d], base_time());
    assert_eq!(report.open_tickets, 3);
}
