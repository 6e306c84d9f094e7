//! Tests for the ticket workflow processor

use chrono::{DateTime, Duration, TimeZone, Utc};
use helpdesk_manager::models::{AgentRole, Priority, TicketStatus, Visibility};
use helpdesk_manager::processing::{NewTicket, TicketProcessor};
use helpdesk_manager::queue::QueueSelector;
use helpdesk_manager::state::InMemoryStore;
use std::sync::Arc;

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()
}

fn processor() -> TicketProcessor {
    TicketProcessor::new(Arc::new(InMemoryStore::new()))
}

fn new_ticket(priority: Priority) -> NewTicket {
    NewTicket {
        requester_name: "Dana Field".to_string(),
        requester_email: "dana@example.com".to_string(),
        category: "Billing".to_string(),
        priority,
        description: "Invoice total looks wrong".to_string(),
    }
}

#[tokio::test]
async fn test_submission_computes_due_per_tier() {
    let processor = processor();
    let now = base_time();

    let p1 = processor.submit_ticket(new_ticket(Priority::P1), now).await.unwrap();
    let p4 = processor.submit_ticket(new_ticket(Priority::P4), now).await.unwrap();

    assert_eq!(p1.first_response_due_at, Some(now + Duration::hours(1)));
    assert_eq!(p4.first_response_due_at, Some(now + Duration::hours(48)));
    assert_eq!(p1.status, TicketStatus::Open);
    assert_eq!(p1.id, 1);
    assert_eq!(p4.id, 2);
}

#[tokio::test]
async fn test_public_comment_stamps_first_response_once() {
    let processor = processor();
    let now = base_time();

    let ticket = processor.submit_ticket(new_ticket(Priority::P2), now).await.unwrap();

    let first = now + Duration::minutes(20);
    let second = now + Duration::hours(2);

    processor
        .add_comment(ticket.id, Some(1), Visibility::Public, "On it".to_string(), first)
        .await
        .unwrap();
    processor
        .add_comment(ticket.id, Some(1), Visibility::Public, "Update".to_string(), second)
        .await
        .unwrap();

    let (after, comments) = processor.ticket_detail(ticket.id).await.unwrap();
    assert_eq!(after.first_response_met_at, Some(first));
    assert_eq!(comments.len(), 2);
}

#[tokio::test]
async fn test_internal_note_does_not_stamp_first_response() {
    let processor = processor();
    let now = base_time();

    let ticket = processor.submit_ticket(new_ticket(Priority::P2), now).await.unwrap();
    processor
        .add_comment(
            ticket.id,
            Some(1),
            Visibility::Internal,
            "Checking with finance".to_string(),
            now + Duration::minutes(5),
        )
        .await
        .unwrap();

    let after = processor.get_ticket(ticket.id).await.unwrap();
    assert!(after.first_response_met_at.is_none());
}

#[tokio::test]
async fn test_assign_and_change_status() {
    let processor = processor();
    let now = base_time();

    let agent = processor
        .register_agent("agent@example.com", AgentRole::Agent, now)
        .await
        .unwrap();
    let ticket = processor.submit_ticket(new_ticket(Priority::P3), now).await.unwrap();

    let assigned = processor
        .assign_ticket(ticket.id, agent.id, now + Duration::minutes(1))
        .await
        .unwrap();
    assert_eq!(assigned.assignee_id, Some(agent.id));

    let resolved = processor
        .change_status(ticket.id, TicketStatus::Resolved, now + Duration::hours(1))
        .await
        .unwrap();
    assert_eq!(resolved.status, TicketStatus::Resolved);
    assert!(!resolved.is_open());
}

#[tokio::test]
async fn test_queue_view_carries_sla_text_and_directory() {
    let processor = processor();
    let now = base_time();

    let agent = processor
        .register_agent("agent@example.com", AgentRole::Agent, now)
        .await
        .unwrap();
    let ticket = processor.submit_ticket(new_ticket(Priority::P1), now).await.unwrap();
    processor.assign_ticket(ticket.id, agent.id, now).await.unwrap();

    let view = processor
        .queue(QueueSelector::Mine, "", Some(agent.id), now + Duration::minutes(30))
        .await
        .unwrap();

    assert_eq!(view.tickets.len(), 1);
    assert_eq!(view.sla.get(&ticket.id).unwrap(), "30m left");
    assert_eq!(view.agents.get(&agent.id).unwrap(), "agent@example.com");
}

#[tokio::test]
async fn test_dashboard_reflects_responses() {
    let processor = processor();
    let now = base_time();

    let answered = processor.submit_ticket(new_ticket(Priority::P1), now).await.unwrap();
    processor.submit_ticket(new_ticket(Priority::P1), now).await.unwrap();
    processor
        .add_comment(
            answered.id,
            Some(1),
            Visibility::Public,
            "Fixed".to_string(),
            now + Duration::minutes(10),
        )
        .await
        .unwrap();

    let report = processor.dashboard(now + Duration::hours(1)).await.unwrap();
    assert_eq!(report.overall.eligible, 2);
    assert_eq!(report.overall.met_on_time, 1);
    assert_eq!(report.overall.pct, Some(50));
    assert_eq!(report.new_today, 2);
    assert_eq!(report.open_tickets, 2);
}

#[tokio::test]
async fn test_export_rows_match_queue() {
    let processor = processor();
    let now = base_time();

    for priority in [Priority::P1, Priority::P2, Priority::P2] {
        processor.submit_ticket(new_ticket(priority), now).await.unwrap();
    }

    let selector = QueueSelector::Tier(Priority::P2);
    let view = processor.queue(selector, "", None, now).await.unwrap();
    let rows = processor.export_rows(selector, "", None, now).await.unwrap();

    assert_eq!(rows.len(), view.tickets.len());
    for (row, ticket) in rows.iter().zip(view.tickets.iter()) {
        assert_eq!(row.id, ticket.id);
    }
}

#[tokio::test]
async fn test_status_check_requires_matching_email() {
    let processor = processor();
    let now = base_time();

    let ticket = processor.submit_ticket(new_ticket(Priority::P3), now).await.unwrap();
    processor
        .add_comment(ticket.id, Some(1), Visibility::Public, "Reply".to_string(), now)
        .await
        .unwrap();
    processor
        .add_comment(ticket.id, Some(1), Visibility::Internal, "Note".to_string(), now)
        .await
        .unwrap();

    // Case-insensitive match succeeds and sees only public comments
    let found = processor
        .check_status(ticket.id, "  DANA@example.com ")
        .await
        .unwrap();
    let (_, comments) = found.expect("matching email should find the ticket");
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].body, "Reply");

    // Wrong email and unknown id both degrade to None, never an error
    assert!(processor
        .check_status(ticket.id, "other@example.com")
        .await
        .unwrap()
        .is_none());
    assert!(processor
        .check_status(9999, "dana@example.com")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_agent_registration_is_idempotent() {
    let processor = processor();
    let now = base_time();

    let first = processor
        .register_agent("Admin@Example.com", AgentRole::Admin, now)
        .await
        .unwrap();
    let second = processor
        .register_agent("admin@example.com", AgentRole::Agent, now + Duration::hours(1))
        .await
        .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.role, AgentRole::Admin);
    assert_eq!(first.email, "admin@example.com");
}
