use crate::analytics::{self, ComplianceReport, ExportRow};
use crate::error::{AppError, Result};
use crate::models::{
    Agent, AgentId, AgentRole, Comment, Priority, Ticket, TicketId, TicketStatus, Visibility,
};
use crate::queue::{filter_tickets, QueueSelector};
use crate::sla;
use crate::state::TicketStore;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;

/// Fields supplied by the submission form
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub requester_name: String,
    pub requester_email: String,
    pub category: String,
    pub priority: Priority,
    pub description: String,
}

/// Filtered queue plus the per-row lookups the presentation layer needs
#[derive(Debug, Clone)]
pub struct QueueView {
    /// Filtered tickets, newest first
    pub tickets: Vec<Ticket>,

    /// Ticket id to SLA display string, evaluated at the request instant
    pub sla: HashMap<TicketId, String>,

    /// Agent id to display label
    pub agents: HashMap<AgentId, String>,
}

/// Ticket workflow processor
///
/// Owns every write path: it loads snapshots from the store, runs the pure
/// engine over them, and persists the results. The engine modules themselves
/// never touch the store.
pub struct TicketProcessor {
    store: Arc<dyn TicketStore>,
}

impl TicketProcessor {
    pub fn new(store: Arc<dyn TicketStore>) -> Self {
        Self { store }
    }

    /// Create a ticket with its first-response deadline computed up front
    pub async fn submit_ticket(&self, new: NewTicket, now: DateTime<Utc>) -> Result<Ticket> {
        let id = self.store.next_ticket_id().await?;
        let ticket = Ticket::new(
            id,
            new.requester_name.trim().to_string(),
            new.requester_email.trim().to_string(),
            new.category,
            new.priority,
            new.description.trim().to_string(),
            now,
        );
        self.store.save_ticket(&ticket).await?;

        tracing::info!(
            ticket_id = id,
            priority = %ticket.priority,
            "Ticket created"
        );
        Ok(ticket)
    }

    /// Get a ticket, failing when it does not exist
    pub async fn get_ticket(&self, id: TicketId) -> Result<Ticket> {
        self.store
            .get_ticket(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Ticket {} not found", id)))
    }

    /// Ticket plus all of its comments, oldest first
    pub async fn ticket_detail(&self, id: TicketId) -> Result<(Ticket, Vec<Comment>)> {
        let ticket = self.get_ticket(id).await?;
        let comments = self.store.comments_for_ticket(id).await?;
        Ok((ticket, comments))
    }

    /// Assign a ticket to an agent
    pub async fn assign_ticket(
        &self,
        id: TicketId,
        agent_id: AgentId,
        now: DateTime<Utc>,
    ) -> Result<Ticket> {
        let mut ticket = self.get_ticket(id).await?;
        ticket.assign(agent_id, now);
        self.store.update_ticket(&ticket).await?;

        tracing::info!(ticket_id = id, agent_id = agent_id, "Ticket assigned");
        Ok(ticket)
    }

    /// Change a ticket's status
    pub async fn change_status(
        &self,
        id: TicketId,
        status: TicketStatus,
        now: DateTime<Utc>,
    ) -> Result<Ticket> {
        let mut ticket = self.get_ticket(id).await?;
        ticket.set_status(status, now);
        self.store.update_ticket(&ticket).await?;

        tracing::info!(ticket_id = id, status = %status, "Ticket status changed");
        Ok(ticket)
    }

    /// Record a comment on a ticket.
    ///
    /// A public comment stamps the ticket's first-response instant exactly
    /// once; later public comments and internal notes leave it untouched.
    pub async fn add_comment(
        &self,
        ticket_id: TicketId,
        author_id: Option<AgentId>,
        visibility: Visibility,
        body: String,
        now: DateTime<Utc>,
    ) -> Result<Comment> {
        let mut ticket = self.get_ticket(ticket_id).await?;

        let id = self.store.next_comment_id().await?;
        let comment = Comment::new(
            id,
            ticket_id,
            author_id,
            visibility,
            body.trim().to_string(),
            now,
        );
        self.store.save_comment(&comment).await?;

        if comment.is_public() && ticket.record_first_response(now) {
            self.store.update_ticket(&ticket).await?;
            tracing::info!(ticket_id = ticket_id, "First response recorded");
        }

        Ok(comment)
    }

    /// Filtered queue view with per-row SLA text and the agent directory
    pub async fn queue(
        &self,
        selector: QueueSelector,
        search: &str,
        current_agent: Option<AgentId>,
        now: DateTime<Utc>,
    ) -> Result<QueueView> {
        let snapshot = self.store.list_tickets().await?;
        let tickets = filter_tickets(&snapshot, selector, search, current_agent);

        let sla = tickets
            .iter()
            .map(|t| {
                (
                    t.id,
                    sla::describe(t.first_response_due_at, t.first_response_met_at, now),
                )
            })
            .collect();
        let agents = self.store.agent_directory().await?;

        Ok(QueueView {
            tickets,
            sla,
            agents,
        })
    }

    /// Dashboard compliance report over the whole ticket set
    pub async fn dashboard(&self, now: DateTime<Utc>) -> Result<ComplianceReport> {
        let snapshot = self.store.list_tickets().await?;
        Ok(analytics::aggregate(&snapshot, now))
    }

    /// Export rows for the same filter the queue view uses
    pub async fn export_rows(
        &self,
        selector: QueueSelector,
        search: &str,
        current_agent: Option<AgentId>,
        now: DateTime<Utc>,
    ) -> Result<Vec<ExportRow>> {
        let snapshot = self.store.list_tickets().await?;
        let directory = self.store.agent_directory().await?;
        Ok(analytics::project(
            &snapshot,
            selector,
            search,
            current_agent,
            &directory,
            now,
        ))
    }

    /// Register an agent by email. Idempotent: an existing registration is
    /// returned as-is, which is what the startup bootstrap relies on.
    pub async fn register_agent(
        &self,
        email: &str,
        role: AgentRole,
        now: DateTime<Utc>,
    ) -> Result<Agent> {
        let email = email.trim().to_lowercase();
        if email.is_empty() {
            return Err(AppError::Validation("Agent email is required".to_string()));
        }

        if let Some(existing) = self.store.find_agent_by_email(&email).await? {
            return Ok(existing);
        }

        let id = self.store.next_agent_id().await?;
        let agent = Agent::new(id, email, role, now);
        self.store.save_agent(&agent).await?;

        tracing::info!(agent_id = agent.id, role = %agent.role, "Agent registered");
        Ok(agent)
    }

    /// Requester-facing status check: ticket id plus a case-insensitive
    /// email match, returning the ticket and its public comments. A miss on
    /// either is "no ticket", never an error.
    pub async fn check_status(
        &self,
        ticket_id: TicketId,
        requester_email: &str,
    ) -> Result<Option<(Ticket, Vec<Comment>)>> {
        let Some(ticket) = self.store.get_ticket(ticket_id).await? else {
            return Ok(None);
        };

        let claimed = requester_email.trim().to_lowercase();
        if ticket.requester_email.trim().to_lowercase() != claimed {
            return Ok(None);
        }

        let comments = self
            .store
            .comments_for_ticket(ticket_id)
            .await?
            .into_iter()
            .filter(Comment::is_public)
            .collect();

        Ok(Some((ticket, comments)))
    }
}
