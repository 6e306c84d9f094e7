use crate::error::{AppError, Result};
use crate::models::{Agent, AgentId, Comment, CommentId, Ticket, TicketId};
use crate::state::TicketStore;
use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// In-memory ticket store (for single-node deployments and testing)
#[derive(Clone)]
pub struct InMemoryStore {
    tickets: Arc<DashMap<TicketId, Ticket>>,
    agents: Arc<DashMap<AgentId, Agent>>,
    comments: Arc<DashMap<CommentId, Comment>>,
    ticket_seq: Arc<AtomicU64>,
    agent_seq: Arc<AtomicU64>,
    comment_seq: Arc<AtomicU64>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            tickets: Arc::new(DashMap::new()),
            agents: Arc::new(DashMap::new()),
            comments: Arc::new(DashMap::new()),
            ticket_seq: Arc::new(AtomicU64::new(0)),
            agent_seq: Arc::new(AtomicU64::new(0)),
            comment_seq: Arc::new(AtomicU64::new(0)),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TicketStore for InMemoryStore {
    async fn next_ticket_id(&self) -> Result<TicketId> {
        Ok(self.ticket_seq.fetch_add(1, Ordering::SeqCst) + 1)
    }

    async fn save_ticket(&self, ticket: &Ticket) -> Result<()> {
        self.tickets.insert(ticket.id, ticket.clone());
        tracing::debug!(ticket_id = ticket.id, "Ticket saved");
        Ok(())
    }

    async fn get_ticket(&self, id: TicketId) -> Result<Option<Ticket>> {
        Ok(self.tickets.get(&id).map(|entry| entry.clone()))
    }

    async fn update_ticket(&self, ticket: &Ticket) -> Result<()> {
        if self.tickets.contains_key(&ticket.id) {
            self.tickets.insert(ticket.id, ticket.clone());
            tracing::debug!(ticket_id = ticket.id, "Ticket updated");
            Ok(())
        } else {
            Err(AppError::NotFound(format!(
                "Ticket {} not found",
                ticket.id
            )))
        }
    }

    async fn list_tickets(&self) -> Result<Vec<Ticket>> {
        Ok(self
            .tickets
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn next_agent_id(&self) -> Result<AgentId> {
        Ok(self.agent_seq.fetch_add(1, Ordering::SeqCst) + 1)
    }

    async fn save_agent(&self, agent: &Agent) -> Result<()> {
        self.agents.insert(agent.id, agent.clone());
        tracing::debug!(agent_id = agent.id, "Agent saved");
        Ok(())
    }

    async fn get_agent(&self, id: AgentId) -> Result<Option<Agent>> {
        Ok(self.agents.get(&id).map(|entry| entry.clone()))
    }

    async fn find_agent_by_email(&self, email: &str) -> Result<Option<Agent>> {
        Ok(self
            .agents
            .iter()
            .find(|entry| entry.value().email == email)
            .map(|entry| entry.value().clone()))
    }

    async fn agent_directory(&self) -> Result<HashMap<AgentId, String>> {
        Ok(self
            .agents
            .iter()
            .map(|entry| (entry.value().id, entry.value().email.clone()))
            .collect())
    }

    async fn next_comment_id(&self) -> Result<CommentId> {
        Ok(self.comment_seq.fetch_add(1, Ordering::SeqCst) + 1)
    }

    async fn save_comment(&self, comment: &Comment) -> Result<()> {
        self.comments.insert(comment.id, comment.clone());
        tracing::debug!(
            comment_id = comment.id,
            ticket_id = comment.ticket_id,
            "Comment saved"
        );
        Ok(())
    }

    async fn comments_for_ticket(&self, ticket_id: TicketId) -> Result<Vec<Comment>> {
        let mut comments: Vec<Comment> = self
            .comments
            .iter()
            .filter(|entry| entry.value().ticket_id == ticket_id)
            .map(|entry| entry.value().clone())
            .collect();

        // Oldest first; ids break created_at ties deterministically
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(comments)
    }
}
