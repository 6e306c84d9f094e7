pub mod store;

pub use store::InMemoryStore;

use crate::error::Result;
use crate::models::{Agent, AgentId, Comment, CommentId, Ticket, TicketId};
use async_trait::async_trait;
use std::collections::HashMap;

/// Trait for ticket storage operations
///
/// The store is the only writer in the system; the engine modules consume
/// read-only snapshots obtained through `list_tickets`.
#[async_trait]
pub trait TicketStore: Send + Sync {
    /// Allocate the next ticket id
    async fn next_ticket_id(&self) -> Result<TicketId>;

    /// Save a new ticket
    async fn save_ticket(&self, ticket: &Ticket) -> Result<()>;

    /// Get a ticket by id
    async fn get_ticket(&self, id: TicketId) -> Result<Option<Ticket>>;

    /// Update an existing ticket
    async fn update_ticket(&self, ticket: &Ticket) -> Result<()>;

    /// Snapshot of all tickets, unordered
    async fn list_tickets(&self) -> Result<Vec<Ticket>>;

    /// Allocate the next agent id
    async fn next_agent_id(&self) -> Result<AgentId>;

    /// Save an agent
    async fn save_agent(&self, agent: &Agent) -> Result<()>;

    /// Get an agent by id
    async fn get_agent(&self, id: AgentId) -> Result<Option<Agent>>;

    /// Find an agent by email (exact match on the stored, normalized form)
    async fn find_agent_by_email(&self, email: &str) -> Result<Option<Agent>>;

    /// Agent id to display label lookup
    async fn agent_directory(&self) -> Result<HashMap<AgentId, String>>;

    /// Allocate the next comment id
    async fn next_comment_id(&self) -> Result<CommentId>;

    /// Save a comment
    async fn save_comment(&self, comment: &Comment) -> Result<()>;

    /// Comments for a ticket, oldest first
    async fn comments_for_ticket(&self, ticket_id: TicketId) -> Result<Vec<Comment>>;
}
