pub mod agent;
pub mod comment;
pub mod ticket;

pub use agent::*;
pub use comment::*;
pub use ticket::*;

/// Ticket identifier (positive, store-allocated)
pub type TicketId = u64;

/// Agent identifier
pub type AgentId = u64;

/// Comment identifier
pub type CommentId = u64;
