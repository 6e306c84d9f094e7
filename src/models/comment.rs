use crate::models::{AgentId, CommentId, TicketId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A reply or note on a ticket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    /// Unique identifier
    pub id: CommentId,

    /// Owning ticket
    pub ticket_id: TicketId,

    /// Authoring agent; None for requester-side replies
    pub author_id: Option<AgentId>,

    /// Whether the requester can see this comment
    pub visibility: Visibility,

    /// Comment body
    pub body: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(
        id: CommentId,
        ticket_id: TicketId,
        author_id: Option<AgentId>,
        visibility: Visibility,
        body: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            ticket_id,
            author_id,
            visibility,
            body,
            created_at: now,
        }
    }

    /// Only public comments count as a first response or appear in the
    /// requester-facing status check.
    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }
}

#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Visibility {
    #[default]
    Public,
    Internal,
}
