use crate::models::{AgentId, TicketId};
use crate::sla;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A help-desk ticket
///
/// The engine treats tickets as an immutable read projection during a
/// request; mutation happens only through the workflow layer, which persists
/// the result before anything else observes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    /// Unique identifier
    pub id: TicketId,

    /// Requester display name
    pub requester_name: String,

    /// Requester email
    pub requester_email: String,

    /// Free-text category
    pub category: String,

    /// Priority tier
    pub priority: Priority,

    /// Detailed description
    pub description: String,

    /// Current status
    pub status: TicketStatus,

    /// Assigned agent, if any
    pub assignee_id: Option<AgentId>,

    /// First-response deadline, derived from priority and created_at
    pub first_response_due_at: Option<DateTime<Utc>>,

    /// Instant the first public reply was recorded; set at most once
    pub first_response_met_at: Option<DateTime<Utc>>,

    /// Creation timestamp, immutable after creation
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Ticket {
    /// Create a new ticket with the first-response deadline computed from
    /// its priority tier.
    pub fn new(
        id: TicketId,
        requester_name: String,
        requester_email: String,
        category: String,
        priority: Priority,
        description: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            requester_name,
            requester_email,
            category,
            priority,
            description,
            status: TicketStatus::Open,
            assignee_id: None,
            first_response_due_at: Some(sla::compute_due(priority, now)),
            first_response_met_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Stamp the first-response instant. Idempotent: returns true only when
    /// the stamp was actually set, false when one already exists.
    pub fn record_first_response(&mut self, at: DateTime<Utc>) -> bool {
        if self.first_response_met_at.is_some() {
            return false;
        }
        self.first_response_met_at = Some(at);
        self.updated_at = at;
        true
    }

    /// Assign the ticket to an agent
    pub fn assign(&mut self, agent_id: AgentId, now: DateTime<Utc>) {
        self.assignee_id = Some(agent_id);
        self.updated_at = now;
    }

    /// Change the ticket status
    pub fn set_status(&mut self, status: TicketStatus, now: DateTime<Utc>) {
        self.status = status;
        self.updated_at = now;
    }

    /// Check if the ticket counts as open for dashboard purposes
    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }
}

/// Priority tier, P1 most urgent
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumString,
    Display,
)]
pub enum Priority {
    P1,
    P2,
    P3,
    P4,
}

impl Priority {
    /// All tiers in urgency order
    pub const ALL: [Priority; 4] = [Priority::P1, Priority::P2, Priority::P3, Priority::P4];

    /// Parse a priority code, falling back to the widest SLA window for
    /// unrecognized values. The fallback is documented behavior, not an
    /// oversight.
    pub fn from_code(code: &str) -> Self {
        code.parse().unwrap_or(Priority::P4)
    }
}

/// Ticket lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, EnumString, Display)]
pub enum TicketStatus {
    Open,
    #[serde(rename = "In Progress")]
    #[strum(serialize = "In Progress")]
    InProgress,
    #[serde(rename = "Waiting on Requester")]
    #[strum(serialize = "Waiting on Requester")]
    WaitingOnRequester,
    Resolved,
    Closed,
}

impl TicketStatus {
    /// Open states for dashboard purposes
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            TicketStatus::Open | TicketStatus::InProgress | TicketStatus::WaitingOnRequester
        )
    }
}
