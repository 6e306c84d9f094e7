use crate::models::AgentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A help-desk agent
///
/// The engine only ever uses agents as a lookup target (id to display
/// label); authentication is handled by the surrounding web layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    /// Unique identifier
    pub id: AgentId,

    /// Email, doubles as the display label
    pub email: String,

    /// Role
    pub role: AgentRole,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Agent {
    pub fn new(id: AgentId, email: String, role: AgentRole, now: DateTime<Utc>) -> Self {
        Self {
            id,
            email,
            role,
            created_at: now,
        }
    }
}

#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AgentRole {
    #[default]
    Agent,
    Admin,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_agent_role_labels() {
        assert_eq!(AgentRole::Agent.to_string(), "agent");
        assert_eq!(AgentRole::Admin.to_string(), "admin");
        assert_eq!(AgentRole::default(), AgentRole::Agent);
    }

    #[test]
    fn test_agent_creation() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let agent = Agent::new(7, "ops@example.com".to_string(), AgentRole::Admin, now);
        assert_eq!(agent.id, 7);
        assert_eq!(agent.role, AgentRole::Admin);
    }
}
