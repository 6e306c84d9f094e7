use crate::models::{AgentId, Priority, Ticket};

/// Queue filter selector
///
/// Parsed from the raw query-string value; anything unrecognized degrades
/// to `All` rather than erroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueSelector {
    All,
    Unassigned,
    Mine,
    Tier(Priority),
}

impl QueueSelector {
    /// Parse a selector value: all | unassigned | mine | P1..P4.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "all" => QueueSelector::All,
            "unassigned" => QueueSelector::Unassigned,
            "mine" => QueueSelector::Mine,
            other => other
                .parse::<Priority>()
                .map(QueueSelector::Tier)
                .unwrap_or(QueueSelector::All),
        }
    }
}

impl Default for QueueSelector {
    fn default() -> Self {
        QueueSelector::All
    }
}

/// Filter a ticket snapshot by selector and search term.
///
/// The search term is trimmed; when non-empty it restricts the result to
/// tickets where it appears case-insensitively in the requester name,
/// requester email, description or category. The result is always ordered
/// by created_at descending, whatever filter path was taken.
pub fn filter_tickets(
    tickets: &[Ticket],
    selector: QueueSelector,
    search: &str,
    current_agent: Option<AgentId>,
) -> Vec<Ticket> {
    let term = search.trim().to_lowercase();

    let mut filtered: Vec<Ticket> = tickets
        .iter()
        .filter(|ticket| match selector {
            QueueSelector::All => true,
            QueueSelector::Unassigned => ticket.assignee_id.is_none(),
            QueueSelector::Mine => {
                current_agent.is_some() && ticket.assignee_id == current_agent
            }
            QueueSelector::Tier(priority) => ticket.priority == priority,
        })
        .filter(|ticket| term.is_empty() || matches_search(ticket, &term))
        .cloned()
        .collect();

    // Newest first; the one sort contract shared by queue view and export
    filtered.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    filtered
}

/// Case-insensitive substring match across the four searchable fields.
/// `term` must already be lowercased.
fn matches_search(ticket: &Ticket, term: &str) -> bool {
    ticket.requester_name.to_lowercase().contains(term)
        || ticket.requester_email.to_lowercase().contains(term)
        || ticket.description.to_lowercase().contains(term)
        || ticket.category.to_lowercase().contains(term)
}
