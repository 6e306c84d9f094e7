use crate::analytics::{self, ComplianceReport};
use crate::api::AppState;
use crate::error::Result;
use crate::models::*;
use crate::processing::{NewTicket, QueueView};
use crate::queue::QueueSelector;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Health check endpoint
pub async fn health_check() -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Submit a new ticket
pub async fn submit_ticket(
    State(state): State<AppState>,
    Json(request): Json<SubmitTicketRequest>,
) -> Result<(StatusCode, Json<Ticket>)> {
    request.validate()?;

    let ticket = state
        .processor
        .submit_ticket(
            NewTicket {
                requester_name: request.requester_name,
                requester_email: request.requester_email,
                category: request.category,
                priority: request.priority,
                description: request.description,
            },
            Utc::now(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ticket)))
}

#[derive(Debug, Deserialize, Validate)]
pub struct SubmitTicketRequest {
    #[validate(length(min = 1, max = 120))]
    pub requester_name: String,
    #[validate(email)]
    pub requester_email: String,
    #[validate(length(min = 1, max = 50))]
    pub category: String,
    pub priority: Priority,
    #[validate(length(min = 1))]
    pub description: String,
}

/// Get a ticket with its comments
pub async fn get_ticket(
    State(state): State<AppState>,
    Path(id): Path<TicketId>,
) -> Result<Json<TicketDetailResponse>> {
    let (ticket, comments) = state.processor.ticket_detail(id).await?;
    Ok(Json(TicketDetailResponse { ticket, comments }))
}

#[derive(Debug, Serialize)]
pub struct TicketDetailResponse {
    pub ticket: Ticket,
    pub comments: Vec<Comment>,
}

/// Assign a ticket to an agent
pub async fn assign_ticket(
    State(state): State<AppState>,
    Path(id): Path<TicketId>,
    Json(request): Json<AssignRequest>,
) -> Result<Json<Ticket>> {
    let ticket = state
        .processor
        .assign_ticket(id, request.agent_id, Utc::now())
        .await?;
    Ok(Json(ticket))
}

#[derive(Debug, Deserialize)]
pub struct AssignRequest {
    pub agent_id: AgentId,
}

/// Change a ticket's status
pub async fn change_status(
    State(state): State<AppState>,
    Path(id): Path<TicketId>,
    Json(request): Json<StatusRequest>,
) -> Result<Json<Ticket>> {
    let ticket = state
        .processor
        .change_status(id, request.status, Utc::now())
        .await?;
    Ok(Json(ticket))
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: TicketStatus,
}

/// Add a comment to a ticket
pub async fn post_comment(
    State(state): State<AppState>,
    Path(id): Path<TicketId>,
    Json(request): Json<CommentRequest>,
) -> Result<(StatusCode, Json<Comment>)> {
    request.validate()?;

    let comment = state
        .processor
        .add_comment(
            id,
            request.author_id,
            request.visibility,
            request.body,
            Utc::now(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(comment)))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CommentRequest {
    pub author_id: Option<AgentId>,
    #[serde(default)]
    pub visibility: Visibility,
    #[validate(length(min = 1))]
    pub body: String,
}

/// Queue query parameters. `f` and `q` mirror the agent queue form fields;
/// the current agent arrives pre-authenticated from the session layer.
#[derive(Debug, Deserialize)]
pub struct QueueQuery {
    #[serde(default)]
    pub f: Option<String>,
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub agent_id: Option<AgentId>,
}

impl QueueQuery {
    fn selector(&self) -> QueueSelector {
        self.f
            .as_deref()
            .map(QueueSelector::parse)
            .unwrap_or_default()
    }

    fn search(&self) -> &str {
        self.q.as_deref().unwrap_or("")
    }
}

/// List the agent queue
pub async fn list_queue(
    State(state): State<AppState>,
    Query(params): Query<QueueQuery>,
) -> Result<Json<QueueResponse>> {
    let QueueView {
        tickets,
        sla,
        agents,
    } = state
        .processor
        .queue(params.selector(), params.search(), params.agent_id, Utc::now())
        .await?;

    let tickets = tickets
        .into_iter()
        .map(|ticket| {
            let sla = sla.get(&ticket.id).cloned().unwrap_or_default();
            let assignee = ticket.assignee_id.and_then(|id| agents.get(&id).cloned());
            QueueRow {
                ticket,
                assignee,
                sla,
            }
        })
        .collect::<Vec<_>>();

    Ok(Json(QueueResponse {
        total: tickets.len(),
        tickets,
    }))
}

#[derive(Debug, Serialize)]
pub struct QueueResponse {
    pub total: usize,
    pub tickets: Vec<QueueRow>,
}

#[derive(Debug, Serialize)]
pub struct QueueRow {
    #[serde(flatten)]
    pub ticket: Ticket,
    pub assignee: Option<String>,
    pub sla: String,
}

/// Dashboard compliance report
pub async fn dashboard(State(state): State<AppState>) -> Result<Json<ComplianceReport>> {
    let report = state.processor.dashboard(Utc::now()).await?;
    Ok(Json(report))
}

/// Export the filtered queue as CSV (same filters as the queue view)
pub async fn export_csv(
    State(state): State<AppState>,
    Query(params): Query<QueueQuery>,
) -> Result<impl IntoResponse> {
    let rows = state
        .processor
        .export_rows(params.selector(), params.search(), params.agent_id, Utc::now())
        .await?;

    let body = analytics::to_csv(&rows);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", analytics::EXPORT_FILE_NAME),
            ),
        ],
        body,
    ))
}

/// Requester-facing status check
pub async fn check_status(
    State(state): State<AppState>,
    Query(params): Query<StatusCheckQuery>,
) -> Result<Json<StatusCheckResponse>> {
    let found = state
        .processor
        .check_status(params.ticket_id, &params.requester_email)
        .await?;

    let response = match found {
        Some((ticket, public_comments)) => StatusCheckResponse {
            ticket: Some(ticket),
            public_comments,
        },
        None => StatusCheckResponse {
            ticket: None,
            public_comments: Vec::new(),
        },
    };

    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
pub struct StatusCheckQuery {
    pub ticket_id: TicketId,
    pub requester_email: String,
}

#[derive(Debug, Serialize)]
pub struct StatusCheckResponse {
    pub ticket: Option<Ticket>,
    pub public_comments: Vec<Comment>,
}

/// Register an agent
pub async fn register_agent(
    State(state): State<AppState>,
    Json(request): Json<RegisterAgentRequest>,
) -> Result<(StatusCode, Json<Agent>)> {
    request.validate()?;

    let agent = state
        .processor
        .register_agent(&request.email, request.role, Utc::now())
        .await?;

    Ok((StatusCode::CREATED, Json(agent)))
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterAgentRequest {
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub role: AgentRole,
}
