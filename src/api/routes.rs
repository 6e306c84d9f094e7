use crate::api::{handlers, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

/// Build the main API router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(handlers::health_check))
        // Ticket intake and detail
        .route("/v1/tickets", post(handlers::submit_ticket))
        .route("/v1/tickets/:id", get(handlers::get_ticket))
        .route("/v1/tickets/:id/assign", post(handlers::assign_ticket))
        .route("/v1/tickets/:id/status", post(handlers::change_status))
        .route("/v1/tickets/:id/comments", post(handlers::post_comment))
        // Agent queue, dashboard and export
        .route("/v1/queue", get(handlers::list_queue))
        .route("/v1/queue/export.csv", get(handlers::export_csv))
        .route("/v1/dashboard", get(handlers::dashboard))
        // Requester-facing status check
        .route("/v1/status-check", get(handlers::check_status))
        // Agent registration
        .route("/v1/agents", post(handlers::register_agent))
        // Add state
        .with_state(state)
        // Add middleware
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new())
                .on_response(DefaultOnResponse::new()),
        )
        .layer(CorsLayer::permissive())
}
