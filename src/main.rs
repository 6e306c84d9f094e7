use helpdesk_manager::{
    api::{build_router, AppState},
    config::Config,
    models::AgentRole,
    processing::TicketProcessor,
    state::{InMemoryStore, TicketStore},
};
use chrono::Utc;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        eprintln!("Using default configuration");
        Config::default()
    });

    init_tracing(&config);

    tracing::info!("Starting helpdesk-manager v{}", env!("CARGO_PKG_VERSION"));

    // Initialize storage backend
    let store: Arc<dyn TicketStore> = Arc::new(InMemoryStore::new());
    tracing::info!("Storage backend initialized");

    // Initialize ticket processor
    let processor = Arc::new(TicketProcessor::new(store));

    // Bootstrap the admin account when configured
    if let Some(ref admin_email) = config.bootstrap.admin_email {
        let admin = processor
            .register_agent(admin_email, AgentRole::Admin, Utc::now())
            .await?;
        tracing::info!(agent_id = admin.id, "Admin account ready");
    }

    // Build HTTP router
    let app_state = AppState::new(processor);
    let app = build_router(app_state);

    // Start HTTP server
    let http_addr = format!("{}:{}", config.server.host, config.server.http_port);
    let listener = tokio::net::TcpListener::bind(&http_addr).await?;

    tracing::info!("HTTP API server listening on http://{}", http_addr);
    tracing::info!("   Health check: http://{}/health", http_addr);
    tracing::info!("   Agent queue:  http://{}/v1/queue", http_addr);
    tracing::info!("   Dashboard:    http://{}/v1/dashboard", http_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutting down gracefully...");
    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "helpdesk_manager={},tower_http=info",
            config.observability.log_level
        )
        .into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.observability.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}
