mod agent_client;
mod assistant;
mod config;
mod errors;
mod routes;
mod session;
mod state;
mod ui;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::agent_client::AgentClient;
use crate::assistant::AssistantProfile;
use crate::config::Config;
use crate::routes::build_router;
use crate::session::SessionStore;
use crate::state::AppState;
use crate::ui::PageRenderer;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Job Assistant v{}", env!("CARGO_PKG_VERSION"));

    // Missing keys are not fatal; the agent service reports them on first use.
    if config.lyzr_api_key.is_none() {
        warn!("LYZR_API_KEY is not set; agent service calls will be rejected");
    }
    if config.openai_api_key.is_none() {
        warn!("OPENAI_API_KEY is not set; the agent environment will have no LLM key");
    }

    let agents = AgentClient::new(&config)?;
    info!(
        "Agent client initialized ({}, timeout {}s)",
        agents.base_url(),
        config.request_timeout.as_secs()
    );

    let profile = AssistantProfile::from_config(&config)?;
    info!(
        "Assistant profile: environment '{}', agent '{}', tools {:?}",
        profile.environment.name, profile.agent_name, profile.environment.tools
    );

    let state = AppState {
        agents: Arc::new(agents),
        profile: Arc::new(profile),
        sessions: Arc::new(SessionStore::new()),
        renderer: Arc::new(PageRenderer::new()?),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
