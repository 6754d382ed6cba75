use std::sync::Arc;

use crate::agent_client::AgentService;
use crate::assistant::AssistantProfile;
use crate::config::Config;
use crate::session::SessionStore;
use crate::ui::PageRenderer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Agent service backend. `AgentClient` in production, a mock in tests.
    pub agents: Arc<dyn AgentService>,
    /// Environment/agent blueprint shared by every session.
    pub profile: Arc<AssistantProfile>,
    pub sessions: Arc<SessionStore>,
    pub renderer: Arc<PageRenderer>,
}
