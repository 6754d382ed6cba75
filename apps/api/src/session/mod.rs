//! Session Store: per-browser-session cache of the created agent.
//!
//! Each session creates its environment and agent at most once. A failed creation
//! leaves the session empty so the next submission starts over. Only one request per
//! session may be in flight at a time.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{Mutex, OnceCell, RwLock};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::agent_client::{AgentError, AgentId, AgentService, EnvironmentId, MessageRequest};
use crate::assistant::AssistantProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw.trim()).ok().map(Self)
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Identifiers of the remote agent owned by one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentHandle {
    pub env_id: EnvironmentId,
    pub agent_id: AgentId,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("A request for this session is already in progress")]
    Busy,

    #[error(transparent)]
    Agent(#[from] AgentError),
}

pub struct Session {
    id: SessionId,
    agent: OnceCell<AgentHandle>,
    in_flight: Mutex<()>,
}

impl Session {
    fn new(id: SessionId) -> Self {
        Self {
            id,
            agent: OnceCell::new(),
            in_flight: Mutex::new(()),
        }
    }

    /// The cached agent, if this session has created one.
    #[cfg(test)]
    pub fn cached_agent(&self) -> Option<&AgentHandle> {
        self.agent.get()
    }

    /// Returns the session's agent, creating the environment and agent on first use.
    ///
    /// `create_agent` runs only after `create_environment` succeeded. Nothing is cached
    /// unless both calls succeed.
    pub async fn agent(
        &self,
        service: &dyn AgentService,
        profile: &AssistantProfile,
    ) -> Result<&AgentHandle, AgentError> {
        self.agent
            .get_or_try_init(|| async {
                debug!("Session {}: creating agent environment", self.id);
                let env_id = service
                    .create_environment(&profile.environment)
                    .await
                    .inspect_err(|e| warn!("Session {}: environment creation failed: {e}", self.id))?;

                let agent_id = service
                    .create_agent(&env_id, &profile.system_prompt, &profile.agent_name)
                    .await
                    .inspect_err(|e| warn!("Session {}: agent creation failed: {e}", self.id))?;

                info!("Session {}: agent {agent_id} ready in environment {env_id}", self.id);
                Ok::<_, AgentError>(AgentHandle { env_id, agent_id })
            })
            .await
    }

    /// Sends one message on behalf of this session and returns the agent's reply.
    ///
    /// Fails with `Busy` without contacting the service when another request of the
    /// same session is still outstanding.
    pub async fn ask(
        &self,
        service: &dyn AgentService,
        profile: &AssistantProfile,
        user_id: &str,
        message: &str,
    ) -> Result<String, SessionError> {
        let _guard = self.in_flight.try_lock().map_err(|_| SessionError::Busy)?;

        let handle = self.agent(service, profile).await?;
        let request = MessageRequest {
            agent_id: handle.agent_id.clone(),
            user_id: user_id.to_string(),
            session_id: self.id.to_string(),
            message: message.to_string(),
        };

        Ok(service.send_message(&request).await?)
    }
}

/// All live sessions, keyed by session id. Entries are never evicted.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<SessionId, Arc<Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the session for `id`, inserting an empty one if it is new.
    pub async fn session(&self, id: SessionId) -> Arc<Session> {
        if let Some(session) = self.sessions.read().await.get(&id) {
            return Arc::clone(session);
        }

        let mut sessions = self.sessions.write().await;
        Arc::clone(
            sessions
                .entry(id)
                .or_insert_with(|| Arc::new(Session::new(id))),
        )
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
