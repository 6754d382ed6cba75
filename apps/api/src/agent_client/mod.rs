//! Agent Client: the single point of entry for all agent service calls.
//!
//! Every request is a single attempt with an explicit timeout. Failures are returned
//! to the caller as `AgentError`; nothing in here retries.
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;

pub mod models;

pub use models::{AgentId, EnvironmentId, EnvironmentSpec, Feature, MessageRequest};
use models::{
    AgentEnvelope, ChatEnvelope, CreateAgentBody, CreateEnvironmentBody, EnvironmentEnvelope,
    ErrorBody,
};

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Agent service response is missing `{0}`")]
    MissingField(&'static str),
}

/// Operations offered by the remote agent service.
///
/// Carried in `AppState` as `Arc<dyn AgentService>` so tests can swap in a mock.
#[async_trait]
pub trait AgentService: Send + Sync {
    async fn create_environment(&self, spec: &EnvironmentSpec)
        -> Result<EnvironmentId, AgentError>;

    async fn create_agent(
        &self,
        env_id: &EnvironmentId,
        system_prompt: &str,
        name: &str,
    ) -> Result<AgentId, AgentError>;

    async fn send_message(&self, request: &MessageRequest) -> Result<String, AgentError>;
}

/// HTTP client for the hosted agent API.
#[derive(Clone)]
pub struct AgentClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    llm_api_key: Option<String>,
}

impl std::fmt::Debug for AgentClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentClient")
            .field("base_url", &self.base_url)
            .field("api_key_set", &self.api_key.is_some())
            .field("llm_api_key_set", &self.llm_api_key.is_some())
            .finish()
    }
}

impl AgentClient {
    pub fn new(config: &Config) -> Result<Self, AgentError> {
        Ok(Self {
            client: Client::builder().timeout(config.request_timeout).build()?,
            base_url: config.lyzr_api_base.clone(),
            api_key: config.lyzr_api_key.clone(),
            llm_api_key: config.openai_api_key.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn post(&self, path: &str) -> RequestBuilder {
        let request = self
            .client
            .post(format!("{}/{}", self.base_url, path))
            .header("accept", "application/json");
        match &self.api_key {
            Some(key) => request.header("x-api-key", key),
            None => request,
        }
    }

    /// Sends the request once and decodes the JSON body of a success response.
    async fn dispatch<T: DeserializeOwned>(
        &self,
        operation: &str,
        request: RequestBuilder,
    ) -> Result<T, AgentError> {
        let response = request.send().await.map_err(|e| {
            warn!("Agent service {operation} request failed: {e}");
            AgentError::Http(e)
        })?;

        let response = check_status(operation, response).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

async fn check_status(operation: &str, response: Response) -> Result<Response, AgentError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(ErrorBody::into_message)
        .unwrap_or(body);
    warn!("Agent service {operation} returned {status}: {message}");

    Err(AgentError::Api {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl AgentService for AgentClient {
    async fn create_environment(
        &self,
        spec: &EnvironmentSpec,
    ) -> Result<EnvironmentId, AgentError> {
        let body = CreateEnvironmentBody {
            name: &spec.name,
            features: &spec.features,
            tools: &spec.tools,
            llm_api_key: self.llm_api_key.as_deref(),
        };

        let envelope: EnvironmentEnvelope = self
            .dispatch("create_environment", self.post("environment").json(&body))
            .await?;
        let env_id = envelope.into_id()?;

        debug!("Created environment {env_id} ({})", spec.name);
        Ok(env_id)
    }

    async fn create_agent(
        &self,
        env_id: &EnvironmentId,
        system_prompt: &str,
        name: &str,
    ) -> Result<AgentId, AgentError> {
        let body = CreateAgentBody {
            env_id,
            system_prompt,
            name,
        };

        let envelope: AgentEnvelope = self
            .dispatch("create_agent", self.post("agent").json(&body))
            .await?;
        let agent_id = envelope.into_id()?;

        debug!("Created agent {agent_id} in environment {env_id}");
        Ok(agent_id)
    }

    async fn send_message(&self, request: &MessageRequest) -> Result<String, AgentError> {
        let envelope: ChatEnvelope = self
            .dispatch("send_message", self.post("chat/").json(request))
            .await?;
        let text = envelope.into_text()?;

        debug!(
            "Agent {} replied to session {} ({} chars)",
            request.agent_id,
            request.session_id,
            text.len()
        );
        Ok(text)
    }
}
