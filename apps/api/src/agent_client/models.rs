//! Wire types for the agent service: request bodies and the response envelopes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::AgentError;

/// Identifier of a remote execution environment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnvironmentId(pub String);

/// Identifier of a remote agent bound to an environment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(pub String);

impl std::fmt::Display for EnvironmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Capability kinds an environment can enable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeatureType {
    ShortTermMemory,
    ToolCalling,
}

/// A `{type, config, priority}` feature descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub feature_type: FeatureType,
    pub config: Map<String, Value>,
    pub priority: i32,
}

impl Feature {
    pub fn short_term_memory() -> Self {
        Self {
            feature_type: FeatureType::ShortTermMemory,
            config: Map::new(),
            priority: 0,
        }
    }

    /// Tool calling with a retry ceiling enforced by the remote service.
    pub fn tool_calling(max_tries: u32) -> Self {
        let mut config = Map::new();
        config.insert("max_tries".to_string(), Value::from(max_tries));
        Self {
            feature_type: FeatureType::ToolCalling,
            config,
            priority: 0,
        }
    }
}

/// Everything needed to register an environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentSpec {
    pub name: String,
    pub features: Vec<Feature>,
    pub tools: Vec<String>,
}

/// One user message addressed to an agent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageRequest {
    pub agent_id: AgentId,
    pub user_id: String,
    pub session_id: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateEnvironmentBody<'a> {
    pub name: &'a str,
    pub features: &'a [Feature],
    pub tools: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llm_api_key: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateAgentBody<'a> {
    pub env_id: &'a EnvironmentId,
    pub system_prompt: &'a str,
    pub name: &'a str,
}

// Envelope fields are optional so a missing field maps to `MissingField`
// instead of an opaque deserialization error.

#[derive(Debug, Deserialize)]
pub(crate) struct EnvironmentEnvelope {
    pub env_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AgentEnvelope {
    pub agent_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatEnvelope {
    pub response: Option<String>,
}

impl EnvironmentEnvelope {
    pub fn into_id(self) -> Result<EnvironmentId, AgentError> {
        non_empty(self.env_id, "env_id").map(EnvironmentId)
    }
}

impl AgentEnvelope {
    pub fn into_id(self) -> Result<AgentId, AgentError> {
        non_empty(self.agent_id, "agent_id").map(AgentId)
    }
}

impl ChatEnvelope {
    pub fn into_text(self) -> Result<String, AgentError> {
        self.response.ok_or(AgentError::MissingField("response"))
    }
}

fn non_empty(value: Option<String>, field: &'static str) -> Result<String, AgentError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(AgentError::MissingField(field))
}

/// Error bodies come in a few shapes depending on the failing layer.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub detail: Option<Value>,
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        match (self.detail, self.message) {
            (Some(Value::String(detail)), _) => Some(detail),
            (Some(detail), _) => Some(detail.to_string()),
            (None, message) => message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_features_serialize_as_descriptors() {
        let features = vec![Feature::short_term_memory(), Feature::tool_calling(3)];
        let value = serde_json::to_value(&features).unwrap();
        assert_eq!(
            value,
            json!([
                {"type": "SHORT_TERM_MEMORY", "config": {}, "priority": 0},
                {"type": "TOOL_CALLING", "config": {"max_tries": 3}, "priority": 0}
            ])
        );
    }

    #[test]
    fn test_environment_body_omits_missing_llm_key() {
        let features = vec![Feature::short_term_memory()];
        let tools = vec!["perplexity_search".to_string()];
        let body = CreateEnvironmentBody {
            name: "env",
            features: &features,
            tools: &tools,
            llm_api_key: None,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert!(value.get("llm_api_key").is_none());
        assert_eq!(value["tools"], json!(["perplexity_search"]));
    }

    #[test]
    fn test_agent_body_flattens_env_id() {
        let env_id = EnvironmentId("env-1".to_string());
        let body = CreateAgentBody {
            env_id: &env_id,
            system_prompt: "be helpful",
            name: "agent",
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["env_id"], "env-1");
    }

    #[test]
    fn test_envelope_missing_field_is_error() {
        let envelope: AgentEnvelope = serde_json::from_str(r#"{"status": "ok"}"#).unwrap();
        assert!(matches!(
            envelope.into_id(),
            Err(AgentError::MissingField("agent_id"))
        ));
    }

    #[test]
    fn test_envelope_blank_id_is_error() {
        let envelope: EnvironmentEnvelope = serde_json::from_str(r#"{"env_id": " "}"#).unwrap();
        assert!(matches!(
            envelope.into_id(),
            Err(AgentError::MissingField("env_id"))
        ));
    }

    #[test]
    fn test_chat_envelope_allows_empty_text() {
        let envelope: ChatEnvelope = serde_json::from_str(r#"{"response": ""}"#).unwrap();
        assert_eq!(envelope.into_text().unwrap(), "");
    }

    #[test]
    fn test_error_body_prefers_detail() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"detail": "Invalid API key", "message": "x"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Invalid API key"));

        let body: ErrorBody = serde_json::from_str(r#"{"message": "quota exceeded"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("quota exceeded"));
    }
}
