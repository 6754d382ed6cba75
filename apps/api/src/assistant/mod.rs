//! Assistant profile: the environment and agent blueprint every session is built from.

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing::info;

use crate::agent_client::{EnvironmentSpec, Feature};
use crate::config::Config;

pub mod handlers;
pub mod prompts;

use prompts::JOB_ASSISTANT_SYSTEM_PROMPT;

pub const ENVIRONMENT_NAME: &str = "Job Assistant Environment";
pub const AGENT_NAME: &str = "Job Assistant Agent";
pub const SEARCH_TOOL: &str = "perplexity_search";
/// Retry ceiling the remote service applies to tool calls.
pub const TOOL_MAX_TRIES: u32 = 3;

/// Fixed for the lifetime of the process; shared by all sessions.
#[derive(Debug, Clone)]
pub struct AssistantProfile {
    pub environment: EnvironmentSpec,
    pub agent_name: String,
    pub system_prompt: Arc<str>,
}

impl AssistantProfile {
    /// The job assistant with the built-in prompt.
    pub fn job_assistant() -> Self {
        Self::with_prompt(JOB_ASSISTANT_SYSTEM_PROMPT)
    }

    pub fn with_prompt(system_prompt: &str) -> Self {
        Self {
            environment: EnvironmentSpec {
                name: ENVIRONMENT_NAME.to_string(),
                features: vec![
                    Feature::short_term_memory(),
                    Feature::tool_calling(TOOL_MAX_TRIES),
                ],
                tools: vec![SEARCH_TOOL.to_string()],
            },
            agent_name: AGENT_NAME.to_string(),
            system_prompt: Arc::from(system_prompt),
        }
    }

    /// Uses the prompt file from `SYSTEM_PROMPT_PATH` when set, the built-in prompt otherwise.
    pub fn from_config(config: &Config) -> Result<Self> {
        match &config.system_prompt_path {
            Some(path) => {
                let prompt = load_prompt(path)?;
                info!("Loaded system prompt from {}", path.display());
                Ok(Self::with_prompt(&prompt))
            }
            None => Ok(Self::job_assistant()),
        }
    }
}

fn load_prompt(path: &Path) -> Result<String> {
    let prompt = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read system prompt from {}", path.display()))?;
    if prompt.trim().is_empty() {
        bail!("System prompt file {} is empty", path.display());
    }
    Ok(prompt)
}
