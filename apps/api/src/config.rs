use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_API_BASE: &str = "https://agent.api.lyzr.app/api/v1";
const DEFAULT_USER_ID: &str = "default_user";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Application configuration loaded from environment variables.
///
/// Secrets are optional: a missing key is forwarded as-is and only surfaces when the
/// agent service rejects the call. Malformed numeric settings fail startup.
#[derive(Clone)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub lyzr_api_key: Option<String>,
    pub lyzr_api_base: String,
    pub request_timeout: Duration,
    pub agent_user_id: String,
    pub system_prompt_path: Option<PathBuf>,
    pub port: u16,
    pub rust_log: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("openai_api_key", &redact(&self.openai_api_key))
            .field("lyzr_api_key", &redact(&self.lyzr_api_key))
            .field("lyzr_api_base", &self.lyzr_api_base)
            .field("request_timeout", &self.request_timeout)
            .field("agent_user_id", &self.agent_user_id)
            .field("system_prompt_path", &self.system_prompt_path)
            .field("port", &self.port)
            .field("rust_log", &self.rust_log)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let timeout_secs = match get("AGENT_REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .context("AGENT_REQUEST_TIMEOUT_SECS must be a whole number of seconds")?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Config {
            openai_api_key: get("OPENAI_API_KEY"),
            lyzr_api_key: get("LYZR_API_KEY"),
            lyzr_api_base: get("LYZR_API_BASE")
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            request_timeout: Duration::from_secs(timeout_secs),
            agent_user_id: get("AGENT_USER_ID").unwrap_or_else(|| DEFAULT_USER_ID.to_string()),
            system_prompt_path: get("SYSTEM_PROMPT_PATH").map(PathBuf::from),
            port: get("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn redact(secret: &Option<String>) -> &'static str {
    match secret {
        Some(_) => "<redacted>",
        None => "<unset>",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert!(config.openai_api_key.is_none());
        assert!(config.lyzr_api_key.is_none());
        assert_eq!(config.lyzr_api_base, DEFAULT_API_BASE);
        assert_eq!(config.request_timeout, Duration::from_secs(120));
        assert_eq!(config.agent_user_id, "default_user");
        assert!(config.system_prompt_path.is_none());
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_missing_secrets_are_not_an_error() {
        let config = config_from(&[("OPENAI_API_KEY", ""), ("PORT", "3000")]).unwrap();
        assert!(config.openai_api_key.is_none());
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_reads_secrets_and_trims_base_url() {
        let config = config_from(&[
            ("OPENAI_API_KEY", "sk-openai"),
            ("LYZR_API_KEY", "lyzr-key"),
            ("LYZR_API_BASE", "http://localhost:9000/api/v1/"),
            ("AGENT_REQUEST_TIMEOUT_SECS", "30"),
        ])
        .unwrap();
        assert_eq!(config.openai_api_key.as_deref(), Some("sk-openai"));
        assert_eq!(config.lyzr_api_key.as_deref(), Some("lyzr-key"));
        assert_eq!(config.lyzr_api_base, "http://localhost:9000/api/v1");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_invalid_port_fails() {
        let err = config_from(&[("PORT", "not-a-port")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_invalid_timeout_fails() {
        assert!(config_from(&[("AGENT_REQUEST_TIMEOUT_SECS", "soon")]).is_err());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = config_from(&[("LYZR_API_KEY", "super-secret")]).unwrap();
        let printed = format!("{config:?}");
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("<redacted>"));
    }
}
