//! Service configuration.
//!
//! Loaded from `<config_dir>/insightstream/config.json` when present, then
//! overridden by environment variables:
//!
//! - `INSIGHTSTREAM_BIND` / `INSIGHTSTREAM_PORT` - listen address
//! - `INSIGHTSTREAM_CORS_ORIGINS` - allowed origins, comma-separated
//! - `INSIGHTSTREAM_LLM_BASE_URL` - OpenAI-compatible API base URL
//! - `INSIGHTSTREAM_LLM_MODEL` - model name
//! - `INSIGHTSTREAM_LLM_API_KEY` - API key (falls back to `OPENAI_API_KEY`)
//! - `INSIGHTSTREAM_LLM_TIMEOUT_SECS` - scoring call timeout

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};

const APP_NAME: &str = "insightstream";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub bind: String,
    pub port: u16,
    /// Allowed CORS origins. `None` allows any origin.
    pub cors_origins: Option<Vec<String>>,
    pub oracle: OracleConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 3000,
            cors_origins: None,
            oracle: OracleConfig::default(),
        }
    }
}

/// Settings for the language model used as the scoring oracle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key: None,
            timeout_secs: 60,
        }
    }
}

impl OracleConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Load from the user's config directory and the environment.
    /// Falls back to defaults if the file is missing or fails to parse.
    pub fn load() -> Self {
        let mut config = match get_config_path().and_then(|path| Self::from_file(&path)) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config, using defaults: {:#}", e);
                Self::default()
            }
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Read a config file. A missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config = serde_json::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Apply overrides looked up by variable name.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(bind) = lookup("INSIGHTSTREAM_BIND") {
            self.bind = bind;
        }
        if let Some(port) = lookup("INSIGHTSTREAM_PORT").and_then(|p| p.parse().ok()) {
            self.port = port;
        }
        if let Some(origins) = lookup("INSIGHTSTREAM_CORS_ORIGINS") {
            self.cors_origins = Some(
                origins
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
            );
        }
        if let Some(url) = lookup("INSIGHTSTREAM_LLM_BASE_URL") {
            self.oracle.base_url = url;
        }
        if let Some(model) = lookup("INSIGHTSTREAM_LLM_MODEL") {
            self.oracle.model = model;
        }
        if let Some(key) =
            lookup("INSIGHTSTREAM_LLM_API_KEY").or_else(|| lookup("OPENAI_API_KEY"))
        {
            self.oracle.api_key = Some(key);
        }
        if let Some(secs) = lookup("INSIGHTSTREAM_LLM_TIMEOUT_SECS").and_then(|s| s.parse().ok())
        {
            self.oracle.timeout_secs = secs;
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

fn get_config_path() -> Result<PathBuf> {
    let mut path =
        config_dir().ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    path.push(APP_NAME);
    path.push(CONFIG_FILE);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::from_file(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "port": 8080, "oracle": { "model": "llama3" } }"#).unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.bind, "127.0.0.1");
        assert_eq!(config.oracle.model, "llama3");
        assert_eq!(config.oracle.timeout_secs, 60);
    }

    #[test]
    fn invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(Config::from_file(&path).is_err());
    }

    #[test]
    fn environment_overrides_file_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("INSIGHTSTREAM_PORT", "4000"),
            ("INSIGHTSTREAM_CORS_ORIGINS", "http://a.test, http://b.test,"),
            ("OPENAI_API_KEY", "sk-fallback"),
            ("INSIGHTSTREAM_LLM_TIMEOUT_SECS", "15"),
        ]);
        let mut config = Config::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.port, 4000);
        assert_eq!(
            config.cors_origins,
            Some(vec!["http://a.test".to_string(), "http://b.test".to_string()])
        );
        assert_eq!(config.oracle.api_key.as_deref(), Some("sk-fallback"));
        assert_eq!(config.oracle.timeout(), Duration::from_secs(15));
    }

    #[test]
    fn unparsable_port_is_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|key| (key == "INSIGHTSTREAM_PORT").then(|| "abc".to_string()));
        assert_eq!(config.port, 3000);
    }
}
