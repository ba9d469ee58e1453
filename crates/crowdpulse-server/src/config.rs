//! Server configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Comment API settings
    #[serde(default)]
    pub youtube: YouTubeConfig,

    /// Classifier model settings
    #[serde(default)]
    pub model: ModelConfig,
}

impl ServerConfig {
    /// Load configuration from file and CLI overrides
    pub fn load(config_path: &str, cli: &crate::Cli) -> anyhow::Result<Self> {
        // Try to load from file, or use defaults
        let mut config: Self = if Path::new(config_path).exists() {
            let content = std::fs::read_to_string(config_path)?;
            serde_yaml::from_str(&content)?
        } else {
            Self::default()
        };

        // Apply CLI overrides
        if let Some(api_key) = &cli.api_key {
            config.youtube.api_key = api_key.clone();
        }
        if let Some(model_dir) = &cli.model_dir {
            config.model.dir = Some(model_dir.clone());
        }
        config.listen = cli.listen.clone();
        config.port = cli.port;

        if config.youtube.api_key.is_empty() {
            anyhow::bail!("no YouTube API key configured (set youtube.api_key or --api-key)");
        }

        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            port: default_port(),
            youtube: YouTubeConfig::default(),
            model: ModelConfig::default(),
        }
    }
}

/// Comment API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YouTubeConfig {
    /// Data API key
    #[serde(default)]
    pub api_key: String,

    /// Comments analyzed per request
    #[serde(default = "default_max_comments")]
    pub max_comments: usize,

    /// Upper bound on a single upstream call
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,
}

impl Default for YouTubeConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            max_comments: default_max_comments(),
            fetch_timeout_secs: default_fetch_timeout(),
        }
    }
}

/// Classifier model configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Local checkpoint directory; when absent the checkpoint is
    /// downloaded from the Hub at startup
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// Hub repository to download from
    #[serde(default = "default_hub_repo")]
    pub hub_repo: String,

    /// Inference device ("cpu", "cuda", "metal")
    #[serde(default = "default_device")]
    pub device: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            dir: None,
            hub_repo: default_hub_repo(),
            device: default_device(),
        }
    }
}

fn default_listen() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_comments() -> usize {
    crowdpulse_comments::DEFAULT_MAX_COMMENTS
}

fn default_fetch_timeout() -> u64 {
    10
}

fn default_hub_repo() -> String {
    crowdpulse_classifier::DEFAULT_HUB_REPO.to_string()
}

fn default_device() -> String {
    "cpu".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.youtube.max_comments, 20);
        assert_eq!(config.youtube.fetch_timeout_secs, 10);
        assert!(config.model.dir.is_none());
        assert_eq!(config.model.device, "cpu");
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: ServerConfig = serde_yaml::from_str(
            r#"
youtube:
  api_key: "test-key"
  max_comments: 50
"#,
        )
        .unwrap();
        assert_eq!(config.youtube.api_key, "test-key");
        assert_eq!(config.youtube.max_comments, 50);
        assert_eq!(config.port, 8080);
        assert_eq!(config.model.hub_repo, "SamLowe/roberta-base-go_emotions");
    }
}
