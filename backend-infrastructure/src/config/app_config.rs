use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use backend_domain::RuntimeConfig;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    pub catalog_url: String,
    pub subscriptions_path: String,
    pub excluded_names_path: String,
    pub sender_webhook_url: Option<String>,
    pub sender_webhook_template: Option<String>,
    pub sender_webhook_token: Option<String>,
    pub refresh_interval_minutes: u64,
    pub notify_interval_seconds: u64,
    pub request_timeout_seconds: u64,
    pub max_body_bytes: u64,
    pub max_message_len: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3419".to_string(),
            api_token: None,
            catalog_url: "http://127.0.0.1:8124/v1/scheduled-events".to_string(),
            subscriptions_path: "./subscriptions.json".to_string(),
            excluded_names_path: "./excluded_names.yaml".to_string(),
            sender_webhook_url: None,
            sender_webhook_template: None,
            sender_webhook_token: None,
            refresh_interval_minutes: 60,
            notify_interval_seconds: 10,
            request_timeout_seconds: 15,
            max_body_bytes: 1024 * 1024,
            max_message_len: 1980,
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var("ALMANAC_CONFIG").unwrap_or_else(|_| "./config.toml".to_string());
        let file_path = Path::new(&path);
        let base_dir = file_path.parent();
        if !file_path.exists() {
            warn!("config.toml not found, using defaults");
            let mut config = AppConfig::default();
            config.apply_env_overrides();
            config.resolve_paths(base_dir);
            config.normalize();
            config.validate()?;
            return Ok(config);
        }
        let content = fs::read_to_string(file_path).await?;
        let mut config: AppConfig = toml::from_str(&content)?;
        config.apply_env_overrides();
        config.resolve_paths(base_dir);
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn normalize(&mut self) {
        if let Some(api_token) = &self.api_token {
            if api_token.trim().is_empty() {
                self.api_token = None;
            }
        }
        if let Some(url) = &self.sender_webhook_url {
            if url.trim().is_empty() {
                self.sender_webhook_url = None;
            }
        }
        if let Some(template) = &self.sender_webhook_template {
            if template.trim().is_empty() {
                self.sender_webhook_template = None;
            }
        }
        if let Some(token) = &self.sender_webhook_token {
            if token.trim().is_empty() {
                self.sender_webhook_token = None;
            }
        }
    }

    fn resolve_paths(&mut self, base_dir: Option<&Path>) {
        let Some(base) = base_dir else {
            return;
        };
        self.subscriptions_path = resolve_path(base, &self.subscriptions_path);
        self.excluded_names_path = resolve_path(base, &self.excluded_names_path);
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|err| anyhow!("invalid bind_addr: {}", err))?;
        if self.catalog_url.trim().is_empty() {
            return Err(anyhow!("catalog_url must not be empty"));
        }
        if self.refresh_interval_minutes == 0 {
            return Err(anyhow!("refresh_interval_minutes must be greater than 0"));
        }
        if self.notify_interval_seconds == 0 {
            return Err(anyhow!("notify_interval_seconds must be greater than 0"));
        }
        if self.max_body_bytes == 0 {
            return Err(anyhow!("max_body_bytes must be greater than 0"));
        }
        if self.max_message_len == 0 {
            return Err(anyhow!("max_message_len must be greater than 0"));
        }
        Ok(())
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            api_token: self.api_token.clone(),
            catalog_url: self.catalog_url.clone(),
            subscriptions_path: self.subscriptions_path.clone(),
            excluded_names_path: self.excluded_names_path.clone(),
            sender_webhook_url: self.sender_webhook_url.clone(),
            sender_webhook_template: self.sender_webhook_template.clone(),
            sender_webhook_token: self.sender_webhook_token.clone(),
            refresh_interval_minutes: self.refresh_interval_minutes,
            notify_interval_seconds: self.notify_interval_seconds,
            request_timeout_seconds: self.request_timeout_seconds,
            max_body_bytes: self.max_body_bytes,
            max_message_len: self.max_message_len,
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var("ALMANAC_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Ok(value) = env::var("ALMANAC_API_TOKEN") {
            self.api_token = Some(value);
        }
        if let Ok(value) = env::var("ALMANAC_CATALOG_URL") {
            self.catalog_url = value;
        }
        if let Ok(value) = env::var("ALMANAC_SUBSCRIPTIONS_PATH") {
            self.subscriptions_path = value;
        }
        if let Ok(value) = env::var("ALMANAC_EXCLUDED_NAMES_PATH") {
            self.excluded_names_path = value;
        }
        if let Ok(value) = env::var("ALMANAC_SENDER_WEBHOOK_URL") {
            self.sender_webhook_url = Some(value);
        }
        if let Ok(value) = env::var("ALMANAC_SENDER_WEBHOOK_TEMPLATE") {
            self.sender_webhook_template = Some(value);
        }
        if let Ok(value) = env::var("ALMANAC_SENDER_WEBHOOK_TOKEN") {
            self.sender_webhook_token = Some(value);
        }
        if let Ok(value) = env::var("ALMANAC_REFRESH_INTERVAL_MINUTES") {
            self.refresh_interval_minutes =
                value.parse().unwrap_or(self.refresh_interval_minutes);
        }
        if let Ok(value) = env::var("ALMANAC_NOTIFY_INTERVAL_SECONDS") {
            self.notify_interval_seconds = value.parse().unwrap_or(self.notify_interval_seconds);
        }
        if let Ok(value) = env::var("ALMANAC_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = value.parse().unwrap_or(self.request_timeout_seconds);
        }
        if let Ok(value) = env::var("ALMANAC_MAX_BODY_BYTES") {
            self.max_body_bytes = value.parse().unwrap_or(self.max_body_bytes);
        }
        if let Ok(value) = env::var("ALMANAC_MAX_MESSAGE_LEN") {
            self.max_message_len = value.parse().unwrap_or(self.max_message_len);
        }
    }
}

fn resolve_path(base: &Path, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return trimmed.to_string();
    }
    let path = Path::new(trimmed);
    if path.is_absolute() {
        trimmed.to_string()
    } else {
        base.join(path).to_string_lossy().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_validation() {
        let config = AppConfig::default();
        config.validate().unwrap();
        assert_eq!(config.refresh_interval_minutes, 60);
        assert_eq!(config.notify_interval_seconds, 10);
    }

    #[test]
    fn normalize_blanks_empty_optionals() {
        let mut config = AppConfig {
            api_token: Some("  ".to_string()),
            sender_webhook_url: Some(String::new()),
            sender_webhook_token: Some("token".to_string()),
            ..AppConfig::default()
        };
        config.normalize();
        assert!(config.api_token.is_none());
        assert!(config.sender_webhook_url.is_none());
        assert_eq!(config.sender_webhook_token.as_deref(), Some("token"));
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut config = AppConfig {
            bind_addr: "not-an-addr".to_string(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());

        config = AppConfig {
            notify_interval_seconds: 0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());

        config = AppConfig {
            catalog_url: "   ".to_string(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn relative_paths_resolve_against_the_config_dir() {
        let mut config = AppConfig::default();
        config.resolve_paths(Some(Path::new("/etc/almanac")));
        assert_eq!(config.subscriptions_path, "/etc/almanac/./subscriptions.json");
    }
}
