// Runtime configuration shared through AppState

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
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
