use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde_json::json;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::Message;

use backend_domain::{DestinationSender, RuntimeConfig};

const DEFAULT_HTTP_TEMPLATE: &str = r#"{"destination":"{destination}","message":"{message}"}"#;

/// Outbound destination transport. A `ws://`/`wss://` target speaks the
/// OneBot `send_group_msg` action with the destination id as the group id;
/// an http(s) target gets a templated JSON POST.
pub struct DefaultDestinationSender {
    config: RuntimeConfig,
}

impl DefaultDestinationSender {
    pub fn new(config: RuntimeConfig) -> Self {
        Self { config }
    }

    fn resolve_url(&self) -> Result<String> {
        match &self.config.sender_webhook_url {
            Some(url) if !url.trim().is_empty() => Ok(url.clone()),
            _ => Err(anyhow!("sender webhook url not configured")),
        }
    }
}

#[async_trait]
impl DestinationSender for DefaultDestinationSender {
    async fn send(&self, destination_id: &str, text: &str) -> Result<()> {
        let url = self.resolve_url()?;
        if url.starts_with("ws://") || url.starts_with("wss://") {
            send_ws_message(&self.config, &url, destination_id, text).await
        } else {
            send_http_message(&self.config, &url, destination_id, text).await
        }
    }

    async fn check_target(&self) -> Result<()> {
        let url = self.resolve_url()?;
        if url.starts_with("ws://") || url.starts_with("wss://") {
            check_ws_target(&self.config, &url).await
        } else {
            check_http_target(&self.config, &url).await
        }
    }
}

async fn send_http_message(
    config: &RuntimeConfig,
    url: &str,
    destination_id: &str,
    text: &str,
) -> Result<()> {
    let template = config
        .sender_webhook_template
        .as_deref()
        .unwrap_or(DEFAULT_HTTP_TEMPLATE);
    let payload = build_payload(template, destination_id, text);
    let client = Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_seconds.max(3)))
        .build()?;

    client
        .post(url)
        .header("Content-Type", "application/json")
        .body(payload)
        .send()
        .await?
        .error_for_status()?;
    Ok(())
}

async fn check_http_target(config: &RuntimeConfig, url: &str) -> Result<()> {
    let client = Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_seconds.max(3)))
        .build()?;
    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        anyhow::bail!("sender webhook responded {}", response.status());
    }
    Ok(())
}

async fn send_ws_message(
    config: &RuntimeConfig,
    url: &str,
    destination_id: &str,
    text: &str,
) -> Result<()> {
    let group_id: i64 = destination_id
        .trim()
        .parse()
        .map_err(|_| anyhow!("destination id '{}' is not a group id", destination_id))?;
    let payload = json!({
        "action": "send_group_msg",
        "params": {
            "group_id": group_id,
            "message": text,
        },
        "echo": format!("almanac-{}", chrono::Utc::now().timestamp_millis()),
    })
    .to_string();

    let token = config.sender_webhook_token.clone();
    if let Err(err) = try_ws_send(url, token.as_deref(), &payload, false).await {
        if token.as_ref().is_some() {
            try_ws_send(url, token.as_deref(), &payload, true).await?;
        } else {
            return Err(err);
        }
    }
    Ok(())
}

async fn check_ws_target(config: &RuntimeConfig, url: &str) -> Result<()> {
    let token = config.sender_webhook_token.clone();
    if let Err(err) = try_ws_check(url, token.as_deref(), false).await {
        if token.as_ref().is_some() {
            return try_ws_check(url, token.as_deref(), true).await;
        }
        return Err(err);
    }
    Ok(())
}

async fn try_ws_check(url: &str, token: Option<&str>, use_query: bool) -> Result<()> {
    let mut request = if use_query {
        add_access_token_query(url, token).into_client_request()?
    } else {
        url.into_client_request()?
    };

    if let Some(token) = token {
        if !use_query {
            request
                .headers_mut()
                .insert(AUTHORIZATION, format!("Bearer {}", token).parse()?);
        }
    }

    let (mut ws, _) = tokio_tungstenite::connect_async(request).await?;
    let payload = json!({
        "action": "get_status",
        "params": {},
        "echo": format!("almanac-check-{}", chrono::Utc::now().timestamp_millis()),
    })
    .to_string();
    ws.send(Message::Text(payload)).await?;
    let _ = timeout(Duration::from_secs(2), ws.next()).await?;
    let _ = ws.close(None).await;
    Ok(())
}

async fn try_ws_send(url: &str, token: Option<&str>, payload: &str, use_query: bool) -> Result<()> {
    let mut request = if use_query {
        add_access_token_query(url, token).into_client_request()?
    } else {
        url.into_client_request()?
    };

    if let Some(token) = token {
        if !use_query {
            request
                .headers_mut()
                .insert(AUTHORIZATION, format!("Bearer {}", token).parse()?);
        }
    }

    let (mut ws, _) = tokio_tungstenite::connect_async(request).await?;
    ws.send(Message::Text(payload.to_string())).await?;
    let _ = timeout(Duration::from_secs(2), ws.next()).await.ok();
    let _ = ws.close(None).await;
    Ok(())
}

fn add_access_token_query(url: &str, token: Option<&str>) -> String {
    let token = match token {
        Some(value) if !value.trim().is_empty() => value,
        _ => return url.to_string(),
    };
    if url.contains("access_token=") {
        return url.to_string();
    }
    if url.contains('?') {
        format!("{}&access_token={}", url, token)
    } else {
        format!("{}?access_token={}", url, token)
    }
}

fn build_payload(template: &str, destination_id: &str, text: &str) -> String {
    template
        .replace("{destination}", &json_escape(destination_id))
        .replace("{message}", &json_escape(text))
}

/// Escapes a string for interpolation inside a JSON string literal,
/// without the surrounding quotes.
fn json_escape(text: &str) -> String {
    let quoted = serde_json::Value::String(text.to_string()).to_string();
    quoted[1..quoted.len() - 1].to_string()
}
