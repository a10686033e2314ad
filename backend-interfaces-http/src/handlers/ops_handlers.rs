use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use tokio::time::{timeout, Duration};
use tracing::error;

use backend_application::commands::test_event_commands;
use backend_application::AppState;

use crate::error::HttpError;
use crate::middleware::authorize;

#[derive(serde::Serialize)]
struct SenderStatus {
    status: String,
    mode: String,
}

#[derive(serde::Deserialize)]
pub struct TestEventPayload {
    pub server: String,
}

#[derive(serde::Serialize)]
pub struct TestEventResponse {
    pub key: String,
}

pub async fn inject_test_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<TestEventPayload>,
) -> Result<Json<TestEventResponse>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let key = test_event_commands::inject_test_event(&state, &payload.server).await?;
    Ok(Json(TestEventResponse { key }))
}

pub async fn sender_target_check(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if !authorize(&state.config, &headers) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(SenderStatus {
                status: "unauthorized".to_string(),
                mode: "unset".to_string(),
            }),
        )
            .into_response();
    }

    let timeout_secs = state.config.request_timeout_seconds.max(1);
    let mode = match &state.config.sender_webhook_url {
        Some(url) if url.starts_with("ws://") || url.starts_with("wss://") => "ws",
        Some(_) => "http",
        None => "unset",
    };

    match timeout(Duration::from_secs(timeout_secs), state.sender.check_target()).await {
        Ok(Ok(_)) => (
            StatusCode::OK,
            Json(SenderStatus {
                status: "ok".to_string(),
                mode: mode.to_string(),
            }),
        )
            .into_response(),
        Ok(Err(err)) => {
            error!("sender target check failed: {}", err);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(SenderStatus {
                    status: "error".to_string(),
                    mode: mode.to_string(),
                }),
            )
                .into_response()
        }
        Err(_) => {
            error!("sender target check timeout after {}s", timeout_secs);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(SenderStatus {
                    status: "timeout".to_string(),
                    mode: mode.to_string(),
                }),
            )
                .into_response()
        }
    }
}

pub async fn health_live() -> StatusCode {
    StatusCode::OK
}

pub async fn health_ready(State(state): State<AppState>) -> StatusCode {
    let timeout_secs = state.config.request_timeout_seconds.max(1);
    match timeout(Duration::from_secs(timeout_secs), state.catalog.ping()).await {
        Ok(Ok(_)) => StatusCode::OK,
        Ok(Err(err)) => {
            error!("ready check failed: {}", err);
            StatusCode::SERVICE_UNAVAILABLE
        }
        Err(_) => {
            error!("ready check timeout after {}s", timeout_secs);
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

pub async fn metrics_prometheus(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if !authorize(&state.config, &headers) {
        return (StatusCode::UNAUTHORIZED, "unauthorized".to_string()).into_response();
    }
    let payload = state.metrics.render_prometheus();
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; version=0.0.4; charset=utf-8"),
    );
    (headers, payload).into_response()
}
