use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;

use backend_application::commands::subscription_commands;
use backend_application::queries::subscription_queries;
use backend_application::AppState;
use backend_domain::SubscriptionBook;

use crate::error::HttpError;
use crate::middleware::authorize;

#[derive(serde::Deserialize)]
pub struct SubscriptionPayload {
    pub destination_id: String,
    pub server: String,
}

pub async fn list_subscriptions(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<SubscriptionBook>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    Ok(Json(subscription_queries::list_subscriptions(&state).await))
}

pub async fn add_rotation_subscription(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<SubscriptionPayload>,
) -> Result<StatusCode, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    subscription_commands::add_rotation_subscription(
        &state,
        &payload.destination_id,
        &payload.server,
    )
    .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove_rotation_subscription(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<SubscriptionPayload>,
) -> Result<StatusCode, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    subscription_commands::remove_rotation_subscription(
        &state,
        &payload.destination_id,
        &payload.server,
    )
    .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_daily_subscription(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<SubscriptionPayload>,
) -> Result<StatusCode, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    subscription_commands::add_daily_subscription(
        &state,
        &payload.destination_id,
        &payload.server,
    )
    .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove_daily_subscription(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<SubscriptionPayload>,
) -> Result<StatusCode, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    subscription_commands::remove_daily_subscription(
        &state,
        &payload.destination_id,
        &payload.server,
    )
    .await?;
    Ok(StatusCode::NO_CONTENT)
}
