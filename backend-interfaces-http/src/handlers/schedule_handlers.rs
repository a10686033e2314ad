use axum::extract::{Query, State};
use axum::http::HeaderMap;

use backend_application::queries::{rotation_queries, schedule_queries};
use backend_application::AppState;
use backend_domain::GameServer;

use crate::error::HttpError;
use crate::middleware::authorize;

#[derive(serde::Deserialize)]
pub struct ScheduleQuery {
    pub server: String,
}

pub async fn active_schedule(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ScheduleQuery>,
) -> Result<String, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let server = parse_server(&query.server)?;
    Ok(schedule_queries::active_schedule(&state, server).await)
}

pub async fn rotation_digest(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ScheduleQuery>,
) -> Result<String, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let server = parse_server(&query.server)?;
    Ok(rotation_queries::rotation_digest(&state, server).await)
}

fn parse_server(raw: &str) -> Result<GameServer, HttpError> {
    GameServer::parse(raw).map_err(|err| HttpError::BadRequest(err.to_string()))
}
