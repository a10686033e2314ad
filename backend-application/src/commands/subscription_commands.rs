use tracing::error;

use backend_domain::{GameServer, SubscriptionBook, SubscriptionEntry};

use crate::{AppError, AppState};

pub async fn add_rotation_subscription(
    state: &AppState,
    destination_id: &str,
    server: &str,
) -> Result<(), AppError> {
    let entry = parse_entry(destination_id, server)?;
    let mut book = state.subscriptions.write().await;
    if !book.add_rotation(entry) {
        return Err(AppError::BadRequest(
            "destination already subscribed".to_string(),
        ));
    }
    persist(state, &book).await
}

pub async fn remove_rotation_subscription(
    state: &AppState,
    destination_id: &str,
    server: &str,
) -> Result<(), AppError> {
    let server = parse_server(server)?;
    let mut book = state.subscriptions.write().await;
    if !book.remove_rotation(destination_id.trim(), server) {
        return Err(AppError::BadRequest(
            "destination is not subscribed".to_string(),
        ));
    }
    persist(state, &book).await
}

pub async fn add_daily_subscription(
    state: &AppState,
    destination_id: &str,
    server: &str,
) -> Result<(), AppError> {
    let entry = parse_entry(destination_id, server)?;
    let mut book = state.subscriptions.write().await;
    if !book.add_daily(entry) {
        return Err(AppError::BadRequest(
            "destination already subscribed".to_string(),
        ));
    }
    persist(state, &book).await
}

pub async fn remove_daily_subscription(
    state: &AppState,
    destination_id: &str,
    server: &str,
) -> Result<(), AppError> {
    let server = parse_server(server)?;
    let mut book = state.subscriptions.write().await;
    if !book.remove_daily(destination_id.trim(), server) {
        return Err(AppError::BadRequest(
            "destination is not subscribed".to_string(),
        ));
    }
    persist(state, &book).await
}

fn parse_entry(destination_id: &str, server: &str) -> Result<SubscriptionEntry, AppError> {
    let destination_id = destination_id.trim();
    if destination_id.is_empty() {
        return Err(AppError::BadRequest(
            "destination_id must not be empty".to_string(),
        ));
    }
    Ok(SubscriptionEntry {
        destination_id: destination_id.to_string(),
        server: parse_server(server)?,
    })
}

fn parse_server(server: &str) -> Result<GameServer, AppError> {
    GameServer::parse(server).map_err(|err| AppError::BadRequest(err.to_string()))
}

async fn persist(state: &AppState, book: &SubscriptionBook) -> Result<(), AppError> {
    state
        .subscription_repo
        .save(&state.config.subscriptions_path, book)
        .await
        .map_err(|err| {
            error!("failed to persist subscriptions: {}", err);
            AppError::Internal(err)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{state_with, RecordingSender, StubCatalog};
    use std::sync::Arc;

    fn state() -> AppState {
        state_with(
            Arc::new(StubCatalog::with_records(Vec::new())),
            Arc::new(RecordingSender::default()),
            SubscriptionBook::default(),
        )
    }

    #[tokio::test]
    async fn add_then_duplicate_then_remove() {
        let state = state();
        add_rotation_subscription(&state, "chan-1", "na").await.unwrap();

        let err = add_rotation_subscription(&state, "chan-1", "NA")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        remove_rotation_subscription(&state, "chan-1", "NA")
            .await
            .unwrap();
        let err = remove_rotation_subscription(&state, "chan-1", "NA")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn unsupported_server_is_rejected_at_the_boundary() {
        let state = state();
        let err = add_daily_subscription(&state, "chan-1", "KR")
            .await
            .unwrap_err();
        match err {
            AppError::BadRequest(message) => assert!(message.contains("KR")),
            _ => panic!("unexpected error type"),
        }
        assert!(state.subscriptions.read().await.daily.is_empty());
    }

    #[tokio::test]
    async fn blank_destination_is_rejected() {
        let state = state();
        let err = add_rotation_subscription(&state, "   ", "NA")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn classes_are_independent() {
        let state = state();
        add_rotation_subscription(&state, "chan-1", "JP").await.unwrap();
        add_daily_subscription(&state, "chan-1", "JP").await.unwrap();
        let book = state.subscriptions.read().await;
        assert_eq!(book.rotation.len(), 1);
        assert_eq!(book.daily.len(), 1);
    }
}
