use chrono::Utc;
use tracing::warn;

use backend_domain::GameEvent;

use crate::{AppError, AppState};

#[derive(Debug, Default, Clone, Copy)]
pub struct RefreshOutcome {
    pub loaded: usize,
    pub skipped: usize,
}

/// Re-fetches the event catalog and swaps the store snapshot.
///
/// A malformed record is skipped with its reason; only the fetch itself
/// failing aborts the cycle, leaving the prior snapshot authoritative.
/// Keys already past their open time are seeded into the started set so a
/// fresh snapshot never floods start alerts for events long in progress.
pub async fn refresh_events(state: &AppState) -> Result<RefreshOutcome, AppError> {
    let records = state
        .catalog
        .fetch_scheduled_events()
        .await
        .map_err(|err| {
            state.metrics.record_refresh_failure();
            AppError::Internal(err)
        })?;

    let now = Utc::now();
    let mut events = Vec::with_capacity(records.len());
    let mut skipped = 0usize;
    for record in &records {
        match GameEvent::from_record(record, state.normalizer.as_ref()) {
            Ok(event) => events.push(event),
            Err(err) => {
                skipped += 1;
                warn!("skipping catalog record {}: {}", record.key, err);
            }
        }
    }

    let started_now: Vec<String> = events
        .iter()
        .filter(|e| e.is_started(now))
        .map(|e| e.key.clone())
        .collect();
    let loaded = events.len();

    state.store.replace_snapshot(events).await;
    state.store.seed_started(started_now).await;
    state.metrics.record_refresh(loaded, skipped);

    Ok(RefreshOutcome { loaded, skipped })
}
