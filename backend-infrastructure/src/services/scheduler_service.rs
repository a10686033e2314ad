use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

use backend_application::commands::{notify_commands, refresh_commands};
use backend_application::AppState;

/// Handles to the two background loops plus their shutdown signal.
pub struct SchedulerSet {
    shutdown_tx: watch::Sender<bool>,
    handles: Vec<JoinHandle<()>>,
}

impl SchedulerSet {
    /// Signals both loops to stop. No tick is scheduled afterwards; a tick
    /// already in flight runs to completion.
    pub fn stop(self) {
        let _ = self.shutdown_tx.send(true);
        drop(self.handles);
    }
}

/// Spawns the catalog refresh loop and the start-notification loop. The
/// refresh interval fires immediately, so the first snapshot loads at
/// startup.
pub fn spawn_schedulers(state: AppState) -> SchedulerSet {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let refresh = tokio::spawn(run_refresh_loop(state.clone(), shutdown_rx.clone()));
    let notify = tokio::spawn(run_notify_loop(state, shutdown_rx));
    SchedulerSet {
        shutdown_tx,
        handles: vec![refresh, notify],
    }
}

pub async fn run_refresh_loop(state: AppState, mut shutdown: watch::Receiver<bool>) {
    let period = Duration::from_secs(state.config.refresh_interval_minutes.max(1) * 60);
    let mut interval = tokio::time::interval(period);
    loop {
        tokio::select! {
            _ = interval.tick() => {
                match refresh_commands::refresh_events(&state).await {
                    Ok(outcome) => {
                        info!("event refresh done: {} loaded, {} skipped", outcome.loaded, outcome.skipped);
                    }
                    Err(err) => {
                        error!("event refresh failed: {}", err);
                    }
                }
            }
            _ = shutdown.changed() => {
                if *shutdown.borrow() {
                    break;
                }
            }
        }
    }
    info!("refresh loop stopped");
}

pub async fn run_notify_loop(state: AppState, mut shutdown: watch::Receiver<bool>) {
    let period = Duration::from_secs(state.config.notify_interval_seconds.max(1));
    let mut interval = tokio::time::interval(period);
    loop {
        tokio::select! {
            _ = interval.tick() => {
                let outcome = notify_commands::run_started_pass(&state).await;
                if outcome.newly_started > 0 {
                    info!(
                        "notification pass: {} newly started, {} sent, {} failed",
                        outcome.newly_started, outcome.sent, outcome.failed
                    );
                }
            }
            _ = shutdown.changed() => {
                if *shutdown.borrow() {
                    break;
                }
            }
        }
    }
    info!("notify loop stopped");
}
