use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Metrics {
    refresh_runs: AtomicU64,
    refresh_failures: AtomicU64,
    events_loaded: AtomicU64,
    records_skipped: AtomicU64,
    notifications_sent: AtomicU64,
    send_failures: AtomicU64,
}

impl Metrics {
    pub fn record_refresh(&self, loaded: usize, skipped: usize) {
        self.refresh_runs.fetch_add(1, Ordering::Relaxed);
        self.events_loaded.fetch_add(loaded as u64, Ordering::Relaxed);
        self.records_skipped
            .fetch_add(skipped as u64, Ordering::Relaxed);
    }

    pub fn record_refresh_failure(&self) {
        self.refresh_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_notification(&self) {
        self.notifications_sent.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_send_failure(&self) {
        self.send_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn render_prometheus(&self) -> String {
        let refreshes = self.refresh_runs.load(Ordering::Relaxed);
        let refresh_failures = self.refresh_failures.load(Ordering::Relaxed);
        let loaded = self.events_loaded.load(Ordering::Relaxed);
        let skipped = self.records_skipped.load(Ordering::Relaxed);
        let sent = self.notifications_sent.load(Ordering::Relaxed);
        let send_failures = self.send_failures.load(Ordering::Relaxed);

        format!(
            "# TYPE almanac_refresh_runs_total counter\n\
almanac_refresh_runs_total {}\n\
# TYPE almanac_refresh_failures_total counter\n\
almanac_refresh_failures_total {}\n\
# TYPE almanac_events_loaded_total counter\n\
almanac_events_loaded_total {}\n\
# TYPE almanac_records_skipped_total counter\n\
almanac_records_skipped_total {}\n\
# TYPE almanac_notifications_sent_total counter\n\
almanac_notifications_sent_total {}\n\
# TYPE almanac_send_failures_total counter\n\
almanac_send_failures_total {}\n",
            refreshes, refresh_failures, loaded, skipped, sent, send_failures
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate() {
        let metrics = Metrics::default();
        metrics.record_refresh(10, 2);
        metrics.record_refresh(5, 0);
        metrics.record_notification();
        metrics.record_send_failure();
        let rendered = metrics.render_prometheus();
        assert!(rendered.contains("almanac_refresh_runs_total 2"));
        assert!(rendered.contains("almanac_events_loaded_total 15"));
        assert!(rendered.contains("almanac_records_skipped_total 2"));
        assert!(rendered.contains("almanac_notifications_sent_total 1"));
        assert!(rendered.contains("almanac_send_failures_total 1"));
    }
}
