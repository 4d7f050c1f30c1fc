use std::time::Duration;

use tracing::info;

use distcalc_compute::SchedulerStats;

use crate::state::SharedState;

/// How often the queue depth is logged.
pub(crate) const QUEUE_REPORT_INTERVAL: Duration = Duration::from_secs(2);

/// The line to log for `stats`, or `None` while nothing is waiting for a worker.
pub(crate) fn pending_report(stats: &SchedulerStats) -> Option<String> {
    if stats.queued_tasks == 0 {
        return None;
    }
    Some(format!(
        "Pending: {} queued, {} claimed",
        stats.queued_tasks,
        stats.claimed_tasks()
    ))
}

/// Background task: periodically log how many tasks are waiting for a worker.
pub(crate) async fn report_pending(state: SharedState, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        if let Some(line) = pending_report(&state.scheduler.stats()) {
            info!("{}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use distcalc_core::Config;

    use super::*;
    use crate::state::AppState;

    #[test]
    fn silent_when_queue_is_empty() {
        assert_eq!(pending_report(&SchedulerStats::default()), None);

        // Claimed work alone is not reported.
        let stats = SchedulerStats { queued_tasks: 0, outstanding_tasks: 3, expressions: 2 };
        assert_eq!(pending_report(&stats), None);
    }

    #[test]
    fn reports_queued_and_claimed_counts() {
        let stats = SchedulerStats { queued_tasks: 2, outstanding_tasks: 5, expressions: 4 };
        assert_eq!(pending_report(&stats).as_deref(), Some("Pending: 2 queued, 3 claimed"));
    }

    #[tokio::test(start_paused = true)]
    async fn reporter_keeps_ticking_against_live_state() {
        let state = Arc::new(AppState::new(Config::for_profile("BACKGROUND_TEST")));
        state.scheduler.submit("(1+2)*(3+4)").unwrap();
        state.scheduler.claim_next().unwrap();

        let reporter = tokio::spawn(report_pending(state.clone(), QUEUE_REPORT_INTERVAL));
        tokio::time::sleep(QUEUE_REPORT_INTERVAL * 3).await;
        assert!(!reporter.is_finished());
        assert_eq!(
            pending_report(&state.scheduler.stats()).as_deref(),
            Some("Pending: 1 queued, 1 claimed")
        );
        reporter.abort();
    }
}
