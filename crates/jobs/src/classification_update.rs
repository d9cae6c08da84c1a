use chrono::{DateTime, Local, NaiveTime, TimeZone};
use splitdns_application::use_cases::{RunClassificationUpdateUseCase, UpdateSummary};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

const ONE_DAY: Duration = Duration::from_secs(86400);

/// Reloads the classification list once per day at a fixed local time.
pub struct ClassificationUpdateJob {
    update: Arc<RunClassificationUpdateUseCase>,
    url: String,
    daily_at: NaiveTime,
    shutdown: CancellationToken,
}

impl ClassificationUpdateJob {
    pub fn new(update: Arc<RunClassificationUpdateUseCase>, url: impl Into<String>) -> Self {
        Self {
            update,
            url: url.into(),
            daily_at: NaiveTime::MIN,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_daily_at(mut self, daily_at: NaiveTime) -> Self {
        self.daily_at = daily_at;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    /// One update run; failures are logged, never propagated.
    pub async fn run_once(&self) -> Option<UpdateSummary> {
        match self.update.execute(&self.url).await {
            Ok(summary) => {
                info!(
                    applied = summary.applied,
                    skipped = summary.skipped,
                    "ClassificationUpdateJob: update completed"
                );
                Some(summary)
            }
            Err(e) => {
                error!(url = %self.url, error = %e, "ClassificationUpdateJob: update failed");
                None
            }
        }
    }

    pub fn start(self: Arc<Self>) -> JoinHandle<()> {
        info!(
            url = %self.url,
            daily_at = %self.daily_at,
            "Starting classification update job"
        );

        tokio::spawn(async move {
            loop {
                let delay = delay_until_next(&Local::now(), self.daily_at);
                info!(
                    next_run_in_secs = delay.as_secs(),
                    "ClassificationUpdateJob: scheduled"
                );

                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("ClassificationUpdateJob: shutting down");
                        break;
                    }
                    _ = tokio::time::sleep(delay) => {
                        self.run_once().await;
                    }
                }
            }
        })
    }
}

/// Time from `now` to the next wall-clock occurrence of `at` in `now`'s zone,
/// strictly in the future. Days where `at` does not exist (DST gap) are skipped.
pub fn delay_until_next<Tz: TimeZone>(now: &DateTime<Tz>, at: NaiveTime) -> Duration {
    let zone = now.timezone();
    let mut date = now.date_naive();

    for _ in 0..3 {
        if let Some(candidate) = zone.from_local_datetime(&date.and_time(at)).earliest() {
            if candidate > *now {
                return candidate
                    .signed_duration_since(now)
                    .to_std()
                    .unwrap_or(Duration::ZERO);
            }
        }
        date = match date.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }

    ONE_DAY
}
