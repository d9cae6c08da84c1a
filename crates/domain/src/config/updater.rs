use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Classification list updater configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdaterConfig {
    /// List of `<tag>/<domain>` lines fetched once a day (optional)
    #[serde(default)]
    pub url: Option<String>,

    /// Local wall-clock time of the daily run, `HH:MM`
    #[serde(default = "default_daily_at")]
    pub daily_at: String,

    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

impl UpdaterConfig {
    pub fn daily_time(&self) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(&self.daily_at, "%H:%M").ok()
    }
}

fn default_daily_at() -> String {
    "00:00".to_string()
}

fn default_fetch_timeout_secs() -> u64 {
    30
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            url: None,
            daily_at: default_daily_at(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
        }
    }
}
