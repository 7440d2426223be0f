//! Runs the daily batch at a fixed UTC time of day, forever.

use std::time::Duration;

use chrono::{DateTime, Days, NaiveTime, Utc};
use tracing::{error, info};

use crate::batch::run_batch;
use crate::state::AppState;

/// Time left until the next `at` strictly after `now`.
pub fn duration_until_next(now: DateTime<Utc>, at: NaiveTime) -> Duration {
    let today = now.date_naive().and_time(at).and_utc();
    let next = if today > now {
        today
    } else {
        now.date_naive()
            .checked_add_days(Days::new(1))
            .unwrap_or(now.date_naive())
            .and_time(at)
            .and_utc()
    };
    (next - now).to_std().unwrap_or_default()
}

pub async fn run_schedule(state: AppState) {
    let at = state.config.batch_schedule_time;
    info!("Scheduler started; daily batch runs at {} UTC", at.format("%H:%M"));

    loop {
        let wait = duration_until_next(Utc::now(), at);
        info!("Next batch in {}s", wait.as_secs());
        tokio::time::sleep(wait).await;

        let today = Utc::now().date_naive();
        match run_batch(&state, today).await {
            Ok(report) => match serde_json::to_string(&report) {
                Ok(json) => info!("Batch for {today} finished: {json}"),
                Err(e) => error!("Batch for {today} finished but its report failed to encode: {e}"),
            },
            Err(e) => error!("Batch for {today} failed: {e:#}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn nine() -> NaiveTime {
        NaiveTime::from_hms_opt(9, 0, 0).unwrap()
    }

    #[test]
    fn test_waits_until_later_today() {
        let now = Utc.with_ymd_and_hms(2025, 5, 1, 7, 30, 0).unwrap();
        assert_eq!(duration_until_next(now, nine()), Duration::from_secs(90 * 60));
    }

    #[test]
    fn test_past_time_rolls_to_tomorrow() {
        let now = Utc.with_ymd_and_hms(2025, 5, 1, 10, 0, 0).unwrap();
        assert_eq!(
            duration_until_next(now, nine()),
            Duration::from_secs(23 * 3600)
        );
    }

    #[test]
    fn test_exact_time_waits_a_full_day() {
        let now = Utc.with_ymd_and_hms(2025, 12, 31, 9, 0, 0).unwrap();
        assert_eq!(
            duration_until_next(now, nine()),
            Duration::from_secs(24 * 3600)
        );
    }
}
