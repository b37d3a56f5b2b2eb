use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Local};

/// Provides the current time and sleeping to the logging loop. Day logs are keyed by the local
/// calendar date, so the clock hands out local time. Tests substitute their own clock.
#[async_trait]
pub trait Clock: Sync + Send + 'static {
    fn time(&self) -> DateTime<Local>;

    async fn sleep(&self, duration: Duration);
}

pub struct DefaultClock;

#[async_trait]
impl Clock for DefaultClock {
    fn time(&self) -> DateTime<Local> {
        Local::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
