use std::sync::Arc;
use std::time::Duration;

use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::clock::Clock;
use crate::db::stats;
use crate::error::AppError;
use crate::services::streaks::streak_cutoff;

/// Periodically zeroes streaks of users who missed a day.
pub struct StreakScheduler {
    db: SqlitePool,
    clock: Arc<dyn Clock>,
    interval: Duration,
}

impl StreakScheduler {
    pub fn new(db: SqlitePool, clock: Arc<dyn Clock>, interval_secs: u64) -> Self {
        Self {
            db,
            clock,
            interval: Duration::from_secs(interval_secs),
        }
    }

    /// Runs the sweep forever. Failed sweeps are logged and retried on the
    /// next tick.
    pub async fn start(self) {
        info!("Starting streak scheduler (interval: {:?})", self.interval);

        loop {
            tokio::time::sleep(self.interval).await;

            match self.run_sweep().await {
                Ok(0) => {}
                Ok(reset) => info!("Streak sweep reset {} streaks", reset),
                Err(e) => warn!("Streak sweep failed: {:?}", e),
            }
        }
    }

    pub async fn run_sweep(&self) -> Result<u64, AppError> {
        let cutoff = streak_cutoff(self.clock.today());
        let mut conn = self.db.acquire().await?;
        stats::reset_stale_streaks(&mut conn, &cutoff).await
    }
}
