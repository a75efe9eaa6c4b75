use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Per-user counters shown on the statistics screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Stats {
    pub user_id: String,
    pub tasks_completed: i64,
    pub tasks_created: i64,
    pub current_streak: i64,
    pub longest_streak: i64,
    pub days_active: i64,
    pub last_active_date: Option<String>,
    pub xp_earned: i64,
    pub coins_earned: i64,
    pub coins_spent: i64,
    pub tasks_completed_this_week: i64,
    pub last_task_completed_date: Option<String>,
}

impl Stats {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Default::default()
        }
    }
}
