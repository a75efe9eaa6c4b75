use std::sync::Mutex;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Source of "today" for streaks and timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a settable day, at noon UTC.
pub struct FixedClock {
    day: Mutex<NaiveDate>,
}

impl FixedClock {
    pub fn new(day: NaiveDate) -> Self {
        Self { day: Mutex::new(day) }
    }

    pub fn set(&self, day: NaiveDate) {
        *self.day.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = day;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        let day = *self.day.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        day.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default())
            .and_utc()
    }
}
