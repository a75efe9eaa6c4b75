//! Expansion of recurring tasks into concrete future occurrences.

use chrono::{Days, Months, NaiveDate};
use tracing::{debug, warn};

use crate::models::{Cadence, RepeatRule, RepeatUnit, Task};

/// Number of future occurrences generated for a recurring task.
pub const OCCURRENCE_COUNT: u32 = 3;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy)]
enum Step {
    Days(u64),
    Months(u32),
}

impl Step {
    fn from_rule(rule: &RepeatRule) -> Option<Step> {
        match *rule {
            RepeatRule::None => None,
            RepeatRule::Cadence(Cadence::Daily) => Some(Step::Days(1)),
            RepeatRule::Cadence(Cadence::Weekly) => Some(Step::Days(7)),
            RepeatRule::Cadence(Cadence::Monthly) => Some(Step::Months(1)),
            RepeatRule::Custom { unit: RepeatUnit::Days, interval } => {
                Some(Step::Days(u64::from(interval)))
            }
            RepeatRule::Custom { unit: RepeatUnit::Weeks, interval } => {
                Some(Step::Days(u64::from(interval) * 7))
            }
            RepeatRule::Custom { unit: RepeatUnit::Months, interval } => {
                Some(Step::Months(interval))
            }
        }
    }

    /// Date of the `n`th occurrence, always measured from `start`.
    ///
    /// Month steps land on the last day of a short month instead of
    /// spilling into the next one.
    fn nth(&self, start: NaiveDate, n: u32) -> Option<NaiveDate> {
        match *self {
            Step::Days(days) => start.checked_add_days(Days::new(days.checked_mul(u64::from(n))?)),
            Step::Months(months) => start.checked_add_months(Months::new(months.checked_mul(n)?)),
        }
    }
}

pub fn occurrence_id(source_id: &str, n: u32) -> String {
    format!("{}_{}", source_id, n)
}

/// Builds the next [`OCCURRENCE_COUNT`] occurrences of a recurring task.
///
/// Each occurrence is a copy of `task` with a derived id and a recomputed
/// date. A task that does not repeat, or whose date cannot be parsed, comes
/// back unchanged as the only element.
pub fn expand_occurrences(task: &Task) -> Vec<Task> {
    let Some(step) = Step::from_rule(&task.repeat) else {
        return vec![task.clone()];
    };

    let start = match NaiveDate::parse_from_str(&task.date, DATE_FORMAT) {
        Ok(date) => date,
        Err(e) => {
            warn!("Cannot expand task {} with date {:?}: {}", task.id, task.date, e);
            return vec![task.clone()];
        }
    };

    let occurrences: Option<Vec<Task>> = (1..=OCCURRENCE_COUNT)
        .map(|n| {
            let date = step.nth(start, n)?;
            let mut occurrence = task.clone();
            occurrence.id = occurrence_id(&task.id, n);
            occurrence.date = date.format(DATE_FORMAT).to_string();
            Some(occurrence)
        })
        .collect();

    match occurrences {
        Some(occurrences) => {
            debug!("Expanded task {} ({}) into {} occurrences", task.id, task.repeat, occurrences.len());
            occurrences
        }
        None => {
            warn!("Cannot expand task {}: date arithmetic out of range", task.id);
            vec![task.clone()]
        }
    }
}
