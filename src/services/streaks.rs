//! Activity bookkeeping on a [`Stats`] snapshot: the daily streak and the
//! weekly completion counter. Weeks are ISO weeks, starting on Monday.

use chrono::{Datelike, NaiveDate};

use crate::models::Stats;
use crate::services::recurrence::DATE_FORMAT;

fn last_active(stats: &Stats) -> Option<NaiveDate> {
    stats
        .last_active_date
        .as_deref()
        .and_then(|d| NaiveDate::parse_from_str(d, DATE_FORMAT).ok())
}

fn last_completion(stats: &Stats) -> Option<NaiveDate> {
    stats
        .last_task_completed_date
        .as_deref()
        .and_then(|d| NaiveDate::parse_from_str(d, DATE_FORMAT).ok())
}

fn same_week(a: NaiveDate, b: NaiveDate) -> bool {
    a.iso_week() == b.iso_week()
}

/// Counts one completed task on `today`, starting a fresh weekly count when
/// the previous completion fell in an earlier week.
pub fn record_completion(stats: &mut Stats, today: NaiveDate) {
    let this_week = last_completion(stats).is_some_and(|d| same_week(d, today));
    stats.tasks_completed_this_week = if this_week {
        stats.tasks_completed_this_week + 1
    } else {
        1
    };
    stats.last_task_completed_date = Some(today.format(DATE_FORMAT).to_string());
}

/// Marks `today` as an active day. Returns `false` if it already was.
pub fn record_activity(stats: &mut Stats, today: NaiveDate) -> bool {
    let last = last_active(stats);
    if last.is_some_and(|d| d >= today) {
        return false;
    }

    let continues = last.is_some_and(|d| d.succ_opt() == Some(today));
    stats.current_streak = if continues { stats.current_streak + 1 } else { 1 };
    stats.longest_streak = stats.longest_streak.max(stats.current_streak);
    stats.days_active += 1;
    stats.last_active_date = Some(today.format(DATE_FORMAT).to_string());
    true
}

/// Brings a stored snapshot up to `today`: drops a streak whose last active
/// day is older than yesterday and clears a weekly count from an earlier week.
pub fn refresh(stats: &mut Stats, today: NaiveDate) -> bool {
    let lapsed = drop_lapsed_streak(stats, today);
    let rolled = roll_week(stats, today);
    lapsed || rolled
}

fn drop_lapsed_streak(stats: &mut Stats, today: NaiveDate) -> bool {
    if stats.current_streak == 0 {
        return false;
    }
    let alive = last_active(stats)
        .zip(today.pred_opt())
        .is_some_and(|(last, yesterday)| last >= yesterday);
    if alive {
        return false;
    }
    stats.current_streak = 0;
    true
}

fn roll_week(stats: &mut Stats, today: NaiveDate) -> bool {
    if stats.tasks_completed_this_week == 0 {
        return false;
    }
    if last_completion(stats).is_some_and(|d| same_week(d, today)) {
        return false;
    }
    stats.tasks_completed_this_week = 0;
    true
}

/// Oldest `last_active_date` that still keeps a streak alive on `today`.
pub fn streak_cutoff(today: NaiveDate) -> String {
    today.pred_opt().unwrap_or(today).format(DATE_FORMAT).to_string()
}
