use sqlx::SqliteConnection;

use crate::error::AppError;
use crate::models::Stats;

pub async fn insert_stats(conn: &mut SqliteConnection, user_id: &str) -> Result<(), AppError> {
    sqlx::query("INSERT INTO user_stats (user_id) VALUES (?)")
        .bind(user_id)
        .execute(&mut *conn)
        .await?;

    Ok(())
}

pub async fn find_stats(
    conn: &mut SqliteConnection,
    user_id: &str,
) -> Result<Option<Stats>, AppError> {
    let stats = sqlx::query_as::<_, Stats>(
        r#"
        SELECT user_id, tasks_completed, tasks_created, current_streak, longest_streak,
            days_active, last_active_date, xp_earned, coins_earned, coins_spent,
            tasks_completed_this_week, last_task_completed_date
        FROM user_stats
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(stats)
}

pub async fn save_stats(conn: &mut SqliteConnection, stats: &Stats) -> Result<(), AppError> {
    sqlx::query(
        r#"
        UPDATE user_stats
        SET tasks_completed = ?1,
            tasks_created = ?2,
            current_streak = ?3,
            longest_streak = ?4,
            days_active = ?5,
            last_active_date = ?6,
            xp_earned = ?7,
            coins_earned = ?8,
            coins_spent = ?9,
            tasks_completed_this_week = ?10,
            last_task_completed_date = ?11
        WHERE user_id = ?12
        "#,
    )
    .bind(stats.tasks_completed)
    .bind(stats.tasks_created)
    .bind(stats.current_streak)
    .bind(stats.longest_streak)
    .bind(stats.days_active)
    .bind(&stats.last_active_date)
    .bind(stats.xp_earned)
    .bind(stats.coins_earned)
    .bind(stats.coins_spent)
    .bind(stats.tasks_completed_this_week)
    .bind(&stats.last_task_completed_date)
    .bind(&stats.user_id)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Zeroes every running streak last extended before `cutoff` (`YYYY-MM-DD`).
pub async fn reset_stale_streaks(
    conn: &mut SqliteConnection,
    cutoff: &str,
) -> Result<u64, AppError> {
    let result = sqlx::query(
        r#"
        UPDATE user_stats
        SET current_streak = 0
        WHERE current_streak > 0
          AND (last_active_date IS NULL OR last_active_date < ?)
        "#,
    )
    .bind(cutoff)
    .execute(&mut *conn)
    .await?
    .rows_affected();

    Ok(result)
}
