use sqlx::SqliteConnection;

use crate::error::AppError;
use crate::models::{Task, TaskRow};

const TASK_COLUMNS: &str = "id, user_id, name, date, time, repeat_rule, completed, created_at, \
     subtasks, collaborator_id, permission, difficulty";

pub async fn insert_task(conn: &mut SqliteConnection, task: &Task) -> Result<(), AppError> {
    let repeat_rule = serde_json::to_string(&task.repeat)?;
    let subtasks = serde_json::to_string(&task.subtasks)?;
    let (collaborator_id, permission) = match &task.collaborator {
        Some(c) => (Some(c.user_id.as_str()), Some(c.permission.as_str())),
        None => (None, None),
    };

    sqlx::query(
        r#"
        INSERT INTO tasks
            (id, user_id, name, date, time, repeat_rule, completed, created_at,
            subtasks, collaborator_id, permission, difficulty)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
        "#,
    )
    .bind(&task.id)
    .bind(&task.user_id)
    .bind(&task.name)
    .bind(&task.date)
    .bind(&task.time)
    .bind(repeat_rule)
    .bind(task.completed)
    .bind(&task.created_at)
    .bind(subtasks)
    .bind(collaborator_id)
    .bind(permission)
    .bind(task.difficulty.as_str())
    .execute(&mut *conn)
    .await?;

    Ok(())
}

pub async fn find_task_by_id(
    conn: &mut SqliteConnection,
    id: &str,
) -> Result<Option<Task>, AppError> {
    let row = sqlx::query_as::<_, TaskRow>(&format!(
        "SELECT {} FROM tasks WHERE id = ?",
        TASK_COLUMNS
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    row.map(Task::try_from).transpose()
}

/// Tasks owned by or shared with `user_id`, soonest first.
pub async fn fetch_tasks_for_user(
    conn: &mut SqliteConnection,
    user_id: &str,
) -> Result<Vec<Task>, AppError> {
    let rows = sqlx::query_as::<_, TaskRow>(&format!(
        "SELECT {} FROM tasks WHERE user_id = ?1 OR collaborator_id = ?1 \
         ORDER BY date ASC, time ASC, created_at ASC",
        TASK_COLUMNS
    ))
    .bind(user_id)
    .fetch_all(&mut *conn)
    .await?;

    rows.into_iter().map(Task::try_from).collect()
}

/// Writes the editable fields of `task` back. Ownership and collaboration
/// are not touched.
pub async fn update_task(conn: &mut SqliteConnection, task: &Task) -> Result<bool, AppError> {
    let repeat_rule = serde_json::to_string(&task.repeat)?;
    let subtasks = serde_json::to_string(&task.subtasks)?;

    let result = sqlx::query(
        r#"
        UPDATE tasks
        SET name = ?1,
            date = ?2,
            time = ?3,
            repeat_rule = ?4,
            subtasks = ?5,
            difficulty = ?6
        WHERE id = ?7
        "#,
    )
    .bind(&task.name)
    .bind(&task.date)
    .bind(&task.time)
    .bind(repeat_rule)
    .bind(subtasks)
    .bind(task.difficulty.as_str())
    .bind(&task.id)
    .execute(&mut *conn)
    .await?
    .rows_affected();

    Ok(result > 0)
}

/// Flips an open task to completed. Returns `false` if it was already done
/// or does not exist.
pub async fn mark_completed(conn: &mut SqliteConnection, id: &str) -> Result<bool, AppError> {
    let result = sqlx::query("UPDATE tasks SET completed = 1 WHERE id = ? AND completed = 0")
        .bind(id)
        .execute(&mut *conn)
        .await?
        .rows_affected();

    Ok(result > 0)
}

pub async fn delete_task(conn: &mut SqliteConnection, id: &str) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?
        .rows_affected();

    Ok(result > 0)
}
