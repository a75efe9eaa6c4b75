use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::info;
use uuid::Uuid;

use crate::clock::Clock;
use crate::db::{self, stats, tasks, users};
use crate::error::AppError;
use crate::models::{CompleteTaskResponse, NewTaskRequest, Task, UpdateTaskRequest};
use crate::services::progression::progress_for_balance;
use crate::services::recurrence::{DATE_FORMAT, expand_occurrences};
use crate::services::rewards::reward_for;
use crate::services::streaks;
use crate::services::user_service::load_stats;

const TIME_FORMAT: &str = "%H:%M";

pub struct TaskService {
    db: SqlitePool,
    clock: Arc<dyn Clock>,
}

impl TaskService {
    pub fn new(db: SqlitePool, clock: Arc<dyn Clock>) -> Self {
        Self { db, clock }
    }

    pub async fn list(&self, actor: &str) -> Result<Vec<Task>, AppError> {
        let mut conn = self.db.acquire().await?;
        if !users::user_exists(&mut conn, actor).await? {
            return Err(AppError::NotFound);
        }
        tasks::fetch_tasks_for_user(&mut conn, actor).await
    }

    /// Stores a new task. A recurring task is stored together with its
    /// generated occurrences, and all of them are returned.
    pub async fn create(&self, actor: &str, req: NewTaskRequest) -> Result<Vec<Task>, AppError> {
        let name = req.name.trim();
        if name.is_empty() {
            return Err(AppError::BadRequest("task name must not be empty".to_string()));
        }
        validate_date(&req.date)?;
        let time = normalize_time(req.time)?;

        let mut tx = db::begin_write(&self.db).await?;

        if !users::user_exists(&mut tx, actor).await? {
            return Err(AppError::NotFound);
        }
        if let Some(collaborator) = &req.collaborator {
            if collaborator.user_id == actor {
                return Err(AppError::BadRequest(
                    "cannot share a task with yourself".to_string(),
                ));
            }
            if !users::user_exists(&mut tx, &collaborator.user_id).await? {
                return Err(AppError::BadRequest(format!(
                    "unknown collaborator {}",
                    collaborator.user_id
                )));
            }
        }

        let task = Task {
            id: Uuid::new_v4().to_string(),
            user_id: actor.to_string(),
            name: name.to_string(),
            date: req.date,
            time,
            repeat: req.repeat,
            completed: false,
            created_at: self.clock.now().to_rfc3339(),
            subtasks: req.subtasks,
            collaborator: req.collaborator,
            difficulty: req.difficulty,
        };

        let mut created = vec![task.clone()];
        if task.repeat.is_recurring() {
            created.extend(
                expand_occurrences(&task)
                    .into_iter()
                    .filter(|occurrence| occurrence.id != task.id),
            );
        }

        for t in &created {
            tasks::insert_task(&mut tx, t).await?;
        }

        let mut snapshot = load_stats(&mut tx, actor).await?;
        snapshot.tasks_created += created.len() as i64;
        stats::save_stats(&mut tx, &snapshot).await?;

        tx.commit().await?;

        info!("created task {} for {} ({} stored)", task.id, actor, created.len());
        Ok(created)
    }

    pub async fn update(
        &self,
        actor: &str,
        id: &str,
        req: UpdateTaskRequest,
    ) -> Result<Task, AppError> {
        let mut tx = db::begin_write(&self.db).await?;
        let mut task = visible_task(&mut tx, actor, id).await?;

        if !task.can_edit(actor) {
            return Err(AppError::Forbidden("view-only access to this task".to_string()));
        }
        if req.difficulty.is_some() && !task.is_owned_by(actor) {
            return Err(AppError::Forbidden(
                "only the owner can change difficulty".to_string(),
            ));
        }

        if let Some(name) = req.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(AppError::BadRequest("task name must not be empty".to_string()));
            }
            task.name = name.to_string();
        }
        if let Some(date) = req.date {
            validate_date(&date)?;
            task.date = date;
        }
        if let Some(time) = req.time {
            task.time = normalize_time(Some(time))?;
        }
        if let Some(repeat) = req.repeat {
            task.repeat = repeat;
        }
        if let Some(subtasks) = req.subtasks {
            task.subtasks = subtasks;
        }
        if let Some(difficulty) = req.difficulty {
            task.difficulty = difficulty;
        }

        if !tasks::update_task(&mut tx, &task).await? {
            return Err(AppError::NotFound);
        }
        tx.commit().await?;

        Ok(task)
    }

    /// Ticks or unticks one subtask. Collaborators need edit rights and an
    /// editable subtask.
    pub async fn set_subtask(
        &self,
        actor: &str,
        id: &str,
        index: usize,
        completed: bool,
    ) -> Result<Task, AppError> {
        let mut tx = db::begin_write(&self.db).await?;
        let mut task = visible_task(&mut tx, actor, id).await?;
        let is_owner = task.is_owned_by(actor);
        let can_edit = task.can_edit(actor);

        let subtask = task.subtasks.get_mut(index).ok_or(AppError::NotFound)?;
        if !is_owner && !(can_edit && subtask.editable) {
            return Err(AppError::Forbidden("subtask is not editable".to_string()));
        }
        subtask.completed = completed;

        if !tasks::update_task(&mut tx, &task).await? {
            return Err(AppError::NotFound);
        }
        tx.commit().await?;

        Ok(task)
    }

    /// Completes a task once and pays its reward to the owner.
    pub async fn complete(&self, actor: &str, id: &str) -> Result<CompleteTaskResponse, AppError> {
        let today = self.clock.today();
        let mut tx = db::begin_write(&self.db).await?;
        let mut task = visible_task(&mut tx, actor, id).await?;

        if !task.can_edit(actor) {
            return Err(AppError::Forbidden("view-only access to this task".to_string()));
        }
        if !tasks::mark_completed(&mut tx, &task.id).await? {
            return Err(AppError::Conflict("task is already completed".to_string()));
        }

        let owner = users::find_user_by_id(&mut tx, &task.user_id)
            .await?
            .ok_or(AppError::NotFound)?;
        let reward = reward_for(task.difficulty);
        if !users::credit(&mut tx, &owner.id, reward.xp, reward.coins).await? {
            return Err(AppError::NotFound);
        }

        let mut snapshot = load_stats(&mut tx, &owner.id).await?;
        snapshot.tasks_completed += 1;
        snapshot.xp_earned += reward.xp;
        snapshot.coins_earned += reward.coins;
        streaks::record_activity(&mut snapshot, today);
        streaks::record_completion(&mut snapshot, today);
        stats::save_stats(&mut tx, &snapshot).await?;

        tx.commit().await?;

        let before = progress_for_balance(owner.xp);
        let progress = progress_for_balance(owner.xp + reward.xp);
        task.completed = true;

        info!(
            "task {} completed by {}: +{} xp, +{} coins for {}",
            task.id, actor, reward.xp, reward.coins, owner.id
        );
        Ok(CompleteTaskResponse {
            task,
            reward,
            progress,
            leveled_up: progress.level > before.level,
        })
    }

    pub async fn delete(&self, actor: &str, id: &str) -> Result<(), AppError> {
        let mut conn = self.db.acquire().await?;
        let task = visible_task(&mut conn, actor, id).await?;
        if !task.is_owned_by(actor) {
            return Err(AppError::Forbidden("only the owner can delete a task".to_string()));
        }
        if !tasks::delete_task(&mut conn, &task.id).await? {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

/// A task `actor` may see. Hidden tasks read as missing.
async fn visible_task(
    conn: &mut SqliteConnection,
    actor: &str,
    id: &str,
) -> Result<Task, AppError> {
    tasks::find_task_by_id(conn, id)
        .await?
        .filter(|t| t.can_view(actor))
        .ok_or(AppError::NotFound)
}

fn validate_date(date: &str) -> Result<(), AppError> {
    NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map(|_| ())
        .map_err(|_| AppError::BadRequest(format!("invalid date {:?}, expected YYYY-MM-DD", date)))
}

/// Empty strings clear the time.
fn normalize_time(time: Option<String>) -> Result<Option<String>, AppError> {
    match time {
        Some(t) if t.trim().is_empty() => Ok(None),
        Some(t) => NaiveTime::parse_from_str(&t, TIME_FORMAT)
            .map(|parsed| Some(parsed.format(TIME_FORMAT).to_string()))
            .map_err(|_| AppError::BadRequest(format!("invalid time {:?}, expected HH:MM", t))),
        None => Ok(None),
    }
}
