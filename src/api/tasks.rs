use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::api::Actor;
use crate::error::AppError;
use crate::models::*;
use crate::services::{TaskService, expand_occurrences};
use crate::state::AppState;

fn service(state: &AppState) -> TaskService {
    TaskService::new(state.db.clone(), state.clock.clone())
}

pub(super) async fn list_tasks(
    State(state): State<AppState>,
    Actor(actor): Actor,
) -> Result<Json<Vec<Task>>, AppError> {
    let tasks = service(&state).list(&actor).await?;
    Ok(Json(tasks))
}

pub(super) async fn create_task(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Json(req): Json<NewTaskRequest>,
) -> Result<(StatusCode, Json<Vec<Task>>), AppError> {
    let created = service(&state).create(&actor, req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub(super) async fn update_task(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<String>,
    Json(req): Json<UpdateTaskRequest>,
) -> Result<Json<Task>, AppError> {
    let task = service(&state).update(&actor, &id, req).await?;
    Ok(Json(task))
}

pub(super) async fn delete_task(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    service(&state).delete(&actor, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub(super) async fn complete_task(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<String>,
) -> Result<Json<CompleteTaskResponse>, AppError> {
    let outcome = service(&state).complete(&actor, &id).await?;
    Ok(Json(outcome))
}

pub(super) async fn set_subtask(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path((id, index)): Path<(String, usize)>,
    Json(req): Json<SubtaskUpdateRequest>,
) -> Result<Json<Task>, AppError> {
    let task = service(&state)
        .set_subtask(&actor, &id, index, req.completed)
        .await?;
    Ok(Json(task))
}

/// Shows the occurrences a task would expand into, without storing anything.
pub(super) async fn preview_occurrences(Json(task): Json<Task>) -> Json<Vec<Task>> {
    Json(expand_occurrences(&task))
}
