mod actor;
mod friends;
mod shop;
mod tasks;
mod users;

use axum::routing::{delete, patch, post};
use axum::{Router, extract::State, http::StatusCode, routing::get};

use crate::error::AppError;
use crate::state::AppState;

pub use actor::{ACTOR_HEADER, Actor};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/users", post(users::sign_up))
        .route("/users/{id}", get(users::get_profile))
        .route("/users/{id}/progress", get(users::get_progress))
        .route("/users/{id}/stats", get(users::get_stats))
        .route("/users/{id}/login", post(users::login))
        .route("/users/{id}/logout", post(users::logout))
        .route("/users/{id}/presence", patch(users::set_presence))
        .route("/friends", get(friends::list_friends).post(friends::send_request))
        .route("/friends/requests", get(friends::list_requests))
        .route("/friends/requests/{sender_id}", delete(friends::decline_request))
        .route("/friends/requests/{sender_id}/accept", post(friends::accept_request))
        .route("/friends/{friend_id}", delete(friends::remove_friend))
        .route("/tasks", get(tasks::list_tasks).post(tasks::create_task))
        .route("/tasks/preview", post(tasks::preview_occurrences))
        .route("/tasks/{id}", patch(tasks::update_task).delete(tasks::delete_task))
        .route("/tasks/{id}/complete", post(tasks::complete_task))
        .route("/tasks/{id}/subtasks/{index}", patch(tasks::set_subtask))
        .route("/shop/items", get(shop::list_items))
        .route("/shop/purchase", post(shop::purchase_item))
        .route("/shop/tiers", post(shop::purchase_tier))
        .route("/shop/equip", post(shop::equip_item))
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(StatusCode::OK)
}
