use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::api::Actor;
use crate::error::AppError;
use crate::models::*;
use crate::services::FriendService;
use crate::state::AppState;

fn service(state: &AppState) -> FriendService {
    FriendService::new(state.db.clone(), state.clock.clone())
}

pub(super) async fn list_friends(
    State(state): State<AppState>,
    Actor(actor): Actor,
) -> Result<Json<Vec<FriendSummary>>, AppError> {
    let friends = service(&state).list(&actor).await?;
    Ok(Json(friends))
}

pub(super) async fn send_request(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Json(req): Json<AddFriendRequest>,
) -> Result<(StatusCode, Json<FriendRequest>), AppError> {
    let request = service(&state).request(&actor, &req.username).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

pub(super) async fn list_requests(
    State(state): State<AppState>,
    Actor(actor): Actor,
) -> Result<Json<Vec<FriendRequest>>, AppError> {
    let requests = service(&state).incoming(&actor).await?;
    Ok(Json(requests))
}

pub(super) async fn accept_request(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(sender_id): Path<String>,
) -> Result<Json<FriendSummary>, AppError> {
    let friend = service(&state).accept(&actor, &sender_id).await?;
    Ok(Json(friend))
}

pub(super) async fn decline_request(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(sender_id): Path<String>,
) -> Result<StatusCode, AppError> {
    service(&state).decline(&actor, &sender_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub(super) async fn remove_friend(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(friend_id): Path<String>,
) -> Result<StatusCode, AppError> {
    service(&state).remove(&actor, &friend_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
