use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::api::Actor;
use crate::error::AppError;
use crate::models::*;
use crate::services::{Progress, UserService};
use crate::state::AppState;

fn service(state: &AppState) -> UserService {
    UserService::new(state.db.clone(), state.clock.clone())
}

pub(super) async fn sign_up(
    State(state): State<AppState>,
    Json(req): Json<NewUserRequest>,
) -> Result<(StatusCode, Json<UserProfile>), AppError> {
    let profile = service(&state).sign_up(req).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

pub(super) async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserProfile>, AppError> {
    let profile = service(&state).profile(&id).await?;
    Ok(Json(profile))
}

pub(super) async fn get_progress(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Progress>, AppError> {
    let profile = service(&state).profile(&id).await?;
    Ok(Json(profile.progress))
}

pub(super) async fn get_stats(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Stats>, AppError> {
    let stats = service(&state).stats(&id).await?;
    Ok(Json(stats))
}

/// Presence and login only ever act on the caller's own profile.
fn ensure_self(actor: &str, id: &str) -> Result<(), AppError> {
    if actor != id {
        return Err(AppError::Forbidden(
            "cannot change another user's presence".to_string(),
        ));
    }
    Ok(())
}

pub(super) async fn login(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<String>,
) -> Result<Json<UserProfile>, AppError> {
    ensure_self(&actor, &id)?;
    let profile = service(&state).login(&id).await?;
    Ok(Json(profile))
}

pub(super) async fn logout(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<String>,
) -> Result<Json<UserProfile>, AppError> {
    ensure_self(&actor, &id)?;
    let profile = service(&state).set_presence(&id, false).await?;
    Ok(Json(profile))
}

pub(super) async fn set_presence(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<String>,
    Json(req): Json<PresenceRequest>,
) -> Result<Json<UserProfile>, AppError> {
    ensure_self(&actor, &id)?;
    let profile = service(&state).set_presence(&id, req.online).await?;
    Ok(Json(profile))
}
