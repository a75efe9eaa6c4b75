use axum::Json;
use axum::extract::State;

use crate::api::Actor;
use crate::catalog::CatalogItem;
use crate::error::AppError;
use crate::models::*;
use crate::services::ShopService;
use crate::state::AppState;

fn service(state: &AppState) -> ShopService {
    ShopService::new(state.db.clone(), state.clock.clone())
}

pub(super) async fn list_items(State(state): State<AppState>) -> Json<Vec<CatalogItem>> {
    Json(service(&state).catalog())
}

pub(super) async fn purchase_item(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Json(req): Json<PurchaseItemRequest>,
) -> Result<Json<UserProfile>, AppError> {
    let profile = service(&state).purchase_item(&actor, req.item_id).await?;
    Ok(Json(profile))
}

pub(super) async fn purchase_tier(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Json(req): Json<PurchaseTierRequest>,
) -> Result<Json<UserProfile>, AppError> {
    let profile = service(&state).purchase_tier(&actor, req.tier).await?;
    Ok(Json(profile))
}

pub(super) async fn equip_item(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Json(req): Json<EquipRequest>,
) -> Result<Json<UserProfile>, AppError> {
    let profile = service(&state).equip(&actor, req.item_id).await?;
    Ok(Json(profile))
}
