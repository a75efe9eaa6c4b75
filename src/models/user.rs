use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::catalog::{ResolutionTier, Slot};
use crate::services::Progress;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserRow {
    pub id: String,
    pub username: String,
    pub email: String,
    pub xp: i64,
    pub coins: i64,
    pub is_online: bool,
    pub created_at: String,
}

/// Everything a client needs to draw a user's card.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub email: String,
    pub xp: i64,
    pub coins: i64,
    pub is_online: bool,
    pub created_at: String,
    pub progress: Progress,
    pub equipped: BTreeMap<Slot, i64>,
    pub tiers: Vec<ResolutionTier>,
    pub owned_items: Vec<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewUserRequest {
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PresenceRequest {
    pub online: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PurchaseItemRequest {
    pub item_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PurchaseTierRequest {
    pub tier: ResolutionTier,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EquipRequest {
    pub item_id: i64,
}
