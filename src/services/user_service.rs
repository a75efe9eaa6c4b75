use std::sync::Arc;

use sqlx::{SqliteConnection, SqlitePool};
use tracing::info;
use uuid::Uuid;

use crate::catalog::{self, DEFAULT_ITEMS, ResolutionTier};
use crate::clock::Clock;
use crate::db::{self, inventory, stats, users};
use crate::error::AppError;
use crate::models::{NewUserRequest, Stats, UserProfile, UserRow};
use crate::services::progression::progress_for_balance;
use crate::services::streaks;

pub struct UserService {
    db: SqlitePool,
    clock: Arc<dyn Clock>,
}

impl UserService {
    pub fn new(db: SqlitePool, clock: Arc<dyn Clock>) -> Self {
        Self { db, clock }
    }

    /// Creates a profile with an empty balance, the 4-bit tier and the
    /// default outfit.
    pub async fn sign_up(&self, req: NewUserRequest) -> Result<UserProfile, AppError> {
        let username = req.username.trim();
        if username.is_empty() {
            return Err(AppError::BadRequest("username must not be empty".to_string()));
        }
        let email = req.email.trim();
        if !email.contains('@') {
            return Err(AppError::BadRequest(format!("invalid email: {}", email)));
        }

        let mut tx = db::begin_write(&self.db).await?;

        if users::find_user_by_username(&mut tx, username).await?.is_some() {
            return Err(AppError::Conflict(format!("username {} is taken", username)));
        }

        let now = self.clock.now().to_rfc3339();
        let user = UserRow {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            email: email.to_string(),
            xp: 0,
            coins: 0,
            is_online: false,
            created_at: now.clone(),
        };

        users::insert_user(&mut tx, &user).await?;
        stats::insert_stats(&mut tx, &user.id).await?;
        inventory::grant_tier(&mut tx, &user.id, ResolutionTier::FourBit).await?;
        for item_id in DEFAULT_ITEMS {
            inventory::grant_item(&mut tx, &user.id, item_id, &now).await?;
            if let Some(item) = catalog::find(item_id) {
                inventory::equip_item(&mut tx, &user.id, item.slot, item_id).await?;
            }
        }

        let profile = load_profile(&mut tx, &user.id).await?;
        tx.commit().await?;

        info!("signed up user {} ({})", profile.username, profile.id);
        Ok(profile)
    }

    pub async fn profile(&self, id: &str) -> Result<UserProfile, AppError> {
        let mut conn = self.db.acquire().await?;
        load_profile(&mut conn, id).await
    }

    /// Stats as of today: a streak that lapsed since the last write reads as 0.
    pub async fn stats(&self, id: &str) -> Result<Stats, AppError> {
        let mut conn = self.db.acquire().await?;
        let mut snapshot = load_stats(&mut conn, id).await?;
        streaks::refresh(&mut snapshot, self.clock.today());
        Ok(snapshot)
    }

    /// Marks the user online and counts today as an active day.
    pub async fn login(&self, id: &str) -> Result<UserProfile, AppError> {
        let today = self.clock.today();
        let mut tx = db::begin_write(&self.db).await?;

        if !users::set_online(&mut tx, id, true).await? {
            return Err(AppError::NotFound);
        }

        let mut snapshot = load_stats(&mut tx, id).await?;
        let refreshed = streaks::refresh(&mut snapshot, today);
        let recorded = streaks::record_activity(&mut snapshot, today);
        if refreshed || recorded {
            stats::save_stats(&mut tx, &snapshot).await?;
        }

        let profile = load_profile(&mut tx, id).await?;
        tx.commit().await?;

        info!("user {} logged in (streak {})", id, snapshot.current_streak);
        Ok(profile)
    }

    pub async fn set_presence(&self, id: &str, online: bool) -> Result<UserProfile, AppError> {
        let mut conn = self.db.acquire().await?;
        if !users::set_online(&mut conn, id, online).await? {
            return Err(AppError::NotFound);
        }
        load_profile(&mut conn, id).await
    }
}

pub(crate) async fn load_stats(conn: &mut SqliteConnection, id: &str) -> Result<Stats, AppError> {
    stats::find_stats(conn, id).await?.ok_or(AppError::NotFound)
}

pub(crate) async fn load_profile(
    conn: &mut SqliteConnection,
    id: &str,
) -> Result<UserProfile, AppError> {
    let user = users::find_user_by_id(conn, id)
        .await?
        .ok_or(AppError::NotFound)?;
    let equipped = inventory::fetch_equipped(conn, id).await?;
    let tiers = inventory::fetch_tiers(conn, id).await?;
    let owned_items = inventory::fetch_owned_items(conn, id).await?;

    Ok(UserProfile {
        progress: progress_for_balance(user.xp),
        id: user.id,
        username: user.username,
        email: user.email,
        xp: user.xp,
        coins: user.coins,
        is_online: user.is_online,
        created_at: user.created_at,
        equipped,
        tiers,
        owned_items,
    })
}
