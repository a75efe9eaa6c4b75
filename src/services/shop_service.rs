use std::sync::Arc;

use sqlx::{SqliteConnection, SqlitePool};
use tracing::info;

use crate::catalog::{self, CatalogItem, ResolutionTier};
use crate::clock::Clock;
use crate::db::{self, inventory, stats, users};
use crate::error::AppError;
use crate::models::UserProfile;
use crate::services::user_service::{load_profile, load_stats};

pub struct ShopService {
    db: SqlitePool,
    clock: Arc<dyn Clock>,
}

impl ShopService {
    pub fn new(db: SqlitePool, clock: Arc<dyn Clock>) -> Self {
        Self { db, clock }
    }

    pub fn catalog(&self) -> Vec<CatalogItem> {
        catalog::items()
    }

    pub async fn purchase_item(&self, actor: &str, item_id: i64) -> Result<UserProfile, AppError> {
        let item = catalog::find(item_id).ok_or(AppError::NotFound)?;
        let mut tx = db::begin_write(&self.db).await?;

        if !users::user_exists(&mut tx, actor).await? {
            return Err(AppError::NotFound);
        }
        if inventory::owns_item(&mut tx, actor, item.id).await? {
            return Err(AppError::Conflict(format!("item {} is already owned", item.id)));
        }

        charge(&mut tx, actor, item.price).await?;
        let now = self.clock.now().to_rfc3339();
        inventory::grant_item(&mut tx, actor, item.id, &now).await?;

        let profile = load_profile(&mut tx, actor).await?;
        tx.commit().await?;

        info!("user {} bought item {} for {} coins", actor, item.id, item.price);
        Ok(profile)
    }

    pub async fn purchase_tier(
        &self,
        actor: &str,
        tier: ResolutionTier,
    ) -> Result<UserProfile, AppError> {
        let mut tx = db::begin_write(&self.db).await?;

        if !users::user_exists(&mut tx, actor).await? {
            return Err(AppError::NotFound);
        }
        let unlocked = inventory::fetch_tiers(&mut tx, actor).await?;
        if unlocked.contains(&tier) {
            return Err(AppError::Conflict(format!("{} is already unlocked", tier.as_str())));
        }
        if let Some(required) = tier.prerequisite() {
            if !unlocked.contains(&required) {
                return Err(AppError::BadRequest(format!(
                    "{} requires {}",
                    tier.as_str(),
                    required.as_str()
                )));
            }
        }

        charge(&mut tx, actor, tier.price()).await?;
        inventory::grant_tier(&mut tx, actor, tier).await?;

        let profile = load_profile(&mut tx, actor).await?;
        tx.commit().await?;

        info!("user {} unlocked {}", actor, tier.as_str());
        Ok(profile)
    }

    /// Puts an owned item into its slot, replacing whatever was there.
    pub async fn equip(&self, actor: &str, item_id: i64) -> Result<UserProfile, AppError> {
        let item = catalog::find(item_id).ok_or(AppError::NotFound)?;
        let mut conn = self.db.acquire().await?;

        if !users::user_exists(&mut conn, actor).await? {
            return Err(AppError::NotFound);
        }
        if !inventory::owns_item(&mut conn, actor, item.id).await? {
            return Err(AppError::Forbidden(format!("item {} is not owned", item.id)));
        }

        inventory::equip_item(&mut conn, actor, item.slot, item.id).await?;
        load_profile(&mut conn, actor).await
    }
}

/// Spends `price` coins and books it in the stats.
async fn charge(conn: &mut SqliteConnection, user_id: &str, price: i64) -> Result<(), AppError> {
    if price == 0 {
        return Ok(());
    }
    if !users::debit_coins(conn, user_id, price).await? {
        return Err(AppError::Conflict(format!("not enough coins, {} needed", price)));
    }
    let mut snapshot = load_stats(conn, user_id).await?;
    snapshot.coins_spent += price;
    stats::save_stats(conn, &snapshot).await
}
