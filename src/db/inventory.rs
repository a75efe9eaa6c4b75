use std::collections::BTreeMap;

use sqlx::SqliteConnection;
use tracing::warn;

use crate::catalog::{ResolutionTier, Slot};
use crate::error::AppError;

pub async fn grant_item(
    conn: &mut SqliteConnection,
    user_id: &str,
    item_id: i64,
    now: &str,
) -> Result<(), AppError> {
    sqlx::query("INSERT INTO user_items (user_id, item_id, acquired_at) VALUES (?, ?, ?)")
        .bind(user_id)
        .bind(item_id)
        .bind(now)
        .execute(&mut *conn)
        .await?;

    Ok(())
}

pub async fn owns_item(
    conn: &mut SqliteConnection,
    user_id: &str,
    item_id: i64,
) -> Result<bool, AppError> {
    let found: Option<(i64,)> =
        sqlx::query_as("SELECT 1 FROM user_items WHERE user_id = ? AND item_id = ?")
            .bind(user_id)
            .bind(item_id)
            .fetch_optional(&mut *conn)
            .await?;

    Ok(found.is_some())
}

pub async fn fetch_owned_items(
    conn: &mut SqliteConnection,
    user_id: &str,
) -> Result<Vec<i64>, AppError> {
    let rows: Vec<(i64,)> =
        sqlx::query_as("SELECT item_id FROM user_items WHERE user_id = ? ORDER BY item_id ASC")
            .bind(user_id)
            .fetch_all(&mut *conn)
            .await?;

    Ok(rows.into_iter().map(|(id,)| id).collect())
}

pub async fn equip_item(
    conn: &mut SqliteConnection,
    user_id: &str,
    slot: Slot,
    item_id: i64,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO user_equipped (user_id, slot, item_id) VALUES (?1, ?2, ?3)
        ON CONFLICT(user_id, slot) DO UPDATE SET item_id = excluded.item_id
        "#,
    )
    .bind(user_id)
    .bind(slot.as_str())
    .bind(item_id)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

pub async fn fetch_equipped(
    conn: &mut SqliteConnection,
    user_id: &str,
) -> Result<BTreeMap<Slot, i64>, AppError> {
    let rows: Vec<(String, i64)> =
        sqlx::query_as("SELECT slot, item_id FROM user_equipped WHERE user_id = ?")
            .bind(user_id)
            .fetch_all(&mut *conn)
            .await?;

    let mut equipped = BTreeMap::new();
    for (slot, item_id) in rows {
        match slot.parse::<Slot>() {
            Ok(slot) => {
                equipped.insert(slot, item_id);
            }
            Err(e) => warn!("ignoring equipped item for {}: {}", user_id, e),
        }
    }
    Ok(equipped)
}

pub async fn grant_tier(
    conn: &mut SqliteConnection,
    user_id: &str,
    tier: ResolutionTier,
) -> Result<(), AppError> {
    sqlx::query("INSERT INTO user_tiers (user_id, tier) VALUES (?, ?)")
        .bind(user_id)
        .bind(tier.as_str())
        .execute(&mut *conn)
        .await?;

    Ok(())
}

pub async fn fetch_tiers(
    conn: &mut SqliteConnection,
    user_id: &str,
) -> Result<Vec<ResolutionTier>, AppError> {
    let rows: Vec<(String,)> = sqlx::query_as("SELECT tier FROM user_tiers WHERE user_id = ?")
        .bind(user_id)
        .fetch_all(&mut *conn)
        .await?;

    let mut tiers: Vec<ResolutionTier> = rows
        .into_iter()
        .filter_map(|(tier,)| match tier.parse::<ResolutionTier>() {
            Ok(t) => Some(t),
            Err(e) => {
                warn!("ignoring tier for {}: {}", user_id, e);
                None
            }
        })
        .collect();
    tiers.sort();
    Ok(tiers)
}
