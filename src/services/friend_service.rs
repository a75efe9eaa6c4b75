use std::sync::Arc;

use sqlx::SqlitePool;
use tracing::info;

use crate::clock::Clock;
use crate::db::{self, friends, users};
use crate::error::AppError;
use crate::models::{FriendRequest, FriendSummary, UserRow};
use crate::services::progression::progress_for_balance;

pub struct FriendService {
    db: SqlitePool,
    clock: Arc<dyn Clock>,
}

fn summarize(user: UserRow) -> FriendSummary {
    FriendSummary {
        level: progress_for_balance(user.xp).level,
        id: user.id,
        username: user.username,
        is_online: user.is_online,
    }
}

impl FriendService {
    pub fn new(db: SqlitePool, clock: Arc<dyn Clock>) -> Self {
        Self { db, clock }
    }

    pub async fn list(&self, actor: &str) -> Result<Vec<FriendSummary>, AppError> {
        let mut conn = self.db.acquire().await?;
        if !users::user_exists(&mut conn, actor).await? {
            return Err(AppError::NotFound);
        }
        let rows = friends::fetch_friends(&mut conn, actor).await?;
        Ok(rows.into_iter().map(summarize).collect())
    }

    /// Sends a friend request to `username`. The friendship only exists once
    /// the receiver accepts.
    pub async fn request(&self, actor: &str, username: &str) -> Result<FriendRequest, AppError> {
        let mut tx = db::begin_write(&self.db).await?;

        if !users::user_exists(&mut tx, actor).await? {
            return Err(AppError::NotFound);
        }
        let receiver = users::find_user_by_username(&mut tx, username.trim())
            .await?
            .ok_or(AppError::NotFound)?;
        if receiver.id == actor {
            return Err(AppError::BadRequest("cannot befriend yourself".to_string()));
        }
        if friends::are_friends(&mut tx, actor, &receiver.id).await? {
            return Err(AppError::Conflict(format!(
                "already friends with {}",
                receiver.username
            )));
        }
        if friends::find_request(&mut tx, actor, &receiver.id).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "request to {} is already pending",
                receiver.username
            )));
        }
        if friends::find_request(&mut tx, &receiver.id, actor).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "{} already sent you a request",
                receiver.username
            )));
        }

        let now = self.clock.now().to_rfc3339();
        friends::insert_request(&mut tx, actor, &receiver.id, &now).await?;
        let request = friends::find_request(&mut tx, actor, &receiver.id)
            .await?
            .ok_or(AppError::InternalServerError)?;
        tx.commit().await?;

        info!("{} sent a friend request to {}", actor, receiver.id);
        Ok(request)
    }

    pub async fn incoming(&self, actor: &str) -> Result<Vec<FriendRequest>, AppError> {
        let mut conn = self.db.acquire().await?;
        if !users::user_exists(&mut conn, actor).await? {
            return Err(AppError::NotFound);
        }
        friends::fetch_incoming_requests(&mut conn, actor).await
    }

    /// Accepts the request `sender_id` sent to `actor` and records the
    /// friendship in both directions.
    pub async fn accept(&self, actor: &str, sender_id: &str) -> Result<FriendSummary, AppError> {
        let mut tx = db::begin_write(&self.db).await?;

        if !friends::delete_request(&mut tx, sender_id, actor).await? {
            return Err(AppError::NotFound);
        }
        let sender = users::find_user_by_id(&mut tx, sender_id)
            .await?
            .ok_or(AppError::NotFound)?;

        let now = self.clock.now().to_rfc3339();
        friends::insert_friendship(&mut tx, actor, &sender.id, &now).await?;
        tx.commit().await?;

        info!("{} and {} are now friends", actor, sender.id);
        Ok(summarize(sender))
    }

    pub async fn decline(&self, actor: &str, sender_id: &str) -> Result<(), AppError> {
        let mut conn = self.db.acquire().await?;
        if !friends::delete_request(&mut conn, sender_id, actor).await? {
            return Err(AppError::NotFound);
        }
        info!("{} declined a friend request from {}", actor, sender_id);
        Ok(())
    }

    pub async fn remove(&self, actor: &str, friend_id: &str) -> Result<(), AppError> {
        let mut conn = self.db.acquire().await?;
        if !friends::delete_friendship(&mut conn, actor, friend_id).await? {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
