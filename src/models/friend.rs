use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize)]
pub struct FriendSummary {
    pub id: String,
    pub username: String,
    pub level: u64,
    pub is_online: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddFriendRequest {
    pub username: String,
}

/// A pending friend request, with both usernames resolved.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct FriendRequest {
    pub sender_id: String,
    pub sender_username: String,
    pub receiver_id: String,
    pub receiver_username: String,
    pub created_at: String,
}
