use sqlx::SqliteConnection;

use crate::error::AppError;
use crate::models::{FriendRequest, UserRow};

pub async fn are_friends(
    conn: &mut SqliteConnection,
    user_id: &str,
    friend_id: &str,
) -> Result<bool, AppError> {
    let found: Option<(i64,)> =
        sqlx::query_as("SELECT 1 FROM friendships WHERE user_id = ? AND friend_id = ?")
            .bind(user_id)
            .bind(friend_id)
            .fetch_optional(&mut *conn)
            .await?;

    Ok(found.is_some())
}

/// Records the friendship in both directions.
pub async fn insert_friendship(
    conn: &mut SqliteConnection,
    user_id: &str,
    friend_id: &str,
    now: &str,
) -> Result<(), AppError> {
    sqlx::query(
        "INSERT INTO friendships (user_id, friend_id, created_at) VALUES (?1, ?2, ?3), (?2, ?1, ?3)",
    )
    .bind(user_id)
    .bind(friend_id)
    .bind(now)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

pub async fn delete_friendship(
    conn: &mut SqliteConnection,
    user_id: &str,
    friend_id: &str,
) -> Result<bool, AppError> {
    let result = sqlx::query(
        r#"
        DELETE FROM friendships
        WHERE (user_id = ?1 AND friend_id = ?2)
           OR (user_id = ?2 AND friend_id = ?1)
        "#,
    )
    .bind(user_id)
    .bind(friend_id)
    .execute(&mut *conn)
    .await?
    .rows_affected();

    Ok(result > 0)
}

pub async fn fetch_friends(
    conn: &mut SqliteConnection,
    user_id: &str,
) -> Result<Vec<UserRow>, AppError> {
    let friends = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT u.id, u.username, u.email, u.xp, u.coins, u.is_online, u.created_at
        FROM friendships f
        JOIN users u ON u.id = f.friend_id
        WHERE f.user_id = ?
        ORDER BY u.username ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(friends)
}

const REQUEST_SELECT: &str = r#"
    SELECT r.sender_id, s.username AS sender_username,
        r.receiver_id, v.username AS receiver_username, r.created_at
    FROM friend_requests r
    JOIN users s ON s.id = r.sender_id
    JOIN users v ON v.id = r.receiver_id
"#;

pub async fn insert_request(
    conn: &mut SqliteConnection,
    sender_id: &str,
    receiver_id: &str,
    now: &str,
) -> Result<(), AppError> {
    sqlx::query("INSERT INTO friend_requests (sender_id, receiver_id, created_at) VALUES (?, ?, ?)")
        .bind(sender_id)
        .bind(receiver_id)
        .bind(now)
        .execute(&mut *conn)
        .await?;

    Ok(())
}

pub async fn find_request(
    conn: &mut SqliteConnection,
    sender_id: &str,
    receiver_id: &str,
) -> Result<Option<FriendRequest>, AppError> {
    let request = sqlx::query_as::<_, FriendRequest>(&format!(
        "{} WHERE r.sender_id = ? AND r.receiver_id = ?",
        REQUEST_SELECT
    ))
    .bind(sender_id)
    .bind(receiver_id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(request)
}

/// Requests waiting on `receiver_id`, oldest first.
pub async fn fetch_incoming_requests(
    conn: &mut SqliteConnection,
    receiver_id: &str,
) -> Result<Vec<FriendRequest>, AppError> {
    let requests = sqlx::query_as::<_, FriendRequest>(&format!(
        "{} WHERE r.receiver_id = ? ORDER BY r.created_at ASC, s.username ASC",
        REQUEST_SELECT
    ))
    .bind(receiver_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(requests)
}

pub async fn delete_request(
    conn: &mut SqliteConnection,
    sender_id: &str,
    receiver_id: &str,
) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM friend_requests WHERE sender_id = ? AND receiver_id = ?")
        .bind(sender_id)
        .bind(receiver_id)
        .execute(&mut *conn)
        .await?
        .rows_affected();

    Ok(result > 0)
}
