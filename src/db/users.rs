use sqlx::SqliteConnection;

use crate::error::AppError;
use crate::models::UserRow;

const USER_COLUMNS: &str = "id, username, email, xp, coins, is_online, created_at";

pub async fn insert_user(conn: &mut SqliteConnection, user: &UserRow) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO users (id, username, email, xp, coins, is_online, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        "#,
    )
    .bind(&user.id)
    .bind(&user.username)
    .bind(&user.email)
    .bind(user.xp)
    .bind(user.coins)
    .bind(user.is_online)
    .bind(&user.created_at)
    .execute(&mut *conn)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::Conflict(format!("username {} is taken", user.username))
        }
        other => AppError::Database(other),
    })?;

    Ok(())
}

pub async fn find_user_by_id(
    conn: &mut SqliteConnection,
    id: &str,
) -> Result<Option<UserRow>, AppError> {
    let user = sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {} FROM users WHERE id = ?",
        USER_COLUMNS
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(user)
}

pub async fn find_user_by_username(
    conn: &mut SqliteConnection,
    username: &str,
) -> Result<Option<UserRow>, AppError> {
    let user = sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {} FROM users WHERE username = ?",
        USER_COLUMNS
    ))
    .bind(username)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(user)
}

pub async fn user_exists(conn: &mut SqliteConnection, id: &str) -> Result<bool, AppError> {
    let found: Option<(i64,)> = sqlx::query_as("SELECT 1 FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(found.is_some())
}

pub async fn set_online(
    conn: &mut SqliteConnection,
    id: &str,
    online: bool,
) -> Result<bool, AppError> {
    let result = sqlx::query("UPDATE users SET is_online = ? WHERE id = ?")
        .bind(online)
        .bind(id)
        .execute(&mut *conn)
        .await?
        .rows_affected();

    Ok(result > 0)
}

/// Adds a completion reward to the balance.
pub async fn credit(
    conn: &mut SqliteConnection,
    id: &str,
    xp: i64,
    coins: i64,
) -> Result<bool, AppError> {
    let result = sqlx::query("UPDATE users SET xp = xp + ?1, coins = coins + ?2 WHERE id = ?3")
        .bind(xp)
        .bind(coins)
        .bind(id)
        .execute(&mut *conn)
        .await?
        .rows_affected();

    Ok(result > 0)
}

/// Takes `coins` from the balance. Returns `false` when the balance is short.
pub async fn debit_coins(
    conn: &mut SqliteConnection,
    id: &str,
    coins: i64,
) -> Result<bool, AppError> {
    let result = sqlx::query("UPDATE users SET coins = coins - ?1 WHERE id = ?2 AND coins >= ?1")
        .bind(coins)
        .bind(id)
        .execute(&mut *conn)
        .await?
        .rows_affected();

    Ok(result > 0)
}
