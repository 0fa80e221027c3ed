//! User queries

use crate::error::{Result, StorageError};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use stride_core::types::{User, UserId};

fn from_row(row: &SqliteRow) -> Result<User> {
    let created_at = row.try_get::<i64, _>("created_at")?;
    Ok(User {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        created_at: chrono::DateTime::from_timestamp(created_at, 0).ok_or_else(|| {
            StorageError::corrupt_row("users", format!("invalid timestamp {}", created_at))
        })?,
    })
}

/// Insert a new user
pub async fn create(pool: &SqlitePool, user: &User) -> Result<()> {
    sqlx::query("INSERT INTO users (id, username, created_at) VALUES (?, ?, ?)")
        .bind(&user.id)
        .bind(&user.username)
        .bind(user.created_at.timestamp())
        .execute(pool)
        .await?;

    Ok(())
}

/// Get a user by ID
pub async fn get_by_id(pool: &SqlitePool, id: &UserId) -> Result<Option<User>> {
    let row = sqlx::query("SELECT id, username, created_at FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(from_row).transpose()
}

/// Get a user by exact (case-sensitive) username
///
/// Usernames are not unique at the storage level; the oldest match wins.
pub async fn get_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>> {
    let row = sqlx::query(
        "SELECT id, username, created_at FROM users
         WHERE username = ?
         ORDER BY created_at, rowid
         LIMIT 1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(from_row).transpose()
}

/// Get all users
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<User>> {
    let rows = sqlx::query("SELECT id, username, created_at FROM users ORDER BY username, rowid")
        .fetch_all(pool)
        .await?;

    rows.iter().map(from_row).collect()
}

/// Count stored users
pub async fn count(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    Ok(count)
}
