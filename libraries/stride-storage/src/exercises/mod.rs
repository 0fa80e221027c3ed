//! Exercise queries, including the date-bounded log query

use crate::error::{Result, StorageError};
use chrono::{Datelike, NaiveDate};
use sqlx::{sqlite::SqliteRow, QueryBuilder, Row, Sqlite, SqlitePool};
use stride_core::types::{CreateExercise, Exercise, LogQuery, Minutes, UserId};

/// Storage layout of `Exercise::date`: days since the common era
fn day_number(date: NaiveDate) -> i32 {
    date.num_days_from_ce()
}

fn from_row(row: &SqliteRow) -> Result<Exercise> {
    let date = row.try_get::<i32, _>("date")?;
    let created_at = row.try_get::<i64, _>("created_at")?;

    Ok(Exercise {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        description: row.try_get("description")?,
        duration: Minutes::new(row.try_get("duration")?),
        date: NaiveDate::from_num_days_from_ce_opt(date).ok_or_else(|| {
            StorageError::corrupt_row("exercises", format!("invalid day number {}", date))
        })?,
        created_at: chrono::DateTime::from_timestamp(created_at, 0).ok_or_else(|| {
            StorageError::corrupt_row("exercises", format!("invalid timestamp {}", created_at))
        })?,
    })
}

/// Insert a new exercise
pub async fn create(pool: &SqlitePool, exercise: CreateExercise) -> Result<Exercise> {
    let created_at = chrono::Utc::now();

    let result = sqlx::query(
        "INSERT INTO exercises (user_id, description, duration, date, created_at)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&exercise.user_id)
    .bind(&exercise.description)
    .bind(exercise.duration.get())
    .bind(day_number(exercise.date))
    .bind(created_at.timestamp())
    .execute(pool)
    .await?;

    Ok(Exercise {
        id: result.last_insert_rowid(),
        user_id: exercise.user_id,
        description: exercise.description,
        duration: exercise.duration,
        date: exercise.date,
        // Same whole-second precision as the stored row
        created_at: chrono::DateTime::from_timestamp(created_at.timestamp(), 0)
            .unwrap_or(created_at),
    })
}

/// Run a log query
///
/// Matches are ordered oldest first, ties broken by insertion order, and
/// truncated to the query limit.
pub async fn query_log(pool: &SqlitePool, query: &LogQuery) -> Result<Vec<Exercise>> {
    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
        "SELECT id, user_id, description, duration, date, created_at
         FROM exercises WHERE user_id = ",
    );
    builder.push_bind(&query.user_id);

    if let Some(from) = query.from {
        builder
            .push(" AND date >= ")
            .push_bind(day_number(from));
    }
    if let Some(to) = query.to {
        builder
            .push(" AND date <= ")
            .push_bind(day_number(to));
    }

    builder.push(" ORDER BY date, id");

    if let Some(limit) = query.limit {
        builder.push(" LIMIT ").push_bind(i64::from(limit));
    }

    let rows = builder.build().fetch_all(pool).await?;
    rows.iter().map(from_row).collect()
}

/// Count a user's stored exercises
pub async fn count_for_user(pool: &SqlitePool, user_id: &UserId) -> Result<i64> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM exercises WHERE user_id = ?")
        .bind(user_id)
        .fetch_one(pool)
        .await?;

    Ok(count)
}
