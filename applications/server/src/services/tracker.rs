//! Exercise tracker service
//!
//! Orchestrates validation and storage for the three tracker operations.
//! Each operation validates its input in a fixed order, stops at the first
//! failure, and touches storage at most twice: one lookup, then one write
//! or query.

use crate::error::Result;
use std::sync::Arc;
use stride_core::{
    validation::{is_positive, parse_date, parse_limit},
    CreateExercise, Exercise, LogQuery, Minutes, Storage, User, UserId, ValidationError,
};

/// Unvalidated input for logging an exercise
#[derive(Debug, Clone, Default)]
pub struct ExerciseInput {
    pub user_id: String,
    pub description: String,
    /// Already coerced to a number; `NaN` when the client sent garbage
    pub duration: f64,
    pub date: String,
}

/// Unvalidated input for a log query
///
/// Absent (or blank) bounds and limit leave the query open on that side.
#[derive(Debug, Clone, Default)]
pub struct LogInput {
    pub user_id: String,
    pub from: Option<String>,
    pub to: Option<String>,
    pub limit: Option<String>,
}

/// Result of a log query
#[derive(Debug, Clone)]
pub struct ExerciseLog {
    pub user: User,
    pub query: LogQuery,
    pub exercises: Vec<Exercise>,
}

impl ExerciseLog {
    /// The queried owner id, independent of whether anything matched
    pub fn user_id(&self) -> &UserId {
        &self.query.user_id
    }

    pub fn count(&self) -> usize {
        self.exercises.len()
    }
}

/// Tracker operations over an injected store
pub struct TrackerService {
    storage: Arc<dyn Storage>,
}

impl TrackerService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Register a username, refusing names that are already taken
    ///
    /// The existence check and the insert are not atomic; two concurrent
    /// requests for the same name can both succeed.
    pub async fn create_user(&self, username: &str) -> Result<User> {
        if self.storage.find_user_by_username(username).await?.is_some() {
            tracing::info!(username, "Rejected duplicate username");
            return Err(ValidationError::UsernameTaken.into());
        }

        let user = User::new(username);
        self.storage.create_user(&user).await?;

        tracing::info!(user_id = %user.id, username, "Created user");
        Ok(user)
    }

    /// Log an exercise for an existing user
    ///
    /// Checks run in order: date, duration, then user existence.
    pub async fn add_exercise(&self, input: ExerciseInput) -> Result<(User, Exercise)> {
        let date = parse_date(&input.date).ok_or(ValidationError::InvalidDate)?;

        if !is_positive(input.duration) {
            return Err(ValidationError::InvalidDuration.into());
        }

        let user = self.resolve_user(&input.user_id).await?;

        let exercise = self
            .storage
            .create_exercise(CreateExercise {
                user_id: user.id.clone(),
                description: input.description,
                duration: Minutes::new(input.duration),
                date,
            })
            .await?;

        tracing::info!(
            user_id = %user.id,
            exercise_id = exercise.id,
            date = %exercise.date,
            "Logged exercise"
        );
        Ok((user, exercise))
    }

    /// Fetch a user's exercises within an inclusive date range
    ///
    /// Checks run in order: date syntax, range ordering, limit, then user
    /// existence.
    pub async fn query_log(&self, input: LogInput) -> Result<ExerciseLog> {
        let from = parse_bound(input.from.as_deref())?;
        let to = parse_bound(input.to.as_deref())?;

        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(ValidationError::InvalidDateRange.into());
            }
        }

        let limit = match non_blank(input.limit.as_deref()) {
            Some(raw) => Some(parse_limit(raw).ok_or(ValidationError::InvalidLimit)?),
            None => None,
        };

        let user = self.resolve_user(&input.user_id).await?;

        let query = LogQuery {
            user_id: user.id.clone(),
            from,
            to,
            limit,
        };
        let exercises = self.storage.query_exercises(&query).await?;

        tracing::debug!(user_id = %user.id, count = exercises.len(), "Served exercise log");
        Ok(ExerciseLog {
            user,
            query,
            exercises,
        })
    }

    /// All registered users, ordered by username
    pub async fn list_users(&self) -> Result<Vec<User>> {
        Ok(self.storage.list_users().await?)
    }

    /// Whether the store currently answers queries
    pub async fn storage_available(&self) -> bool {
        match self.storage.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Storage ping failed: {}", e);
                false
            }
        }
    }

    async fn resolve_user(&self, user_id: &str) -> Result<User> {
        self.storage
            .get_user(&UserId::new(user_id))
            .await?
            .ok_or_else(|| {
                tracing::debug!(user_id, "Unknown user id");
                ValidationError::UnknownUser.into()
            })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_bound(value: Option<&str>) -> Result<Option<chrono::NaiveDate>> {
    match non_blank(value) {
        Some(raw) => Ok(Some(parse_date(raw).ok_or(ValidationError::InvalidDate)?)),
        None => Ok(None),
    }
}
