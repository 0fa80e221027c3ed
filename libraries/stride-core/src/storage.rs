//! Storage trait for the user and exercise record sets

use crate::error::Result;
use crate::types::{CreateExercise, Exercise, LogQuery, User, UserId};
use async_trait::async_trait;

/// Persistent store behind the exercise tracker
///
/// Users and exercises are independent record sets; the only link between
/// them is `Exercise::user_id`, which implementations do not enforce.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Check that the backing store answers
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    // ========================================================================
    // Users
    // ========================================================================

    /// Persist a new user
    async fn create_user(&self, user: &User) -> Result<()>;

    /// Get user by ID
    async fn get_user(&self, id: &UserId) -> Result<Option<User>>;

    /// Get user by exact username
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Get all users ordered by username
    async fn list_users(&self) -> Result<Vec<User>>;

    // ========================================================================
    // Exercises
    // ========================================================================

    /// Persist a new exercise
    async fn create_exercise(&self, exercise: CreateExercise) -> Result<Exercise>;

    /// Exercises of one user within the query's inclusive date range,
    /// oldest first (ties in insertion order), capped at the query limit
    async fn query_exercises(&self, query: &LogQuery) -> Result<Vec<Exercise>>;
}
