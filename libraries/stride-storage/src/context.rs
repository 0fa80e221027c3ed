use crate::{exercises, users};
use async_trait::async_trait;
use sqlx::SqlitePool;
use stride_core::{
    error::Result,
    storage::Storage,
    types::{CreateExercise, Exercise, LogQuery, User, UserId},
};

/// Local storage context using `SQLite`
#[derive(Clone)]
pub struct LocalStorageContext {
    pool: SqlitePool,
}

impl LocalStorageContext {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the underlying pool, waiting for open connections to finish
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl Storage for LocalStorageContext {
    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(crate::StorageError::from)?;
        Ok(())
    }

    // Users
    async fn create_user(&self, user: &User) -> Result<()> {
        Ok(users::create(&self.pool, user).await?)
    }

    async fn get_user(&self, id: &UserId) -> Result<Option<User>> {
        Ok(users::get_by_id(&self.pool, id).await?)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(users::get_by_username(&self.pool, username).await?)
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        Ok(users::get_all(&self.pool).await?)
    }

    // Exercises
    async fn create_exercise(&self, exercise: CreateExercise) -> Result<Exercise> {
        Ok(exercises::create(&self.pool, exercise).await?)
    }

    async fn query_exercises(&self, query: &LogQuery) -> Result<Vec<Exercise>> {
        Ok(exercises::query_log(&self.pool, query).await?)
    }
}
