/// User domain type
use super::UserId;
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// A person exercises are logged against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique short identifier
    pub id: UserId,

    /// Username chosen at creation
    pub username: String,

    /// Account creation timestamp, whole seconds
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a freshly generated id
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: UserId::generate(),
            username: username.into(),
            created_at: Utc::now().trunc_subsecs(0),
        }
    }
}
