/// Exercise log query
use super::UserId;
use chrono::NaiveDate;

/// Validated parameters of a log query
///
/// An absent bound leaves that side of the date range open; an absent limit
/// returns every match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogQuery {
    pub user_id: UserId,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub limit: Option<u32>,
}

impl LogQuery {
    /// Query every exercise of a user
    pub fn all(user_id: UserId) -> Self {
        Self {
            user_id,
            from: None,
            to: None,
            limit: None,
        }
    }
}
