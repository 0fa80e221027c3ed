/// Exercise domain types
use super::UserId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A logged exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    /// Storage row id (insertion order)
    pub id: i64,

    /// Owner reference; not enforced by storage
    pub user_id: UserId,

    pub description: String,

    pub duration: Minutes,

    /// Calendar day the exercise happened on
    pub date: NaiveDate,

    pub created_at: DateTime<Utc>,
}

/// Data required to log a new exercise
#[derive(Debug, Clone, PartialEq)]
pub struct CreateExercise {
    pub user_id: UserId,
    pub description: String,
    pub duration: Minutes,
    pub date: NaiveDate,
}

/// Exercise duration in minutes
///
/// Serializes as a JSON integer when the value is whole, so `30` is echoed
/// back as `30` rather than `30.0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Minutes(f64);

/// Largest float that still converts to `i64` without loss of integrality
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

impl Minutes {
    /// Wrap a raw minute count
    pub fn new(minutes: f64) -> Self {
        Self(minutes)
    }

    /// Get the raw minute count
    pub fn get(self) -> f64 {
        self.0
    }

    #[allow(clippy::cast_possible_truncation)]
    fn as_whole(self) -> Option<i64> {
        if self.0.fract() == 0.0 && self.0.abs() <= MAX_EXACT_INT {
            Some(self.0 as i64)
        } else {
            None
        }
    }
}

impl fmt::Display for Minutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_whole() {
            Some(whole) => write!(f, "{}", whole),
            None => write!(f, "{}", self.0),
        }
    }
}

impl Serialize for Minutes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_whole() {
            Some(whole) => serializer.serialize_i64(whole),
            None => serializer.serialize_f64(self.0),
        }
    }
}

impl<'de> Deserialize<'de> for Minutes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_minutes_serialize_as_integers() {
        assert_eq!(serde_json::to_string(&Minutes::new(30.0)).unwrap(), "30");
    }

    #[test]
    fn fractional_minutes_keep_their_fraction() {
        assert_eq!(serde_json::to_string(&Minutes::new(12.5)).unwrap(), "12.5");
        assert_eq!(Minutes::new(12.5).to_string(), "12.5");
    }

    #[test]
    fn minutes_deserialize_from_integers_and_floats() {
        let whole: Minutes = serde_json::from_str("45").unwrap();
        let frac: Minutes = serde_json::from_str("0.25").unwrap();
        assert_eq!(whole.get(), 45.0);
        assert_eq!(frac.get(), 0.25);
    }
}
