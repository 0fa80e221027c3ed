/// Tracker service tests
/// Exercise the validation pipeline directly, without HTTP
mod common;

use async_trait::async_trait;
use common::create_test_storage;
use std::sync::Arc;
use stride_core::{
    CreateExercise, Exercise, LogQuery, Storage, StrideError, User, UserId, ValidationError,
};
use stride_server::{
    services::{ExerciseInput, LogInput},
    ServerError, TrackerService,
};

fn rejection(err: ServerError) -> ValidationError {
    match err {
        ServerError::Rejected(rejection) => rejection,
        other => panic!("expected a rejection, got {:?}", other),
    }
}

fn run(user_id: &str, duration: f64, date: &str) -> ExerciseInput {
    ExerciseInput {
        user_id: user_id.to_string(),
        description: "run".to_string(),
        duration,
        date: date.to_string(),
    }
}

fn log(user_id: &str) -> LogInput {
    LogInput {
        user_id: user_id.to_string(),
        ..LogInput::default()
    }
}

#[tokio::test]
async fn test_create_user_rejects_taken_names() {
    let (storage, _temp) = create_test_storage().await.unwrap();
    let tracker = TrackerService::new(storage.clone());

    let first = tracker.create_user("alice").await.unwrap();
    let err = tracker.create_user("alice").await.unwrap_err();

    assert_eq!(rejection(err), ValidationError::UsernameTaken);
    assert_eq!(tracker.list_users().await.unwrap(), vec![first]);
}

#[tokio::test]
async fn test_usernames_are_case_sensitive() {
    let (storage, _temp) = create_test_storage().await.unwrap();
    let tracker = TrackerService::new(storage);

    tracker.create_user("alice").await.unwrap();
    tracker.create_user("Alice").await.unwrap();

    assert_eq!(tracker.list_users().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_add_exercise_stores_parsed_values() {
    let (storage, _temp) = create_test_storage().await.unwrap();
    let tracker = TrackerService::new(storage);
    let user = tracker.create_user("alice").await.unwrap();

    let (owner, exercise) = tracker
        .add_exercise(run(user.id.as_str(), 42.5, "2024/02/29"))
        .await
        .unwrap();

    assert_eq!(owner, user);
    assert_eq!(exercise.user_id, user.id);
    assert_eq!(exercise.duration.get(), 42.5);
    assert_eq!(
        exercise.date,
        chrono::NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
    );
}

#[tokio::test]
async fn test_add_exercise_validation_order() {
    let (storage, _temp) = create_test_storage().await.unwrap();
    let tracker = TrackerService::new(storage.clone());
    let user = tracker.create_user("alice").await.unwrap();
    let id = user.id.as_str();

    let cases = [
        (run("ghost", -1.0, "bad"), ValidationError::InvalidDate),
        (run("ghost", -1.0, "2024-01-01"), ValidationError::InvalidDuration),
        (run(id, f64::NAN, "2024-01-01"), ValidationError::InvalidDuration),
        (run(id, 0.0, "2024-01-01"), ValidationError::InvalidDuration),
        (run("ghost", 10.0, "2024-01-01"), ValidationError::UnknownUser),
    ];

    for (input, expected) in cases {
        let err = tracker.add_exercise(input).await.unwrap_err();
        assert_eq!(rejection(err), expected);
    }

    let count = stride_storage::exercises::count_for_user(storage.pool(), &user.id)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_query_log_validation_order() {
    let (storage, _temp) = create_test_storage().await.unwrap();
    let tracker = TrackerService::new(storage);

    let bad_date = LogInput {
        from: Some("2024-13-01".to_string()),
        to: Some("2024-01-01".to_string()),
        limit: Some("0".to_string()),
        ..log("ghost")
    };
    let bad_range = LogInput {
        from: Some("2024-02-01".to_string()),
        to: Some("2024-01-01".to_string()),
        limit: Some("0".to_string()),
        ..log("ghost")
    };
    let bad_limit = LogInput {
        limit: Some("-1".to_string()),
        ..log("ghost")
    };

    let cases = [
        (bad_date, ValidationError::InvalidDate),
        (bad_range, ValidationError::InvalidDateRange),
        (bad_limit, ValidationError::InvalidLimit),
        (log("ghost"), ValidationError::UnknownUser),
    ];

    for (input, expected) in cases {
        let err = tracker.query_log(input).await.unwrap_err();
        assert_eq!(rejection(err), expected);
    }
}

#[tokio::test]
async fn test_query_log_equal_bounds_select_one_day() {
    let (storage, _temp) = create_test_storage().await.unwrap();
    let tracker = TrackerService::new(storage);
    let user = tracker.create_user("alice").await.unwrap();
    let id = user.id.as_str();

    for date in ["2024-01-01", "2024-01-02", "2024-01-02", "2024-01-03"] {
        tracker.add_exercise(run(id, 10.0, date)).await.unwrap();
    }

    let result = tracker
        .query_log(LogInput {
            from: Some("2024-01-02".to_string()),
            to: Some("2024-01-02".to_string()),
            ..log(id)
        })
        .await
        .unwrap();

    assert_eq!(result.count(), 2);
    assert_eq!(result.user_id(), &user.id);
    assert_eq!(result.user, user);
}

#[tokio::test]
async fn test_query_log_limit_keeps_earliest_entries() {
    let (storage, _temp) = create_test_storage().await.unwrap();
    let tracker = TrackerService::new(storage);
    let user = tracker.create_user("alice").await.unwrap();
    let id = user.id.as_str();

    // Inserted out of order on purpose
    for date in ["2024-03-01", "2024-01-01", "2024-02-01"] {
        tracker.add_exercise(run(id, 10.0, date)).await.unwrap();
    }

    let result = tracker
        .query_log(LogInput {
            limit: Some("2".to_string()),
            ..log(id)
        })
        .await
        .unwrap();

    let dates: Vec<String> = result
        .exercises
        .iter()
        .map(|e| e.date.to_string())
        .collect();
    assert_eq!(dates, vec!["2024-01-01", "2024-02-01"]);
}

/// Store whose every operation fails, to check error classification
struct BrokenStorage;

#[async_trait]
impl Storage for BrokenStorage {
    async fn ping(&self) -> stride_core::Result<()> {
        Err(StrideError::storage("disk full"))
    }

    async fn create_user(&self, _user: &User) -> stride_core::Result<()> {
        Err(StrideError::storage("disk full"))
    }

    async fn get_user(&self, _id: &UserId) -> stride_core::Result<Option<User>> {
        Err(StrideError::storage("disk full"))
    }

    async fn find_user_by_username(&self, _username: &str) -> stride_core::Result<Option<User>> {
        Err(StrideError::storage("disk full"))
    }

    async fn list_users(&self) -> stride_core::Result<Vec<User>> {
        Err(StrideError::storage("disk full"))
    }

    async fn create_exercise(&self, _exercise: CreateExercise) -> stride_core::Result<Exercise> {
        Err(StrideError::storage("disk full"))
    }

    async fn query_exercises(&self, _query: &LogQuery) -> stride_core::Result<Vec<Exercise>> {
        Err(StrideError::storage("disk full"))
    }
}

#[tokio::test]
async fn test_storage_failures_are_not_rejections() {
    let tracker = TrackerService::new(Arc::new(BrokenStorage));

    let err = tracker.create_user("alice").await.unwrap_err();
    assert!(matches!(err, ServerError::Database(_)));

    let err = tracker
        .add_exercise(run("alice", 10.0, "2024-01-01"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServerError::Database(_)));
}

#[tokio::test]
async fn test_validation_runs_before_storage_is_touched() {
    let tracker = TrackerService::new(Arc::new(BrokenStorage));

    let err = tracker
        .add_exercise(run("alice", 10.0, "someday"))
        .await
        .unwrap_err();
    assert_eq!(rejection(err), ValidationError::InvalidDate);
}

#[tokio::test]
async fn test_storage_availability() {
    let (storage, _temp) = create_test_storage().await.unwrap();
    assert!(TrackerService::new(storage).storage_available().await);
    assert!(
        !TrackerService::new(Arc::new(BrokenStorage))
            .storage_available()
            .await
    );
}
