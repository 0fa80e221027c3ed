/// Exercise API routes
use crate::{
    api::extract::{ApiForm, ApiQuery, NumberLike},
    error::Result,
    services::{ExerciseInput, ExerciseLog, LogInput},
    state::AppState,
};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use stride_core::{format::format_long_date, Exercise, Minutes, User};

#[derive(Debug, Deserialize)]
pub struct AddExerciseRequest {
    #[serde(rename = "userId", default)]
    pub user_id: String,
    pub description: String,
    #[serde(default)]
    pub duration: Option<NumberLike>,
    #[serde(default)]
    pub date: Option<String>,
}

impl From<AddExerciseRequest> for ExerciseInput {
    fn from(req: AddExerciseRequest) -> Self {
        Self {
            user_id: req.user_id,
            description: req.description,
            // A missing duration is as invalid as a non-numeric one
            duration: req.duration.as_ref().map_or(f64::NAN, NumberLike::value),
            date: req.date.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ExerciseResponse {
    pub username: String,
    /// Owner id, echoed under the name clients already read it from
    #[serde(rename = "_id")]
    pub id: String,
    pub description: String,
    pub duration: Minutes,
    pub date: String,
}

impl ExerciseResponse {
    fn new(user: User, exercise: Exercise) -> Self {
        Self {
            username: user.username,
            id: exercise.user_id.to_string(),
            description: exercise.description,
            duration: exercise.duration,
            date: format_long_date(exercise.date),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LogQueryParams {
    #[serde(rename = "userId", default)]
    pub user_id: String,
    pub from: Option<String>,
    pub to: Option<String>,
    pub limit: Option<String>,
}

impl From<LogQueryParams> for LogInput {
    fn from(params: LogQueryParams) -> Self {
        Self {
            user_id: params.user_id,
            from: params.from,
            to: params.to,
            limit: params.limit,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LogEntry {
    pub description: String,
    pub duration: Minutes,
    pub date: String,
}

#[derive(Debug, Serialize)]
pub struct LogResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    pub count: usize,
    pub log: Vec<LogEntry>,
}

impl From<ExerciseLog> for LogResponse {
    fn from(log: ExerciseLog) -> Self {
        Self {
            id: log.user_id().to_string(),
            count: log.count(),
            from: log.query.from.map(format_long_date),
            to: log.query.to.map(format_long_date),
            username: log.user.username,
            log: log
                .exercises
                .into_iter()
                .map(|exercise| LogEntry {
                    description: exercise.description,
                    duration: exercise.duration,
                    date: format_long_date(exercise.date),
                })
                .collect(),
        }
    }
}

/// POST /api/exercise/add
/// Log an exercise against an existing user
pub async fn add_exercise(
    State(app_state): State<AppState>,
    ApiForm(req): ApiForm<AddExerciseRequest>,
) -> Result<Json<ExerciseResponse>> {
    let (user, exercise) = app_state.tracker.add_exercise(req.into()).await?;
    Ok(Json(ExerciseResponse::new(user, exercise)))
}

/// GET /api/exercise/log?userId=..&from=..&to=..&limit=..
/// Query a user's exercises within an inclusive date range
pub async fn get_log(
    State(app_state): State<AppState>,
    ApiQuery(params): ApiQuery<LogQueryParams>,
) -> Result<Json<LogResponse>> {
    let log = app_state.tracker.query_log(params.into()).await?;
    Ok(Json(log.into()))
}
