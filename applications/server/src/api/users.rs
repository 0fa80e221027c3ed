/// User API routes
use crate::{api::extract::ApiForm, error::Result, state::AppState};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use stride_core::User;

#[derive(Debug, Deserialize)]
pub struct NewUserRequest {
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserResponse {
    pub username: String,
    #[serde(rename = "_id")]
    pub id: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            id: user.id.to_string(),
        }
    }
}

/// POST /api/exercise/new-user
/// Register a new username
pub async fn create_user(
    State(app_state): State<AppState>,
    ApiForm(req): ApiForm<NewUserRequest>,
) -> Result<Json<UserResponse>> {
    let user = app_state.tracker.create_user(&req.username).await?;
    Ok(Json(user.into()))
}

/// GET /api/exercise/users
/// List every registered user
pub async fn list_users(State(app_state): State<AppState>) -> Result<Json<Vec<UserResponse>>> {
    let users = app_state.tracker.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}
