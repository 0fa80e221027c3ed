/// Legacy response compatibility
use crate::error::Rejection;
use axum::{
    response::{IntoResponse, Response},
    Json,
};

/// Rewrite domain rejections into `200 OK` with the historical message as a
/// JSON string
///
/// Older clients tell success from failure by payload shape alone and break
/// on non-200 statuses. Schema faults, unknown routes and server errors keep
/// their status codes.
pub async fn legacy_responses(response: Response) -> Response {
    match response.extensions().get::<Rejection>().copied() {
        Some(Rejection(rejection)) => Json(rejection.legacy_message()).into_response(),
        None => response,
    }
}
