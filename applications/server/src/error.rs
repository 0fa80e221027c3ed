/// Server error types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use stride_core::{StrideError, ValidationError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    /// Input rejected by a domain rule; the message goes to the client as-is
    #[error(transparent)]
    Rejected(#[from] ValidationError),

    /// Request body or query string did not match the expected shape
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(StrideError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<StrideError> for ServerError {
    fn from(err: StrideError) -> Self {
        match err {
            StrideError::Validation(rejection) => ServerError::Rejected(rejection),
            other => ServerError::Database(other),
        }
    }
}

/// Marks a response produced from a domain rejection
///
/// Lets the legacy response layer find rejections without re-parsing bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rejection(pub ValidationError);

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ServerError::Rejected(rejection) => {
                let status = if rejection.is_not_found() {
                    StatusCode::NOT_FOUND
                } else if rejection.is_conflict() {
                    StatusCode::CONFLICT
                } else {
                    StatusCode::BAD_REQUEST
                };
                let mut response = (status, rejection.to_string()).into_response();
                response.extensions_mut().insert(Rejection(rejection));
                return response;
            }
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ServerError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ServerError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            ServerError::Config(ref msg) => {
                tracing::error!("Config error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };

        (status, error_message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn rejections_map_to_status_codes() {
        let cases = [
            (ValidationError::InvalidDate, StatusCode::BAD_REQUEST),
            (ValidationError::InvalidDuration, StatusCode::BAD_REQUEST),
            (ValidationError::InvalidLimit, StatusCode::BAD_REQUEST),
            (ValidationError::InvalidDateRange, StatusCode::BAD_REQUEST),
            (ValidationError::UnknownUser, StatusCode::NOT_FOUND),
            (ValidationError::UsernameTaken, StatusCode::CONFLICT),
        ];

        for (rejection, status) in cases {
            let response = ServerError::Rejected(rejection).into_response();
            assert_eq!(response.status(), status, "{:?}", rejection);
            assert_eq!(
                response.extensions().get::<Rejection>(),
                Some(&Rejection(rejection))
            );
            assert_eq!(body_text(response).await, rejection.to_string());
        }
    }

    #[tokio::test]
    async fn internal_details_are_not_leaked() {
        let response =
            ServerError::Database(StrideError::storage("disk I/O error at page 7")).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.extensions().get::<Rejection>().is_none());
        assert_eq!(body_text(response).await, "Internal Server Error");
    }

    #[test]
    fn validation_inside_core_error_stays_a_rejection() {
        let err: ServerError = StrideError::Validation(ValidationError::UnknownUser).into();
        assert!(matches!(
            err,
            ServerError::Rejected(ValidationError::UnknownUser)
        ));
    }
}
