use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use chirp_core::CoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("unreadable request body: {0}")]
    Body(#[from] JsonRejection),

    #[error("spawn_blocking join error: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            // A patch against a missing id is answered as a client error.
            ApiError::Core(CoreError::InvalidInput(_) | CoreError::NotFound)
            | ApiError::Body(_) => StatusCode::BAD_REQUEST,
            ApiError::Core(CoreError::DuplicateUsername) => StatusCode::CONFLICT,
            ApiError::Core(CoreError::InvalidCredentials) => StatusCode::UNAUTHORIZED,
            ApiError::Core(CoreError::Store(_)) | ApiError::Join(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match status {
            StatusCode::CONFLICT => "Conflict",
            StatusCode::BAD_REQUEST => "Client error",
            StatusCode::UNAUTHORIZED => "Unauthorized",
            _ => {
                error!("{}", self);
                "Internal server error"
            }
        };
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_map_to_status() {
        let cases = [
            (CoreError::DuplicateUsername, StatusCode::CONFLICT),
            (CoreError::InvalidInput("x"), StatusCode::BAD_REQUEST),
            (CoreError::NotFound, StatusCode::BAD_REQUEST),
            (CoreError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (
                CoreError::Store(anyhow::anyhow!("disk on fire")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }
}
