//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use greenhouse_domain::error::BridgeError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    status: &'static str,
    message: String,
}

/// Maps [`BridgeError`] to an HTTP response with appropriate status code.
pub struct ApiError(BridgeError);

impl From<BridgeError> for ApiError {
    fn from(err: BridgeError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// Status code and client-facing message for this error.
    ///
    /// Server-side failures are logged here and reported with a generic message.
    #[must_use]
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match &self.0 {
            BridgeError::Command(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            BridgeError::Actuator(err) => {
                tracing::error!(error = %err, "actuator channel error");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "controller unavailable".to_string(),
                )
            }
            other => {
                tracing::error!(error = %other, "unexpected error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        (
            status,
            Json(ErrorBody {
                status: "error",
                message,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use greenhouse_domain::command::CommandError;

    #[test]
    fn should_map_missing_command_to_bad_request() {
        let (status, message) = ApiError::from(BridgeError::from(CommandError::Missing))
            .status_and_message();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, "missing command");
    }

    #[test]
    fn should_map_actuator_failure_to_server_error() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "unplugged");
        let (status, message) =
            ApiError::from(BridgeError::Actuator(Box::new(io))).status_and_message();
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(!message.contains("unplugged"));
    }

    #[test]
    fn should_map_other_errors_to_internal_error() {
        let (status, _) = ApiError::from(BridgeError::SourceClosed).status_and_message();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
