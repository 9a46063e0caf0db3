//! JSON handler for actuator commands.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use greenhouse_app::ports::ActuatorChannel;
use greenhouse_domain::command::CommandError;
use greenhouse_domain::error::BridgeError;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for the control endpoint.
#[derive(Deserialize)]
pub struct ControlRequest {
    pub command: Option<String>,
}

/// Outcome body of the control endpoint.
#[derive(Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ControlBody {
    Success { command: String },
    Error { message: &'static str },
}

/// Possible responses from the control endpoint.
pub enum ControlResponse {
    Sent(Json<ControlBody>),
    Missing(Json<ControlBody>),
}

impl IntoResponse for ControlResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Sent(json) => json.into_response(),
            Self::Missing(json) => (StatusCode::BAD_REQUEST, json).into_response(),
        }
    }
}

/// `POST /api/control`
///
/// The body is read as JSON whatever its content type. A body that is not
/// JSON, or has no string `command` field, counts as a missing command.
pub async fn post<A>(
    State(state): State<AppState<A>>,
    body: Bytes,
) -> Result<ControlResponse, ApiError>
where
    A: ActuatorChannel + Send + Sync + 'static,
{
    let raw = serde_json::from_slice::<ControlRequest>(&body)
        .ok()
        .and_then(|req| req.command);

    match state.command_router.submit(raw.as_deref()).await {
        Ok(command) => Ok(ControlResponse::Sent(Json(ControlBody::Success {
            command: command.to_string(),
        }))),
        Err(BridgeError::Command(CommandError::Missing)) => {
            Ok(ControlResponse::Missing(Json(ControlBody::Error {
                message: "Missing command",
            })))
        }
        Err(err) => Err(err.into()),
    }
}
