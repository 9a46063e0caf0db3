//! Plain-text endpoints used by the controller's dashboard page.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use greenhouse_app::ports::ActuatorChannel;
use greenhouse_domain::command::CommandError;
use greenhouse_domain::error::BridgeError;

use crate::error::ApiError;
use crate::state::AppState;

/// Query string of the command endpoint.
#[derive(Deserialize)]
pub struct CommandQuery {
    pub cmd: Option<String>,
}

/// `GET /data`: the last raw report line.
pub async fn data<A>(State(state): State<AppState<A>>) -> String
where
    A: ActuatorChannel + Send + Sync + 'static,
{
    state.store.read().raw_line_or_placeholder().to_string()
}

/// `GET /command?cmd=…`
pub async fn command<A>(
    State(state): State<AppState<A>>,
    Query(query): Query<CommandQuery>,
) -> Response
where
    A: ActuatorChannel + Send + Sync + 'static,
{
    match state.command_router.submit(query.cmd.as_deref()).await {
        Ok(command) => format!("Command sent: {command}").into_response(),
        Err(BridgeError::Command(CommandError::Missing)) => {
            (StatusCode::BAD_REQUEST, "Missing command parameter").into_response()
        }
        Err(err) => ApiError::from(err).status_and_message().into_response(),
    }
}
