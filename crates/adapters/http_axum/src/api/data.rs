//! JSON and SSE handlers for the current snapshot.

use axum::Json;
use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::WatchStream;

use greenhouse_app::ports::ActuatorChannel;
use greenhouse_domain::payload::TelemetryPayload;

use crate::state::AppState;

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<TelemetryPayload>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/data`
pub async fn get<A>(State(state): State<AppState<A>>) -> GetResponse
where
    A: ActuatorChannel + Send + Sync + 'static,
{
    GetResponse::Ok(Json(state.current_payload()))
}

/// `GET /api/data/stream`: SSE stream of snapshots.
///
/// Sends the current snapshot immediately, then one `snapshot` event per
/// report ingested. Intermediate snapshots may be skipped when the client
/// reads slower than the controller reports; the latest one always arrives.
pub async fn stream<A>(
    State(state): State<AppState<A>>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, std::convert::Infallible>>>
where
    A: ActuatorChannel + Send + Sync + 'static,
{
    let device_id = state.device_id.clone();
    let snapshots = WatchStream::new(state.store.subscribe()).filter_map(move |device| {
        let payload = TelemetryPayload::from_snapshot(&*device_id, &device.snapshot);
        match Event::default().event("snapshot").json_data(&payload) {
            Ok(event) => Some(Ok(event)),
            Err(err) => {
                tracing::warn!(%err, "failed to serialize snapshot for SSE stream");
                None
            }
        }
    });

    Sse::new(snapshots).keep_alive(KeepAlive::default())
}
