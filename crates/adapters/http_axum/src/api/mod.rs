//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod control;
pub mod data;

use axum::Router;
use axum::routing::{get, post};

use greenhouse_app::ports::ActuatorChannel;

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<A>() -> Router<AppState<A>>
where
    A: ActuatorChannel + Send + Sync + 'static,
{
    Router::new()
        .route("/data", get(data::get::<A>))
        .route("/data/stream", get(data::stream::<A>))
        .route("/control", post(control::post::<A>))
}
