//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use greenhouse_app::ports::ActuatorChannel;

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Serves the JSON API under `/api` and the plain-text endpoints at the root.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<A>(state: AppState<A>) -> Router
where
    A: ActuatorChannel + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/data", get(crate::plain::data::<A>))
        .route("/command", get(crate::plain::command::<A>))
        .nest("/api", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tokio::sync::mpsc;
    use tower::ServiceExt;

    use super::*;
    use greenhouse_app::services::command_router::CommandRouter;
    use greenhouse_app::store::SnapshotStore;
    use greenhouse_domain::report::parse;
    use greenhouse_domain::time::now;

    const REFERENCE_LINE: &str = "T1:25.0,H1:60.0,T2:28.0,H2:70.0,Soil:45,Light:80,Tank:75,pH:6.8,WaterPump:ON,WaterMode:AUTO,Fan:OFF,FanMode:AUTO,Fertilizer:OFF,RFID:NoCard";

    fn test_state() -> (AppState<mpsc::Sender<String>>, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(8);
        let store = Arc::new(SnapshotStore::new(now()));
        (
            AppState::new(store, CommandRouter::new(tx), "bridge-test"),
            rx,
        )
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_control(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/control")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let (state, _rx) = test_state();
        let response = build(state).oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_return_placeholder_before_first_report() {
        let (state, _rx) = test_state();
        let response = build(state).oneshot(get("/data")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "Waiting for sensor data...");
    }

    #[tokio::test]
    async fn should_return_raw_line_after_report() {
        let (state, _rx) = test_state();
        state
            .store
            .replace(REFERENCE_LINE.to_string(), parse(REFERENCE_LINE, now()).snapshot);

        let response = build(state).oneshot(get("/data")).await.unwrap();
        assert_eq!(body_text(response).await, REFERENCE_LINE);
    }

    #[tokio::test]
    async fn should_return_idle_payload_before_first_report() {
        let (state, _rx) = test_state();
        let response = build(state).oneshot(get("/api/data")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["deviceId"], "bridge-test");
        assert_eq!(json["sensors"]["soilMoisture"], 0);
        assert_eq!(json["actuators"]["waterPump"]["status"], "OFF");
        assert_eq!(json["actuators"]["waterPump"]["mode"], "AUTO");
        assert_eq!(json["rfid"], "NoCard");
    }

    #[tokio::test]
    async fn should_return_current_payload_as_json() {
        let (state, _rx) = test_state();
        state
            .store
            .replace(REFERENCE_LINE.to_string(), parse(REFERENCE_LINE, now()).snapshot);

        let response = build(state).oneshot(get("/api/data")).await.unwrap();
        let json = body_json(response).await;
        assert_eq!(json["sensors"]["outsideTemp"], 25.0);
        assert_eq!(json["sensors"]["greenhouseHumidity"], 70.0);
        assert_eq!(json["sensors"]["waterTank"], 75);
        assert_eq!(json["sensors"]["phLevel"], 6.8);
        assert_eq!(json["actuators"]["waterPump"]["status"], "ON");
        assert_eq!(json["actuators"]["ventilationFan"]["mode"], "AUTO");
        assert_eq!(json["actuators"]["fertilizerPump"]["status"], "OFF");
    }

    #[tokio::test]
    async fn should_send_command_from_query_parameter() {
        let (state, mut rx) = test_state();
        let response = build(state)
            .oneshot(get("/command?cmd=FAN:MANUAL:ON"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "Command sent: FAN:MANUAL:ON");
        assert_eq!(rx.recv().await.as_deref(), Some("FAN:MANUAL:ON"));
    }

    #[tokio::test]
    async fn should_reject_missing_query_parameter() {
        let (state, mut rx) = test_state();
        let response = build(state).oneshot(get("/command")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, "Missing command parameter");
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn should_reject_invalid_query_command_without_sending() {
        let (state, mut rx) = test_state();
        let response = build(state)
            .oneshot(get("/command?cmd=FERTILIZER:AUTO"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn should_accept_json_control_command() {
        let (state, mut rx) = test_state();
        let response = build(state)
            .oneshot(post_control(r#"{"command":"WATER:AUTO"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "success");
        assert_eq!(json["command"], "WATER:AUTO");
        assert_eq!(rx.recv().await.as_deref(), Some("WATER:AUTO"));
    }

    #[tokio::test]
    async fn should_echo_canonical_form_of_command() {
        let (state, mut rx) = test_state();
        let response = build(state)
            .oneshot(post_control(r#"{"command":" water:manual:on "}"#))
            .await
            .unwrap();

        let json = body_json(response).await;
        assert_eq!(json["command"], "WATER:MANUAL:ON");
        assert_eq!(rx.recv().await.as_deref(), Some("WATER:MANUAL:ON"));
    }

    #[tokio::test]
    async fn should_reject_control_body_without_command() {
        let (state, mut rx) = test_state();
        let response = build(state).oneshot(post_control("{}")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], "Missing command");
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn should_treat_non_json_body_as_missing_command() {
        let (state, _rx) = test_state();
        let response = build(state)
            .oneshot(post_control("command=WATER:AUTO"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["message"], "Missing command");
    }

    #[tokio::test]
    async fn should_reject_invalid_control_command() {
        let (state, mut rx) = test_state();
        let response = build(state)
            .oneshot(post_control(r#"{"command":"FAN:MANUAL"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["status"], "error");
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn should_return_method_not_allowed_for_get_control() {
        let (state, _rx) = test_state();
        let response = build(state).oneshot(get("/api/control")).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn should_return_service_unavailable_when_controller_unreachable() {
        let (state, rx) = test_state();
        drop(rx);

        let response = build(state)
            .oneshot(post_control(r#"{"command":"FAN:AUTO"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn should_stream_current_snapshot_as_first_event() {
        let (state, _rx) = test_state();
        state
            .store
            .replace(REFERENCE_LINE.to_string(), parse(REFERENCE_LINE, now()).snapshot);

        let response = build(state).oneshot(get("/api/data/stream")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let mut body = response.into_body();
        let frame = body.frame().await.unwrap().unwrap();
        let chunk = String::from_utf8(frame.into_data().unwrap().to_vec()).unwrap();
        assert!(chunk.starts_with("event: snapshot\n"));
        assert!(chunk.contains(r#""deviceId":"bridge-test""#));
    }
}
