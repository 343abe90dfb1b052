//! `POST /api/dump` — accept one debug dump.
//!
//! Decode, validate, append atomically, then hand the full snapshot to the
//! dashboard over the rendezvous channel. The send blocks until the
//! dashboard's next tick drains it, so the client's request is held open
//! until its dump is on screen. That is deliberate admission control:
//! concurrent bursts serialize at the handoff.

use super::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

use crate::event::DumpEvent;

/// Stable rejection body for invalid requests.
const INVALID_BODY: &str = "Wrong request data.";

pub async fn dump(
    State(state): State<AppState>,
    body: Result<Json<DumpEvent>, JsonRejection>,
) -> Response {
    // A structurally undecodable body is a failure of the request itself,
    // not a validation miss; keep the two classes distinct.
    let Json(event) = match body {
        Ok(json) => json,
        Err(rejection) => {
            tracing::error!(reason = %rejection.body_text(), "undecodable dump request");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": rejection.body_text() })),
            )
                .into_response();
        }
    };

    if !event.is_valid() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": INVALID_BODY })),
        )
            .into_response();
    }

    tracing::debug!(
        dump_type = %event.dump_type,
        file = %event.file,
        "dump accepted"
    );
    let snapshot = state.store.append(event);

    // Rendezvous send parks the thread, so it must leave the async runtime.
    let updates = state.updates.clone();
    match tokio::task::spawn_blocking(move || updates.send(snapshot)).await {
        Ok(Ok(())) => StatusCode::OK.into_response(),
        Ok(Err(_)) => {
            // Dashboard already quit; the event is stored regardless.
            tracing::warn!("dashboard gone, dump stored without delivery");
            StatusCode::OK.into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "handoff task failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::{router, AppState};
    use crate::event::EventLog;
    use crate::handoff::{rendezvous, SnapshotReceiver};
    use crate::store::EventStore;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    fn make_app() -> (Router, Arc<EventStore>, SnapshotReceiver) {
        let store = Arc::new(EventStore::new());
        let (tx, rx) = rendezvous();
        (router(AppState::new(store.clone(), tx)), store, rx)
    }

    /// Drain the rendezvous in the background so sends never park.
    fn drain(rx: SnapshotReceiver) {
        std::thread::spawn(move || while rx.recv().is_ok() {});
    }

    fn post(json: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/dump")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_owned()))
            .unwrap()
    }

    async fn body_json(resp: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), 10_000).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn valid_dump_is_stored_and_acked() {
        let (app, store, rx) = make_app();
        drain(rx);

        let resp = app
            .oneshot(post(
                r#"{"payload":"42","file":"a.go","type":"go","timestamp":"1700000000"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let log = store.get();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].dump_type, "go");
    }

    #[tokio::test]
    async fn missing_payload_is_rejected_without_side_effects() {
        let (app, store, rx) = make_app();

        let resp = app
            .oneshot(post(r#"{"file":"a.go","type":"go"}"#))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = body_json(resp).await;
        assert_eq!(body["error"], "Wrong request data.");
        assert!(store.is_empty());
        // No snapshot was offered to the dashboard.
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn empty_required_field_is_rejected() {
        let (app, store, rx) = make_app();

        let resp = app
            .oneshot(post(r#"{"payload":"","file":"a.go","type":"go"}"#))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(store.is_empty());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn undecodable_body_is_a_server_error() {
        let (app, store, rx) = make_app();

        let resp = app.oneshot(post(r#"{"payload": 42"#)).await.unwrap();

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(store.is_empty());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn sequential_dumps_preserve_arrival_order() {
        let (app, store, rx) = make_app();
        drain(rx);

        for payload in ["first", "second", "third"] {
            let req = post(&format!(
                r#"{{"payload":"{payload}","file":"a.go","type":"go"}}"#
            ));
            let resp = app.clone().oneshot(req).await.unwrap();
            assert_eq!(resp.status(), StatusCode::OK);
        }

        let log = store.get();
        let payloads: Vec<&str> = log.iter().map(|e| e.payload.as_str()).collect();
        assert_eq!(payloads, ["first", "second", "third"]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn request_blocks_until_snapshot_is_drained() {
        let (app, _store, rx) = make_app();

        let pending = tokio::spawn(
            app.oneshot(post(r#"{"payload":"42","file":"a.go","type":"go"}"#)),
        );

        // Nobody has drained the rendezvous, so the request is held open.
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(!pending.is_finished());

        let snapshot: EventLog = rx.recv_timeout(Duration::from_secs(1)).unwrap();
        assert_eq!(snapshot.len(), 1);

        let resp = pending.await.unwrap().unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn delivered_snapshot_contains_the_whole_log() {
        let (app, store, rx) = make_app();

        // Pre-existing event from earlier in the session.
        store.append(crate::event::DumpEvent {
            payload: "old".into(),
            callstack: Vec::new(),
            file: "a.go".into(),
            line: String::new(),
            dump_type: "go".into(),
            timestamp: String::new(),
        });

        let pending = tokio::spawn(
            app.oneshot(post(r#"{"payload":"new","file":"b.go","type":"go"}"#)),
        );

        let snapshot = rx.recv_timeout(Duration::from_secs(1)).unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].payload, "old");
        assert_eq!(snapshot[1].payload, "new");

        assert_eq!(pending.await.unwrap().unwrap().status(), StatusCode::OK);
    }
}
