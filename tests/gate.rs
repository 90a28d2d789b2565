//! Bearer gate integration tests
//!
//! Drives a protected router through `oneshot` with a fake identity provider
//! standing in for the real one.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use axum::{
    Json, Router,
    body::Body,
    http::{Request, Response, StatusCode, header},
    routing::get,
};
use http_body_util::BodyExt;
use serde_json::{Map, Value, json};
use tower::ServiceExt;

use bearer_gate::api::v1::extractors::CurrentIdentity;
use bearer_gate::middleware;
use bearer_gate::services::identity::{Identity, IdentityProvider, VerifyError};
use bearer_gate::state::AppState;

/// Accepts `abc123` as `{uid: "u1"}`; `down` simulates an outage; anything else is rejected.
#[derive(Default)]
struct FakeProvider {
    calls: AtomicUsize,
}

#[async_trait]
impl IdentityProvider for FakeProvider {
    async fn verify(&self, token: &str) -> Result<Identity, VerifyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match token {
            "abc123" => Ok(claims(json!({"uid": "u1"}))),
            "down" => Err(VerifyError::unavailable("connection refused to idp.internal")),
            "expiredtok" => Err(VerifyError::rejected("token expired at 2020-01-01")),
            other => Err(VerifyError::rejected(format!("unknown token {other}"))),
        }
    }
}

fn claims(value: Value) -> Identity {
    let map: Map<String, Value> = value.as_object().cloned().unwrap();
    Identity::new(map)
}

struct Harness {
    app: Router,
    provider: Arc<FakeProvider>,
    downstream_calls: Arc<AtomicUsize>,
}

/// `/probe` echoes the attached identity and counts invocations.
fn harness() -> Harness {
    let provider = Arc::new(FakeProvider::default());
    let downstream_calls = Arc::new(AtomicUsize::new(0));
    let state = AppState::new(provider.clone());

    let counter = downstream_calls.clone();
    let probe = Router::new().route(
        "/probe",
        get(
            move |CurrentIdentity(identity): CurrentIdentity| {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    (StatusCode::IM_A_TEAPOT, Json(identity))
                }
            },
        ),
    );

    let app = middleware::auth::apply(probe, state.clone()).with_state(state);

    Harness {
        app,
        provider,
        downstream_calls,
    }
}

fn request(authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri("/probe");
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn assert_unauthorized(response: Response<Body>) {
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_string(response).await, r#"{"error":"Unauthorized"}"#);
}

#[tokio::test]
async fn valid_token_proceeds_with_provider_claims() {
    let h = harness();

    let response = h.app.oneshot(request(Some("Bearer abc123"))).await.unwrap();

    // the handler's response, not one written by the gate
    assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body, json!({"uid": "u1"}));
    assert_eq!(h.downstream_calls.load(Ordering::SeqCst), 1);
    assert_eq!(h.provider.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn missing_header_is_rejected_without_calling_anything() {
    let h = harness();

    let response = h.app.oneshot(request(None)).await.unwrap();

    assert_unauthorized(response).await;
    assert_eq!(h.downstream_calls.load(Ordering::SeqCst), 0);
    assert_eq!(h.provider.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn wrong_scheme_is_rejected() {
    let h = harness();

    let response = h.app.oneshot(request(Some("Basic xyz"))).await.unwrap();

    assert_unauthorized(response).await;
    assert_eq!(h.downstream_calls.load(Ordering::SeqCst), 0);
    assert_eq!(h.provider.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn empty_bearer_is_rejected() {
    let h = harness();

    let response = h.app.oneshot(request(Some("Bearer "))).await.unwrap();

    assert_unauthorized(response).await;
    assert_eq!(h.provider.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn expired_token_is_rejected_without_the_reason() {
    let h = harness();

    let response = h.app.oneshot(request(Some("Bearer expiredtok"))).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_string(response).await;
    assert_eq!(body, r#"{"error":"Unauthorized"}"#);
    assert!(!body.contains("expired"));
    assert_eq!(h.downstream_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn provider_outage_looks_like_a_bad_token() {
    let h = harness();

    let response = h.app.oneshot(request(Some("Bearer down"))).await.unwrap();

    assert_unauthorized(response).await;
    assert_eq!(h.downstream_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn same_token_twice_yields_same_identity() {
    let h = harness();

    let first = h
        .app
        .clone()
        .oneshot(request(Some("Bearer abc123")))
        .await
        .unwrap();
    let second = h.app.oneshot(request(Some("Bearer abc123"))).await.unwrap();

    assert_eq!(body_string(first).await, body_string(second).await);
    // verified each time, nothing cached
    assert_eq!(h.provider.calls.load(Ordering::SeqCst), 2);
    assert_eq!(h.downstream_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn concurrent_requests_do_not_interfere() {
    let h = harness();

    let good = h.app.clone().oneshot(request(Some("Bearer abc123")));
    let bad = h.app.clone().oneshot(request(Some("Bearer nope")));
    let (good, bad) = tokio::join!(good, bad);

    assert_eq!(good.unwrap().status(), StatusCode::IM_A_TEAPOT);
    assert_unauthorized(bad.unwrap()).await;
    assert_eq!(h.downstream_calls.load(Ordering::SeqCst), 1);
}
