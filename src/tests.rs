use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use crate::app::build_app;
use crate::auth::jwt::{issue_test_token, TokenKind};
use crate::state::AppState;

struct TestApp {
    app: Router,
    token: String,
    dog_id: Uuid,
}

impl TestApp {
    fn new() -> Self {
        let state = AppState::fake();
        let token = issue_test_token(&state, Uuid::new_v4(), TokenKind::Access);
        Self {
            app: build_app(state),
            token,
            dog_id: Uuid::new_v4(),
        }
    }

    fn dog_path(&self, rest: &str) -> String {
        format!("/api/v1/dogs/{}{}", self.dog_id, rest)
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut req = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token));
        let body = match body {
            Some(v) => {
                req = req.header(header::CONTENT_TYPE, "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };
        let res = self.app.clone().oneshot(req.body(body).unwrap()).await.unwrap();
        let status = res.status();
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, value)
    }

    async fn put_reference_dog(&self) {
        let (status, _) = self
            .send(
                Method::PUT,
                &self.dog_path("/profile"),
                Some(json!({
                    "weight_kg": 10.0,
                    "target_weight_kg": 10.0,
                    "neutered": true,
                    "activity_level": "normal",
                    "bcs": 5,
                    "life_stage": "adult",
                    "environment": "indoor",
                    "season_factor": "mild",
                    "goal_mode": "maintain",
                    "breed": "  Border   Collie "
                })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }
}

#[tokio::test]
async fn health_is_public() {
    let app = build_app(AppState::fake());
    let res = app
        .oneshot(Request::builder().uri("/api/v1/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"ok");
}

#[tokio::test]
async fn protected_routes_need_an_access_token() {
    let state = AppState::fake();
    let refresh = issue_test_token(&state, Uuid::new_v4(), TokenKind::Refresh);
    let app = build_app(state);

    let res = app
        .clone()
        .oneshot(Request::builder().uri("/api/v1/me").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/me")
                .header(header::AUTHORIZATION, format!("Bearer {refresh}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn target_for_reference_dog() {
    let t = TestApp::new();
    t.put_reference_dog().await;

    let (status, body) = t.send(Method::GET, &t.dog_path("/target"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["season"], "mild");
    assert_eq!(body["rer"], 390);
    assert_eq!(body["recommended"], 630);
    assert_eq!(body["range"]["low"], 580);
    assert_eq!(body["range"]["high"], 680);
    assert_eq!(body["deficit_pct"], 0.0);
    let notes = body["notes"].as_array().unwrap();
    assert_eq!(notes.last().unwrap(), "Breed: Border Collie (used for tips, not for the formula)");
}

#[tokio::test]
async fn unknown_dog_is_not_found() {
    let t = TestApp::new();
    let (status, _) = t.send(Method::GET, &t.dog_path("/target"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = t
        .send(
            Method::POST,
            &t.dog_path("/meals"),
            Some(json!({ "preset": "treats", "grams": 20 })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_profile_is_rejected() {
    let t = TestApp::new();
    let (status, body) = t
        .send(
            Method::PUT,
            &t.dog_path("/profile"),
            Some(json!({ "weight_kg": 10.0, "target_weight_kg": 9.0, "bcs": 12 })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "bcs must be between 1 and 9");
}

#[tokio::test]
async fn logging_a_meal_updates_the_day() {
    let t = TestApp::new();
    t.put_reference_dog().await;

    let (status, body) = t
        .send(
            Method::POST,
            &t.dog_path("/meals"),
            Some(json!({ "preset": "kibble_standard", "grams": 150 })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["meal"]["kcal"], 540.0);
    assert_eq!(body["summary"]["calories_in"], 540);
    assert_eq!(body["summary"]["target"], 630);
    assert_eq!(body["summary"]["delta"], -90);

    let (status, body) = t
        .send(
            Method::POST,
            &t.dog_path("/activities"),
            Some(json!({ "preset": "walk_normal", "minutes": 30 })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["summary"]["calories_out"], 10);
    assert_eq!(body["summary"]["net"], 530);

    let (_, today) = t.send(Method::GET, &t.dog_path("/summaries/today"), None).await;
    assert_eq!(today["net"], 530);

    let (_, logs) = t.send(Method::GET, &t.dog_path("/logs"), None).await;
    assert_eq!(logs["meals"].as_array().unwrap().len(), 1);
    assert_eq!(logs["activities"].as_array().unwrap().len(), 1);

    let (_, list) = t.send(Method::GET, &t.dog_path("/summaries"), None).await;
    assert_eq!(list["summaries"].as_array().unwrap().len(), 1);

    let day = today["day"].as_str().unwrap().to_string();
    let (status, again) = t
        .send(Method::POST, &t.dog_path(&format!("/summaries/{day}/recompute")), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(again["net"], 530);
    assert_eq!(again["created_at"], today["created_at"]);
}

#[tokio::test]
async fn bad_log_input_is_a_client_error() {
    let t = TestApp::new();
    t.put_reference_dog().await;

    let (status, body) = t
        .send(Method::POST, &t.dog_path("/meals"), Some(json!({ "grams": 80 })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "either a preset or kcal_per_100g is required");

    let (status, _) = t
        .send(Method::GET, &t.dog_path("/summaries?from=2025-02-10&to=2025-02-01"), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = t.send(Method::GET, &t.dog_path("/logs?day=yesterday"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn coach_evaluates_and_stores_today() {
    let t = TestApp::new();
    t.put_reference_dog().await;

    let (status, _) = t.send(Method::GET, &t.dog_path("/coach/today"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    t.send(
        Method::POST,
        &t.dog_path("/meals"),
        Some(json!({ "preset": "kibble_standard", "grams": 170 })),
    )
    .await;

    let (status, tip) = t.send(Method::POST, &t.dog_path("/coach"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tip["title"], "Good adherence");
    assert_eq!(tip["severity"], "good");
    assert_eq!(tip["metrics"]["target"], 630);
    assert_eq!(tip["metrics"]["avg7"], 612);

    let (status, stored) = t.send(Method::GET, &t.dog_path("/coach/today"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stored["title"], tip["title"]);
    assert_eq!(stored["created_at"], tip["created_at"]);
}
