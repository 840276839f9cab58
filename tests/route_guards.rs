//! Route-group guarding as wired in the router: an authenticated caller is
//! resolved first, then the area's role guard decides.

use axum::{
    body::Body,
    extract::Request,
    http::{Request as HttpRequest, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::get,
    Router,
};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use vidarena::{
    middleware::{require_roles, AuthenticatedUser, RoleGuard, ADMIN_ONLY, HOSTS, JUDGES},
    models::Role,
};

const ROLE_HEADER: &str = "x-test-role";

/// Stand-in for the session-backed auth layer
async fn inject_user(mut request: Request, next: Next) -> Response {
    let role = request
        .headers()
        .get(ROLE_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(Role::from_str);

    if let Some(role) = role {
        request.extensions_mut().insert(AuthenticatedUser {
            id: Uuid::new_v4(),
            username: "tester".to_string(),
            role,
            session_id: Uuid::new_v4(),
        });
    }
    next.run(request).await
}

fn area(guard: RoleGuard) -> Router {
    Router::new()
        .route("/contests", get(|| async { "ok" }))
        .route_layer(middleware::from_fn_with_state(guard, require_roles))
        .route_layer(middleware::from_fn(inject_user))
}

fn app() -> Router {
    Router::new().nest(
        "/api/v1",
        Router::new()
            .nest("/host", area(HOSTS))
            .nest("/judge", area(JUDGES))
            .nest("/admin", area(ADMIN_ONLY)),
    )
}

async fn send(uri: &str, role: Option<&str>) -> (StatusCode, Value) {
    let mut builder = HttpRequest::builder().uri(uri);
    if let Some(role) = role {
        builder = builder.header(ROLE_HEADER, role);
    }

    let response = app()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn test_anonymous_caller_is_sent_to_login() {
    let (status, body) = send("/api/v1/host/contests", None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    assert_eq!(
        body["error"]["details"]["redirect"],
        "/login?next=/host/contests"
    );
}

#[tokio::test]
async fn test_wrong_role_is_sent_home() {
    let (status, body) = send("/api/v1/host/contests", Some("participant")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "FORBIDDEN");
    assert_eq!(body["error"]["details"]["redirect"], "/dashboard");

    let (status, body) = send("/api/v1/admin/contests", Some("judge")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["details"]["redirect"], "/judge");
}

#[tokio::test]
async fn test_matching_role_passes() {
    let (status, _) = send("/api/v1/host/contests", Some("host")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send("/api/v1/judge/contests", Some("judge")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_admin_passes_every_area() {
    for area in ["host", "judge", "admin"] {
        let (status, _) = send(&format!("/api/v1/{}/contests", area), Some("admin")).await;
        assert_eq!(status, StatusCode::OK, "admin blocked from /{}", area);
    }
}

#[tokio::test]
async fn test_host_cannot_enter_judge_area() {
    let (status, body) = send("/api/v1/judge/contests", Some("host")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["details"]["redirect"], "/host");
}
