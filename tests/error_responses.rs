//! JSON error bodies produced by `AppError`

use axum::{body::to_bytes, http::StatusCode, response::IntoResponse};
use serde_json::Value;

use vidarena::error::AppError;

async fn render(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = tokio_test::assert_ok!(serde_json::from_slice(&bytes));
    (status, body)
}

#[tokio::test]
async fn test_validation_error_body() {
    let (status, body) =
        render(AppError::Validation("title is required".to_string()).into_response()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["message"], "Validation error: title is required");
    assert!(body["error"].get("details").is_none());
}

#[tokio::test]
async fn test_database_errors_are_masked() {
    let (status, body) = render(
        AppError::Database("relation \"users\" does not exist".to_string()).into_response(),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "DATABASE_ERROR");
    assert_eq!(body["error"]["message"], "A database error occurred");
}

#[tokio::test]
async fn test_session_expiry_carries_redirect() {
    let (status, body) = render(
        AppError::SessionExpired
            .with_redirect("/login?next=/judge")
            .into_response(),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "SESSION_EXPIRED");
    assert_eq!(body["error"]["details"]["redirect"], "/login?next=/judge");
}

#[tokio::test]
async fn test_conflict_status() {
    let (status, body) =
        render(AppError::Conflict("Contest is not accepting submissions".to_string()).into_response())
            .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn test_redirect_responses_mask_store_errors() {
    let (status, body) = render(
        AppError::Redis("Connection refused (os error 111) redis://:secret@10.0.0.5".to_string())
            .with_redirect("/login?next=/judge")
            .into_response(),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "REDIS_ERROR");
    assert_eq!(body["error"]["message"], "A session store error occurred");
    assert_eq!(body["error"]["details"]["redirect"], "/login?next=/judge");
    assert!(!body.to_string().contains("secret"));
}

#[tokio::test]
async fn test_redirect_responses_mask_internal_errors() {
    let (_, body) = render(
        AppError::Internal(anyhow::anyhow!("session payload: expected value at line 1"))
            .with_redirect("/login?next=/host")
            .into_response(),
    )
    .await;

    assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
    assert_eq!(body["error"]["message"], "An internal error occurred");
}
