// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::http::StatusCode;
use axum::response::IntoResponse;
use fitcircuit::error::AppError;
use fitcircuit::services::AiError;
use serde_json::Value;

async fn render(err: AppError) -> (StatusCode, Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_client_errors_carry_details() {
    let (status, body) = render(AppError::NotFound("Workout plan not found".to_string())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
    assert_eq!(body["details"], "Workout plan not found");

    let (status, body) = render(AppError::BadRequest("No file uploaded".to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"], "No file uploaded");

    let (status, body) = render(AppError::PayloadTooLarge("limit exceeded".to_string())).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"], "payload_too_large");

    let (status, body) = render(AppError::Unauthorized).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.get("details").is_none());
}

#[tokio::test]
async fn test_server_errors_hide_details() {
    let (status, body) = render(AppError::Database("connection reset".to_string())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "database_error");
    assert!(body.get("details").is_none());

    let (status, body) = render(AppError::Internal(anyhow::anyhow!("boom"))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "internal_error");
}

#[tokio::test]
async fn test_ai_errors_map_to_generation_failed() {
    for err in [
        AiError::EmptyResponse,
        AiError::InvalidJson("expected value at line 1".to_string()),
        AiError::Status {
            status: 503,
            body: "overloaded".to_string(),
        },
        AiError::Request("connection refused".to_string()),
    ] {
        let (status, body) = render(err.into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "generation_failed");
        assert!(body.get("details").is_none());
    }
}

#[test]
fn test_validation_errors_become_bad_request() {
    use validator::Validate;

    #[derive(Validate)]
    struct Form {
        #[validate(range(min = 1, max = 7))]
        weekly_frequency: u32,
    }

    let err: AppError = Form {
        weekly_frequency: 0,
    }
    .validate()
    .unwrap_err()
    .into();

    assert!(matches!(err, AppError::BadRequest(ref msg) if msg.contains("weekly_frequency")));
}
