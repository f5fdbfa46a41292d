use crate::ApiError;

use axum::response::IntoResponse;
use http::StatusCode;
use http_body_util::BodyExt;

#[tokio::test]
async fn test_not_found_returns_404_with_json_body() {
    let error = ApiError::not_found("Student not found");
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "NOT_FOUND");
    assert_eq!(json["message"], "Student not found");
}

#[tokio::test]
async fn test_validation_error_returns_400() {
    let error = ApiError::validation("name is required");
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_unauthorized_returns_401() {
    let error = ApiError::unauthorized("Invalid credentials");
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_sqlx_error_hides_driver_detail() {
    let error = ApiError::from(sqlx::Error::PoolClosed);
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Database operation failed");
}

#[tokio::test]
async fn test_invalid_uuid_maps_to_validation_error() {
    let parse_error = uuid::Uuid::parse_str("not-a-uuid").unwrap_err();
    let error = ApiError::from(parse_error);
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
