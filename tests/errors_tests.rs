use std::error::Error;
use club_api::errors::ApiError;

#[test]
fn test_api_error_implements_error_trait() {
    fn assert_error<T: Error>(_: &T) {}

    let error = ApiError::Validation("test error".to_string());
    assert_error(&error);
}

#[test]
fn test_api_error_display() {
    let error = ApiError::Validation("ID is required".to_string());
    assert_eq!(format!("{error}"), "ID is required");

    let error = ApiError::MethodNotAllowed;
    assert_eq!(format!("{error}"), "Method not allowed");

    let error = ApiError::Parse("Invalid base64 body".to_string());
    assert_eq!(
        format!("{error}"),
        "Failed to parse request: Invalid base64 body"
    );
}

#[test]
fn test_api_error_status_codes() {
    assert_eq!(ApiError::Validation(String::new()).status_code(), 400);
    assert_eq!(ApiError::NotFound(String::new()).status_code(), 404);
    assert_eq!(ApiError::MethodNotAllowed.status_code(), 405);
    assert_eq!(ApiError::Parse(String::new()).status_code(), 500);
}

#[test]
fn test_api_error_from_conversions() {
    // Database errors surface their own message unchanged
    let err: ApiError = sqlx::Error::RowNotFound.into();
    assert!(err.is_internal());
    assert_eq!(err.to_string(), sqlx::Error::RowNotFound.to_string());

    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let message = json_err.to_string();
    let err: ApiError = json_err.into();
    assert_eq!(err.status_code(), 500);
    assert_eq!(err.to_string(), message);
}
