use contacts_client::error::AppError;
use contacts_client::utils::validation::ValidationErrors;
use serde_json::json;

#[test]
fn test_app_error_display_unauthorized() {
    let error = AppError::unauthorized("No refresh token available");
    assert_eq!(
        error.to_string(),
        "unauthorized (401): No refresh token available"
    );
    assert_eq!(error.status(), 401);
    assert!(error.is_unauthorized());
}

#[test]
fn test_app_error_display_http() {
    let error = AppError::Http {
        status: 400,
        message: "bad request".to_string(),
        payload: Some(json!({"message": "bad request"})),
    };
    assert_eq!(error.to_string(), "http error 400: bad request");
    assert_eq!(error.status(), 400);
    assert_eq!(error.payload(), Some(&json!({"message": "bad request"})));
}

#[test]
fn test_app_error_network_has_status_zero() {
    let error = AppError::Network("connection refused".to_string());
    assert_eq!(error.status(), 0);
    assert_eq!(error.to_string(), "network error: connection refused");
    assert!(error.payload().is_none());
}

#[test]
fn test_app_error_display_invalid_input() {
    let error = AppError::InvalidInput("page starts at 1".to_string());
    assert_eq!(error.to_string(), "invalid input: page starts at 1");
    assert_eq!(error.status(), 400);
}

#[test]
fn test_app_error_validation_status() {
    let errors = ValidationErrors {
        name: Some("Name is required".to_string()),
        ..Default::default()
    };
    let error = AppError::Validation(errors);
    assert_eq!(error.status(), 422);
    assert!(error.to_string().contains("Name is required"));
}

#[test]
fn test_app_error_from_serde_syntax() {
    let json = r#"{"invalid": json}"#;
    let serde_error = serde_json::from_str::<serde_json::Value>(json).unwrap_err();
    let app_error: AppError = serde_error.into();

    match app_error {
        AppError::Json(_) => (),
        _ => panic!("Expected Json error"),
    }
}

#[test]
fn test_app_error_from_serde_data() {
    let serde_error = serde_json::from_str::<u32>(r#""text""#).unwrap_err();
    let app_error: AppError = serde_error.into();

    match app_error {
        AppError::Deserialization(_) => (),
        _ => panic!("Expected Deserialization error"),
    }
}

#[test]
fn test_app_error_from_io() {
    let io_error = std::io::Error::other("test");
    let app_error: AppError = io_error.into();

    match app_error {
        AppError::Io(_) => (),
        _ => panic!("Expected Io error"),
    }
}

#[test]
fn test_app_error_is_clone() {
    let error = AppError::unauthorized("Token refresh failed");
    let copy = error.clone();
    assert_eq!(error.to_string(), copy.to_string());
}
