//! Tests for repository error construction and context formatting.

use wastespotter::db::repository::{ErrorContext, RepositoryError};

#[test]
fn test_error_context_display() {
    let context = ErrorContext::new("insert_report")
        .with_entity("report")
        .with_entity_id(17)
        .with_details("disk full");

    let rendered = context.to_string();
    assert!(rendered.contains("operation=insert_report"));
    assert!(rendered.contains("entity=report"));
    assert!(rendered.contains("id=17"));
    assert!(rendered.contains("details=disk full"));
}

#[test]
fn test_connection_errors_are_retryable() {
    let err = RepositoryError::connection("pool exhausted");
    assert!(err.is_retryable());

    let err = RepositoryError::not_found("Report 1 not found");
    assert!(!err.is_retryable());

    let err = RepositoryError::query("syntax error");
    assert!(!err.is_retryable());
}

#[test]
fn test_with_operation_updates_context() {
    let err = RepositoryError::query("bad column").with_operation("list_reports");
    assert_eq!(err.context().operation.as_deref(), Some("list_reports"));
}

#[test]
fn test_error_display_includes_message_and_context() {
    let err = RepositoryError::not_found_with_context(
        "Camera 3 not found",
        ErrorContext::new("fetch_camera").with_entity("camera"),
    );

    let rendered = err.to_string();
    assert!(rendered.contains("Camera 3 not found"));
    assert!(rendered.contains("operation=fetch_camera"));
}

#[test]
fn test_string_conversions_become_internal_errors() {
    let err: RepositoryError = "something odd".into();
    assert!(matches!(err, RepositoryError::InternalError { .. }));

    let err: RepositoryError = String::from("something odd").into();
    assert!(matches!(err, RepositoryError::InternalError { .. }));
}
