/*!
 * Tests for error types and conversions
 */

use leengua::errors::{AppError, ExtractionError, JobError, ProviderError};

#[test]
fn test_jobError_display_shouldMatchEventReasons() {
    assert_eq!(JobError::EmptyInput.to_string(), "empty input");
    assert!(JobError::NoTranslatableContent.to_string().starts_with("no translatable content"));
    assert!(JobError::RawBinaryInput.to_string().contains("Extract its text"));
    assert_eq!(
        JobError::Initialization("model missing".to_string()).to_string(),
        "translator initialization failed: model missing"
    );
}

#[test]
fn test_providerError_display_shouldIncludeStatus() {
    let error = ProviderError::ApiError {
        status_code: 503,
        message: "busy".to_string(),
    };
    assert_eq!(error.to_string(), "API responded with error: 503 - busy");
}

#[test]
fn test_appError_fromVariants_shouldWrapSource() {
    let app: AppError = JobError::EmptyInput.into();
    assert!(matches!(app, AppError::Job(JobError::EmptyInput)));
    assert_eq!(app.to_string(), "Translation job failed: empty input");

    let app: AppError = ExtractionError::Empty("a.txt".to_string()).into();
    assert!(matches!(app, AppError::Extraction(_)));

    let app: AppError = ProviderError::ConnectionError("refused".to_string()).into();
    assert!(matches!(app, AppError::Provider(_)));

    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    assert!(matches!(AppError::from(io), AppError::File(_)));

    let any = anyhow::anyhow!("something else");
    assert!(matches!(AppError::from(any), AppError::Unknown(_)));
}

#[test]
fn test_appError_intoAnyhow_shouldDowncast() {
    let error: anyhow::Error = AppError::from(JobError::NoTranslatableContent).into();
    assert!(matches!(
        error.downcast_ref::<AppError>(),
        Some(AppError::Job(JobError::NoTranslatableContent))
    ));
}
