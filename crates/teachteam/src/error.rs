use crate::config::ConfigError;
use crate::storage::StorageError;
use crate::telemetry::TelemetryError;
use crate::workflows::intake::{ApplicationSubmitError, LoginError};
use crate::workflows::review::ReviewError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Storage(StorageError),
    Review(ReviewError),
    Application(ApplicationSubmitError),
    Login(LoginError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Storage(err) => write!(f, "storage error: {}", err),
            AppError::Review(err) => write!(f, "review error: {}", err),
            AppError::Application(err) => write!(f, "application error: {}", err),
            AppError::Login(err) => write!(f, "login error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Storage(err) => Some(err),
            AppError::Review(err) => Some(err),
            AppError::Application(err) => Some(err),
            AppError::Login(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Review(ReviewError::Persist(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Review(_) => StatusCode::NOT_FOUND,
            AppError::Application(ApplicationSubmitError::Invalid(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Login(LoginError::CaptchaRequired) => StatusCode::BAD_REQUEST,
            AppError::Login(LoginError::InvalidCredentials) => StatusCode::UNAUTHORIZED,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Storage(_)
            | AppError::Application(_)
            | AppError::Login(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<StorageError> for AppError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<ReviewError> for AppError {
    fn from(value: ReviewError) -> Self {
        Self::Review(value)
    }
}

impl From<ApplicationSubmitError> for AppError {
    fn from(value: ApplicationSubmitError) -> Self {
        Self::Application(value)
    }
}

impl From<LoginError> for AppError {
    fn from(value: LoginError) -> Self {
        Self::Login(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::intake::{ApplicationFormError, MissingField};
    use crate::workflows::review::SelectionError;

    #[test]
    fn maps_domain_errors_to_statuses() {
        let cases = [
            (
                AppError::Review(ReviewError::NotOnRoster("Mallory".to_string())),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::Review(ReviewError::Selection(SelectionError::UnknownApplicant(
                    "Alice".to_string(),
                ))),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::Application(ApplicationSubmitError::Invalid(ApplicationFormError {
                    missing: vec![MissingField::Skills],
                })),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                AppError::Login(LoginError::InvalidCredentials),
                StatusCode::UNAUTHORIZED,
            ),
            (AppError::Config(ConfigError::InvalidPort), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }

    #[test]
    fn display_names_the_failing_layer() {
        let error = AppError::from(StorageError::Unavailable("disk offline".to_string()));
        assert_eq!(
            error.to_string(),
            "storage error: storage unavailable: disk offline"
        );
    }
}
