use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::json;

use super::application::{submit_application, ApplicationSubmitError, TutorApplication};
use super::login::{authenticate, LoginAttempt, LoginError};
use crate::storage::KeyValueStore;

/// Router builder exposing application intake and the demo login.
pub fn intake_router<S>(storage: Arc<S>) -> Router
where
    S: KeyValueStore + 'static,
{
    Router::new()
        .route("/api/v1/applications", post(submit_handler::<S>))
        .route("/api/v1/login", post(login_handler::<S>))
        .with_state(storage)
}

pub(crate) async fn submit_handler<S>(
    State(storage): State<Arc<S>>,
    Json(application): Json<TutorApplication>,
) -> Response
where
    S: KeyValueStore + 'static,
{
    match submit_application(storage.as_ref(), &application) {
        Ok(()) => {
            let payload = json!({ "status": "submitted" });
            (StatusCode::ACCEPTED, Json(payload)).into_response()
        }
        Err(ApplicationSubmitError::Invalid(error)) => {
            let payload = json!({
                "error": error.to_string(),
                "missing": error.missing,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn login_handler<S>(
    State(storage): State<Arc<S>>,
    Json(attempt): Json<LoginAttempt>,
) -> Response
where
    S: KeyValueStore + 'static,
{
    match authenticate(storage.as_ref(), &attempt) {
        Ok(()) => {
            let payload = json!({ "status": "authenticated", "redirect": "/lecturer" });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error @ LoginError::CaptchaRequired) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
        Err(error @ LoginError::InvalidCredentials) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNAUTHORIZED, Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
