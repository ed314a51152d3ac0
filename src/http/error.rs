//! Mapping of service failures onto HTTP responses.

use super::Flash;
use crate::todo::{domain::FieldErrors, services::TodoServiceError};
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Error response of the JSON API.
///
/// Serialized as `{ message, errors?, flash: { success, error } }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    errors: Option<FieldErrors>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<FieldErrors>,
    flash: Flash,
}

impl ApiError {
    /// Creates an error with `status` and `message`.
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            errors: None,
        }
    }

    /// 401: the caller could not be identified.
    #[must_use]
    pub fn unauthenticated() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthenticated.")
    }

    /// 403: the caller lacks the required role.
    #[must_use]
    pub fn forbidden() -> Self {
        Self::new(StatusCode::FORBIDDEN, "This action is unauthorized.")
    }

    /// 404 with `message`.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// 422 carrying per-field messages.
    #[must_use]
    pub fn validation(errors: FieldErrors) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: "The given data was invalid.".to_owned(),
            errors: Some(errors),
        }
    }

    /// 500 with a generic message.
    #[must_use]
    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong.")
    }

    /// Returns the response status.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the per-field messages of a validation failure.
    #[must_use]
    pub const fn errors(&self) -> Option<&FieldErrors> {
        self.errors.as_ref()
    }
}

impl From<TodoServiceError> for ApiError {
    fn from(err: TodoServiceError) -> Self {
        match err {
            TodoServiceError::Validation(errors) => Self::validation(errors),
            TodoServiceError::ListNotFound(_) => Self::not_found("List not found."),
            TodoServiceError::TaskNotFound(_) => Self::not_found("Task not found."),
            TodoServiceError::Forbidden(_) => Self::forbidden(),
            TodoServiceError::Repository(source) => {
                tracing::error!(error = %source, "repository failure");
                Self::internal()
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "rejected request body");
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(error = %rejection, "rejected path");
        Self::not_found("Not found.")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            flash: Flash::error(self.message.clone()),
            message: self.message,
            errors: self.errors,
        };
        (self.status, Json(body)).into_response()
    }
}
