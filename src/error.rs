/*
 * Responsibility
 * - the application-wide AppError
 * - IntoResponse (HTTP status + {"success": false, "error", "message"} body)
 * - one arm per error kind; repo / auth errors are converted here
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::repos::error::RepoError;
use crate::services::auth::AuthError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("bad request")]
    BadRequest,
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("not found")]
    NotFound,
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("request timeout")]
    RequestTimeout,
    #[error("payload too large")]
    PayloadTooLarge,
    #[error("unsupported media type")]
    UnsupportedMediaType,
    #[error("conflict")]
    Conflict,
    #[error("unprocessable: {0}")]
    Unprocessable(String),
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn unprocessable(reason: impl Into<String>) -> Self {
        Self::Unprocessable(reason.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest => StatusCode::BAD_REQUEST,
            AppError::Auth(e) => e.status(),
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::RequestTimeout => StatusCode::REQUEST_TIMEOUT,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::Conflict => StatusCode::CONFLICT,
            AppError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (message, code) = match &self {
            AppError::BadRequest => ("Bad Request", None),
            AppError::Auth(e) => (e.description(), Some(e.code().as_str())),
            AppError::NotFound => ("resource not found", None),
            AppError::MethodNotAllowed => ("Method Not Allowed", None),
            AppError::RequestTimeout => ("Request Timeout", None),
            AppError::PayloadTooLarge => ("Payload Too Large", None),
            AppError::UnsupportedMediaType => ("Unsupported Media Type", None),
            AppError::Conflict => ("conflict", None),
            AppError::Unprocessable(reason) => {
                tracing::debug!(%reason, "unprocessable request");
                ("unprocessable", None)
            }
            AppError::Internal => ("Internal Server Error", None),
        };

        let body = ErrorResponse {
            success: false,
            error: status.as_u16(),
            message: message.to_string(),
            code,
        };

        (status, Json(body)).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::Conflict => AppError::Conflict,
            RepoError::Db(_) | RepoError::Decode(_) => {
                tracing::error!(error = ?e, "drink repository failure");
                AppError::Internal
            }
        }
    }
}
