//! Authorization failures raised by the bearer decoder, the verifier and the
//! permission checker.
//!
//! An `AuthError` is built where a step fails and travels unchanged to the HTTP
//! boundary (`crate::error::AppError::Auth`), which renders `status`, `code`
//! and `description`. The underlying cause is logged, never returned.

use axum::http::StatusCode;
use std::fmt;
use thiserror::Error;

/// Machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorCode {
    AuthorizationHeaderMissing,
    InvalidHeader,
    TokenExpired,
    InvalidClaims,
    Unauthorized,
}

impl AuthErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AuthorizationHeaderMissing => "authorization_header_missing",
            Self::InvalidHeader => "invalid_header",
            Self::TokenExpired => "token_expired",
            Self::InvalidClaims => "invalid_claims",
            Self::Unauthorized => "unauthorized",
        }
    }
}

impl fmt::Display for AuthErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {description}")]
pub struct AuthError {
    status: StatusCode,
    code: AuthErrorCode,
    description: &'static str,
}

impl AuthError {
    fn new(status: StatusCode, code: AuthErrorCode, description: &'static str) -> Self {
        Self {
            status,
            code,
            description,
        }
    }

    pub fn header_missing() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            AuthErrorCode::AuthorizationHeaderMissing,
            "Authorization header is expected.",
        )
    }

    pub fn invalid_header(description: &'static str) -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            AuthErrorCode::InvalidHeader,
            description,
        )
    }

    pub fn token_expired() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            AuthErrorCode::TokenExpired,
            "Token expired.",
        )
    }

    pub fn invalid_claims() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            AuthErrorCode::InvalidClaims,
            "Incorrect claims. Please, check the audience and issuer.",
        )
    }

    /// Token verified but carries no `permissions` claim at all.
    pub fn permissions_missing() -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            AuthErrorCode::InvalidClaims,
            "Permissions not included in JWT.",
        )
    }

    pub fn permission_denied() -> Self {
        Self::new(
            StatusCode::FORBIDDEN,
            AuthErrorCode::Unauthorized,
            "Permission not found.",
        )
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> AuthErrorCode {
        self.code
    }

    pub fn description(&self) -> &'static str {
        self.description
    }
}
