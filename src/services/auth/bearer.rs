//! `Authorization: Bearer <token>` header parsing.

use axum::http::{HeaderMap, header};

use crate::services::auth::AuthError;

const SCHEME: &str = "bearer";

/// Extract the raw credential from the `Authorization` header.
///
/// The scheme is matched case-insensitively and parts are split on
/// whitespace; exactly two parts are accepted.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(AuthError::header_missing)?;

    let value = value
        .to_str()
        .map_err(|_| AuthError::invalid_header("Authorization header must be bearer token."))?;

    let parts: Vec<&str> = value.split_whitespace().collect();
    match parts.as_slice() {
        [] => Err(AuthError::invalid_header("Token not found.")),
        [scheme, ..] if !scheme.eq_ignore_ascii_case(SCHEME) => Err(AuthError::invalid_header(
            "Authorization header must start with \"Bearer\".",
        )),
        [_] => Err(AuthError::invalid_header("Token not found.")),
        [_, token] => Ok(*token),
        _ => Err(AuthError::invalid_header(
            "Authorization header must be bearer token.",
        )),
    }
}
