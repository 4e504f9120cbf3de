//! Composition of the three authorization steps.

use axum::http::HeaderMap;

use crate::services::auth::{AuthError, AuthService, Claims, bearer, permissions};

/// Decode the bearer credential, verify it, then require `capability`.
///
/// Short-circuits on the first failing step and returns its error untouched.
pub async fn authorize(
    auth: &AuthService,
    headers: &HeaderMap,
    capability: &str,
) -> Result<Claims, AuthError> {
    let token = bearer::bearer_token(headers)?;
    let claims = auth.verify(token).await?;
    permissions::check_permissions(&claims, capability)?;
    Ok(claims)
}
