use crate::services::auth::{AuthError, Claims};

/// Confirm that `claims` grants `capability` (exact string match).
///
/// - no `permissions` claim: 400 `invalid_claims` (malformed token for this API)
/// - claim present but capability absent: 403 `unauthorized`
pub fn check_permissions(claims: &Claims, capability: &str) -> Result<(), AuthError> {
    if claims.permissions.is_none() {
        return Err(AuthError::permissions_missing());
    }
    if !claims.has_permission(capability) {
        return Err(AuthError::permission_denied());
    }
    Ok(())
}
