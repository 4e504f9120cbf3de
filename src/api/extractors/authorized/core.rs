/*
 * Responsibility
 * - Authorized<P>: the guard as an axum extractor
 * - runs bearer decode -> token verification -> permission check for P::NAME
 * - on failure rejects with AppError::Auth (status + code + description)
 *
 * Put it as the first handler argument so it runs before body/path extraction.
 */
use std::marker::PhantomData;

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;
use crate::services::auth::{Claims, guard};
use crate::state::AppState;

/// A capability string checked by exact match against the `permissions` claim.
pub trait Permission: Send + Sync + 'static {
    const NAME: &'static str;
}

/// Verified claims of a caller holding permission `P`.
pub struct Authorized<P> {
    pub claims: Claims,
    _marker: PhantomData<P>,
}

impl<P> Authorized<P> {
    fn new(claims: Claims) -> Self {
        Self {
            claims,
            _marker: PhantomData,
        }
    }
}

impl<P> FromRequestParts<AppState> for Authorized<P>
where
    P: Permission,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match guard::authorize(&state.auth, &parts.headers, P::NAME).await {
            Ok(claims) => Ok(Self::new(claims)),
            Err(err) => {
                tracing::warn!(
                    permission = P::NAME,
                    code = %err.code(),
                    status = err.status().as_u16(),
                    "request rejected by auth guard"
                );
                Err(err.into())
            }
        }
    }
}

impl<P: Permission> std::fmt::Debug for Authorized<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authorized")
            .field("permission", &P::NAME)
            .field("sub", &self.claims.sub)
            .finish()
    }
}
