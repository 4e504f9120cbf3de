use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use std::{error::Error as StdError, fmt, sync::Arc};

use crate::services::auth::keys::{KeySource, KeySourceError};
use crate::services::auth::{AuthError, Claims};

const UNPARSABLE: &str = "Unable to parse authentication token.";

// Internal verification failures. Only the `AuthError` derived from them
// leaves this module; the detail goes to the logs.
#[derive(Debug)]
pub enum AccessJwtError {
    Jwt(jsonwebtoken::errors::Error),
    MissingKid,
    DisallowedAlg(Algorithm),
    UnknownKid(String),
    KeySource(KeySourceError),
}

impl fmt::Display for AccessJwtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jwt(e) => write!(f, "jwt verification failed: {}", e),
            Self::MissingKid => write!(f, "missing 'kid' in token header"),
            Self::DisallowedAlg(alg) => write!(f, "algorithm {:?} is not allowed", alg),
            Self::UnknownKid(kid) => write!(f, "no signing key for kid '{}'", kid),
            Self::KeySource(e) => write!(f, "signing key lookup failed: {}", e),
        }
    }
}

impl StdError for AccessJwtError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Jwt(e) => Some(e),
            Self::KeySource(e) => Some(e),
            _ => None,
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AccessJwtError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        Self::Jwt(e)
    }
}

impl From<KeySourceError> for AccessJwtError {
    fn from(e: KeySourceError) -> Self {
        Self::KeySource(e)
    }
}

impl From<&AccessJwtError> for AuthError {
    fn from(e: &AccessJwtError) -> Self {
        match e {
            AccessJwtError::MissingKid => AuthError::invalid_header("Authorization malformed."),
            AccessJwtError::UnknownKid(_) => {
                AuthError::invalid_header("Unable to find the appropriate key.")
            }
            AccessJwtError::DisallowedAlg(_) | AccessJwtError::KeySource(_) => {
                AuthError::invalid_header(UNPARSABLE)
            }
            AccessJwtError::Jwt(e) => match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::token_expired(),
                ErrorKind::InvalidIssuer
                | ErrorKind::InvalidAudience
                | ErrorKind::MissingRequiredClaim(_) => AuthError::invalid_claims(),
                _ => AuthError::invalid_header(UNPARSABLE),
            },
        }
    }
}

/// Access-token verifier backed by the signing authority's key set.
///
/// - Signing keys are resolved per token through `KeySource` (matched by `kid`).
/// - Only the configured asymmetric algorithms are accepted.
/// - `exp`, `iss`, `aud` and `sub` are required; `iss`/`aud` must match.
#[derive(Clone)]
pub struct AuthService {
    keys: Arc<dyn KeySource>,
    issuer: String,
    audience: String,
    algorithms: Vec<Algorithm>,
    leeway_seconds: u64,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("keys", &self.keys.name())
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("algorithms", &self.algorithms)
            .field("leeway_seconds", &self.leeway_seconds)
            .finish()
    }
}

impl AuthService {
    pub fn new(
        keys: Arc<dyn KeySource>,
        issuer: &str,
        audience: &str,
        algorithms: Vec<Algorithm>,
        leeway_seconds: u64,
    ) -> Self {
        Self {
            keys,
            issuer: issuer.to_string(),
            audience: audience.to_string(),
            algorithms,
            leeway_seconds,
        }
    }

    fn validation(&self, alg: Algorithm) -> Validation {
        // Pinned to the header alg (already checked against the allow-list).
        let mut validation = Validation::new(alg);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
        validation.leeway = self.leeway_seconds;
        validation
    }

    /// Verify signature + header + registered claims and decode the payload.
    pub async fn verify_strict(&self, token: &str) -> Result<Claims, AccessJwtError> {
        let header = jsonwebtoken::decode_header(token)?;

        if !self.algorithms.contains(&header.alg) {
            return Err(AccessJwtError::DisallowedAlg(header.alg));
        }

        let kid = header.kid.ok_or(AccessJwtError::MissingKid)?;
        let jwk = self
            .keys
            .find(&kid)
            .await?
            .ok_or_else(|| AccessJwtError::UnknownKid(kid.clone()))?;

        let decoding_key = DecodingKey::from_jwk(&jwk)?;
        let data =
            jsonwebtoken::decode::<Claims>(token, &decoding_key, &self.validation(header.alg))?;

        Ok(data.claims)
    }

    /// Verify a bearer credential, mapping failures to the public `AuthError`.
    ///
    /// This is the entry-point used by the guard.
    pub async fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        self.verify_strict(token).await.map_err(|err| {
            tracing::warn!(error = %err, key_source = self.keys.name(), "access token verification failed");
            AuthError::from(&err)
        })
    }
}
