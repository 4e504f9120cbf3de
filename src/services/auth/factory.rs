/// Factory: build `AuthService` from application `Config`.
use std::sync::Arc;
use std::time::Duration;

use crate::config::{Config, JwksLocation};
use crate::services::auth::AuthService;
use crate::services::auth::keys::{JwksKeySource, KeySource, KeySourceError, StaticKeySource};

pub async fn build_auth_service(config: &Config) -> Result<Arc<AuthService>, KeySourceError> {
    let keys: Arc<dyn KeySource> = match &config.auth_jwks {
        JwksLocation::File(path) => {
            let source = StaticKeySource::from_file(path).await?;
            if source.is_empty() {
                tracing::warn!(path = %path.display(), "jwks file has no keys with a kid");
            }
            Arc::new(source)
        }
        JwksLocation::Remote(url) => Arc::new(JwksKeySource::new(
            url.clone(),
            Duration::from_secs(config.jwks_cache_ttl_seconds),
        )?),
    };

    tracing::info!(
        key_source = keys.name(),
        issuer = %config.auth_issuer,
        audience = %config.auth_audience,
        algorithms = ?config.auth_algorithms,
        "auth service configured"
    );

    Ok(Arc::new(AuthService::new(
        keys,
        &config.auth_issuer,
        &config.auth_audience,
        config.auth_algorithms.clone(),
        config.access_token_leeway_seconds,
    )))
}
