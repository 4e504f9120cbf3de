//! Signing-key lookup by `kid`.
//!
//! `JwksKeySource` fetches the authority's published key set and keeps it for
//! a TTL; an unknown `kid` forces a refetch so rotated keys are picked up, at
//! most once per `refetch_cooldown`. Fetches are serialized by the cache lock.
//! `StaticKeySource` serves a key set loaded once (local JWKS file, tests).

use async_trait::async_trait;
use jsonwebtoken::jwk::{Jwk, JwkSet};
use std::collections::HashMap;
use std::path::Path;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::RwLock;
use url::Url;

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);
const REFETCH_COOLDOWN: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum KeySourceError {
    #[error("jwks request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("jwks endpoint returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("jwks file could not be read: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid jwks document: {0}")]
    Parse(#[from] serde_json::Error),
}

#[async_trait]
pub trait KeySource: Send + Sync {
    /// Backend name (for logging).
    fn name(&self) -> &'static str;

    /// `Ok(None)` means the key set was read but has no key with this `kid`.
    async fn find(&self, kid: &str) -> Result<Option<Jwk>, KeySourceError>;
}

fn index_by_kid(set: JwkSet) -> HashMap<String, Jwk> {
    set.keys
        .into_iter()
        .filter_map(|jwk| jwk.common.key_id.clone().map(|kid| (kid, jwk)))
        .collect()
}

#[derive(Debug, Clone)]
pub struct StaticKeySource {
    keys: HashMap<String, Jwk>,
}

impl StaticKeySource {
    pub fn new(set: JwkSet) -> Self {
        Self {
            keys: index_by_kid(set),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, KeySourceError> {
        let set: JwkSet = serde_json::from_str(json)?;
        Ok(Self::new(set))
    }

    pub async fn from_file(path: &Path) -> Result<Self, KeySourceError> {
        let json = tokio::fs::read_to_string(path).await?;
        Self::from_json(&json)
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[async_trait]
impl KeySource for StaticKeySource {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn find(&self, kid: &str) -> Result<Option<Jwk>, KeySourceError> {
        Ok(self.keys.get(kid).cloned())
    }
}

struct CachedKeys {
    keys: HashMap<String, Jwk>,
    fetched_at: Instant,
}

/// Remote JWKS with a time-bounded in-process cache.
pub struct JwksKeySource {
    client: reqwest::Client,
    url: Url,
    ttl: Duration,
    refetch_cooldown: Duration,
    cache: RwLock<Option<CachedKeys>>,
}

impl std::fmt::Debug for JwksKeySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwksKeySource")
            .field("url", &self.url.as_str())
            .field("ttl", &self.ttl)
            .field("refetch_cooldown", &self.refetch_cooldown)
            .finish()
    }
}

impl JwksKeySource {
    pub fn new(url: Url, ttl: Duration) -> Result<Self, KeySourceError> {
        let client = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
        Ok(Self {
            client,
            url,
            ttl,
            refetch_cooldown: REFETCH_COOLDOWN,
            cache: RwLock::new(None),
        })
    }

    /// Minimum age of a fresh key set before an unknown `kid` may refetch it.
    pub fn with_refetch_cooldown(mut self, cooldown: Duration) -> Self {
        self.refetch_cooldown = cooldown;
        self
    }

    async fn fetch(&self) -> Result<HashMap<String, Jwk>, KeySourceError> {
        tracing::info!(url = %self.url, "fetching jwks");

        let response = self.client.get(self.url.clone()).send().await?;
        if !response.status().is_success() {
            return Err(KeySourceError::Status(response.status()));
        }

        let set: JwkSet = response.json().await?;
        tracing::debug!(keys = set.keys.len(), "fetched jwks");
        Ok(index_by_kid(set))
    }
}

#[async_trait]
impl KeySource for JwksKeySource {
    fn name(&self) -> &'static str {
        "jwks"
    }

    async fn find(&self, kid: &str) -> Result<Option<Jwk>, KeySourceError> {
        // Fast path: fresh cache that knows this kid
        {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.as_ref()
                && cached.fetched_at.elapsed() < self.ttl
                && let Some(jwk) = cached.keys.get(kid)
            {
                return Ok(Some(jwk.clone()));
            }
        }

        // Expired, empty, or unknown kid (possible rotation). The write lock is
        // held across the fetch; concurrent misses re-check after it.
        let mut cache = self.cache.write().await;
        if let Some(cached) = cache.as_ref()
            && cached.fetched_at.elapsed() < self.ttl
        {
            if let Some(jwk) = cached.keys.get(kid) {
                return Ok(Some(jwk.clone()));
            }
            if cached.fetched_at.elapsed() < self.refetch_cooldown {
                tracing::debug!(kid, "unknown kid within refetch cooldown");
                return Ok(None);
            }
        }

        let keys = self.fetch().await?;
        let found = keys.get(kid).cloned();

        *cache = Some(CachedKeys {
            keys,
            fetched_at: Instant::now(),
        });

        Ok(found)
    }
}
