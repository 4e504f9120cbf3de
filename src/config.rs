/*
 * Responsibility
 * - read environment / .env (DATABASE_URL, CORS allowlist, auth settings, http limits)
 * - validate values (fail startup when something required is missing)
 */
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use jsonwebtoken::Algorithm;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Where verification keys come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JwksLocation {
    Remote(Url),
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    // None: in-memory store (local development / demos)
    pub database_url: Option<String>,
    pub db_reset_on_start: bool,

    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    pub auth_issuer: String,
    pub auth_audience: String,
    pub auth_jwks: JwksLocation,
    pub auth_algorithms: Vec<Algorithm>,
    pub access_token_leeway_seconds: u64,
    pub jwks_cache_ttl_seconds: u64,

    pub http_timeout_seconds: u64,
    pub http_body_limit_bytes: usize,
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

/// Unset (or blank) falls back to `default`; anything unparsable is an error.
fn parse_or<T: FromStr>(
    key: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(default),
        Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid(key)),
    }
}

fn positive<T: PartialEq + Default>(key: &'static str, value: T) -> Result<T, ConfigError> {
    if value == T::default() {
        return Err(ConfigError::Invalid(key));
    }
    Ok(value)
}

/// Comma-separated allow-list; only asymmetric algorithms are accepted.
pub fn parse_algorithms(value: &str) -> Result<Vec<Algorithm>, ConfigError> {
    let algorithms = value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| Algorithm::from_str(s).map_err(|_| ConfigError::Invalid("AUTH_ALGORITHMS")))
        .collect::<Result<Vec<_>, _>>()?;

    if algorithms.is_empty()
        || algorithms
            .iter()
            .any(|a| matches!(a, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512))
    {
        return Err(ConfigError::Invalid("AUTH_ALGORITHMS"));
    }

    Ok(algorithms)
}

/// `<issuer>/.well-known/jwks.json`, tolerating a trailing slash on the issuer.
pub fn default_jwks_url(issuer: &str) -> Result<Url, ConfigError> {
    let base = format!("{}/", issuer.trim_end_matches('/'));
    Url::parse(&base)
        .and_then(|u| u.join(".well-known/jwks.json"))
        .map_err(|_| ConfigError::Invalid("AUTH_ISSUER"))
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = parse_or("PORT", std::env::var("PORT").ok(), 3000)?;

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty());

        let db_reset_on_start = match std::env::var("DB_RESET_ON_START") {
            Ok(v) => parse_bool(&v).ok_or(ConfigError::Invalid("DB_RESET_ON_START"))?,
            Err(_) => false,
        };

        let app_env = AppEnv::from_env();

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let auth_issuer =
            std::env::var("AUTH_ISSUER").map_err(|_| ConfigError::Missing("AUTH_ISSUER"))?;

        let auth_audience =
            std::env::var("AUTH_AUDIENCE").map_err(|_| ConfigError::Missing("AUTH_AUDIENCE"))?;

        let auth_jwks = match (
            std::env::var("AUTH_JWKS_PATH").ok(),
            std::env::var("AUTH_JWKS_URL").ok(),
        ) {
            (Some(path), _) => JwksLocation::File(PathBuf::from(path)),
            (None, Some(url)) => JwksLocation::Remote(
                Url::parse(&url).map_err(|_| ConfigError::Invalid("AUTH_JWKS_URL"))?,
            ),
            (None, None) => JwksLocation::Remote(default_jwks_url(&auth_issuer)?),
        };

        let auth_algorithms =
            parse_algorithms(&std::env::var("AUTH_ALGORITHMS").unwrap_or_else(|_| "RS256".into()))?;

        let access_token_leeway_seconds = parse_or(
            "ACCESS_TOKEN_LEEWAY_SECONDS",
            std::env::var("ACCESS_TOKEN_LEEWAY_SECONDS").ok(),
            60,
        )?;

        let jwks_cache_ttl_seconds = parse_or(
            "JWKS_CACHE_TTL_SECONDS",
            std::env::var("JWKS_CACHE_TTL_SECONDS").ok(),
            600,
        )?;

        let http_timeout_seconds = positive(
            "HTTP_TIMEOUT_SECONDS",
            parse_or(
                "HTTP_TIMEOUT_SECONDS",
                std::env::var("HTTP_TIMEOUT_SECONDS").ok(),
                30,
            )?,
        )?;

        let http_body_limit_bytes = positive(
            "HTTP_BODY_LIMIT_BYTES",
            parse_or(
                "HTTP_BODY_LIMIT_BYTES",
                std::env::var("HTTP_BODY_LIMIT_BYTES").ok(),
                1024 * 1024,
            )?,
        )?;

        Ok(Self {
            addr,
            database_url,
            db_reset_on_start,
            app_env,
            cors_allowed_origins,
            auth_issuer,
            auth_audience,
            auth_jwks,
            auth_algorithms,
            access_token_leeway_seconds,
            jwks_cache_ttl_seconds,
            http_timeout_seconds,
            http_body_limit_bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jwks_url_is_derived_from_issuer() {
        let url = default_jwks_url("https://tenant.auth0.com/").unwrap();
        assert_eq!(url.as_str(), "https://tenant.auth0.com/.well-known/jwks.json");

        let url = default_jwks_url("https://idp.example.com/realms/cafe").unwrap();
        assert_eq!(
            url.as_str(),
            "https://idp.example.com/realms/cafe/.well-known/jwks.json"
        );
    }

    #[test]
    fn algorithms_are_parsed() {
        assert_eq!(
            parse_algorithms("RS256, EdDSA").unwrap(),
            vec![Algorithm::RS256, Algorithm::EdDSA]
        );
    }

    #[test]
    fn symmetric_or_unknown_algorithms_are_refused() {
        assert!(parse_algorithms("HS256").is_err());
        assert!(parse_algorithms("RS256,none").is_err());
        assert!(parse_algorithms(" , ").is_err());
    }

    #[test]
    fn numbers_fall_back_only_when_unset() {
        assert_eq!(parse_or::<u64>("HTTP_TIMEOUT_SECONDS", None, 30).unwrap(), 30);
        assert_eq!(
            parse_or::<u64>("HTTP_TIMEOUT_SECONDS", Some(" ".into()), 30).unwrap(),
            30
        );
        assert_eq!(
            parse_or::<u64>("HTTP_TIMEOUT_SECONDS", Some("45".into()), 30).unwrap(),
            45
        );
    }

    #[test]
    fn unparsable_numbers_are_invalid() {
        assert!(matches!(
            parse_or::<u64>("HTTP_TIMEOUT_SECONDS", Some("thirty".into()), 30),
            Err(ConfigError::Invalid("HTTP_TIMEOUT_SECONDS"))
        ));
        assert!(matches!(
            parse_or::<u64>("ACCESS_TOKEN_LEEWAY_SECONDS", Some("-5".into()), 60),
            Err(ConfigError::Invalid("ACCESS_TOKEN_LEEWAY_SECONDS"))
        ));
        assert!(matches!(
            parse_or::<u16>("PORT", Some("70000".into()), 3000),
            Err(ConfigError::Invalid("PORT"))
        ));
    }

    #[test]
    fn zero_timeout_is_invalid() {
        assert!(matches!(
            positive("HTTP_TIMEOUT_SECONDS", 0u64),
            Err(ConfigError::Invalid("HTTP_TIMEOUT_SECONDS"))
        ));
        assert_eq!(positive("HTTP_TIMEOUT_SECONDS", 30u64).unwrap(), 30);
    }

    #[test]
    fn bool_flags() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
