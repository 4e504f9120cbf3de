use serde::{Deserialize, Serialize};

/// Verified access-token claims handed to protected handlers.
///
/// NOTE:
/// - `aud` may be a string or an array; jsonwebtoken checks it against the
///   configured audience, so it is kept as a raw `Value` here.
/// - `permissions` stays optional so the permission checker can tell a token
///   without the claim apart from one that lacks a capability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    // Registered claims default when absent so that jsonwebtoken reports them
    // as missing required claims rather than as an unreadable payload.
    #[serde(default)]
    pub iss: String,
    #[serde(default)]
    pub sub: String,
    #[serde(default)]
    pub aud: serde_json::Value,
    #[serde(default)]
    pub exp: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,

    // Provider-specific claims (azp, scope, ...) are carried through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Claims {
    pub fn has_permission(&self, capability: &str) -> bool {
        self.permissions
            .as_deref()
            .is_some_and(|granted| granted.iter().any(|p| p == capability))
    }
}
