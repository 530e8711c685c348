//! Pinning service credentials.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::constants::{API_KEY_HEADER, API_SECRET_HEADER};

/// A credential string, cleared from memory on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Secret(String);

impl Secret {
    /// Wraps a secret value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Exposes the secret for placing it in a request header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never expose credential content
        write!(f, "Secret([REDACTED])")
    }
}

/// Credentials for the pinning API.
///
/// Exactly one complete form is held, so a client either has usable
/// credentials or has none at all (`Option<Credentials>`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Credentials {
    /// API key + secret, sent as two custom headers.
    ApiKey {
        /// Public API key
        key: Secret,
        /// API secret
        secret: Secret,
    },
    /// JWT sent as `Authorization: Bearer <token>`.
    Bearer(Secret),
}

impl Credentials {
    /// Creates key-pair credentials.
    pub fn api_key(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Credentials::ApiKey {
            key: Secret::new(key),
            secret: Secret::new(secret),
        }
    }

    /// Creates bearer-token credentials.
    pub fn bearer(token: impl Into<String>) -> Self {
        Credentials::Bearer(Secret::new(token))
    }

    /// Assembles credentials from the three optional configuration values.
    ///
    /// Returns `Some` iff the token is present, or both key and secret are.
    /// Empty strings count as absent. The token wins when both forms are
    /// complete.
    pub fn from_parts(
        key: Option<String>,
        secret: Option<String>,
        token: Option<String>,
    ) -> Option<Self> {
        let present = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

        if let Some(token) = present(token) {
            return Some(Self::bearer(token));
        }

        match (present(key), present(secret)) {
            (Some(key), Some(secret)) => Some(Self::api_key(key, secret)),
            _ => None,
        }
    }

    /// Header name/value pairs authenticating a request.
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        match self {
            Credentials::ApiKey { key, secret } => vec![
                (API_KEY_HEADER, key.expose().to_string()),
                (API_SECRET_HEADER, secret.expose().to_string()),
            ],
            Credentials::Bearer(token) => {
                vec![("Authorization", format!("Bearer {}", token.expose()))]
            }
        }
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Credentials::ApiKey { .. } => "api-key",
            Credentials::Bearer(_) => "bearer",
        }
    }
}
