//! Content identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MedshareError, Result};

/// Opaque content identifier.
///
/// Equality is plain string comparison; the value is never mutated after
/// construction.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cid(String);

impl Cid {
    /// Wraps a string without validating it.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the identifier, returning the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Checks that the identifier is safe to place in a URL path or query.
    ///
    /// Both CIDv0 (`Qm...`, base58) and CIDv1 (`bafy...`, base32) consist of
    /// ASCII alphanumerics only.
    pub fn validate(&self) -> Result<()> {
        if self.0.is_empty() {
            return Err(MedshareError::InvalidCid("CID cannot be empty".into()));
        }

        if !self.0.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(MedshareError::InvalidCid(format!(
                "CID contains invalid characters: {}",
                self.0
            )));
        }

        Ok(())
    }
}

impl fmt::Display for Cid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Cid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for Cid {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Cid {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl FromStr for Cid {
    type Err = MedshareError;

    fn from_str(s: &str) -> Result<Self> {
        let cid = Self::new(s.trim());
        cid.validate()?;
        Ok(cid)
    }
}
