//! Error types for MedShare.
//!
//! Three failure classes matter to callers: missing credentials (local, never
//! retried), transport failures (the remote call failed), and content that no
//! retrieval tier could produce.

use thiserror::Error;

/// Result type alias using `MedshareError`.
pub type Result<T> = std::result::Result<T, MedshareError>;

/// Main error type for all MedShare storage operations.
#[derive(Debug, Error)]
pub enum MedshareError {
    // ═══════════════════════════════════════════════════════════════════════════
    // CONFIGURATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Credentials or settings are missing or malformed.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // STORAGE ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Upload to the pinning service failed.
    #[error("Failed to upload to pinning service: {0}")]
    UploadFailed(String),

    /// Every retrieval tier failed for this CID.
    #[error("Failed to retrieve content for CID '{cid}': {reason}")]
    ContentNotFound { cid: String, reason: String },

    /// The pin list has no record for this CID.
    #[error("CID {0} not found in pinning service")]
    PinNotFound(String),

    /// Invalid CID format.
    #[error("Invalid CID: {0}")]
    InvalidCid(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // NETWORK ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// HTTP request failed, or the service answered with a non-success status.
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // SERIALIZATION / IO ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// File I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    // ═══════════════════════════════════════════════════════════════════════════
    // INTERNAL ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Internal invariant violation (should never happen).
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl MedshareError {
    /// Shorthand for the error raised when no credential form is configured.
    pub fn not_configured() -> Self {
        MedshareError::ConfigError("Pinata credentials not configured".into())
    }

    /// Returns true if this error is worth retrying.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            MedshareError::HttpError(_)
                | MedshareError::UploadFailed(_)
                | MedshareError::ContentNotFound { .. }
        )
    }

    /// Returns true if this error was raised locally for missing configuration.
    pub fn is_config_error(&self) -> bool {
        matches!(self, MedshareError::ConfigError(_))
    }

    /// Returns true if the requested content or pin does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            MedshareError::ContentNotFound { .. } | MedshareError::PinNotFound(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MedshareError::ContentNotFound {
            cid: "bafkabc".into(),
            reason: "all gateways failed".into(),
        };
        assert!(err.to_string().contains("bafkabc"));
        assert!(err.to_string().contains("all gateways failed"));
    }

    #[test]
    fn test_error_classification() {
        assert!(MedshareError::HttpError("timeout".into()).is_recoverable());
        assert!(!MedshareError::not_configured().is_recoverable());
        assert!(MedshareError::not_configured().is_config_error());
        assert!(!MedshareError::HttpError("x".into()).is_config_error());

        assert!(MedshareError::PinNotFound("Qm1".into()).is_not_found());
        assert!(!MedshareError::InvalidCid("".into()).is_not_found());
    }

    #[test]
    fn test_json_error_conversion() {
        let json_result: std::result::Result<serde_json::Value, _> = serde_json::from_str("invalid");
        let result: Result<serde_json::Value> = json_result.map_err(MedshareError::from);
        assert!(matches!(result, Err(MedshareError::JsonError(_))));
    }
}
