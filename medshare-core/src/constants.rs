//! Service constants for MedShare.

// ═══════════════════════════════════════════════════════════════════════════════
// ENDPOINTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Default Pinata REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.pinata.cloud";

/// Default public gateway base URL. CIDs are appended as a path segment.
pub const DEFAULT_GATEWAY_URL: &str = "https://gateway.pinata.cloud/ipfs";

/// Path for JSON uploads.
pub const PIN_JSON_PATH: &str = "/pinning/pinJSONToIPFS";

/// Path for multipart file uploads.
pub const PIN_FILE_PATH: &str = "/pinning/pinFileToIPFS";

/// Path for the pin job query (`?ipfs_pin_hash=<cid>`).
pub const PIN_JOBS_PATH: &str = "/pinning/pinJobs";

/// Path prefix for unpin requests (`/<cid>` appended).
pub const UNPIN_PATH: &str = "/pinning/unpin";

/// Path for the pin list (`?hashContains=<cid>` optional).
pub const PIN_LIST_PATH: &str = "/pinning/pinList";

// ═══════════════════════════════════════════════════════════════════════════════
// UPLOAD OPTIONS
// ═══════════════════════════════════════════════════════════════════════════════

/// CID version requested for every upload.
pub const CID_VERSION: u8 = 1;

/// Fallback MIME type for file uploads.
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// Alternate gateway formats tried, in order, once the pin is confirmed.
pub const GATEWAY_FALLBACK_FORMATS: [&str; 2] = ["dag-json", "raw"];

// ═══════════════════════════════════════════════════════════════════════════════
// AUTH HEADERS
// ═══════════════════════════════════════════════════════════════════════════════

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "pinata_api_key";

/// Header carrying the API secret.
pub const API_SECRET_HEADER: &str = "pinata_secret_api_key";

// ═══════════════════════════════════════════════════════════════════════════════
// ENVIRONMENT
// ═══════════════════════════════════════════════════════════════════════════════

/// Environment variable holding the API key.
pub const ENV_API_KEY: &str = "PINATA_API_KEY";

/// Environment variable holding the API secret.
pub const ENV_API_SECRET: &str = "PINATA_SECRET_API_KEY";

/// Environment variable holding the bearer token (JWT).
pub const ENV_JWT: &str = "PINATA_JWT";

/// Environment variable overriding the gateway base URL.
pub const ENV_GATEWAY_URL: &str = "PINATA_GATEWAY_URL";

/// Environment variable overriding the API base URL.
pub const ENV_API_URL: &str = "PINATA_API_URL";

/// Environment variable overriding the request timeout (seconds).
pub const ENV_TIMEOUT_SECONDS: &str = "PINATA_TIMEOUT_SECONDS";

// ═══════════════════════════════════════════════════════════════════════════════
// TUNING
// ═══════════════════════════════════════════════════════════════════════════════

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Default number of in-flight stats lookups for access-log batches.
pub const DEFAULT_ACCESS_LOG_CONCURRENCY: usize = 4;

/// Milliseconds in one day, the unit of the access-count estimate.
pub const MILLIS_PER_DAY: i64 = 1000 * 60 * 60 * 24;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_format_order() {
        assert_eq!(GATEWAY_FALLBACK_FORMATS, ["dag-json", "raw"]);
    }

    #[test]
    fn test_paths_are_absolute() {
        for path in [PIN_JSON_PATH, PIN_FILE_PATH, PIN_JOBS_PATH, UNPIN_PATH, PIN_LIST_PATH] {
            assert!(path.starts_with('/'));
            assert!(!path.ends_with('/'));
        }
    }
}
