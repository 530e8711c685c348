//! Upload and retrieval payloads.

use bytes::Bytes;

use crate::constants::DEFAULT_MIME_TYPE;

/// Content fetched from a gateway.
///
/// Bodies that parse as JSON are returned structured, everything else raw.
/// Structured content keeps the body exactly as received.
#[derive(Clone, Debug, PartialEq)]
pub enum Content {
    /// Structured JSON document
    Json {
        /// Parsed document
        value: serde_json::Value,
        /// Body bytes as received
        raw: Bytes,
    },
    /// Opaque bytes with the gateway-reported content type
    Raw {
        /// `Content-Type` header, if the gateway sent one
        content_type: Option<String>,
        /// Body bytes
        data: Bytes,
    },
}

impl Content {
    /// Classifies a response body.
    pub fn from_body(content_type: Option<String>, data: Bytes) -> Self {
        match serde_json::from_slice(&data) {
            Ok(value) => Content::Json { value, raw: data },
            Err(_) => Content::Raw { content_type, data },
        }
    }

    /// Structured content with compact serialization as its body.
    pub fn json(value: serde_json::Value) -> Self {
        let raw = Bytes::from(value.to_string());
        Content::Json { value, raw }
    }

    /// Returns the JSON value, if this is structured content.
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Content::Json { value, .. } => Some(value),
            Content::Raw { .. } => None,
        }
    }

    /// The body bytes, unchanged from the gateway response.
    pub fn to_bytes(&self) -> Bytes {
        match self {
            Content::Json { raw, .. } => raw.clone(),
            Content::Raw { data, .. } => data.clone(),
        }
    }
}

/// A file to upload.
#[derive(Clone, Debug, PartialEq)]
pub struct FileUpload {
    /// File name reported to the service
    pub file_name: String,
    /// MIME type
    pub content_type: String,
    /// File contents
    pub data: Bytes,
}

impl FileUpload {
    /// Creates an upload with the given MIME type.
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    /// Creates an upload typed as `application/octet-stream`.
    pub fn binary(file_name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self::new(file_name, DEFAULT_MIME_TYPE, data)
    }

    /// Size in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }
}
