//! Common traits for MedShare.
//!
//! The storage interface lives here so the HTTP API and CLI can run against
//! any implementation, including in-process fakes in tests.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Cid, CidStats, Content, FileUpload, PinList};

// ═══════════════════════════════════════════════════════════════════════════════
// CONTENT STORE TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Interface to a remote content-addressed store with pinning.
///
/// Operations that need credentials fail with
/// [`MedshareError::ConfigError`](crate::MedshareError::ConfigError) before
/// any network call when none are configured.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// True when a complete credential form is present.
    fn is_configured(&self) -> bool;

    /// Uploads a JSON document and returns its CID.
    ///
    /// `name` defaults to a timestamp-derived value.
    async fn upload_json(&self, data: &serde_json::Value, name: Option<&str>) -> Result<Cid>;

    /// Uploads a file and returns its CID.
    ///
    /// `name` defaults to the file name.
    async fn upload_file(&self, file: FileUpload, name: Option<&str>) -> Result<Cid>;

    /// Retrieves content by CID.
    ///
    /// # Flow
    /// 1. Fetch from the gateway
    /// 2. On failure, confirm the CID with the pinning API
    /// 3. If confirmed, retry the gateway as `dag-json`, then as `raw`
    async fn get_content(&self, cid: &Cid) -> Result<Content>;

    /// Whether the CID is pinned. Any failure reads as `false`.
    async fn is_pinned(&self, cid: &Cid) -> bool;

    /// Requests removal of a pin. Returns `false` on any failure.
    async fn unpin(&self, cid: &Cid) -> bool;

    /// Public gateway URL for a CID. No I/O.
    fn gateway_url(&self, cid: &Cid) -> String;

    /// Lists pins, optionally filtered to CIDs containing `cid`.
    async fn pin_list(&self, cid: Option<&Cid>) -> Result<PinList>;

    /// Pin metadata and estimated access count. Never fails: errors become a
    /// zero-valued record with `error` set.
    async fn cid_stats(&self, cid: &Cid) -> CidStats;

    /// Stats for each CID, in input order. One failing entry never aborts
    /// the batch.
    async fn access_logs(&self, cids: &[Cid]) -> Vec<CidStats>;
}
