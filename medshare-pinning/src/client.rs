//! Pinata client implementation.
//!
//! Uploads and pin management go through the REST API with either auth form.
//! Retrieval uses the gateway first and only touches the API when the
//! gateway fails.

use async_trait::async_trait;
use chrono::Utc;
use futures::stream::{self, StreamExt};
use reqwest::header::CONTENT_TYPE;
use reqwest::{RequestBuilder, Response};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use medshare_core::constants::*;
use medshare_core::error::{MedshareError, Result};
use medshare_core::traits::ContentStore;
use medshare_core::types::{Cid, CidStats, Content, Credentials, FileUpload, PinJobs, PinList};

use crate::config::PinataConfig;

/// Pinata client for upload, retrieval, and pin management.
pub struct PinataClient {
    config: PinataConfig,
    http_client: reqwest::Client,
}

impl PinataClient {
    /// Creates a client from environment configuration.
    pub fn from_env() -> Result<Self> {
        Self::with_config(PinataConfig::from_env()?)
    }

    /// Creates a client with the given config.
    pub fn with_config(config: PinataConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| MedshareError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        debug!(
            configured = config.is_configured(),
            auth = config.credentials.as_ref().map(Credentials::kind).unwrap_or("none"),
            gateway = %config.gateway_url,
            "Created Pinata client"
        );

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &PinataConfig {
        &self.config
    }

    fn credentials(&self) -> Result<&Credentials> {
        self.config
            .credentials
            .as_ref()
            .ok_or_else(MedshareError::not_configured)
    }

    fn api_endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.api_url.trim_end_matches('/'), path)
    }

    fn authorized(&self, request: RequestBuilder, credentials: &Credentials) -> RequestBuilder {
        credentials
            .headers()
            .into_iter()
            .fold(request, |request, (name, value)| request.header(name, value))
    }

    /// Queries pin status, propagating failures.
    ///
    /// [`ContentStore::is_pinned`] is the non-failing form of this call.
    #[instrument(skip(self))]
    pub async fn check_pinned(&self, cid: &Cid) -> Result<bool> {
        let credentials = self.credentials()?;
        cid.validate()?;

        let jobs = self.pin_jobs(cid, credentials).await?;
        Ok(jobs.is_known())
    }

    /// Requests removal of a pin, propagating failures.
    ///
    /// [`ContentStore::unpin`] is the non-failing form of this call.
    #[instrument(skip(self))]
    pub async fn try_unpin(&self, cid: &Cid) -> Result<()> {
        let credentials = self.credentials()?;
        cid.validate()?;

        let request = self
            .http_client
            .delete(self.api_endpoint(&format!("{}/{}", UNPIN_PATH, cid)));

        let response = self
            .authorized(request, credentials)
            .send()
            .await
            .map_err(|e| MedshareError::HttpError(e.to_string()))?;

        ensure_success(response, MedshareError::HttpError).await?;

        debug!(%cid, "Unpinned");
        Ok(())
    }

    /// Looks up pin metadata for one CID, propagating failures.
    ///
    /// [`ContentStore::cid_stats`] is the non-failing form of this call.
    #[instrument(skip(self))]
    pub async fn try_cid_stats(&self, cid: &Cid) -> Result<CidStats> {
        self.credentials()?;

        let list = self.pin_list(Some(cid)).await?;
        let record = list
            .find(cid)
            .ok_or_else(|| MedshareError::PinNotFound(cid.to_string()))?;

        Ok(CidStats::from_record(record, Utc::now()))
    }

    async fn pin_jobs(&self, cid: &Cid, credentials: &Credentials) -> Result<PinJobs> {
        let request = self
            .http_client
            .get(self.api_endpoint(PIN_JOBS_PATH))
            .query(&[("ipfs_pin_hash", cid.as_str())]);

        let response = self
            .authorized(request, credentials)
            .send()
            .await
            .map_err(|e| MedshareError::HttpError(e.to_string()))?;

        ensure_success(response, MedshareError::HttpError)
            .await?
            .json()
            .await
            .map_err(|e| MedshareError::HttpError(e.to_string()))
    }

    async fn fetch_gateway(&self, cid: &Cid, format: Option<&str>) -> Result<Content> {
        let mut request = self.http_client.get(self.gateway_url(cid));
        if let Some(format) = format {
            request = request.query(&[("format", format)]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| MedshareError::HttpError(e.to_string()))?;
        let response = ensure_success(response, MedshareError::HttpError).await?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let data = response
            .bytes()
            .await
            .map_err(|e| MedshareError::HttpError(e.to_string()))?;

        Ok(Content::from_body(content_type, data))
    }

    /// Second and third retrieval tiers: confirm the pin, then retry the
    /// gateway in each alternate format.
    async fn retrieve_confirmed(&self, cid: &Cid) -> Result<Content> {
        let credentials = self.credentials()?;

        if !self.pin_jobs(cid, credentials).await?.is_known() {
            return Err(MedshareError::ContentNotFound {
                cid: cid.to_string(),
                reason: "not found in pinning service".into(),
            });
        }

        let mut last_error = None;
        for format in GATEWAY_FALLBACK_FORMATS {
            match self.fetch_gateway(cid, Some(format)).await {
                Ok(content) => {
                    debug!(%cid, format, "Retrieved with alternate format");
                    return Ok(content);
                }
                Err(e) => {
                    warn!(%cid, format, error = %e, "Alternate format fetch failed");
                    last_error = Some(e);
                }
            }
        }

        Err(MedshareError::ContentNotFound {
            cid: cid.to_string(),
            reason: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "no alternate formats left".into()),
        })
    }
}

#[async_trait]
impl ContentStore for PinataClient {
    fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    #[instrument(skip(self, data))]
    async fn upload_json(&self, data: &serde_json::Value, name: Option<&str>) -> Result<Cid> {
        let credentials = self.credentials()?;

        let timestamp = Utc::now().timestamp_millis();
        let name = name
            .map(str::to_string)
            .unwrap_or_else(|| format!("Upload-{}", timestamp));

        let body = serde_json::json!({
            "pinataOptions": { "cidVersion": CID_VERSION },
            "pinataMetadata": {
                "name": name,
                "keyvalues": {
                    "timestamp": timestamp.to_string(),
                    "type": "json"
                }
            },
            "pinataContent": data
        });

        let request = self.http_client.post(self.api_endpoint(PIN_JSON_PATH));
        let response = self
            .authorized(request, credentials)
            .json(&body)
            .send()
            .await
            .map_err(|e| MedshareError::UploadFailed(e.to_string()))?;

        let pinned: PinResponse = ensure_success(response, MedshareError::UploadFailed)
            .await?
            .json()
            .await
            .map_err(|e| MedshareError::UploadFailed(e.to_string()))?;

        debug!(cid = %pinned.ipfs_hash, size = pinned.pin_size, "Uploaded JSON");
        Ok(pinned.ipfs_hash)
    }

    #[instrument(skip(self, file), fields(file_name = %file.file_name, size = file.size()))]
    async fn upload_file(&self, file: FileUpload, name: Option<&str>) -> Result<Cid> {
        let credentials = self.credentials()?;

        let timestamp = Utc::now().timestamp_millis();
        let metadata = serde_json::json!({
            "name": name.unwrap_or(&file.file_name),
            "keyvalues": {
                "timestamp": timestamp.to_string(),
                "type": file.content_type,
                "size": file.size().to_string()
            }
        });
        let options = serde_json::json!({ "cidVersion": CID_VERSION });

        let file_part = reqwest::multipart::Part::bytes(file.data.to_vec())
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)
            .map_err(|e| MedshareError::UploadFailed(e.to_string()))?;

        // reqwest writes the multipart boundary into the Content-Type header
        let form = reqwest::multipart::Form::new()
            .part("file", file_part)
            .text("pinataMetadata", metadata.to_string())
            .text("pinataOptions", options.to_string());

        let request = self.http_client.post(self.api_endpoint(PIN_FILE_PATH));
        let response = self
            .authorized(request, credentials)
            .multipart(form)
            .send()
            .await
            .map_err(|e| MedshareError::UploadFailed(e.to_string()))?;

        let pinned: PinResponse = ensure_success(response, MedshareError::UploadFailed)
            .await?
            .json()
            .await
            .map_err(|e| MedshareError::UploadFailed(e.to_string()))?;

        debug!(cid = %pinned.ipfs_hash, size = pinned.pin_size, "Uploaded file");
        Ok(pinned.ipfs_hash)
    }

    #[instrument(skip(self))]
    async fn get_content(&self, cid: &Cid) -> Result<Content> {
        cid.validate()?;

        match self.fetch_gateway(cid, None).await {
            Ok(content) => {
                debug!(%cid, "Retrieved from gateway");
                return Ok(content);
            }
            Err(e) => warn!(%cid, error = %e, "Gateway fetch failed, checking pinning API"),
        }

        self.retrieve_confirmed(cid).await.map_err(|e| match e {
            MedshareError::ContentNotFound { .. } => e,
            other => MedshareError::ContentNotFound {
                cid: cid.to_string(),
                reason: other.to_string(),
            },
        })
    }

    async fn is_pinned(&self, cid: &Cid) -> bool {
        match self.check_pinned(cid).await {
            Ok(pinned) => pinned,
            Err(e) => {
                warn!(%cid, error = %e, "Pin status unknown, reporting not pinned");
                false
            }
        }
    }

    async fn unpin(&self, cid: &Cid) -> bool {
        match self.try_unpin(cid).await {
            Ok(()) => true,
            Err(e) => {
                warn!(%cid, error = %e, "Failed to unpin");
                false
            }
        }
    }

    fn gateway_url(&self, cid: &Cid) -> String {
        format!("{}/{}", self.config.gateway_url.trim_end_matches('/'), cid)
    }

    #[instrument(skip(self))]
    async fn pin_list(&self, cid: Option<&Cid>) -> Result<PinList> {
        let credentials = self.credentials()?;

        let mut request = self.http_client.get(self.api_endpoint(PIN_LIST_PATH));
        if let Some(cid) = cid {
            cid.validate()?;
            request = request.query(&[("hashContains", cid.as_str())]);
        }

        let response = self
            .authorized(request, credentials)
            .send()
            .await
            .map_err(|e| MedshareError::HttpError(format!("Failed to get pin list: {}", e)))?;

        let list: PinList = ensure_success(response, MedshareError::HttpError)
            .await?
            .json()
            .await
            .map_err(|e| MedshareError::HttpError(format!("Failed to get pin list: {}", e)))?;

        debug!(count = list.count, rows = list.rows.len(), "Fetched pin list");
        Ok(list)
    }

    async fn cid_stats(&self, cid: &Cid) -> CidStats {
        match self.try_cid_stats(cid).await {
            Ok(stats) => stats,
            Err(e) => {
                warn!(%cid, error = %e, "CID stats unavailable");
                CidStats::unavailable(cid.clone(), e.to_string())
            }
        }
    }

    #[instrument(skip(self), fields(count = cids.len()))]
    async fn access_logs(&self, cids: &[Cid]) -> Vec<CidStats> {
        // `buffered` yields in input order regardless of completion order
        let futures: Vec<_> = cids.iter().map(|cid| self.cid_stats(cid)).collect();
        stream::iter(futures)
            .buffered(self.config.access_log_concurrency.max(1))
            .collect()
            .await
    }
}

/// Passes successful responses through; turns any other status into `wrap`'s error.
async fn ensure_success(response: Response, wrap: fn(String) -> MedshareError) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    Err(wrap(format!("status {}: {}", status, text)))
}

/// Pinning API upload response.
#[derive(Debug, Deserialize)]
struct PinResponse {
    #[serde(rename = "IpfsHash")]
    ipfs_hash: Cid,
    #[serde(rename = "PinSize", default)]
    pin_size: u64,
}
