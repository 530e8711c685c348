//! Pin records as reported by the pinning service.
//!
//! These are read-only query results: the remote service owns every mutation.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::Cid;

/// Free-form annotations attached to a pin.
pub type KeyValues = BTreeMap<String, serde_json::Value>;

/// Name and annotations stored alongside a pin.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PinMetadata {
    /// Display name given at upload time
    #[serde(default)]
    pub name: Option<String>,
    /// Key/value annotations (the service sends `null` for none)
    #[serde(default, deserialize_with = "null_as_default")]
    pub keyvalues: KeyValues,
}

/// Replication state of a pin within one storage region.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinRegion {
    /// Region identifier (e.g. "FRA1")
    pub region_id: String,
    /// Replicas currently held
    #[serde(default)]
    pub current_replication_count: u32,
    /// Replicas requested
    #[serde(default)]
    pub desired_replication_count: u32,
}

/// One row of the pin list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PinRecord {
    /// Service-side pin identifier
    #[serde(default)]
    pub id: Option<String>,
    /// Content identifier of the pinned object
    pub ipfs_pin_hash: Cid,
    /// Size in bytes
    #[serde(default)]
    pub size: u64,
    /// Owning account
    #[serde(default)]
    pub user_id: Option<String>,
    /// When the content was pinned
    #[serde(default)]
    pub date_pinned: Option<DateTime<Utc>>,
    /// When the content was unpinned, if it was
    #[serde(default)]
    pub date_unpinned: Option<DateTime<Utc>>,
    /// Name and annotations
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: PinMetadata,
    /// Storage regions holding the content
    #[serde(default, deserialize_with = "null_as_default")]
    pub regions: Vec<PinRegion>,
    /// Pin status (pinned/queued/failed...), when the service reports one
    #[serde(default)]
    pub status: Option<String>,
}

impl PinRecord {
    /// Display name, or "Unknown" when the pin was stored without one.
    pub fn display_name(&self) -> &str {
        self.metadata.name.as_deref().unwrap_or("Unknown")
    }
}

/// Response of the pin list endpoint.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PinList {
    /// Total matching pins on the service
    #[serde(default)]
    pub count: u64,
    /// Returned rows
    #[serde(default, deserialize_with = "null_as_default")]
    pub rows: Vec<PinRecord>,
}

impl PinList {
    /// Finds the row whose CID matches exactly.
    ///
    /// The list filter is a substring match, so rows for other CIDs may be
    /// present.
    pub fn find(&self, cid: &Cid) -> Option<&PinRecord> {
        self.rows.iter().find(|row| &row.ipfs_pin_hash == cid)
    }
}

/// Response of the pin job query. Only the presence of rows is meaningful.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PinJobs {
    /// Total matching jobs
    #[serde(default)]
    pub count: u64,
    /// Raw job rows
    #[serde(default, deserialize_with = "null_as_default")]
    pub rows: Vec<serde_json::Value>,
}

impl PinJobs {
    /// True when the service knows about the CID.
    pub fn is_known(&self) -> bool {
        !self.rows.is_empty()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PIN_LIST_JSON: &str = r#"{
        "count": 2,
        "rows": [
            {
                "id": "a1",
                "ipfs_pin_hash": "bafkreiabc",
                "size": 2048,
                "user_id": "u1",
                "date_pinned": "2024-03-01T10:00:00.000Z",
                "date_unpinned": null,
                "metadata": { "name": "lab-results", "keyvalues": { "type": "json" } },
                "regions": [
                    { "regionId": "FRA1", "currentReplicationCount": 1, "desiredReplicationCount": 1 }
                ],
                "mime_type": "application/json",
                "number_of_files": 1
            },
            {
                "ipfs_pin_hash": "bafkreiabcdef",
                "metadata": { "name": null, "keyvalues": null },
                "regions": null
            }
        ]
    }"#;

    #[test]
    fn test_parse_pin_list() {
        let list: PinList = serde_json::from_str(PIN_LIST_JSON).unwrap();
        assert_eq!(list.count, 2);
        assert_eq!(list.rows.len(), 2);

        let first = &list.rows[0];
        assert_eq!(first.size, 2048);
        assert_eq!(first.display_name(), "lab-results");
        assert_eq!(first.metadata.keyvalues["type"], "json");
        assert_eq!(first.regions[0].region_id, "FRA1");
        assert!(first.date_pinned.is_some());
        assert!(first.date_unpinned.is_none());

        let second = &list.rows[1];
        assert_eq!(second.display_name(), "Unknown");
        assert!(second.metadata.keyvalues.is_empty());
        assert!(second.regions.is_empty());
    }

    #[test]
    fn test_find_is_exact_match() {
        let list: PinList = serde_json::from_str(PIN_LIST_JSON).unwrap();
        let found = list.find(&Cid::new("bafkreiabc")).unwrap();
        assert_eq!(found.id.as_deref(), Some("a1"));
        assert!(list.find(&Cid::new("bafkrei")).is_none());
    }

    #[test]
    fn test_pin_jobs_known() {
        let jobs: PinJobs = serde_json::from_str(r#"{"count":1,"rows":[{"id":"j"}]}"#).unwrap();
        assert!(jobs.is_known());

        let jobs: PinJobs = serde_json::from_str(r#"{"count":0,"rows":[]}"#).unwrap();
        assert!(!jobs.is_known());

        let jobs: PinJobs = serde_json::from_str(r#"{}"#).unwrap();
        assert!(!jobs.is_known());
    }
}
