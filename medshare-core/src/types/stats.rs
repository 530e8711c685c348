//! Access statistics derived from pin metadata.
//!
//! The pinning service only exposes real access counts on a paid tier this
//! client does not integrate. `estimated_access_count` is therefore a
//! placeholder derived from pin age, not a measurement.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Cid, KeyValues, PinRecord, PinRegion};
use crate::constants::MILLIS_PER_DAY;

/// Status reported when the pin could not be looked up.
pub const UNKNOWN_STATUS: &str = "unknown";

/// Pin metadata plus estimated access count for one CID.
///
/// Always has the same shape: lookups that fail yield a zero-valued record
/// with `error` set instead of an `Err`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CidStats {
    /// The CID these stats describe
    pub cid: Cid,
    /// Pin name, "Unknown" when absent
    pub name: String,
    /// Pin annotations
    pub keyvalues: KeyValues,
    /// Size in bytes
    pub pin_size: u64,
    /// Pin date (lookup time for placeholders)
    pub pin_date: DateTime<Utc>,
    /// Pin status as reported by the service; "unknown" for placeholders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Storage regions
    pub regions: Vec<PinRegion>,
    /// Days since pinning plus one; an estimate, not a measurement
    pub estimated_access_count: u64,
    /// Why the lookup failed, if it did
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CidStats {
    /// Builds stats from a pin record, estimating access count as of `now`.
    pub fn from_record(record: &PinRecord, now: DateTime<Utc>) -> Self {
        let pin_date = record.date_pinned.unwrap_or(now);

        Self {
            cid: record.ipfs_pin_hash.clone(),
            name: record.display_name().to_string(),
            keyvalues: record.metadata.keyvalues.clone(),
            pin_size: record.size,
            pin_date,
            status: record.status.clone(),
            regions: record.regions.clone(),
            estimated_access_count: estimate_access_count(pin_date, now),
            error: None,
        }
    }

    /// Zero-valued placeholder annotated with the failure reason.
    pub fn unavailable(cid: Cid, reason: impl Into<String>) -> Self {
        Self {
            cid,
            name: "Unknown".into(),
            keyvalues: KeyValues::new(),
            pin_size: 0,
            pin_date: Utc::now(),
            status: Some(UNKNOWN_STATUS.into()),
            regions: Vec::new(),
            estimated_access_count: 0,
            error: Some(reason.into()),
        }
    }

    /// True when this record is a failure placeholder.
    pub fn is_unavailable(&self) -> bool {
        self.error.is_some()
    }
}

/// Placeholder access estimate: whole days since pinning, plus one.
///
/// Pins dated in the future clamp to zero.
pub fn estimate_access_count(pinned_at: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    let elapsed_ms = (now - pinned_at).num_milliseconds();
    let days = elapsed_ms.div_euclid(MILLIS_PER_DAY) + 1;
    days.max(0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use proptest::prelude::*;

    use crate::types::PinMetadata;

    fn record(date: Option<DateTime<Utc>>) -> PinRecord {
        PinRecord {
            id: Some("p1".into()),
            ipfs_pin_hash: Cid::new("bafkreiabc"),
            size: 512,
            user_id: None,
            date_pinned: date,
            date_unpinned: None,
            metadata: PinMetadata {
                name: Some("scan.pdf".into()),
                keyvalues: KeyValues::new(),
            },
            regions: vec![],
            status: Some("pinned".into()),
        }
    }

    #[test]
    fn test_estimate_same_day_is_one() {
        let now = Utc::now();
        assert_eq!(estimate_access_count(now, now), 1);
        assert_eq!(estimate_access_count(now - Duration::hours(23), now), 1);
    }

    #[test]
    fn test_estimate_counts_whole_days() {
        let now = Utc::now();
        assert_eq!(estimate_access_count(now - Duration::days(10), now), 11);
        assert_eq!(estimate_access_count(now - Duration::hours(49), now), 3);
    }

    #[test]
    fn test_estimate_future_pin_clamps() {
        let now = Utc::now();
        assert_eq!(estimate_access_count(now + Duration::hours(1), now), 0);
        assert_eq!(estimate_access_count(now + Duration::days(5), now), 0);
    }

    #[test]
    fn test_from_record() {
        let now = Utc::now();
        let stats = CidStats::from_record(&record(Some(now - Duration::days(2))), now);
        assert_eq!(stats.name, "scan.pdf");
        assert_eq!(stats.pin_size, 512);
        assert_eq!(stats.status.as_deref(), Some("pinned"));
        assert_eq!(stats.estimated_access_count, 3);
        assert!(!stats.is_unavailable());
    }

    #[test]
    fn test_from_record_without_date() {
        let now = Utc::now();
        let stats = CidStats::from_record(&record(None), now);
        assert_eq!(stats.pin_date, now);
        assert_eq!(stats.estimated_access_count, 1);
    }

    #[test]
    fn test_from_record_without_status_omits_it() {
        let now = Utc::now();
        let mut row = record(Some(now));
        row.status = None;

        let stats = CidStats::from_record(&row, now);
        assert_eq!(stats.status, None);
        assert!(!stats.is_unavailable());

        let json = serde_json::to_value(&stats).unwrap();
        assert!(json.get("status").is_none());
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_unavailable_shape() {
        let stats = CidStats::unavailable(Cid::new("Qm1"), "boom");
        assert_eq!(stats.estimated_access_count, 0);
        assert_eq!(stats.status.as_deref(), Some("unknown"));
        assert_eq!(stats.name, "Unknown");
        assert_eq!(stats.error.as_deref(), Some("boom"));
        assert!(stats.is_unavailable());
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(CidStats::unavailable(Cid::new("Qm1"), "boom")).unwrap();
        assert_eq!(json["estimatedAccessCount"], 0);
        assert_eq!(json["pinSize"], 0);
        assert_eq!(json["error"], "boom");
        assert!(json.get("pinDate").is_some());
    }

    proptest! {
        #[test]
        fn prop_estimate_monotonic(age_a in 0i64..10_000_000, extra in 0i64..10_000_000) {
            let now = Utc::now();
            let older = estimate_access_count(now - Duration::seconds(age_a + extra), now);
            let newer = estimate_access_count(now - Duration::seconds(age_a), now);
            prop_assert!(older >= newer);
            prop_assert!(newer >= 1);
        }
    }
}
