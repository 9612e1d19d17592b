//! Means: the trucker and equipment carrying out a run of activities.

use serde::{Deserialize, Serialize};

use super::{Activity, Segment};

/// Who and what performs a run of consecutive activities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityMeans {
    pub trucker: Option<u64>,
    pub vehicle: Option<String>,
    pub trailers: Vec<String>,
    pub child_transport: Option<String>,

    /// Set when the run starts at the end of a bulking break.
    pub breaking_site: Option<String>,
}

/// A run of consecutive activities sharing the same means.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeansGroup {
    pub key: String,
    pub means: ActivityMeans,
    pub activities: Vec<Activity>,
}

impl ActivityMeans {
    /// The means of a segment. A missing segment has no means at all.
    pub fn of_segment(segment: Option<&Segment>) -> Self {
        let Some(segment) = segment else {
            return Self::default();
        };
        Self {
            trucker: segment.trucker_pk(),
            vehicle: segment.vehicle.as_ref().map(|v| v.license_plate.clone()),
            trailers: segment
                .trailers
                .iter()
                .map(|t| t.license_plate.clone())
                .collect(),
            child_transport: segment.child_transport.as_ref().map(|c| c.uid.clone()),
            breaking_site: None,
        }
    }

    /// Same trucker and equipment, ignoring the break tag.
    pub fn same_equipment(&self, other: &Self) -> bool {
        self.trucker == other.trucker
            && self.vehicle == other.vehicle
            && self.trailers == other.trailers
            && self.child_transport == other.child_transport
    }

    /// Stable string key: `vehicle|trailers|trucker|child|break-site`.
    pub fn key(&self) -> String {
        format!(
            "{}|{}|{}|{}|{}",
            self.vehicle.as_deref().unwrap_or_default(),
            self.trailers.join(","),
            self.trucker.map(|pk| pk.to_string()).unwrap_or_default(),
            self.child_transport.as_deref().unwrap_or_default(),
            self.breaking_site.as_deref().unwrap_or_default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_joins_all_parts() {
        let means = ActivityMeans {
            trucker: Some(7),
            vehicle: Some("AB-123-CD".into()),
            trailers: vec!["TR-1".into(), "TR-2".into()],
            child_transport: None,
            breaking_site: Some("site-3".into()),
        };
        assert_eq!(means.key(), "AB-123-CD|TR-1,TR-2|7||site-3");
    }

    #[test]
    fn empty_means_has_blank_key() {
        assert_eq!(ActivityMeans::default().key(), "||||");
        assert_eq!(ActivityMeans::of_segment(None), ActivityMeans::default());
    }

    #[test]
    fn break_tag_does_not_affect_equipment_comparison() {
        let a = ActivityMeans {
            trucker: Some(1),
            ..ActivityMeans::default()
        };
        let b = ActivityMeans {
            breaking_site: Some("s".into()),
            ..a.clone()
        };
        assert!(a.same_equipment(&b));
        assert_ne!(a.key(), b.key());
    }
}
