//! Bounded cache of derived activities.
//!
//! Entries are keyed by a transport fingerprint and the derivation options.
//! The fingerprint is `uid@revision` when the caller tracks revisions,
//! otherwise the SHA-256 of the serialized transport, so an edited
//! transport never hits a stale entry.

use std::sync::Arc;

use indexmap::IndexMap;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::derive::{self, DeriveError, DeriveOptions};
use crate::model::{Activity, MeansGroup, Transport};

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error(transparent)]
    Derive(#[from] DeriveError),

    #[error("failed to fingerprint transport: {0}")]
    Fingerprint(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, CacheError>;

/// Identify a transport's content.
pub fn fingerprint(transport: &Transport) -> Result<String> {
    if let Some(revision) = transport.revision {
        return Ok(format!("{}@{revision}", transport.uid));
    }
    let bytes = serde_json::to_vec(transport)?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    transport: String,
    fingerprint: String,
    options: DeriveOptions,
}

/// Least-recently-used cache over [`derive::activities`].
///
/// Capacity zero disables caching: every call derives.
#[derive(Debug)]
pub struct ActivityCache {
    capacity: usize,
    entries: IndexMap<CacheKey, Arc<[Activity]>>,
}

impl ActivityCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Derived activities for a transport, from cache when possible.
    pub fn activities(
        &mut self,
        transport: &Transport,
        options: &DeriveOptions,
    ) -> Result<Arc<[Activity]>> {
        if self.capacity == 0 {
            return Ok(derive::activities(transport, options)?.into());
        }

        let key = CacheKey {
            transport: transport.uid.clone(),
            fingerprint: fingerprint(transport)?,
            options: options.clone(),
        };

        if let Some(index) = self.entries.get_index_of(&key) {
            let last = self.entries.len() - 1;
            self.entries.move_index(index, last);
            debug!(transport = %transport.uid, "activity cache hit");
            return Ok(Arc::clone(&self.entries[last]));
        }

        let activities: Arc<[Activity]> = derive::activities(transport, options)?.into();
        if self.entries.len() >= self.capacity {
            if let Some((evicted, _)) = self.entries.shift_remove_index(0) {
                debug!(transport = %evicted.transport, "evicted from activity cache");
            }
        }
        self.entries.insert(key, Arc::clone(&activities));
        debug!(
            transport = %transport.uid,
            entries = self.entries.len(),
            "activity cache miss"
        );
        Ok(activities)
    }

    /// Derived activities grouped by means.
    ///
    /// Grouping runs over the cached full sequence, so omissions here share
    /// the entry of the unfiltered derivation.
    pub fn activities_by_means(
        &mut self,
        transport: &Transport,
        options: &DeriveOptions,
    ) -> Result<Vec<MeansGroup>> {
        let all = self.activities(transport, &options.without_omissions())?;
        Ok(derive::group_by_means(
            all.to_vec(),
            &options.activity_types_to_omit,
        ))
    }

    /// Drop every entry for this transport, whatever its content.
    /// Returns the number of entries removed.
    pub fn invalidate(&mut self, transport: &Transport) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| key.transport != transport.uid);
        let removed = before - self.entries.len();
        if removed > 0 {
            debug!(transport = %transport.uid, removed, "invalidated activity cache");
        }
        removed
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    use crate::derive::fixtures::*;
    use crate::model::{ActivityType, StatusCategory};

    #[test]
    fn revision_fingerprint_skips_hashing() {
        let mut transport = simple();
        transport.revision = Some(4);
        assert_eq!(fingerprint(&transport).unwrap(), "transport-1@4");
    }

    #[test]
    fn content_fingerprint_changes_with_content() {
        let mut transport = simple();
        let before = fingerprint(&transport).unwrap();
        assert_eq!(before.len(), 64);
        assert_eq!(before, fingerprint(&transport.clone()).unwrap());

        transport
            .status_updates
            .push(update(StatusCategory::OnTheWay, None));
        assert_ne!(before, fingerprint(&transport).unwrap());
    }

    #[test]
    fn repeated_derivation_hits_cache() {
        let mut cache = ActivityCache::new(4);
        let transport = simple();
        let options = DeriveOptions::default();

        let first = cache.activities(&transport, &options).unwrap();
        let second = cache.activities(&transport, &options).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn options_are_part_of_the_key() {
        let mut cache = ActivityCache::new(4);
        let transport = trucker_change();

        let all = cache
            .activities(&transport, &DeriveOptions::default())
            .unwrap();
        let omitted = cache
            .activities(
                &transport,
                &DeriveOptions {
                    activity_types_to_omit: BTreeSet::from([ActivityType::BulkingBreakStart]),
                    for_trucker: false,
                },
            )
            .unwrap();

        assert_eq!(all.len(), 4);
        assert_eq!(omitted.len(), 3);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn changed_transport_misses() {
        let mut cache = ActivityCache::new(4);
        let mut transport = simple();
        let options = DeriveOptions::default();

        let before = cache.activities(&transport, &options).unwrap();
        let loading = transport.deliveries[0].origin.clone();
        transport
            .status_updates
            .push(update(StatusCategory::LoadingComplete, Some(&loading)));
        let after = cache.activities(&transport, &options).unwrap();

        assert!(!before[0].is_complete());
        assert!(after[0].is_complete());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn evicts_least_recently_used() {
        let mut cache = ActivityCache::new(2);
        let options = DeriveOptions::default();
        let mut a = simple();
        a.uid = "a".into();
        let mut b = simple();
        b.uid = "b".into();
        let mut c = simple();
        c.uid = "c".into();

        let first_a = cache.activities(&a, &options).unwrap();
        cache.activities(&b, &options).unwrap();
        // Touch `a` so `b` becomes the oldest.
        cache.activities(&a, &options).unwrap();
        cache.activities(&c, &options).unwrap();

        assert_eq!(cache.len(), 2);
        assert!(Arc::ptr_eq(
            &first_a,
            &cache.activities(&a, &options).unwrap()
        ));
        assert_eq!(cache.invalidate(&b), 0);
        assert_eq!(cache.invalidate(&c), 1);
    }

    #[test]
    fn zero_capacity_never_stores() {
        let mut cache = ActivityCache::new(0);
        let transport = simple();
        let options = DeriveOptions::default();

        let first = cache.activities(&transport, &options).unwrap();
        let second = cache.activities(&transport, &options).unwrap();

        assert!(!Arc::ptr_eq(&first, &second));
        assert!(cache.is_empty());
    }

    #[test]
    fn invalidate_and_clear() {
        let mut cache = ActivityCache::new(4);
        let transport = trucker_change();
        cache
            .activities(&transport, &DeriveOptions::default())
            .unwrap();
        cache
            .activities_by_means(
                &transport,
                &DeriveOptions {
                    activity_types_to_omit: BTreeSet::new(),
                    for_trucker: true,
                },
            )
            .unwrap();
        assert_eq!(cache.len(), 2);

        assert_eq!(cache.invalidate(&transport), 2);
        assert!(cache.is_empty());

        cache
            .activities(&transport, &DeriveOptions::default())
            .unwrap();
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn by_means_shares_unfiltered_entry() {
        let mut cache = ActivityCache::new(4);
        let transport = trucker_change();
        let omit_breaks = DeriveOptions {
            activity_types_to_omit: BTreeSet::from([
                ActivityType::BulkingBreakStart,
                ActivityType::BulkingBreakEnd,
            ]),
            for_trucker: false,
        };

        let groups = cache.activities_by_means(&transport, &omit_breaks).unwrap();
        cache
            .activities(&transport, &DeriveOptions::default())
            .unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(cache.len(), 1);
    }
}
