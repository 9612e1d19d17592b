//! Activity derivation: from a transport to its ordered activities.
//!
//! Derivation runs in three steps:
//!
//! 1. [`sequence_sites`] orders the visited sites along the segment path.
//! 2. The builder walks the sites left to right and emits activities,
//!    resolving each status and `can_be_done` as it appends.
//! 3. A backward pass fills in `can_be_undone` on the finished list.
//!
//! Everything here is pure and synchronous. Callers that derive the same
//! transport repeatedly can go through [`crate::cache::ActivityCache`].

mod build;
mod means;
mod sequence;
mod state;

#[cfg(test)]
pub(crate) mod fixtures;

use std::collections::BTreeSet;

use tracing::debug;

use crate::model::{Activity, ActivityType, MeansGroup, Transport};

pub use build::activity_type_for_site_type;
pub use means::group_by_means;
pub use sequence::{SiteDeliveries, SiteSegments, SiteSequence, sequence_sites};

/// Errors that can occur while deriving activities.
#[derive(Debug, thiserror::Error)]
pub enum DeriveError {
    /// The sequencer cannot establish a path: there is nothing to order
    /// the deliveries by.
    #[error("transport {transport} has {deliveries} deliveries but no segments")]
    SeveralDeliveriesWithoutSegments { transport: String, deliveries: usize },

    #[error("unexpected site type: {0}")]
    UnexpectedSiteType(String),
}

pub type Result<T> = core::result::Result<T, DeriveError>;

/// Options for a derivation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DeriveOptions {
    /// Activity types left out of the output. They take no index.
    pub activity_types_to_omit: BTreeSet<ActivityType>,

    /// Evaluate eligibility for the driver's mobile app rather than the back office.
    pub for_trucker: bool,
}

impl DeriveOptions {
    /// The same options with nothing omitted.
    pub fn without_omissions(&self) -> Self {
        Self {
            activity_types_to_omit: BTreeSet::new(),
            for_trucker: self.for_trucker,
        }
    }
}

/// Derive the ordered activities of a transport.
///
/// Fails only when the transport's shape makes sequencing impossible.
pub fn activities(transport: &Transport, options: &DeriveOptions) -> Result<Vec<Activity>> {
    let sequence = sequence_sites(transport)?;
    let activities = build::build(transport, &sequence, options);
    debug!(
        transport = %transport.uid,
        sites = sequence.sites().len(),
        activities = activities.len(),
        "derived activities"
    );
    Ok(activities)
}

/// Derive the activities of a transport and split them into runs by means.
///
/// Grouping looks at the full sequence; omitted types are dropped from the
/// runs afterwards, so an omitted break end still starts a new run.
pub fn activities_by_means(
    transport: &Transport,
    options: &DeriveOptions,
) -> Result<Vec<MeansGroup>> {
    let all = activities(transport, &options.without_omissions())?;
    Ok(group_by_means(all, &options.activity_types_to_omit))
}
