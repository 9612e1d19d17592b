//! Activity types: what a driver physically does at a site.
//!
//! Activities are derived, never persisted. They are rebuilt from the
//! transport on every derivation and carry no identity of their own.

use serde::{Deserialize, Serialize};

use super::{Delivery, Document, Message, Segment, Site, StatusUpdate};

/// A single step of a transport, in site-visit order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Position in the derived sequence. Omitted activity types take no index.
    pub index: usize,

    #[serde(rename = "type")]
    pub kind: ActivityType,

    pub site_type: SiteType,
    pub site: Site,

    /// The segment the activity belongs to: incoming for unloadings and
    /// break starts, outgoing for loadings and break ends.
    pub segment: Option<Segment>,
    pub previous_segment: Option<Segment>,
    pub next_segment: Option<Segment>,

    pub deliveries: Vec<Delivery>,

    pub status: ActivityStatus,
    pub can_be_done: bool,
    pub can_be_undone: bool,

    /// The status updates the status was resolved from.
    pub status_updates: Vec<StatusUpdate>,

    /// The update that completed the activity, if any.
    pub complete_status: Option<StatusUpdate>,

    pub documents: Vec<Document>,
    pub messages: Vec<Message>,

    pub requires_washing: bool,
    pub truck_washed: bool,
    pub electronic_signature_required: bool,
    pub is_cancelled: bool,
    pub business_privacy: bool,
}

/// What happens at the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActivityType {
    Loading,
    Unloading,
    BulkingBreakStart,
    BulkingBreakEnd,
}

/// The role the site plays for the activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteType {
    Origin,
    Destination,
    Breaking,
    Resuming,
}

/// Lifecycle status of an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatus {
    NotStarted,
    OnTheWay,
    OnSite,
    RoundsStarted,
    Done,
    Cancelled,
}

impl From<SiteType> for ActivityType {
    fn from(site_type: SiteType) -> Self {
        match site_type {
            SiteType::Origin => Self::Loading,
            SiteType::Destination => Self::Unloading,
            SiteType::Breaking => Self::BulkingBreakStart,
            SiteType::Resuming => Self::BulkingBreakEnd,
        }
    }
}

impl ActivityType {
    pub fn is_break(self) -> bool {
        matches!(self, Self::BulkingBreakStart | Self::BulkingBreakEnd)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Unloading => "unloading",
            Self::BulkingBreakStart => "bulkingBreakStart",
            Self::BulkingBreakEnd => "bulkingBreakEnd",
        }
    }

    /// Stable key for the activity title. Localization happens downstream.
    pub fn title_key(self) -> &'static str {
        match self {
            Self::Loading => "activity.loading",
            Self::Unloading => "activity.unloading",
            Self::BulkingBreakStart => "activity.bulkingBreakStart",
            Self::BulkingBreakEnd => "activity.bulkingBreakEnd",
        }
    }
}

impl ActivityStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::OnTheWay => "on_the_way",
            Self::OnSite => "on_site",
            Self::RoundsStarted => "rounds_started",
            Self::Done => "done",
            Self::Cancelled => "cancelled",
        }
    }
}

impl Activity {
    pub fn is_on_site(&self) -> bool {
        matches!(
            self.status,
            ActivityStatus::OnSite | ActivityStatus::RoundsStarted
        )
    }

    pub fn is_started(&self) -> bool {
        match self.status {
            ActivityStatus::OnTheWay
            | ActivityStatus::OnSite
            | ActivityStatus::RoundsStarted
            | ActivityStatus::Done => true,
            ActivityStatus::NotStarted | ActivityStatus::Cancelled => false,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status == ActivityStatus::Done
    }

    /// The update that completed the activity, if any.
    pub fn complete_status(&self) -> Option<&StatusUpdate> {
        self.complete_status.as_ref()
    }

    /// Complete as far as undoing is concerned.
    ///
    /// Multiple-rounds loadings count as complete once rounds have started;
    /// `rounds_started` never appears on other transports.
    pub fn is_complete_for_undone(&self) -> bool {
        self.status == ActivityStatus::Done
            || (self.kind == ActivityType::Loading
                && self.status == ActivityStatus::RoundsStarted)
    }

    pub fn trucker_pk(&self) -> Option<u64> {
        self.segment.as_ref().and_then(Segment::trucker_pk)
    }

    pub fn shares_delivery_with(&self, other: &Activity) -> bool {
        self.deliveries
            .iter()
            .any(|d| other.deliveries.iter().any(|o| o.uid == d.uid))
    }
}
