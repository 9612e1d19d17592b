//! Transport: the aggregate root handed to the engine.

use serde::{Deserialize, Serialize};

use super::{Delivery, Segment, StatusCategory, StatusUpdate};

/// A fully-loaded, denormalized transport order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transport {
    pub uid: String,

    /// Caller-supplied version counter, bumped whenever the transport changes.
    /// When present it replaces content hashing as the cache fingerprint.
    #[serde(default)]
    pub revision: Option<u64>,

    #[serde(default)]
    pub segments: Vec<Segment>,

    #[serde(default)]
    pub deliveries: Vec<Delivery>,

    /// Chronological event log.
    #[serde(default)]
    pub status_updates: Vec<StatusUpdate>,

    #[serde(default)]
    pub documents: Vec<Document>,

    #[serde(default)]
    pub messages: Vec<Message>,

    #[serde(default)]
    pub global_status: GlobalStatus,

    #[serde(default)]
    pub shape: TransportShape,

    #[serde(default)]
    pub requires_washing: bool,

    #[serde(default)]
    pub business_privacy: bool,

    #[serde(default)]
    pub deleted: bool,

    /// Round-trip transports where loading and unloading repeat on the same sites.
    #[serde(default)]
    pub is_multiple_rounds: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlobalStatus {
    #[default]
    Ongoing,
    Done,
    Cancelled,
    Declined,
    Verified,
    Invoiced,
    Paid,
}

/// How deliveries combine across the transport's sites.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportShape {
    #[default]
    Simple,
    Grouping,
    Ungrouping,
    Complex,
}

/// A file attached to a delivery or a site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub uid: String,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub delivery: Option<String>,

    #[serde(default)]
    pub site: Option<String>,
}

/// A note left on a delivery or a site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub uid: String,

    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub delivery: Option<String>,

    #[serde(default)]
    pub site: Option<String>,
}

impl Transport {
    pub fn has_status(&self, category: StatusCategory) -> bool {
        self.status_updates.iter().any(|s| s.category == category)
    }

    pub fn is_cancelled(&self) -> bool {
        self.global_status == GlobalStatus::Cancelled || self.has_status(StatusCategory::Cancelled)
    }

    /// Verified transports, and those already invoiced or paid, are frozen.
    pub fn is_verified(&self) -> bool {
        matches!(
            self.global_status,
            GlobalStatus::Verified | GlobalStatus::Invoiced | GlobalStatus::Paid
        ) || self.has_status(StatusCategory::Verified)
    }

    pub fn has_been_amended(&self) -> bool {
        self.has_status(StatusCategory::Amended)
    }
}
