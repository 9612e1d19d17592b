//! Deliveries: shipment units with their own origin and destination.

use serde::{Deserialize, Serialize};

use super::Site;

/// A shipment unit moved from `origin` to `destination`.
///
/// Several deliveries may share a site (grouping and ungrouping points).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delivery {
    pub uid: String,
    pub origin: Site,
    pub destination: Site,

    #[serde(default)]
    pub loads: Vec<Load>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Load {
    pub category: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub quantity: Option<f64>,
}
