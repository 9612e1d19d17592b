//! Segments: vehicle- and driver-continuous legs between two sites.

use serde::{Deserialize, Serialize};

use super::Site;

/// One leg of a transport, driven by at most one trucker with one set of equipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Absent on the implicit segment synthesized for single-delivery
    /// transports that carry no persisted segment.
    #[serde(default)]
    pub uid: Option<String>,

    #[serde(default)]
    pub sort_order: u32,

    pub origin: Site,
    pub destination: Site,

    #[serde(default)]
    pub trucker: Option<Trucker>,

    #[serde(default)]
    pub vehicle: Option<Vehicle>,

    #[serde(default)]
    pub trailers: Vec<Trailer>,

    /// Set when the leg is sub-contracted to another carrier.
    #[serde(default)]
    pub child_transport: Option<ChildTransport>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trucker {
    pub pk: u64,

    #[serde(default)]
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub license_plate: String,

    #[serde(default)]
    pub fleet_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trailer {
    pub license_plate: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildTransport {
    pub uid: String,
}

impl Segment {
    /// The segment implied by a single delivery when none is persisted.
    pub fn implicit(origin: Site, destination: Site) -> Self {
        Self {
            uid: None,
            sort_order: 0,
            origin,
            destination,
            trucker: None,
            vehicle: None,
            trailers: Vec::new(),
            child_transport: None,
        }
    }

    pub fn trucker_pk(&self) -> Option<u64> {
        self.trucker.as_ref().map(|t| t.pk)
    }
}
