//! Sites: the physical locations a transport visits.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A physical location visited by a transport.
///
/// Sites are identified by `uid`; the same site may be referenced by the
/// destination of one segment and the origin of the next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub uid: String,

    pub category: SiteCategory,

    #[serde(default)]
    pub is_cancelled: bool,

    /// Requested time windows.
    #[serde(default)]
    pub slots: Vec<Slot>,

    /// Special handling flag. A site with an action and no delivery
    /// is not a break point.
    #[serde(default)]
    pub action: Option<String>,

    #[serde(default)]
    pub address: Option<Address>,
}

/// What the site was planned for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteCategory {
    Loading,
    Unloading,
    Breaking,
    Resuming,
}

/// A requested time window at a site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub start: Timestamp,
    pub end: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub name: String,

    #[serde(default)]
    pub city: Option<String>,

    #[serde(default)]
    pub postcode: Option<String>,

    #[serde(default)]
    pub country: Option<String>,
}

impl Site {
    /// Short label for display: the address name and city when known, else the uid.
    pub fn label(&self) -> String {
        match &self.address {
            Some(Address {
                name,
                city: Some(city),
                ..
            }) => format!("{name} ({city})"),
            Some(address) => address.name.clone(),
            None => self.uid.clone(),
        }
    }
}
