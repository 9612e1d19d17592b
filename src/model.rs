//! Data model for haul.
//!
//! The input side is a fully-loaded transport: segments, deliveries, sites,
//! status updates, documents and messages, already joined.
//! The output side is the derived activity list, optionally grouped by means.

mod activity;
mod delivery;
mod means;
mod segment;
mod site;
mod status;
mod transport;

pub use activity::{Activity, ActivityStatus, ActivityType, SiteType};
pub use delivery::{Delivery, Load};
pub use means::{ActivityMeans, MeansGroup};
pub use segment::{ChildTransport, Segment, Trailer, Trucker, Vehicle};
pub use site::{Address, Site, SiteCategory, Slot};
pub use status::{Signature, SignatureMethod, StatusCategory, StatusUpdate};
pub use transport::{Document, GlobalStatus, Message, Transport, TransportShape};
