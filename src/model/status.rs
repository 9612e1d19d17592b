//! Status updates: the chronological event log of a transport.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// One event in a transport's history, optionally scoped to a site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusUpdate {
    #[serde(default)]
    pub uid: Option<String>,

    pub category: StatusCategory,

    /// Uid of the site the update applies to, if any.
    #[serde(default)]
    pub site: Option<String>,

    pub created: Timestamp,

    #[serde(default)]
    pub signature: Option<Signature>,
}

/// Every status category the activity engine distinguishes.
///
/// Categories the engine does not interpret deserialize as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCategory {
    Created,
    Updated,
    Confirmed,
    Declined,
    Assigned,
    Unassigned,
    SentToTrucker,
    Acknowledged,
    OnTheWay,
    OnLoadingSite,
    LoadingComplete,
    OnUnloadingSite,
    UnloadingComplete,
    Departed,
    RoundsStarted,
    RoundsComplete,
    BulkingBreakStarted,
    BulkingBreakComplete,
    TruckWash,
    Cancelled,
    Done,
    Verified,
    Invoiced,
    Paid,
    Amended,
    Deleted,
    Restored,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signature {
    #[serde(default)]
    pub signature_method: Option<SignatureMethod>,

    /// When the signatory counter-signed, if they have.
    #[serde(default)]
    pub signatory_signed_at: Option<Timestamp>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatureMethod {
    Onsite,
    Sms,
    Email,
    ContactlessEmail,
    #[serde(other)]
    Other,
}

impl SignatureMethod {
    /// Methods where the signatory signs remotely, after the driver's own signature.
    pub fn is_electronic(self) -> bool {
        match self {
            Self::Sms | Self::Email | Self::ContactlessEmail => true,
            Self::Onsite | Self::Other => false,
        }
    }
}

impl StatusUpdate {
    pub fn is_at_site(&self, site_uid: &str) -> bool {
        self.site.as_deref() == Some(site_uid)
    }

    /// Whether the update still waits for a remote counter-signature.
    pub fn awaits_electronic_signature(&self) -> bool {
        self.signature.as_ref().is_some_and(|s| {
            s.signature_method.is_some_and(SignatureMethod::is_electronic)
                && s.signatory_signed_at.is_none()
        })
    }
}
