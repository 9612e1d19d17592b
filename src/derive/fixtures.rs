//! Transport builders shared by the derivation and cache tests.

use jiff::Timestamp;

use crate::model::{
    Delivery, GlobalStatus, Segment, Site, SiteCategory, StatusCategory, StatusUpdate, Transport,
    TransportShape, Trucker,
};

pub(crate) fn site(uid: &str, category: SiteCategory) -> Site {
    Site {
        uid: uid.into(),
        category,
        is_cancelled: false,
        slots: vec![],
        action: None,
        address: None,
    }
}

pub(crate) fn segment(
    sort_order: u32,
    origin: &Site,
    destination: &Site,
    trucker: Option<u64>,
) -> Segment {
    Segment {
        uid: Some(format!("seg-{sort_order}")),
        sort_order,
        origin: origin.clone(),
        destination: destination.clone(),
        trucker: trucker.map(|pk| Trucker {
            pk,
            display_name: format!("Trucker {pk}"),
        }),
        vehicle: None,
        trailers: vec![],
        child_transport: None,
    }
}

pub(crate) fn delivery(uid: &str, origin: &Site, destination: &Site) -> Delivery {
    Delivery {
        uid: uid.into(),
        origin: origin.clone(),
        destination: destination.clone(),
        loads: vec![],
    }
}

pub(crate) fn update(category: StatusCategory, site: Option<&Site>) -> StatusUpdate {
    StatusUpdate {
        uid: None,
        category,
        site: site.map(|s| s.uid.clone()),
        created: Timestamp::UNIX_EPOCH,
        signature: None,
    }
}

pub(crate) fn transport(segments: Vec<Segment>, deliveries: Vec<Delivery>) -> Transport {
    Transport {
        uid: "transport-1".into(),
        revision: None,
        segments,
        deliveries,
        status_updates: vec![],
        documents: vec![],
        messages: vec![],
        global_status: GlobalStatus::Ongoing,
        shape: TransportShape::Simple,
        requires_washing: false,
        business_privacy: false,
        deleted: false,
        is_multiple_rounds: false,
    }
}

/// One delivery from `loading` to `unloading` on a single segment.
pub(crate) fn simple() -> Transport {
    let loading = site("loading", SiteCategory::Loading);
    let unloading = site("unloading", SiteCategory::Unloading);
    transport(
        vec![segment(0, &loading, &unloading, Some(1))],
        vec![delivery("d1", &loading, &unloading)],
    )
}

/// Deliveries `loading-a → unloading` and `loading-b → unloading`.
pub(crate) fn two_loadings_one_unloading() -> Transport {
    let loading_a = site("loading-a", SiteCategory::Loading);
    let loading_b = site("loading-b", SiteCategory::Loading);
    let unloading = site("unloading", SiteCategory::Unloading);
    let mut transport = transport(
        vec![
            segment(0, &loading_a, &loading_b, Some(1)),
            segment(1, &loading_b, &unloading, Some(1)),
        ],
        vec![
            delivery("d1", &loading_a, &unloading),
            delivery("d2", &loading_b, &unloading),
        ],
    );
    transport.shape = TransportShape::Grouping;
    transport
}

/// One delivery whose driver changes at `break`: trucker 1, then trucker 2.
pub(crate) fn trucker_change() -> Transport {
    let loading = site("loading", SiteCategory::Loading);
    let breaking = site("break", SiteCategory::Breaking);
    let unloading = site("unloading", SiteCategory::Unloading);
    transport(
        vec![
            segment(0, &loading, &breaking, Some(1)),
            segment(1, &breaking, &unloading, Some(2)),
        ],
        vec![delivery("d1", &loading, &unloading)],
    )
}
