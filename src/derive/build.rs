//! Activity building: one left-to-right pass over the sequenced sites.

use tracing::{debug, trace};

use crate::model::{
    Activity, ActivityType, Delivery, Document, Message, Segment, Site, SiteType, StatusCategory,
    Transport,
};

use super::{
    DeriveError, DeriveOptions, Result,
    sequence::{SiteDeliveries, SiteSequence},
    state,
};

/// Map a site type name to the activity performed there.
///
/// Sequenced sites never produce an unknown name; this only fails when
/// called with a malformed value.
pub fn activity_type_for_site_type(site_type: &str) -> Result<ActivityType> {
    let site_type = match site_type {
        "origin" => SiteType::Origin,
        "destination" => SiteType::Destination,
        "breaking" => SiteType::Breaking,
        "resuming" => SiteType::Resuming,
        other => return Err(DeriveError::UnexpectedSiteType(other.to_string())),
    };
    Ok(site_type.into())
}

pub(super) fn build(
    transport: &Transport,
    sequence: &SiteSequence<'_>,
    options: &DeriveOptions,
) -> Vec<Activity> {
    let mut activities: Vec<Activity> = Vec::new();

    for site in sequence.sites() {
        let incoming = sequence.incoming(&site.uid);
        let outgoing = sequence.outgoing(&site.uid);

        for (site_type, deliveries) in site_steps(site, sequence.deliveries_at(&site.uid)) {
            let kind = ActivityType::from(site_type);
            if options.activity_types_to_omit.contains(&kind) {
                trace!(site = %site.uid, kind = kind.as_str(), "omitted activity");
                continue;
            }

            let segment = match site_type {
                SiteType::Destination | SiteType::Breaking => incoming.or(outgoing),
                SiteType::Origin | SiteType::Resuming => outgoing.or(incoming),
            };

            let mut activity = draft(
                transport,
                sequence,
                Step {
                    index: activities.len(),
                    site_type,
                    site,
                    segment,
                    previous_segment: incoming,
                    next_segment: outgoing,
                    deliveries,
                },
            );
            activity.can_be_done =
                state::can_be_done(&activity, &activities, transport, options.for_trucker);
            activities.push(activity);
        }
    }

    state::finalize_can_be_undone(&mut activities, transport);
    activities
}

/// What happens at one site, in emission order.
///
/// Unloadings come before loadings so grouping and ungrouping points read
/// in the order goods actually move. A site touched by no delivery and
/// carrying no action is a trucker change: a break start and a break end.
fn site_steps<'a>(
    site: &Site,
    deliveries: Option<&SiteDeliveries<'a>>,
) -> Vec<(SiteType, Vec<&'a Delivery>)> {
    let (origin, destination) = deliveries
        .map(|d| (d.origin.clone(), d.destination.clone()))
        .unwrap_or_default();

    let mut steps = Vec::with_capacity(2);
    if !destination.is_empty() {
        steps.push((SiteType::Destination, destination));
    }
    if !origin.is_empty() {
        steps.push((SiteType::Origin, origin));
    }
    if steps.is_empty() {
        if site.action.is_some() {
            debug!(site = %site.uid, "site with action and no delivery: no activity");
        } else {
            steps.push((SiteType::Breaking, Vec::new()));
            steps.push((SiteType::Resuming, Vec::new()));
        }
    }
    steps
}

struct Step<'s, 'a> {
    index: usize,
    site_type: SiteType,
    site: &'s Site,
    segment: Option<&'s Segment>,
    previous_segment: Option<&'s Segment>,
    next_segment: Option<&'s Segment>,
    deliveries: Vec<&'a Delivery>,
}

/// Build an activity with everything but the eligibility flags.
fn draft(transport: &Transport, sequence: &SiteSequence<'_>, step: Step<'_, '_>) -> Activity {
    let kind = ActivityType::from(step.site_type);
    let status_updates = state::scoped_updates(transport, &step.site.uid);
    let complete_status =
        state::complete_status(kind, &status_updates, transport.is_multiple_rounds).cloned();
    let status = state::resolve_status(kind, &status_updates, transport);

    let (documents, messages): (Vec<Document>, Vec<Message>) = sequence
        .attachments_at(&step.site.uid)
        .map(|a| {
            (
                a.documents.iter().map(|&d| d.clone()).collect(),
                a.messages.iter().map(|&m| m.clone()).collect(),
            )
        })
        .unwrap_or_default();

    let electronic_signature_required = complete_status
        .as_ref()
        .is_some_and(|s| s.awaits_electronic_signature());

    Activity {
        index: step.index,
        kind,
        site_type: step.site_type,
        site: step.site.clone(),
        segment: step.segment.cloned(),
        previous_segment: step.previous_segment.cloned(),
        next_segment: step.next_segment.cloned(),
        deliveries: step.deliveries.into_iter().cloned().collect(),
        status,
        can_be_done: false,
        can_be_undone: false,
        status_updates,
        complete_status,
        documents,
        messages,
        requires_washing: kind == ActivityType::Loading && transport.requires_washing,
        truck_washed: transport.has_status(StatusCategory::TruckWash),
        electronic_signature_required,
        is_cancelled: !transport.is_cancelled()
            && matches!(kind, ActivityType::Loading | ActivityType::Unloading)
            && step.site.is_cancelled,
        business_privacy: transport.business_privacy,
    }
}
