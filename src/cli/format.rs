//! Output formatting for CLI display.

use haul::derive::SiteDeliveries;
use haul::model::{Activity, MeansGroup, Segment, Site, SiteCategory};

/// One line per activity: index, type, status, eligibility, site, trucker.
pub(super) fn format_activity(activity: &Activity) -> String {
    let done = if activity.can_be_done { "do" } else { "-" };
    let undone = if activity.can_be_undone { "undo" } else { "-" };
    let mut line = format!(
        "{:>3}  {:<17}  {:<14}  {done:<2} {undone:<4}  {}",
        activity.index,
        activity.kind.as_str(),
        activity.status.as_str(),
        activity.site.label(),
    );
    if let Some(pk) = activity.trucker_pk() {
        line.push_str(&format!("  trucker {pk}"));
    }
    if activity.is_cancelled {
        line.push_str("  [site cancelled]");
    }
    line
}

pub(super) fn format_means(group: &MeansGroup) -> String {
    let count = group.activities.len();
    let noun = if count == 1 { "activity" } else { "activities" };
    match &group.means.breaking_site {
        Some(site) => format!("means {}  ({count} {noun}, after break at {site})", group.key),
        None => format!("means {}  ({count} {noun})", group.key),
    }
}

/// A sequenced site with the segments around it and its delivery counts.
pub(super) fn format_site(
    site: &Site,
    incoming: Option<&Segment>,
    outgoing: Option<&Segment>,
    deliveries: Option<&SiteDeliveries<'_>>,
) -> String {
    let (starting, ending) = deliveries.map_or((0, 0), |d| (d.origin.len(), d.destination.len()));
    format!(
        "{:<10}  {:<9}  in: {:<10}  out: {:<10}  deliveries: {ending} ending, {starting} starting",
        site.uid,
        category(site.category),
        segment_label(incoming),
        segment_label(outgoing),
    )
}

fn category(category: SiteCategory) -> &'static str {
    match category {
        SiteCategory::Loading => "loading",
        SiteCategory::Unloading => "unloading",
        SiteCategory::Breaking => "breaking",
        SiteCategory::Resuming => "resuming",
    }
}

fn segment_label(segment: Option<&Segment>) -> &str {
    match segment {
        Some(Segment { uid: Some(uid), .. }) => uid,
        Some(_) => "implicit",
        None => "-",
    }
}
