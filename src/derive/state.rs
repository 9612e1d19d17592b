//! Activity state: lifecycle status and done/undone eligibility.
//!
//! Status comes from the status updates scoped to the activity's site.
//! Eligibility depends on the surrounding activities: `can_be_done` looks
//! back at what precedes the activity, `can_be_undone` looks ahead at what
//! follows it.

use crate::model::{
    Activity, ActivityStatus, ActivityType, StatusCategory, StatusUpdate, Transport,
    TransportShape,
};

/// The status updates relevant to a site.
///
/// On a multiple-rounds transport the same sites are visited over and over,
/// so every update applies.
pub(super) fn scoped_updates(transport: &Transport, site_uid: &str) -> Vec<StatusUpdate> {
    transport
        .status_updates
        .iter()
        .filter(|s| transport.is_multiple_rounds || s.is_at_site(site_uid))
        .cloned()
        .collect()
}

fn completion_categories(kind: ActivityType, multiple_rounds: bool) -> &'static [StatusCategory] {
    match kind {
        ActivityType::Loading | ActivityType::Unloading if multiple_rounds => {
            &[StatusCategory::RoundsComplete]
        }
        ActivityType::Loading => &[StatusCategory::LoadingComplete, StatusCategory::Departed],
        ActivityType::Unloading => &[StatusCategory::UnloadingComplete, StatusCategory::Departed],
        ActivityType::BulkingBreakStart => &[StatusCategory::BulkingBreakStarted],
        ActivityType::BulkingBreakEnd => &[StatusCategory::BulkingBreakComplete],
    }
}

/// The most recent update completing an activity of this kind.
pub(super) fn complete_status(
    kind: ActivityType,
    updates: &[StatusUpdate],
    multiple_rounds: bool,
) -> Option<&StatusUpdate> {
    let categories = completion_categories(kind, multiple_rounds);
    updates
        .iter()
        .rev()
        .find(|s| categories.contains(&s.category))
}

/// Resolve the lifecycle status of an activity. First match wins.
pub(super) fn resolve_status(
    kind: ActivityType,
    updates: &[StatusUpdate],
    transport: &Transport,
) -> ActivityStatus {
    let multiple_rounds = transport.is_multiple_rounds;
    let has = |category: StatusCategory| updates.iter().any(|s| s.category == category);

    if !kind.is_break() && complete_status(kind, updates, multiple_rounds).is_some() {
        return ActivityStatus::Done;
    }
    if transport.is_cancelled() {
        return ActivityStatus::Cancelled;
    }
    let break_done = kind.is_break() && complete_status(kind, updates, false).is_some();
    if multiple_rounds {
        // Rounds replace the on-site and on-the-way steps, not break completion.
        return if break_done {
            ActivityStatus::Done
        } else if has(StatusCategory::RoundsStarted) {
            ActivityStatus::RoundsStarted
        } else {
            ActivityStatus::NotStarted
        };
    }

    let on_site = match kind {
        ActivityType::Loading => Some(StatusCategory::OnLoadingSite),
        ActivityType::Unloading => Some(StatusCategory::OnUnloadingSite),
        ActivityType::BulkingBreakStart | ActivityType::BulkingBreakEnd => None,
    };
    if on_site.is_some_and(has) {
        ActivityStatus::OnSite
    } else if has(StatusCategory::OnTheWay) {
        ActivityStatus::OnTheWay
    } else if break_done {
        ActivityStatus::Done
    } else {
        ActivityStatus::NotStarted
    }
}

/// Whether an activity may be marked done, given the activities before it.
///
/// Walks back from the most recent previous activity to the first one it
/// depends on: any break, or an activity sharing a delivery. A dependency of
/// the same type never blocks, nor does a break start block its break end;
/// otherwise the dependency must be done. For a trucker, a change of driver
/// ends the walk.
pub(super) fn can_be_done(
    activity: &Activity,
    previous: &[Activity],
    transport: &Transport,
    for_trucker: bool,
) -> bool {
    if matches!(
        activity.status,
        ActivityStatus::Done | ActivityStatus::Cancelled
    ) {
        return false;
    }
    if for_trucker && transport.has_status(StatusCategory::Done) {
        return false;
    }
    if transport.is_multiple_rounds {
        return true;
    }

    for prior in previous.iter().rev() {
        if for_trucker && prior.trucker_pk() != activity.trucker_pk() {
            return true;
        }
        if prior.kind.is_break() || activity.kind.is_break() || prior.shares_delivery_with(activity)
        {
            return prior.kind == activity.kind
                || (prior.kind == ActivityType::BulkingBreakStart
                    && activity.kind == ActivityType::BulkingBreakEnd)
                || prior.status == ActivityStatus::Done;
        }
    }
    true
}

/// Whether a completed activity may be reverted, given the activities after it.
pub(super) fn can_be_undone(activity: &Activity, later: &[Activity], transport: &Transport) -> bool {
    if transport.is_verified() || transport.has_been_amended() {
        return false;
    }
    if !activity.is_complete_for_undone() {
        return false;
    }

    let complex = transport.shape == TransportShape::Complex;
    !later.iter().any(|next| {
        next.kind != activity.kind
            && (!complex
                || next.kind == ActivityType::BulkingBreakStart
                || next.shares_delivery_with(activity))
            && is_complete_or_in_progress(next)
    })
}

fn is_complete_or_in_progress(activity: &Activity) -> bool {
    matches!(
        activity.status,
        ActivityStatus::OnTheWay | ActivityStatus::OnSite | ActivityStatus::Done
    ) || activity.is_complete_for_undone()
}

/// Fill in `can_be_undone` once the whole list is known.
pub(super) fn finalize_can_be_undone(activities: &mut [Activity], transport: &Transport) {
    let flags: Vec<bool> = activities
        .iter()
        .enumerate()
        .map(|(i, activity)| can_be_undone(activity, &activities[i + 1..], transport))
        .collect();
    for (activity, flag) in activities.iter_mut().zip(flags) {
        activity.can_be_undone = flag;
    }
}
