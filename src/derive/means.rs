//! Grouping activities into runs performed by the same means.

use std::collections::BTreeSet;

use tracing::trace;

use crate::model::{Activity, ActivityMeans, ActivityType, MeansGroup};

/// Split an activity sequence into consecutive runs by means.
///
/// A run ends when the trucker or equipment changes, or at a break end; a run
/// opened by a break end is tagged with the break site. Omitted types are
/// removed after the split, empty runs are dropped, and the survivors are
/// re-indexed across the whole output. Runs are never merged, so the same
/// means can appear in several groups.
pub fn group_by_means(
    activities: Vec<Activity>,
    omit: &BTreeSet<ActivityType>,
) -> Vec<MeansGroup> {
    let mut runs: Vec<(ActivityMeans, Vec<Activity>)> = Vec::new();

    for activity in activities {
        let mut means = ActivityMeans::of_segment(activity.segment.as_ref());
        let break_end = activity.kind == ActivityType::BulkingBreakEnd;

        let continues = !break_end
            && runs
                .last()
                .is_some_and(|(current, _)| current.same_equipment(&means));

        match runs.last_mut() {
            Some((_, run)) if continues => run.push(activity),
            _ => {
                if break_end {
                    means.breaking_site = Some(activity.site.uid.clone());
                }
                trace!(key = %means.key(), "new means run");
                runs.push((means, vec![activity]));
            }
        }
    }

    let mut index = 0;
    runs.into_iter()
        .filter_map(|(means, run)| {
            let mut kept: Vec<Activity> = run
                .into_iter()
                .filter(|a| !omit.contains(&a.kind))
                .collect();
            if kept.is_empty() {
                return None;
            }
            for activity in &mut kept {
                activity.index = index;
                index += 1;
            }
            Some(MeansGroup {
                key: means.key(),
                means,
                activities: kept,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::derive::{DeriveOptions, activities, fixtures::*};
    use crate::model::{SiteCategory, Trailer, Vehicle};

    fn derive_all(transport: &crate::model::Transport) -> Vec<Activity> {
        activities(transport, &DeriveOptions::default()).unwrap()
    }

    #[test]
    fn single_means_is_one_group() {
        let groups = group_by_means(derive_all(&simple()), &BTreeSet::new());

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].key, "||1||");
        assert_eq!(groups[0].activities.len(), 2);
    }

    #[test]
    fn equipment_change_without_break_starts_a_run() {
        let loading = site("loading", SiteCategory::Loading);
        let hub = site("hub", SiteCategory::Unloading);
        let unloading = site("unloading", SiteCategory::Unloading);
        let mut first = segment(0, &loading, &hub, Some(1));
        first.vehicle = Some(Vehicle {
            license_plate: "AA-111-AA".into(),
            fleet_number: None,
        });
        let mut second = segment(1, &hub, &unloading, Some(1));
        second.vehicle = first.vehicle.clone();
        second.trailers = vec![Trailer {
            license_plate: "TR-9".into(),
        }];
        let transport = transport(
            vec![first, second],
            vec![
                delivery("d1", &loading, &hub),
                delivery("d2", &hub, &unloading),
            ],
        );

        let groups = group_by_means(derive_all(&transport), &BTreeSet::new());

        let keys: Vec<_> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, ["AA-111-AA||1||", "AA-111-AA|TR-9|1||"]);
        // Unloading at the hub rides the incoming segment, loading the outgoing one.
        assert_eq!(groups[0].activities.len(), 2);
        assert_eq!(groups[1].activities.len(), 2);
        assert!(groups.iter().all(|g| g.means.breaking_site.is_none()));
    }

    #[test]
    fn break_end_starts_a_run_even_with_same_means() {
        let mut transport = trucker_change();
        transport.segments[1].trucker = transport.segments[0].trucker.clone();

        let groups = group_by_means(derive_all(&transport), &BTreeSet::new());

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].key, "||1||");
        assert_eq!(groups[1].key, "||1||break");
        assert_eq!(groups[1].activities[0].kind, ActivityType::BulkingBreakEnd);
    }

    #[test]
    fn repeated_means_are_not_merged() {
        let mut transport = trucker_change();
        let loading = site("loading", SiteCategory::Loading);
        let back = site("back", SiteCategory::Unloading);
        let unloading = transport.segments[1].destination.clone();
        transport.segments.push(segment(2, &unloading, &back, Some(1)));
        transport.deliveries.push(delivery("d2", &unloading, &back));
        transport.deliveries.push(delivery("d3", &loading, &back));

        let groups = group_by_means(derive_all(&transport), &BTreeSet::new());

        let truckers: Vec<_> = groups.iter().map(|g| g.means.trucker).collect();
        assert_eq!(truckers, [Some(1), Some(2), Some(1)]);
    }

    #[test]
    fn omission_drops_empty_runs_and_reindexes() {
        let transport = trucker_change();
        let omit = BTreeSet::from([ActivityType::Loading, ActivityType::BulkingBreakStart]);

        let groups = group_by_means(derive_all(&transport), &omit);

        assert_eq!(groups.len(), 1);
        let indices: Vec<_> = groups[0].activities.iter().map(|a| a.index).collect();
        assert_eq!(indices, [0, 1]);
        assert_eq!(groups[0].means.breaking_site.as_deref(), Some("break"));
    }

    #[test]
    fn empty_input_has_no_groups() {
        assert!(group_by_means(Vec::new(), &BTreeSet::new()).is_empty());
    }
}
