use std::collections::HashMap;

use itertools::Itertools;
use rayon::prelude::*;

use crate::split::adjacency::AdjacencyKey;
use crate::split::direction_slot::SlotId;
use crate::split::route_spec::RouteDirectionSpec;
use crate::split::split_error::SplitError;
use crate::split::trip_visit::{DirectionAssignment, ObservedTrip, Resolution, TripVisit};

/// a relevant stop observed elsewhere in the trip, with its sequence
/// distance from the visit under resolution.
#[derive(Debug, Clone, Copy)]
struct Landmark<'a> {
    stop_id: &'a str,
    distance: u32,
}

/// resolves one stop-visit of a trip to its direction-specific placement.
///
/// the search walks six key tiers in strict priority order: single-direction
/// exact pair, single-direction before-wildcard, single-direction
/// after-wildcard, then the same three shapes over the shared-key set.
/// wildcard tiers are only consulted when the opposite side has no landmark
/// at all (the visit sits at the very start or end of the trip); otherwise a
/// one-sided match could pre-empt the exact shared pair that marks a
/// direction pivot. within a tier the tightest bracket wins (smallest
/// sequence span), and remaining ties break lexicographically on the
/// landmark stop ids, so the result never depends on map iteration order.
///
/// a pure function of its inputs: no state persists across calls.
pub fn resolve(
    spec: &RouteDirectionSpec,
    trip: &ObservedTrip,
    current: &TripVisit,
) -> Result<Resolution, SplitError> {
    let (before, after) = partition_landmarks(spec, trip, current);

    let single = |key: &AdjacencyKey| spec.single_key_slot(key);
    let shared = |key: &AdjacencyKey| spec.shared_key_home(key);

    // tiers a-c: evidence private to one direction
    if let Some(slot) = best_pair(&before, &after, single, None) {
        return Ok(single_resolution(spec, slot, current));
    }
    if after.is_empty() {
        if let Some(slot) = best_wildcard(&before, AdjacencyKey::from_before, single) {
            return Ok(single_resolution(spec, slot, current));
        }
    }
    if before.is_empty() {
        if let Some(slot) = best_wildcard(&after, AdjacencyKey::from_after, single) {
            return Ok(single_resolution(spec, slot, current));
        }
    }

    // tiers d-f: the visit pivots between directions at a shared stop
    if let Some(home) = best_pair(&before, &after, shared, Some(&current.stop_id)) {
        return Ok(split_resolution(spec, home, trip, current));
    }
    if after.is_empty() {
        if let Some(home) = best_wildcard(&before, AdjacencyKey::from_before, shared) {
            return Ok(split_resolution(spec, home, trip, current));
        }
    }
    if before.is_empty() {
        if let Some(home) = best_wildcard(&after, AdjacencyKey::from_after, shared) {
            return Ok(split_resolution(spec, home, trip, current));
        }
    }

    Err(SplitError::UnresolvableVisit {
        route_id: spec.route_id().to_string(),
        trip_id: trip.trip_id.clone(),
        stop_id: current.stop_id.clone(),
        before_candidates: before.iter().map(|l| l.stop_id.to_string()).collect_vec(),
        after_candidates: after.iter().map(|l| l.stop_id.to_string()).collect_vec(),
    })
}

/// resolves every visit of a trip, in visit order.
pub fn resolve_trip(
    spec: &RouteDirectionSpec,
    trip: &ObservedTrip,
) -> Result<Vec<Resolution>, SplitError> {
    trip.visits
        .iter()
        .map(|visit| resolve(spec, trip, visit))
        .collect()
}

/// resolves all trips of one route in parallel. trips are independent of one
/// another and the direction spec is read-only, so this is a plain
/// data-parallel map.
pub fn split_all_trips(
    spec: &RouteDirectionSpec,
    trips: &[ObservedTrip],
) -> Result<HashMap<String, Vec<Resolution>>, SplitError> {
    trips
        .par_iter()
        .map(|trip| resolve_trip(spec, trip).map(|resolved| (trip.trip_id.clone(), resolved)))
        .collect()
}

fn single_resolution(
    spec: &RouteDirectionSpec,
    slot: SlotId,
    current: &TripVisit,
) -> Resolution {
    Resolution::Single(DirectionAssignment::new(
        spec.direction_trip_id(slot),
        current.sequence,
    ))
}

/// emits the two synthetic visits for a shared stop: the direction being
/// closed out first with synthetic sequence 1, then the home direction
/// keeping the original sequence number.
fn split_resolution(
    spec: &RouteDirectionSpec,
    home: SlotId,
    trip: &ObservedTrip,
    current: &TripVisit,
) -> Resolution {
    log::debug!(
        "route {} trip {}: stop {} at sequence {} split between directions {} and {}",
        spec.route_id(),
        trip.trip_id,
        current.stop_id,
        current.sequence,
        spec.slot(home.other()).direction,
        spec.slot(home).direction,
    );
    Resolution::Split(
        DirectionAssignment::new(spec.direction_trip_id(home.other()), 1),
        DirectionAssignment::new(spec.direction_trip_id(home), current.sequence),
    )
}

/// partitions the trip's other relevant visits into before/after landmark
/// lists. when the current visit itself is relevant and is the first (last)
/// visit of the whole trip, it also serves as its own before (after)
/// landmark at distance zero. both lists come back sorted by distance then
/// stop id, which fixes the candidate scan order.
fn partition_landmarks<'a>(
    spec: &RouteDirectionSpec,
    trip: &'a ObservedTrip,
    current: &'a TripVisit,
) -> (Vec<Landmark<'a>>, Vec<Landmark<'a>>) {
    let mut before: Vec<Landmark<'a>> = vec![];
    let mut after: Vec<Landmark<'a>> = vec![];
    for visit in &trip.visits {
        if !spec.is_relevant(&visit.stop_id) {
            continue;
        }
        if visit.sequence < current.sequence {
            before.push(Landmark {
                stop_id: &visit.stop_id,
                distance: current.sequence - visit.sequence,
            });
        } else if visit.sequence > current.sequence {
            after.push(Landmark {
                stop_id: &visit.stop_id,
                distance: visit.sequence - current.sequence,
            });
        }
    }
    if spec.is_relevant(&current.stop_id) {
        if let Some(first) = trip.visits.first() {
            if first.sequence == current.sequence {
                before.push(Landmark {
                    stop_id: &current.stop_id,
                    distance: 0,
                });
            }
        }
        if let Some(last) = trip.visits.last() {
            if last.sequence == current.sequence {
                after.push(Landmark {
                    stop_id: &current.stop_id,
                    distance: 0,
                });
            }
        }
    }
    before.sort_by(|x, y| (x.distance, x.stop_id).cmp(&(y.distance, y.stop_id)));
    after.sort_by(|x, y| (x.distance, x.stop_id).cmp(&(y.distance, y.stop_id)));
    (before, after)
}

/// best concrete before/after pair registered in the given key set,
/// minimizing (span, before id, after id). `own_stop` excludes the
/// degenerate candidate where a single-visit trip brackets itself.
fn best_pair<F>(
    before: &[Landmark],
    after: &[Landmark],
    lookup: F,
    own_stop: Option<&str>,
) -> Option<SlotId>
where
    F: Fn(&AdjacencyKey) -> Option<SlotId>,
{
    let mut best: Option<(u32, &str, &str, SlotId)> = None;
    for b in before {
        for a in after {
            if let Some(own) = own_stop {
                if b.stop_id == a.stop_id && b.stop_id == own {
                    continue;
                }
            }
            let slot = match lookup(&AdjacencyKey::pair(b.stop_id, a.stop_id)) {
                Some(slot) => slot,
                None => continue,
            };
            let span = b.distance.max(a.distance);
            let replace = match &best {
                None => true,
                Some((best_span, best_b, best_a, _)) => {
                    (span, b.stop_id, a.stop_id) < (*best_span, *best_b, *best_a)
                }
            };
            if replace {
                best = Some((span, b.stop_id, a.stop_id, slot));
            }
        }
    }
    best.map(|(_, _, _, slot)| slot)
}

/// best one-sided key over a single landmark list, minimizing
/// (distance, stop id).
fn best_wildcard<M, F>(landmarks: &[Landmark], make_key: M, lookup: F) -> Option<SlotId>
where
    M: Fn(&str) -> AdjacencyKey,
    F: Fn(&AdjacencyKey) -> Option<SlotId>,
{
    // landmarks are pre-sorted by (distance, stop id); first hit wins
    landmarks
        .iter()
        .find_map(|l| lookup(&make_key(l.stop_id)))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::split::direction_slot::DirectionSlot;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    /// outbound leaves the depot, inbound returns to it; End is the far
    /// terminal shared by both directions.
    fn depot_route() -> RouteDirectionSpec {
        RouteDirectionSpec::build(
            "42",
            DirectionSlot::new("outbound", "Far Terminal", &["Depot", "M1", "M2", "End"]),
            DirectionSlot::new("inbound", "Depot", &["End", "N1", "Depot"]),
        )
        .expect("spec should build")
    }

    fn welland_route_1() -> RouteDirectionSpec {
        RouteDirectionSpec::build(
            "1",
            DirectionSlot::new("east", "Downtown Terminal", &["SGR", "4046", "WELLAND"]),
            DirectionSlot::new("west", "St George / Roach", &["WELLAND", "LIO", "SGR"]),
        )
        .expect("spec should build")
    }

    fn trip(trip_id: &str, route_id: &str, visits: &[(&str, u32)]) -> ObservedTrip {
        ObservedTrip {
            trip_id: trip_id.to_string(),
            route_id: route_id.to_string(),
            service_id: "WK".to_string(),
            visits: visits
                .iter()
                .map(|(stop_id, sequence)| TripVisit::new(stop_id, *sequence))
                .collect(),
        }
    }

    fn single(direction_trip_id: &str, sequence: u32) -> Resolution {
        Resolution::Single(DirectionAssignment::new(
            direction_trip_id.to_string(),
            sequence,
        ))
    }

    #[test]
    fn test_single_direction_trip_keeps_sequence_numbers() {
        init_logging();
        let spec = depot_route();
        let trip = trip(
            "t1",
            "42",
            &[("Depot", 1), ("M1", 2), ("M2", 3), ("End", 4)],
        );
        let resolved = resolve_trip(&spec, &trip).expect("trip should resolve");
        assert_eq!(
            resolved,
            vec![
                single("42:outbound", 1),
                single("42:outbound", 2),
                single("42:outbound", 3),
                single("42:outbound", 4),
            ]
        );
    }

    #[test]
    fn test_shared_stop_splits_into_both_directions() {
        init_logging();
        let spec = depot_route();
        // N1 is exclusive to inbound, M1 to outbound: the depot visit at
        // sequence 5 pivots from the inbound run into the outbound run
        let trip = trip("t2", "42", &[("N1", 4), ("Depot", 5), ("M1", 6)]);
        let depot = &trip.visits[1];
        let resolved = resolve(&spec, &trip, depot).expect("depot visit should resolve");
        assert_eq!(
            resolved,
            Resolution::Split(
                DirectionAssignment::new("42:inbound".to_string(), 1),
                DirectionAssignment::new("42:outbound".to_string(), 5),
            )
        );
    }

    #[test]
    fn test_full_loop_trip_resolves_every_visit() {
        init_logging();
        let spec = welland_route_1();
        // X and Y are ordinary stops absent from the canonical sequences;
        // they resolve by bracketing landmarks
        let trip = trip(
            "loop",
            "1",
            &[
                ("WELLAND", 1),
                ("LIO", 2),
                ("X", 3),
                ("SGR", 4),
                ("Y", 5),
                ("4046", 6),
                ("WELLAND", 7),
            ],
        );
        let resolved = resolve_trip(&spec, &trip).expect("loop trip should resolve");
        assert_eq!(
            resolved,
            vec![
                single("1:west", 1),
                single("1:west", 2),
                single("1:west", 3),
                Resolution::Split(
                    DirectionAssignment::new("1:west".to_string(), 1),
                    DirectionAssignment::new("1:east".to_string(), 4),
                ),
                single("1:east", 5),
                single("1:east", 6),
                single("1:east", 7),
            ]
        );
    }

    #[test]
    fn test_trip_starting_mid_route_resolves_by_after_wildcard() {
        init_logging();
        let spec = welland_route_1();
        let trip = trip("short", "1", &[("Y", 1), ("4046", 2), ("WELLAND", 3)]);
        let first = &trip.visits[0];
        let resolved = resolve(&spec, &trip, first).expect("first visit should resolve");
        assert_eq!(resolved, single("1:east", 1));
    }

    #[test]
    fn test_equal_span_tie_breaks_lexicographically() {
        init_logging();
        let spec = RouteDirectionSpec::build(
            "9",
            DirectionSlot::new("out", "Out", &["P", "Q"]),
            DirectionSlot::new("in", "In", &["R", "S"]),
        )
        .expect("spec should build");
        // both (P,Q) and (R,S) bracket X at span 2; (P,Q) sorts first
        let trip = trip("tie", "9", &[("R", 3), ("P", 4), ("X", 5), ("S", 6), ("Q", 7)]);
        let x = &trip.visits[2];
        let first = resolve(&spec, &trip, x).expect("visit should resolve");
        assert_eq!(first, single("9:out", 5));
        // deterministic across repeated runs
        for _ in 0..10 {
            let again = resolve(&spec, &trip, x).expect("visit should resolve");
            assert_eq!(again, first);
        }
    }

    #[test]
    fn test_visit_without_landmarks_is_unresolvable() {
        init_logging();
        let spec = depot_route();
        let trip = trip("t3", "42", &[("Z1", 1), ("Z2", 2)]);
        let z1 = &trip.visits[0];
        let err = resolve(&spec, &trip, z1).expect_err("no landmark should match");
        match err {
            SplitError::UnresolvableVisit {
                route_id,
                trip_id,
                stop_id,
                before_candidates,
                after_candidates,
            } => {
                assert_eq!(route_id, "42");
                assert_eq!(trip_id, "t3");
                assert_eq!(stop_id, "Z1");
                assert!(before_candidates.is_empty());
                assert!(after_candidates.is_empty());
            }
            other => panic!("expected UnresolvableVisit, got {other:?}"),
        }
    }

    #[test]
    fn test_parallel_split_matches_sequential() {
        init_logging();
        let spec = welland_route_1();
        let trips: Vec<ObservedTrip> = (0..8)
            .map(|i| {
                trip(
                    &format!("t{i}"),
                    "1",
                    &[
                        ("WELLAND", 1),
                        ("LIO", 2),
                        ("SGR", 4),
                        ("4046", 6),
                        ("WELLAND", 7),
                    ],
                )
            })
            .collect();
        let parallel = split_all_trips(&spec, &trips).expect("all trips should resolve");
        assert_eq!(parallel.len(), trips.len());
        for t in &trips {
            let sequential = resolve_trip(&spec, t).expect("trip should resolve");
            assert_eq!(parallel.get(&t.trip_id), Some(&sequential));
        }
    }
}
