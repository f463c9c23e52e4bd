use std::collections::{BinaryHeap, HashMap};

use gtfs_structures::{Gtfs, Trip};
use itertools::Itertools;

use crate::feed::service_filter::ServiceFilter;
use crate::split::resolve_ops;
use crate::split::{ObservedTrip, Resolution, RouteSpecTable, SplitError, TripVisit};

/// Returns a trip's stop visits ordered (ascending) by stop sequence.
/// Internally uses [BinaryHeap] to sort; `stop_times.txt` rows carry no
/// ordering guarantee of their own.
pub fn ordered_visits(trip: &Trip) -> Vec<TripVisit> {
    let stop_queue_order: BinaryHeap<(u32, usize)> = trip
        .stop_times
        .iter()
        .enumerate()
        .map(|(i, st)| (st.stop_sequence, i))
        .collect();

    stop_queue_order
        .into_sorted_vec()
        .iter()
        .map(|(sequence, idx)| TripVisit::new(&trip.stop_times[*idx].stop.id, *sequence))
        .collect()
}

/// projects a loaded GTFS trip into the resolver's view of it.
pub fn observed_trip(trip: &Trip) -> ObservedTrip {
    ObservedTrip {
        trip_id: trip.id.clone(),
        route_id: trip.route_id.clone(),
        service_id: trip.service_id.clone(),
        visits: ordered_visits(trip),
    }
}

/// collects the trips of one route that survive the service filter,
/// sorted by trip id so downstream output is stable.
pub fn route_trips(gtfs: &Gtfs, route_id: &str, filter: &ServiceFilter) -> Vec<ObservedTrip> {
    gtfs.trips
        .values()
        .filter(|trip| trip.route_id == route_id)
        .filter(|trip| !filter.excludes(&trip.service_id))
        .map(observed_trip)
        .sorted_by(|x, y| x.trip_id.cmp(&y.trip_id))
        .collect_vec()
}

/// resolves every filtered trip of a route against its direction spec.
/// the resulting map is keyed by the original trip id; each value holds
/// one [Resolution] per stop visit, in visit order.
pub fn split_route(
    gtfs: &Gtfs,
    table: &RouteSpecTable,
    route_id: &str,
    filter: &ServiceFilter,
) -> Result<HashMap<String, Vec<Resolution>>, SplitError> {
    let spec = table.require(route_id)?;
    let trips = route_trips(gtfs, route_id, filter);
    log::info!("route {}: resolving {} trips", route_id, trips.len());
    resolve_ops::split_all_trips(spec, &trips)
}

#[cfg(test)]
mod test {
    use std::path::PathBuf;

    use gtfs_structures::Gtfs;

    use super::*;
    use crate::split::config::SplitConfig;
    use crate::split::DirectionAssignment;

    fn load_fixture() -> Gtfs {
        let fixture = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("fixtures")
            .join("gtfs");
        Gtfs::new(
            fixture
                .to_str()
                .unwrap_or_else(|| panic!("Failed to interpret {fixture:?} as string")),
        )
        .expect("Test feed not found in fixtures/gtfs")
    }

    fn fixture_table() -> RouteSpecTable {
        let json = r#"{
            "routes": [
                {
                    "route_id": "1",
                    "directions": [
                        {
                            "direction": "east",
                            "headsign": "Downtown Terminal",
                            "stops": ["SGR", "4046", "WELLAND"]
                        },
                        {
                            "direction": "west",
                            "headsign": "St George / Roach",
                            "stops": ["WELLAND", "LIO", "SGR"]
                        }
                    ]
                }
            ]
        }"#;
        SplitConfig::from_json(json)
            .expect("config should parse")
            .build()
            .expect("table should build")
    }

    #[test]
    fn test_visits_ordered_by_stop_sequence() {
        let gtfs = load_fixture();
        for trip in gtfs.trips.values() {
            let visits = ordered_visits(trip);
            assert!(visits
                .iter()
                .map(|v| v.sequence)
                .collect::<Vec<u32>>()
                .is_sorted());
            assert_eq!(visits.len(), trip.stop_times.len());
        }
    }

    #[test]
    fn test_service_filter_drops_weekend_trip() {
        let gtfs = load_fixture();
        let all = route_trips(&gtfs, "1", &ServiceFilter::all());
        assert_eq!(
            all.iter().map(|t| t.trip_id.as_str()).collect::<Vec<_>>(),
            vec!["T1", "T2"]
        );
        let weekday = route_trips(&gtfs, "1", &ServiceFilter::retaining(["WK"]));
        assert_eq!(
            weekday
                .iter()
                .map(|t| t.trip_id.as_str())
                .collect::<Vec<_>>(),
            vec!["T1"]
        );
        assert_eq!(weekday[0].service_id, "WK");
    }

    #[test]
    fn test_split_route_resolves_loop_trip() {
        let gtfs = load_fixture();
        let table = fixture_table();
        let resolved = split_route(&gtfs, &table, "1", &ServiceFilter::retaining(["WK"]))
            .expect("fixture trips should resolve");
        assert_eq!(resolved.len(), 1);
        let t1 = resolved.get("T1").expect("trip T1 is weekday");
        assert_eq!(t1.len(), 7);
        // the shared SGR visit pivots from the westbound run into the
        // eastbound run
        assert_eq!(
            t1[3],
            Resolution::Split(
                DirectionAssignment::new("1:west".to_string(), 1),
                DirectionAssignment::new("1:east".to_string(), 4),
            )
        );
        for (resolution, expected) in t1.iter().zip(["1:west", "1:west", "1:west"]) {
            match resolution {
                Resolution::Single(assignment) => {
                    assert_eq!(assignment.direction_trip_id, expected)
                }
                other => panic!("expected single assignment, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_unknown_route_is_an_error() {
        let gtfs = load_fixture();
        let table = fixture_table();
        let result = split_route(&gtfs, &table, "99", &ServiceFilter::all());
        assert!(matches!(result, Err(SplitError::UnknownRoute(_))));
    }
}
