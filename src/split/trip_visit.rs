use serde::{Deserialize, Serialize};

/// one observed stop-visit within a concrete trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TripVisit {
    /// stop id exactly as supplied by the feed, compared case-sensitively
    pub stop_id: String,
    /// strictly increasing (not necessarily contiguous) position within the trip
    pub sequence: u32,
}

impl TripVisit {
    pub fn new(stop_id: &str, sequence: u32) -> TripVisit {
        TripVisit {
            stop_id: stop_id.to_string(),
            sequence,
        }
    }
}

/// a concrete trip prepared for direction resolution: its identifying ids
/// and the full visit list in ascending sequence order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ObservedTrip {
    pub trip_id: String,
    pub route_id: String,
    pub service_id: String,
    /// stop-visits in ascending sequence order
    pub visits: Vec<TripVisit>,
}

/// the direction-specific placement of one (possibly synthetic) stop-visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DirectionAssignment {
    /// identifier of the direction-specific sub-trip this visit belongs to
    pub direction_trip_id: String,
    /// sequence number of the visit within that sub-trip
    pub sequence: u32,
}

impl DirectionAssignment {
    pub fn new(direction_trip_id: String, sequence: u32) -> DirectionAssignment {
        DirectionAssignment {
            direction_trip_id,
            sequence,
        }
    }
}

/// outcome of resolving one stop-visit.
///
/// a stop genuinely served by both directions (a terminal or depot) is split
/// into two synthetic visits: the direction being closed out receives
/// synthetic sequence 1 and is listed first, so that it always sorts ahead of
/// the visits of the direction being entered, which keeps the original
/// sequence number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// the visit belongs to exactly one direction
    Single(DirectionAssignment),
    /// the visit's stop is shared by both directions; closing direction first
    Split(DirectionAssignment, DirectionAssignment),
}

impl Resolution {
    /// the one or two assignments of this resolution, in emission order.
    pub fn assignments(&self) -> Vec<&DirectionAssignment> {
        match self {
            Resolution::Single(a) => vec![a],
            Resolution::Split(closing, entering) => vec![closing, entering],
        }
    }
}
