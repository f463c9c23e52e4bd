use serde::{Deserialize, Serialize};

/// addresses one of the two direction slots declared for a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotId {
    A,
    B,
}

impl SlotId {
    /// the opposite slot on the same route.
    pub fn other(self) -> SlotId {
        match self {
            SlotId::A => SlotId::B,
            SlotId::B => SlotId::A,
        }
    }
}

/// one travel direction of a route: a direction code, the rider-facing
/// headsign, and the canonical stop order for trips heading this way.
///
/// the canonical sequence is hand-curated configuration data. it lists
/// landmark stops in physical travel order, first to last; it does not need
/// to list every stop a real trip passes through, and it must not repeat a
/// stop id (an invariant the curator upholds, not the builder).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DirectionSlot {
    /// direction code, e.g. "east" or "inbound"
    pub direction: String,
    /// headsign label shown for trips traveling this direction
    pub headsign: String,
    /// canonical ordered stop ids, first to last
    pub stops: Vec<String>,
}

impl DirectionSlot {
    pub fn new(direction: &str, headsign: &str, stops: &[&str]) -> DirectionSlot {
        DirectionSlot {
            direction: direction.to_string(),
            headsign: headsign.to_string(),
            stops: stops.iter().map(|s| s.to_string()).collect(),
        }
    }
}
