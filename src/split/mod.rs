mod adjacency;
pub mod config;
mod direction_slot;
pub mod resolve_ops;
mod route_spec;
mod spec_table;
mod split_error;
mod trip_visit;

pub use adjacency::AdjacencyKey;
pub use direction_slot::{DirectionSlot, SlotId};
pub use route_spec::RouteDirectionSpec;
pub use spec_table::RouteSpecTable;
pub use split_error::SplitError;
pub use trip_visit::{DirectionAssignment, ObservedTrip, Resolution, TripVisit};
