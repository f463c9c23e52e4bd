//! assignment of GTFS stop-visits to direction-specific sub-trips.
//!
//! some agencies publish loop-shaped routes: a single undifferentiated stop
//! sequence per route, shared by trips heading in either direction. this crate
//! resolves each stop-visit of such a trip to the correct direction, using a
//! hand-curated canonical stop order per direction ([`split::RouteDirectionSpec`]),
//! and splits stops genuinely served by both directions (a terminal or depot)
//! into one synthetic visit per direction ([`split::resolve_ops`]).
//!
//! the [`feed`] module carries the feed-side glue: bridging a loaded
//! [`gtfs_structures::Gtfs`] dataset into visit lists, service-id filtering,
//! stop-code normalization, route metadata tables, and free-text cleanup of
//! stop names and headsigns.

pub mod feed;
pub mod split;
