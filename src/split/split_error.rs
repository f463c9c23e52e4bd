#[derive(thiserror::Error, Debug)]
pub enum SplitError {
    #[error("route '{route_id}': direction '{direction}' has an empty canonical stop sequence")]
    EmptySlotSequence { route_id: String, direction: String },
    #[error("route '{route_id}': expected exactly two direction slots, found {found}")]
    InvalidSlotCount { route_id: String, found: usize },
    #[error("route '{0}' is configured more than once")]
    DuplicateRouteSpec(String),
    #[error("no direction spec configured for route '{0}'")]
    UnknownRoute(String),
    #[error(
        "route '{route_id}', trip '{trip_id}': no adjacency key matches stop '{stop_id}' \
         (before candidates: {before_candidates:?}, after candidates: {after_candidates:?})"
    )]
    UnresolvableVisit {
        route_id: String,
        trip_id: String,
        stop_id: String,
        before_candidates: Vec<String>,
        after_candidates: Vec<String>,
    },
    #[error("route '{route_id}', direction '{direction}': stop '{stop_id}' is not in the canonical sequence")]
    StopNotInSequence {
        route_id: String,
        direction: String,
        stop_id: String,
    },
    #[error("failed to read split configuration: {0}")]
    ConfigReadError(String),
    #[error("unknown stop code '{0}'")]
    UnknownStopCode(String),
    #[error("route '{0}' has no usable numeric route id")]
    MalformedRouteId(String),
}
