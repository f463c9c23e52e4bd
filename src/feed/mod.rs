pub mod gtfs_ops;
pub mod name_ops;
mod route_meta;
mod service_filter;
mod stop_code;

pub use route_meta::RouteMetaTable;
pub use service_filter::ServiceFilter;
pub use stop_code::{PrefixOffset, StopCodeMap};
