use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::split::direction_slot::DirectionSlot;
use crate::split::route_spec::RouteDirectionSpec;
use crate::split::spec_table::RouteSpecTable;
use crate::split::split_error::SplitError;

/// hand-curated per-route direction configuration as it appears on disk.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SplitConfig {
    pub routes: Vec<RouteSpecConfig>,
}

/// one route's entry: exactly two direction slots.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RouteSpecConfig {
    pub route_id: String,
    pub directions: Vec<DirectionSlot>,
}

impl SplitConfig {
    pub fn from_json(json: &str) -> Result<SplitConfig, SplitError> {
        serde_json::from_str(json).map_err(|e| SplitError::ConfigReadError(format!("{e}")))
    }

    pub fn from_file(path: &Path) -> Result<SplitConfig, SplitError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            let filename = path.to_str().unwrap_or_default();
            SplitError::ConfigReadError(format!("failure reading '{filename}': {e}"))
        })?;
        SplitConfig::from_json(&contents)
    }

    /// validates every route entry and builds the immutable spec table.
    pub fn build(self) -> Result<RouteSpecTable, SplitError> {
        let mut specs: Vec<RouteDirectionSpec> = Vec::with_capacity(self.routes.len());
        for route in self.routes {
            let [slot_a, slot_b]: [DirectionSlot; 2] =
                route.directions.try_into().map_err(|slots: Vec<_>| {
                    SplitError::InvalidSlotCount {
                        route_id: route.route_id.clone(),
                        found: slots.len(),
                    }
                })?;
            specs.push(RouteDirectionSpec::build(&route.route_id, slot_a, slot_b)?);
        }
        RouteSpecTable::new(specs)
    }
}
