use std::collections::HashMap;

use crate::split::route_spec::RouteDirectionSpec;
use crate::split::split_error::SplitError;

/// immutable mapping from route id to that route's direction spec, built
/// once at startup from configuration and passed by reference into the
/// resolver. a trip arriving for a route with no spec is a configuration
/// error surfaced through [`RouteSpecTable::require`], never a guess.
#[derive(Debug, Clone, Default)]
pub struct RouteSpecTable {
    specs: HashMap<String, RouteDirectionSpec>,
}

impl RouteSpecTable {
    pub fn new(specs: Vec<RouteDirectionSpec>) -> Result<RouteSpecTable, SplitError> {
        let mut table: HashMap<String, RouteDirectionSpec> = HashMap::new();
        for spec in specs {
            let route_id = spec.route_id().to_string();
            if table.insert(route_id.clone(), spec).is_some() {
                return Err(SplitError::DuplicateRouteSpec(route_id));
            }
        }
        Ok(RouteSpecTable { specs: table })
    }

    pub fn get(&self, route_id: &str) -> Option<&RouteDirectionSpec> {
        self.specs.get(route_id)
    }

    pub fn require(&self, route_id: &str) -> Result<&RouteDirectionSpec, SplitError> {
        self.specs
            .get(route_id)
            .ok_or_else(|| SplitError::UnknownRoute(route_id.to_string()))
    }

    pub fn contains(&self, route_id: &str) -> bool {
        self.specs.contains_key(route_id)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::split::direction_slot::DirectionSlot;

    fn spec(route_id: &str) -> RouteDirectionSpec {
        RouteDirectionSpec::build(
            route_id,
            DirectionSlot::new("north", "Uptown", &["A", "B"]),
            DirectionSlot::new("south", "Downtown", &["B", "A"]),
        )
        .expect("spec should build")
    }

    #[test]
    fn test_lookup_by_route_id() {
        let table = RouteSpecTable::new(vec![spec("1"), spec("2")]).expect("table should build");
        assert_eq!(table.len(), 2);
        assert!(table.contains("1"));
        assert!(table.get("3").is_none());
        assert!(matches!(
            table.require("3"),
            Err(SplitError::UnknownRoute(_))
        ));
        assert_eq!(table.require("2").expect("route 2 exists").route_id(), "2");
    }

    #[test]
    fn test_duplicate_route_rejected() {
        let result = RouteSpecTable::new(vec![spec("1"), spec("1")]);
        assert!(matches!(result, Err(SplitError::DuplicateRouteSpec(_))));
    }
}
