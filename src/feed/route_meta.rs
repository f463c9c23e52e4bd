use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::split::SplitError;

static ROUTE_DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+$").unwrap());

/// per-route presentation metadata layered over the feed: short name
/// overrides for routes the agency publishes under awkward codes, and
/// brand colors keyed by route with an agency-wide fallback.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RouteMetaTable {
    #[serde(default)]
    pub short_name_overrides: HashMap<String, String>,
    #[serde(default)]
    pub colors: HashMap<String, String>,
    #[serde(default)]
    pub agency_color: Option<String>,
}

impl RouteMetaTable {
    /// the display short name for a route, honoring overrides.
    pub fn short_name<'a>(&'a self, route_id: &'a str, feed_short_name: &'a str) -> &'a str {
        match self.short_name_overrides.get(route_id) {
            Some(name) => name.as_str(),
            None => feed_short_name,
        }
    }

    /// parses a route id that must be purely numeric. feeds whose route
    /// ids carry letters need an override before they reach this point.
    pub fn numeric_route_id(&self, route_id: &str) -> Result<u64, SplitError> {
        if !ROUTE_DIGITS.is_match(route_id) {
            return Err(SplitError::MalformedRouteId(route_id.to_string()));
        }
        route_id
            .parse::<u64>()
            .map_err(|_| SplitError::MalformedRouteId(route_id.to_string()))
    }

    /// the brand color for a route, falling back to the agency color.
    pub fn color(&self, route_id: &str) -> Option<&str> {
        self.colors
            .get(route_id)
            .or(self.agency_color.as_ref())
            .map(|c| c.as_str())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn welland_meta() -> RouteMetaTable {
        RouteMetaTable {
            short_name_overrides: HashMap::from([("23".to_string(), "WEGO BL".to_string())]),
            colors: HashMap::from([
                ("1".to_string(), "00A651".to_string()),
                ("2".to_string(), "ED1C24".to_string()),
            ]),
            agency_color: Some("232C65".to_string()),
        }
    }

    #[test]
    fn test_short_name_override() {
        let meta = welland_meta();
        assert_eq!(meta.short_name("23", "23"), "WEGO BL");
        assert_eq!(meta.short_name("1", "1"), "1");
    }

    #[test]
    fn test_numeric_route_id() {
        let meta = welland_meta();
        assert_eq!(meta.numeric_route_id("508").expect("digits parse"), 508);
        assert!(matches!(
            meta.numeric_route_id("23A"),
            Err(SplitError::MalformedRouteId(_))
        ));
        assert!(matches!(
            meta.numeric_route_id(""),
            Err(SplitError::MalformedRouteId(_))
        ));
    }

    #[test]
    fn test_color_with_agency_fallback() {
        let meta = welland_meta();
        assert_eq!(meta.color("1"), Some("00A651"));
        assert_eq!(meta.color("99"), Some("232C65"));
        let bare = RouteMetaTable::default();
        assert_eq!(bare.color("1"), None);
    }
}
