use std::collections::HashSet;

/// membership filter over the service ids worth keeping for a run. the
/// upstream calendar scan decides which service ids are useful; trips,
/// calendars, and calendar dates attached to any other service id are
/// excluded before direction resolution.
#[derive(Debug, Clone, Default)]
pub struct ServiceFilter {
    /// `None` keeps every service
    retained: Option<HashSet<String>>,
}

impl ServiceFilter {
    /// a filter that keeps every service id.
    pub fn all() -> ServiceFilter {
        ServiceFilter { retained: None }
    }

    /// a filter that keeps only the listed service ids.
    pub fn retaining<I, S>(service_ids: I) -> ServiceFilter
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ServiceFilter {
            retained: Some(service_ids.into_iter().map(|s| s.into()).collect()),
        }
    }

    pub fn excludes(&self, service_id: &str) -> bool {
        match &self.retained {
            None => false,
            Some(retained) => !retained.contains(service_id),
        }
    }
}
