/// a before/after landmark pair used as evidence for which direction a
/// stop-visit belongs to. a `None` side is a wildcard meaning "any stop",
/// used when the trip under resolution has no landmark on that side (the
/// visit is at the very start or very end of the trip). modeling the
/// wildcard as `Option` rather than a sentinel stop id avoids colliding
/// with any real stop id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AdjacencyKey {
    pub before: Option<String>,
    pub after: Option<String>,
}

impl AdjacencyKey {
    /// a concrete before/after pair.
    pub fn pair(before: &str, after: &str) -> AdjacencyKey {
        AdjacencyKey {
            before: Some(before.to_string()),
            after: Some(after.to_string()),
        }
    }

    /// a one-sided key with only the before landmark known.
    pub fn from_before(before: &str) -> AdjacencyKey {
        AdjacencyKey {
            before: Some(before.to_string()),
            after: None,
        }
    }

    /// a one-sided key with only the after landmark known.
    pub fn from_after(after: &str) -> AdjacencyKey {
        AdjacencyKey {
            before: None,
            after: Some(after.to_string()),
        }
    }
}
