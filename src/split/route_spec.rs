use std::collections::{HashMap, HashSet};

use crate::split::adjacency::AdjacencyKey;
use crate::split::direction_slot::{DirectionSlot, SlotId};
use crate::split::split_error::SplitError;

/// one route's two direction slots plus the adjacency-key sets derived from
/// their canonical stop sequences. built once at route-configuration time and
/// immutable thereafter, so it is safe to share across any number of worker
/// threads resolving different trips.
#[derive(Debug, Clone)]
pub struct RouteDirectionSpec {
    route_id: String,
    slot_a: DirectionSlot,
    slot_b: DirectionSlot,
    /// keys appearing in exactly one slot's closure, mapped to that slot
    single_keys: HashMap<AdjacencyKey, SlotId>,
    /// keys pairing stops exclusive to opposite slots, mapped to the home
    /// slot (the direction being entered, which keeps the original sequence)
    shared_keys: HashMap<AdjacencyKey, SlotId>,
    /// every stop id appearing in any adjacency key
    relevant_stops: HashSet<String>,
}

impl RouteDirectionSpec {
    /// derives the adjacency-key sets from two canonical direction sequences.
    ///
    /// single-direction keys are the upper-triangular closure of each slot's
    /// sequence (every ordered stop pair, plus one-sided wildcard keys for
    /// every stop), minus any key that both closures produce: a key present
    /// in both sequences carries no direction evidence and is excluded.
    ///
    /// shared keys pair each stop exclusive to one slot with each stop
    /// exclusive to the other, in both orientations. they mark a visit that
    /// pivots between directions at a stop served by both (a terminal or
    /// depot), which must be split into one synthetic visit per direction.
    pub fn build(
        route_id: &str,
        slot_a: DirectionSlot,
        slot_b: DirectionSlot,
    ) -> Result<RouteDirectionSpec, SplitError> {
        for slot in [&slot_a, &slot_b] {
            if slot.stops.is_empty() {
                return Err(SplitError::EmptySlotSequence {
                    route_id: route_id.to_string(),
                    direction: slot.direction.clone(),
                });
            }
        }

        let closure_a = sequence_closure(&slot_a.stops);
        let closure_b = sequence_closure(&slot_b.stops);

        let mut single_keys: HashMap<AdjacencyKey, SlotId> = HashMap::new();
        for key in closure_a.difference(&closure_b) {
            single_keys.insert(key.clone(), SlotId::A);
        }
        for key in closure_b.difference(&closure_a) {
            single_keys.insert(key.clone(), SlotId::B);
        }

        let stops_a: HashSet<&str> = slot_a.stops.iter().map(|s| s.as_str()).collect();
        let stops_b: HashSet<&str> = slot_b.stops.iter().map(|s| s.as_str()).collect();
        let only_a: Vec<&str> = slot_a
            .stops
            .iter()
            .map(|s| s.as_str())
            .filter(|s| !stops_b.contains(s))
            .collect();
        let only_b: Vec<&str> = slot_b
            .stops
            .iter()
            .map(|s| s.as_str())
            .filter(|s| !stops_a.contains(s))
            .collect();

        let mut shared_keys: HashMap<AdjacencyKey, SlotId> = HashMap::new();
        for s in &only_a {
            for t in &only_b {
                if s != t {
                    // before exclusive to A, after exclusive to B: the visit
                    // closes out direction A and enters direction B
                    shared_keys.insert(AdjacencyKey::pair(s, t), SlotId::B);
                    shared_keys.insert(AdjacencyKey::pair(t, s), SlotId::A);
                }
            }
            shared_keys.insert(AdjacencyKey::from_before(s), SlotId::B);
            shared_keys.insert(AdjacencyKey::from_after(s), SlotId::A);
        }
        for t in &only_b {
            shared_keys.insert(AdjacencyKey::from_before(t), SlotId::A);
            shared_keys.insert(AdjacencyKey::from_after(t), SlotId::B);
        }

        let relevant_stops: HashSet<String> = slot_a
            .stops
            .iter()
            .chain(slot_b.stops.iter())
            .cloned()
            .collect();

        Ok(RouteDirectionSpec {
            route_id: route_id.to_string(),
            slot_a,
            slot_b,
            single_keys,
            shared_keys,
            relevant_stops,
        })
    }

    pub fn route_id(&self) -> &str {
        &self.route_id
    }

    pub fn slot(&self, id: SlotId) -> &DirectionSlot {
        match id {
            SlotId::A => &self.slot_a,
            SlotId::B => &self.slot_b,
        }
    }

    /// the slot whose direction code matches, if any.
    pub fn slot_by_direction(&self, direction: &str) -> Option<SlotId> {
        if self.slot_a.direction == direction {
            Some(SlotId::A)
        } else if self.slot_b.direction == direction {
            Some(SlotId::B)
        } else {
            None
        }
    }

    /// identifier of the direction-specific sub-trip materialized for a slot.
    pub fn direction_trip_id(&self, id: SlotId) -> String {
        format!("{}:{}", self.route_id, self.slot(id).direction)
    }

    /// true if the stop participates in any adjacency key of this route.
    pub fn is_relevant(&self, stop_id: &str) -> bool {
        self.relevant_stops.contains(stop_id)
    }

    /// the slot owning a single-direction key, if the key is registered.
    pub fn single_key_slot(&self, key: &AdjacencyKey) -> Option<SlotId> {
        self.single_keys.get(key).copied()
    }

    /// the home slot of a shared key, if the key is registered.
    pub fn shared_key_home(&self, key: &AdjacencyKey) -> Option<SlotId> {
        self.shared_keys.get(key).copied()
    }

    /// relative order of two stops within one slot's canonical sequence, as
    /// the difference of their indices: negative when `stop_a` travels before
    /// `stop_b`, positive when after, zero when they are the same stop.
    /// errors when either stop is absent from the slot's sequence.
    pub fn compare_sequence_position(
        &self,
        id: SlotId,
        stop_a: &str,
        stop_b: &str,
    ) -> Result<i64, SplitError> {
        let slot = self.slot(id);
        let index_of = |stop_id: &str| -> Result<usize, SplitError> {
            slot.stops
                .iter()
                .position(|s| s == stop_id)
                .ok_or_else(|| SplitError::StopNotInSequence {
                    route_id: self.route_id.clone(),
                    direction: slot.direction.clone(),
                    stop_id: stop_id.to_string(),
                })
        };
        let a = index_of(stop_a)?;
        let b = index_of(stop_b)?;
        Ok(a as i64 - b as i64)
    }
}

/// every ordered pair `(stops[i], stops[j])` with `i < j`, plus one-sided
/// wildcard keys for every stop. the full upper-triangular closure lets the
/// resolver match against any before/after landmark pair, not only immediate
/// neighbors.
fn sequence_closure(stops: &[String]) -> HashSet<AdjacencyKey> {
    let mut keys: HashSet<AdjacencyKey> = HashSet::new();
    for (i, before) in stops.iter().enumerate() {
        for after in stops.iter().skip(i + 1) {
            keys.insert(AdjacencyKey::pair(before, after));
        }
        keys.insert(AdjacencyKey::from_before(before));
        keys.insert(AdjacencyKey::from_after(before));
    }
    keys
}
