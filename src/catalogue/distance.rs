use std::collections::HashMap;

use crate::catalogue::stop::StopId;

/// Directed road distances in meters. `(a, b)` and `(b, a)` are independent.
#[derive(Debug, Default, Clone)]
pub struct DistanceTable {
    distances: HashMap<(StopId, StopId), u32>,
}

impl DistanceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, from: StopId, to: StopId, distance: u32) {
        self.distances.insert((from, to), distance);
    }

    /// Exact-direction lookup. Callers decide whether to fall back to the
    /// reverse direction.
    pub fn get(&self, from: StopId, to: StopId) -> Option<u32> {
        self.distances.get(&(from, to)).copied()
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }
}
