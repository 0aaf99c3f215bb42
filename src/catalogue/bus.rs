use crate::catalogue::stop::StopId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BusId(usize);

impl BusId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bus {
    pub number: String,
    pub stops: Vec<StopId>,
    pub is_roundtrip: bool,
}

impl Bus {
    pub fn new(number: String, stops: Vec<StopId>, is_roundtrip: bool) -> Self {
        Self {
            number,
            stops,
            is_roundtrip,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Number of stops visited along the full traversal. An out-and-back bus
    /// visits its terminal once and every other stop twice.
    pub fn stops_count(&self) -> usize {
        if self.is_roundtrip {
            self.stops.len()
        } else {
            (2 * self.stops.len()).saturating_sub(1)
        }
    }

    /// Stops in the order the bus visits them, including the return leg of an
    /// out-and-back route.
    pub fn traversal(&self) -> impl Iterator<Item = StopId> + '_ {
        let return_leg = if self.is_roundtrip {
            &[][..]
        } else {
            &self.stops[..self.stops.len().saturating_sub(1)]
        };

        self.stops
            .iter()
            .chain(return_leg.iter().rev())
            .copied()
    }

    /// Stops carrying a bus label: the first stop, plus the last one when an
    /// out-and-back route ends somewhere else.
    pub fn terminals(&self) -> Vec<StopId> {
        let mut terminals = Vec::with_capacity(2);
        if let Some(&first) = self.stops.first() {
            terminals.push(first);
            if let Some(&last) = self.stops.last() {
                if !self.is_roundtrip && last != first {
                    terminals.push(last);
                }
            }
        }
        terminals
    }
}
