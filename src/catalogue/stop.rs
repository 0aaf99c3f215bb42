use crate::geo::Coordinates;

/// Arena index of a stop within the catalogue that registered it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StopId(usize);

impl StopId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub name: String,
    pub coordinates: Coordinates,
}

impl Stop {
    pub fn new(name: String, coordinates: Coordinates) -> Self {
        Self { name, coordinates }
    }
}
