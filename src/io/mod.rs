pub mod json;
pub mod text;

use anyhow::Context;

use crate::{
    catalogue::{distance::DistanceTable, Catalogue},
    geo::Coordinates,
    stats::StatsEngine,
};

/// A loaded transport network: the catalogue plus its road distances.
#[derive(Debug, Default)]
pub struct Network {
    pub catalogue: Catalogue,
    pub distances: DistanceTable,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> StatsEngine<'_> {
        StatsEngine::new(&self.catalogue, &self.distances)
    }

    /// Records `from -> to`. Returns `false` and stores nothing when either
    /// stop is unknown.
    pub fn set_distance(&mut self, from: &str, to: &str, distance: u32) -> bool {
        match (self.catalogue.stop_id(from), self.catalogue.stop_id(to)) {
            (Some(from), Some(to)) => {
                self.distances.set(from, to, distance);
                true
            }
            _ => false,
        }
    }

    pub(crate) fn add_stop(&mut self, name: &str, lat: f64, lng: f64) -> anyhow::Result<()> {
        self.catalogue
            .add_stop(name, Coordinates::new(lat, lng))
            .with_context(|| format!("Failed to add stop {name}"))?;
        Ok(())
    }

    pub(crate) fn add_bus(
        &mut self,
        number: &str,
        stops: &[String],
        is_roundtrip: bool,
    ) -> anyhow::Result<()> {
        self.catalogue
            .add_bus(number, stops, is_roundtrip)
            .with_context(|| format!("Failed to add bus {number}"))?;
        Ok(())
    }
}
