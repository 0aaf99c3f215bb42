pub mod bus;
pub mod distance;
pub mod stop;

use std::collections::{BTreeSet, HashMap, HashSet};

use itertools::Itertools;
use tracing::debug;

use crate::{
    catalogue::{
        bus::{Bus, BusId},
        stop::{Stop, StopId},
    },
    error::{CatalogueError, Result},
    geo::Coordinates,
};

/// Owns every stop and bus. Records live in append-only arenas and all
/// cross references go through `StopId`/`BusId`.
#[derive(Debug, Default)]
pub struct Catalogue {
    stops: Vec<Stop>,
    buses: Vec<Bus>,
    stop_index: HashMap<String, StopId>,
    bus_index: HashMap<String, BusId>,
    // Parallel to `stops`.
    buses_by_stop: Vec<BTreeSet<String>>,
}

impl Catalogue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_stop(&mut self, name: &str, coordinates: Coordinates) -> Result<StopId> {
        if name.is_empty() {
            return Err(CatalogueError::EmptyName);
        }
        if self.stop_index.contains_key(name) {
            return Err(CatalogueError::DuplicateStop(name.to_owned()));
        }

        let id = StopId::new(self.stops.len());
        self.stops.push(Stop::new(name.to_owned(), coordinates));
        self.buses_by_stop.push(BTreeSet::new());
        self.stop_index.insert(name.to_owned(), id);

        debug!(stop = name, lat = coordinates.lat, lng = coordinates.lng, "registered stop");
        Ok(id)
    }

    /// Registers a bus over already registered stops. On error nothing is
    /// stored.
    pub fn add_bus<I, S>(&mut self, number: &str, stop_names: I, is_roundtrip: bool) -> Result<BusId>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if number.is_empty() {
            return Err(CatalogueError::EmptyName);
        }
        if self.bus_index.contains_key(number) {
            return Err(CatalogueError::DuplicateBus(number.to_owned()));
        }

        let stops = stop_names
            .into_iter()
            .map(|name| {
                let name = name.as_ref();
                self.stop_id(name)
                    .ok_or_else(|| CatalogueError::UnknownStopReference {
                        bus: number.to_owned(),
                        stop: name.to_owned(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        // Both legs of an out-and-back route visit the same stops, so the
        // forward sequence covers the back-references.
        for stop in stops.iter().unique() {
            self.buses_by_stop[stop.index()].insert(number.to_owned());
        }

        let id = BusId::new(self.buses.len());
        debug!(
            bus = number,
            stops = stops.len(),
            is_roundtrip,
            "registered bus"
        );
        self.buses
            .push(Bus::new(number.to_owned(), stops, is_roundtrip));
        self.bus_index.insert(number.to_owned(), id);

        Ok(id)
    }

    pub fn stop_id(&self, name: &str) -> Option<StopId> {
        self.stop_index.get(name).copied()
    }

    pub fn bus_id(&self, number: &str) -> Option<BusId> {
        self.bus_index.get(number).copied()
    }

    pub fn find_stop(&self, name: &str) -> Option<&Stop> {
        self.stop_id(name).map(|id| self.stop(id))
    }

    pub fn find_bus(&self, number: &str) -> Option<&Bus> {
        self.bus_id(number).map(|id| self.bus(id))
    }

    /// Panics if `id` was issued by another catalogue.
    pub fn stop(&self, id: StopId) -> &Stop {
        &self.stops[id.index()]
    }

    /// Panics if `id` was issued by another catalogue.
    pub fn bus(&self, id: BusId) -> &Bus {
        &self.buses[id.index()]
    }

    /// Bus numbers serving a stop, sorted and without repeats.
    pub fn buses_through_stop(&self, name: &str) -> Result<&BTreeSet<String>> {
        self.stop_id(name)
            .map(|id| &self.buses_by_stop[id.index()])
            .ok_or_else(|| CatalogueError::StopNotFound(name.to_owned()))
    }

    pub fn all_buses_sorted(&self) -> Vec<(&str, &Bus)> {
        self.buses
            .iter()
            .map(|bus| (bus.number.as_str(), bus))
            .sorted_by_key(|(number, _)| *number)
            .collect()
    }

    /// Distinct stops served by any bus, sorted by name.
    pub fn served_stops_sorted(&self) -> Vec<&Stop> {
        self.buses
            .iter()
            .flat_map(|bus| bus.stops.iter().copied())
            .collect::<HashSet<_>>()
            .into_iter()
            .map(|id| self.stop(id))
            .sorted_by(|a, b| a.name.cmp(&b.name))
            .collect()
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    pub fn bus_count(&self) -> usize {
        self.buses.len()
    }
}
