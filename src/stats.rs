use std::collections::HashSet;

use itertools::Itertools;
use serde::{Serialize, Serializer};

use crate::{
    catalogue::{bus::Bus, distance::DistanceTable, stop::StopId, Catalogue},
    error::{CatalogueError, Result},
    geo::great_circle_distance,
};

/// Road length over geodesic length. Undefined when every stop of the route
/// sits on the same point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Curvature {
    Ratio(f64),
    Undefined,
}

impl Curvature {
    fn new(route_length: f64, geodesic_length: f64) -> Self {
        if geodesic_length > 0.0 {
            Curvature::Ratio(route_length / geodesic_length)
        } else {
            Curvature::Undefined
        }
    }

    pub fn ratio(self) -> Option<f64> {
        match self {
            Curvature::Ratio(ratio) => Some(ratio),
            Curvature::Undefined => None,
        }
    }
}

impl Serialize for Curvature {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Curvature::Ratio(ratio) => serializer.serialize_f64(*ratio),
            Curvature::Undefined => serializer.serialize_none(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusStat {
    pub stops_count: usize,
    pub unique_stops_count: usize,
    pub route_length: u64,
    pub geodesic_length: f64,
    pub curvature: Curvature,
}

pub struct StatsEngine<'a> {
    catalogue: &'a Catalogue,
    distances: &'a DistanceTable,
}

impl<'a> StatsEngine<'a> {
    pub fn new(catalogue: &'a Catalogue, distances: &'a DistanceTable) -> Self {
        Self {
            catalogue,
            distances,
        }
    }

    pub fn route_info(&self, bus_number: &str) -> Result<BusStat> {
        let bus = self
            .catalogue
            .find_bus(bus_number)
            .ok_or_else(|| CatalogueError::RouteNotFound(bus_number.to_owned()))?;

        Ok(self.bus_stat(bus))
    }

    fn bus_stat(&self, bus: &Bus) -> BusStat {
        let unique_stops_count = bus.stops.iter().collect::<HashSet<_>>().len();

        let mut route_length = 0;
        let mut geodesic_length = 0.0;

        for (&from, &to) in bus.stops.iter().tuple_windows() {
            route_length += self.road_distance(from, to);
            geodesic_length += self.geodesic_distance(from, to);
        }

        if !bus.is_roundtrip {
            for (&from, &to) in bus.stops.iter().rev().tuple_windows() {
                route_length += self.road_distance(from, to);
                geodesic_length += self.geodesic_distance(from, to);
            }
        }

        BusStat {
            stops_count: bus.stops_count(),
            unique_stops_count,
            route_length,
            geodesic_length,
            curvature: Curvature::new(route_length as f64, geodesic_length),
        }
    }

    /// Directed distance, falling back to the reverse direction. A pair with
    /// neither direction recorded contributes nothing.
    fn road_distance(&self, from: StopId, to: StopId) -> u64 {
        self.distances
            .get(from, to)
            .or_else(|| self.distances.get(to, from))
            .map_or(0, u64::from)
    }

    fn geodesic_distance(&self, from: StopId, to: StopId) -> f64 {
        great_circle_distance(
            self.catalogue.stop(from).coordinates,
            self.catalogue.stop(to).coordinates,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinates;
    use approx::assert_relative_eq;

    fn two_stops() -> (Catalogue, DistanceTable) {
        let mut catalogue = Catalogue::new();
        let a = catalogue.add_stop("A", Coordinates::new(0.0, 0.0)).unwrap();
        let b = catalogue.add_stop("B", Coordinates::new(0.0, 10.0)).unwrap();

        let mut distances = DistanceTable::new();
        distances.set(a, b, 1000);

        (catalogue, distances)
    }

    #[test]
    fn test_roundtrip_route() {
        let (mut catalogue, distances) = two_stops();
        catalogue.add_bus("X", ["A", "B"], true).unwrap();

        let stat = StatsEngine::new(&catalogue, &distances).route_info("X").unwrap();
        let geodesic = great_circle_distance(Coordinates::new(0.0, 0.0), Coordinates::new(0.0, 10.0));

        assert_eq!(stat.stops_count, 2);
        assert_eq!(stat.unique_stops_count, 2);
        assert_eq!(stat.route_length, 1000);
        assert_relative_eq!(stat.curvature.ratio().unwrap(), 1000.0 / geodesic);
    }

    #[test]
    fn test_return_leg_falls_back_to_reverse_direction() {
        let (mut catalogue, distances) = two_stops();
        catalogue.add_bus("Y", ["A", "B"], false).unwrap();

        let stat = StatsEngine::new(&catalogue, &distances).route_info("Y").unwrap();

        assert_eq!(stat.stops_count, 3);
        // B->A is not recorded, so the return leg reuses A->B.
        assert_eq!(stat.route_length, 2000);
    }

    #[test]
    fn test_missing_distances_contribute_zero() {
        let (mut catalogue, _) = two_stops();
        catalogue.add_bus("Z", ["A", "B"], false).unwrap();

        let distances = DistanceTable::new();
        let stat = StatsEngine::new(&catalogue, &distances).route_info("Z").unwrap();

        assert_eq!(stat.route_length, 0);
        assert_eq!(stat.curvature, Curvature::Ratio(0.0));
    }

    #[test]
    fn test_out_and_back_uses_each_direction() {
        let mut catalogue = Catalogue::new();
        let a = catalogue.add_stop("A", Coordinates::new(55.611087, 37.20829)).unwrap();
        let b = catalogue.add_stop("B", Coordinates::new(55.595884, 37.209755)).unwrap();
        let c = catalogue.add_stop("C", Coordinates::new(55.632761, 37.333324)).unwrap();
        catalogue.add_bus("750", ["A", "B", "C"], false).unwrap();

        let mut distances = DistanceTable::new();
        distances.set(a, b, 3900);
        distances.set(b, c, 9900);
        distances.set(c, b, 9500);
        distances.set(b, a, 3600);

        let stat = StatsEngine::new(&catalogue, &distances).route_info("750").unwrap();
        let forward = great_circle_distance(catalogue.stop(a).coordinates, catalogue.stop(b).coordinates)
            + great_circle_distance(catalogue.stop(b).coordinates, catalogue.stop(c).coordinates);

        assert_eq!(stat.stops_count, 5);
        assert_eq!(stat.unique_stops_count, 3);
        assert_eq!(stat.route_length, 3900 + 9900 + 9500 + 3600);
        assert_relative_eq!(stat.geodesic_length, 2.0 * forward, max_relative = 1e-12);
        assert!(stat.curvature.ratio().unwrap() >= 1.0);
    }

    #[test]
    fn test_unique_stops_ignore_repeats() {
        let (mut catalogue, distances) = two_stops();
        catalogue.add_bus("R", ["A", "B", "A"], true).unwrap();

        let stat = StatsEngine::new(&catalogue, &distances).route_info("R").unwrap();

        assert_eq!(stat.stops_count, 3);
        assert_eq!(stat.unique_stops_count, 2);
        assert_eq!(stat.route_length, 2000);
    }

    #[test]
    fn test_single_point_route_has_undefined_curvature() {
        let (mut catalogue, distances) = two_stops();
        catalogue.add_bus("P", ["A", "A"], true).unwrap();
        catalogue.add_bus("E", Vec::<&str>::new(), false).unwrap();

        let engine = StatsEngine::new(&catalogue, &distances);
        assert_eq!(engine.route_info("P").unwrap().curvature, Curvature::Undefined);

        let empty = engine.route_info("E").unwrap();
        assert_eq!(empty.stops_count, 0);
        assert_eq!(empty.curvature, Curvature::Undefined);
    }

    #[test]
    fn test_unknown_route() {
        let (catalogue, distances) = two_stops();
        assert_eq!(
            StatsEngine::new(&catalogue, &distances).route_info("404"),
            Err(CatalogueError::RouteNotFound("404".into()))
        );
    }
}
