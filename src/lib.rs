//! # transport-catalogue
//!
//! In-memory catalogue of a bus network: stops with coordinates, routes over
//! them and directed road distances. Answers per-route statistics and lays the
//! network out as a sequence of vector drawing primitives.
//!
//! ## Example
//!
//! ```
//! use transport_catalogue::prelude::*;
//!
//! let mut catalogue = Catalogue::new();
//! let a = catalogue.add_stop("A", Coordinates::new(0.0, 0.0)).unwrap();
//! let b = catalogue.add_stop("B", Coordinates::new(0.0, 10.0)).unwrap();
//! catalogue.add_bus("X", ["A", "B"], true).unwrap();
//!
//! let mut distances = DistanceTable::new();
//! distances.set(a, b, 1000);
//!
//! let stat = StatsEngine::new(&catalogue, &distances).route_info("X").unwrap();
//! assert_eq!(stat.stops_count, 2);
//! assert_eq!(stat.route_length, 1000);
//! ```

pub mod catalogue;
pub mod error;
pub mod geo;
pub mod io;
pub mod render;
pub mod stats;

pub mod prelude {
    pub use crate::catalogue::{
        bus::{Bus, BusId},
        distance::DistanceTable,
        stop::{Stop, StopId},
        Catalogue,
    };
    pub use crate::error::CatalogueError;
    pub use crate::geo::{great_circle_distance, Coordinates};
    pub use crate::io::Network;
    pub use crate::render::{
        primitive::Primitive,
        projector::SphereProjector,
        settings::{Color, RenderSettings},
        MapRenderer,
    };
    pub use crate::stats::{BusStat, Curvature, StatsEngine};
}
