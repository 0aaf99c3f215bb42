use serde::{Deserialize, Serialize};

pub const EARTH_RADIUS: f64 = 6_371_000.0;

/// Geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Great-circle distance in meters using the spherical law of cosines.
pub fn great_circle_distance(from: Coordinates, to: Coordinates) -> f64 {
    if from == to {
        return 0.0;
    }

    let (from_lat, to_lat) = (from.lat.to_radians(), to.lat.to_radians());
    let delta_lng = (from.lng - to.lng).abs().to_radians();

    // Rounding can push the cosine just outside [-1, 1] for antipodal or
    // near-identical points.
    let cos_angle = (from_lat.sin() * to_lat.sin()
        + from_lat.cos() * to_lat.cos() * delta_lng.cos())
    .clamp(-1.0, 1.0);

    cos_angle.acos() * EARTH_RADIUS
}
