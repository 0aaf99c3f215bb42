use geo_types::Coord;

use crate::geo::Coordinates;

const EPSILON: f64 = 1e-6;

fn is_zero(value: f64) -> bool {
    value.abs() < EPSILON
}

/// Fits a set of geographic points into a `width` x `height` canvas, keeping
/// `padding` free on every side. North is up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereProjector {
    padding: f64,
    min_lng: f64,
    max_lat: f64,
    zoom: f64,
}

impl SphereProjector {
    pub fn new<I>(points: I, width: f64, height: f64, padding: f64) -> Self
    where
        I: IntoIterator<Item = Coordinates>,
    {
        let mut points = points.into_iter();
        let Some(first) = points.next() else {
            return Self {
                padding,
                min_lng: 0.0,
                max_lat: 0.0,
                zoom: 0.0,
            };
        };

        let (mut min_lng, mut max_lng) = (first.lng, first.lng);
        let (mut min_lat, mut max_lat) = (first.lat, first.lat);
        for point in points {
            min_lng = min_lng.min(point.lng);
            max_lng = max_lng.max(point.lng);
            min_lat = min_lat.min(point.lat);
            max_lat = max_lat.max(point.lat);
        }

        // Padding that eats the whole canvas collapses everything onto the
        // padding offset.
        let interior_width = (width - 2.0 * padding).max(0.0);
        let interior_height = (height - 2.0 * padding).max(0.0);

        let zoom_x = (!is_zero(max_lng - min_lng)).then(|| interior_width / (max_lng - min_lng));
        let zoom_y = (!is_zero(max_lat - min_lat)).then(|| interior_height / (max_lat - min_lat));

        let zoom = match (zoom_x, zoom_y) {
            (Some(x), Some(y)) => x.min(y),
            (Some(x), None) => x,
            (None, Some(y)) => y,
            (None, None) => 0.0,
        };

        Self {
            padding,
            min_lng,
            max_lat,
            zoom,
        }
    }

    pub fn project(&self, coordinates: Coordinates) -> Coord<f64> {
        Coord {
            x: (coordinates.lng - self.min_lng) * self.zoom + self.padding,
            y: (self.max_lat - coordinates.lat) * self.zoom + self.padding,
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_set_maps_to_padding() {
        let projector = SphereProjector::new(std::iter::empty(), 600.0, 400.0, 30.0);
        assert_eq!(
            projector.project(Coordinates::new(43.0, 39.0)),
            Coord { x: 30.0, y: 30.0 }
        );
    }

    #[test]
    fn test_single_point_maps_to_padding() {
        let point = Coordinates::new(55.7, 37.6);
        for (width, height) in [(600.0, 400.0), (100.0, 1000.0)] {
            let projector = SphereProjector::new([point], width, height, 25.0);
            assert_eq!(projector.zoom(), 0.0);
            assert_eq!(projector.project(point), Coord { x: 25.0, y: 25.0 });
        }
    }

    #[test]
    fn test_zoom_uses_tighter_axis() {
        let points = [Coordinates::new(0.0, 0.0), Coordinates::new(10.0, 20.0)];
        let projector = SphereProjector::new(points, 220.0, 220.0, 10.0);

        // 200 / 20 for longitude beats 200 / 10 for latitude.
        assert_relative_eq!(projector.zoom(), 10.0);

        let south_west = projector.project(points[0]);
        assert_relative_eq!(south_west.x, 10.0);
        assert_relative_eq!(south_west.y, 110.0);

        let north_east = projector.project(points[1]);
        assert_relative_eq!(north_east.x, 210.0);
        assert_relative_eq!(north_east.y, 10.0);
    }

    #[test]
    fn test_north_is_up() {
        let south = Coordinates::new(10.0, 5.0);
        let north = Coordinates::new(20.0, 5.0);
        let projector = SphereProjector::new([south, north], 300.0, 300.0, 50.0);

        assert!(projector.project(north).y < projector.project(south).y);
        assert_relative_eq!(projector.project(north).y, 50.0);
        assert_relative_eq!(projector.project(south).y, 250.0);
    }

    #[test]
    fn test_oversized_padding_collapses() {
        let points = [Coordinates::new(0.0, 0.0), Coordinates::new(1.0, 1.0)];
        let projector = SphereProjector::new(points, 100.0, 100.0, 60.0);

        assert_eq!(projector.zoom(), 0.0);
        assert_eq!(projector.project(points[1]), Coord { x: 60.0, y: 60.0 });
    }
}
