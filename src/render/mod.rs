pub mod primitive;
pub mod projector;
pub mod settings;

use geo_types::Coord;
use tracing::debug;

use crate::{
    catalogue::{bus::Bus, stop::Stop, Catalogue},
    render::{
        primitive::{Primitive, StrokeLineCap, StrokeLineJoin, Underlayer},
        projector::SphereProjector,
        settings::{Color, RenderSettings, SettingsError},
    },
};

const FONT_FAMILY: &str = "Verdana";

/// Lays the whole network out as a sequence of primitives: route lines, bus
/// labels, stop markers and stop labels, each layer complete before the next.
pub struct MapRenderer {
    settings: RenderSettings,
}

impl MapRenderer {
    /// Rejects settings that fail `RenderSettings::validate`, so a renderer
    /// always has a non-empty palette and a canvas with interior area.
    pub fn new(settings: RenderSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn render(&self, catalogue: &Catalogue) -> Vec<Primitive> {
        let buses: Vec<&Bus> = catalogue
            .all_buses_sorted()
            .into_iter()
            .map(|(_, bus)| bus)
            .filter(|bus| !bus.is_empty())
            .collect();
        let stops = catalogue.served_stops_sorted();

        // Rebuilt on every call so it always fits the current network.
        let projector = SphereProjector::new(
            stops.iter().map(|stop| stop.coordinates),
            self.settings.width,
            self.settings.height,
            self.settings.padding,
        );

        let mut primitives = Vec::new();
        self.route_lines(catalogue, &buses, &projector, &mut primitives);
        self.bus_labels(catalogue, &buses, &projector, &mut primitives);
        self.stop_markers(&stops, &projector, &mut primitives);
        self.stop_labels(&stops, &projector, &mut primitives);

        debug!(
            buses = buses.len(),
            stops = stops.len(),
            primitives = primitives.len(),
            "rendered map"
        );
        primitives
    }

    /// Palette colors cycle once per non-empty bus.
    fn bus_colors<'b>(&'b self, buses: &'b [&'b Bus]) -> impl Iterator<Item = (&'b Bus, &'b Color)> {
        buses
            .iter()
            .copied()
            .zip(self.settings.color_palette.iter().cycle())
    }

    fn route_lines(
        &self,
        catalogue: &Catalogue,
        buses: &[&Bus],
        projector: &SphereProjector,
        out: &mut Vec<Primitive>,
    ) {
        for (bus, color) in self.bus_colors(buses) {
            let points = bus
                .traversal()
                .map(|id| projector.project(catalogue.stop(id).coordinates))
                .collect();

            out.push(Primitive::Polyline {
                points,
                stroke: color.clone(),
                stroke_width: self.settings.line_width,
                line_cap: StrokeLineCap::Round,
                line_join: StrokeLineJoin::Round,
            });
        }
    }

    fn bus_labels(
        &self,
        catalogue: &Catalogue,
        buses: &[&Bus],
        projector: &SphereProjector,
        out: &mut Vec<Primitive>,
    ) {
        for (bus, color) in self.bus_colors(buses) {
            for terminal in bus.terminals() {
                let position = projector.project(catalogue.stop(terminal).coordinates);
                let label = |fill: Color, underlayer: Option<Underlayer>| Primitive::Text {
                    position,
                    offset: offset(self.settings.bus_label_offset),
                    font_size: self.settings.bus_label_font_size,
                    font_family: FONT_FAMILY.to_owned(),
                    font_weight: Some("bold".to_owned()),
                    data: bus.number.clone(),
                    fill,
                    underlayer,
                };

                out.push(label(
                    self.settings.underlayer_color.clone(),
                    Some(self.underlayer()),
                ));
                out.push(label(color.clone(), None));
            }
        }
    }

    fn stop_markers(&self, stops: &[&Stop], projector: &SphereProjector, out: &mut Vec<Primitive>) {
        out.extend(stops.iter().map(|stop| Primitive::Circle {
            center: projector.project(stop.coordinates),
            radius: self.settings.stop_radius,
            fill: Color::named("white"),
        }));
    }

    fn stop_labels(&self, stops: &[&Stop], projector: &SphereProjector, out: &mut Vec<Primitive>) {
        for stop in stops {
            let position = projector.project(stop.coordinates);
            let label = |fill: Color, underlayer: Option<Underlayer>| Primitive::Text {
                position,
                offset: offset(self.settings.stop_label_offset),
                font_size: self.settings.stop_label_font_size,
                font_family: FONT_FAMILY.to_owned(),
                font_weight: None,
                data: stop.name.clone(),
                fill,
                underlayer,
            };

            out.push(label(
                self.settings.underlayer_color.clone(),
                Some(self.underlayer()),
            ));
            out.push(label(Color::named("black"), None));
        }
    }

    fn underlayer(&self) -> Underlayer {
        Underlayer {
            color: self.settings.underlayer_color.clone(),
            width: self.settings.underlayer_width,
            line_cap: StrokeLineCap::Round,
            line_join: StrokeLineJoin::Round,
        }
    }
}

fn offset([x, y]: [f64; 2]) -> Coord<f64> {
    Coord { x, y }
}
