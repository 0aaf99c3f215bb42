//! Vector drawing primitives produced by the map layout. Later primitives
//! paint over earlier ones.

use geo_types::Coord;
use serde::Serialize;

use crate::render::settings::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrokeLineCap {
    Round,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrokeLineJoin {
    Round,
}

/// Outline painted beneath a label so it stays readable over route lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Underlayer {
    pub color: Color,
    pub width: f64,
    pub line_cap: StrokeLineCap,
    pub line_join: StrokeLineJoin,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Primitive {
    Polyline {
        points: Vec<Coord<f64>>,
        stroke: Color,
        stroke_width: f64,
        line_cap: StrokeLineCap,
        line_join: StrokeLineJoin,
    },
    Circle {
        center: Coord<f64>,
        radius: f64,
        fill: Color,
    },
    Text {
        position: Coord<f64>,
        offset: Coord<f64>,
        font_size: u32,
        font_family: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        font_weight: Option<String>,
        data: String,
        fill: Color,
        #[serde(skip_serializing_if = "Option::is_none")]
        underlayer: Option<Underlayer>,
    },
}

impl Primitive {
    pub fn is_underlayer(&self) -> bool {
        matches!(
            self,
            Primitive::Text {
                underlayer: Some(_),
                ..
            }
        )
    }
}
