use std::fmt;

use serde::{Deserialize, Serialize};

const MAX_DIMENSION: f64 = 100_000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Color {
    Named(String),
    Rgb(u8, u8, u8),
    Rgba(u8, u8, u8, f64),
}

impl Color {
    pub fn named(name: &str) -> Self {
        Color::Named(name.to_owned())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Named(name) => write!(f, "{name}"),
            Color::Rgb(r, g, b) => write!(f, "rgb({r},{g},{b})"),
            Color::Rgba(r, g, b, a) => write!(f, "rgba({r},{g},{b},{a})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SettingsError {
    #[error("{name} must be within [{min}, {max}], got {value}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("padding {padding} must be less than half of the smaller canvas side ({limit})")]
    PaddingTooLarge { padding: f64, limit: f64 },

    #[error("color palette must not be empty")]
    EmptyPalette,

    #[error("alpha channel of {0} must be within [0, 1]")]
    InvalidAlpha(Color),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSettings {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    pub stop_radius: f64,
    pub line_width: f64,
    pub bus_label_font_size: u32,
    pub bus_label_offset: [f64; 2],
    pub stop_label_font_size: u32,
    pub stop_label_offset: [f64; 2],
    pub underlayer_color: Color,
    pub underlayer_width: f64,
    pub color_palette: Vec<Color>,
}

impl RenderSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        check_range("width", self.width, 0.0, MAX_DIMENSION)?;
        check_range("height", self.height, 0.0, MAX_DIMENSION)?;
        check_range("padding", self.padding, 0.0, MAX_DIMENSION)?;

        let limit = self.width.min(self.height) / 2.0;
        if self.padding >= limit {
            return Err(SettingsError::PaddingTooLarge {
                padding: self.padding,
                limit,
            });
        }

        check_range("stop_radius", self.stop_radius, 0.0, MAX_DIMENSION)?;
        check_range("line_width", self.line_width, 0.0, MAX_DIMENSION)?;
        check_range("underlayer_width", self.underlayer_width, 0.0, MAX_DIMENSION)?;
        check_range(
            "bus_label_font_size",
            f64::from(self.bus_label_font_size),
            0.0,
            MAX_DIMENSION,
        )?;
        check_range(
            "stop_label_font_size",
            f64::from(self.stop_label_font_size),
            0.0,
            MAX_DIMENSION,
        )?;
        for (name, offset) in [
            ("bus_label_offset", self.bus_label_offset),
            ("stop_label_offset", self.stop_label_offset),
        ] {
            for value in offset {
                check_range(name, value, -MAX_DIMENSION, MAX_DIMENSION)?;
            }
        }

        if self.color_palette.is_empty() {
            return Err(SettingsError::EmptyPalette);
        }
        for color in self.color_palette.iter().chain([&self.underlayer_color]) {
            if let Color::Rgba(.., alpha) = color {
                if !(0.0..=1.0).contains(alpha) {
                    return Err(SettingsError::InvalidAlpha(color.clone()));
                }
            }
        }

        Ok(())
    }
}

fn check_range(name: &'static str, value: f64, min: f64, max: f64) -> Result<(), SettingsError> {
    // NaN fails the containment check as well.
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(SettingsError::OutOfRange {
            name,
            value,
            min,
            max,
        })
    }
}
