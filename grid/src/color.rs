use crate::error::GridError;
use serde::{Deserialize, Serialize};
use std::fmt;

// Color is a named color as the caller's palette spells it
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Color(pub String);

impl Color {
    pub fn new<S: Into<String>>(name: S) -> Color {
        Color(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Color {
    fn from(name: &str) -> Color {
        Color(String::from(name))
    }
}

impl From<String> for Color {
    fn from(name: String) -> Color {
        Color(name)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// TileColors is either one color for the whole tile or one color per segment
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TileColors {
    Uniform(Color),
    PerSegment(Vec<Color>),
}

impl TileColors {
    // resolve expands the colors to one color per segment of a tile with num_segments segments
    pub fn resolve(&self, num_segments: usize) -> Result<Vec<Color>, GridError> {
        match self {
            TileColors::Uniform(color) => Ok(vec![color.clone(); num_segments]),
            TileColors::PerSegment(colors) if colors.len() == num_segments => Ok(colors.clone()),
            TileColors::PerSegment(colors) => {
                Err(GridError::ColorCount { expected: num_segments, actual: colors.len() })
            }
        }
    }
}

impl From<Color> for TileColors {
    fn from(color: Color) -> TileColors {
        TileColors::Uniform(color)
    }
}

impl From<Vec<Color>> for TileColors {
    fn from(colors: Vec<Color>) -> TileColors {
        TileColors::PerSegment(colors)
    }
}
