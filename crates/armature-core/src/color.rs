//! Color handling for style attributes.
//!
//! Wraps the `color` crate so style rules can accept any CSS color string
//! ("#ff0000", "rgb(255, 0, 0)", "red", ...) and serialize it back out in a
//! normalized form.

use std::{fmt, str::FromStr};

use color::DynamicColor;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// Wrapper around the `DynamicColor` type from the color crate.
///
/// This provides parsing, comparison, and serde support for colors used in
/// style attributes.
#[derive(Clone, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Create a new `Color` from a string.
    ///
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)",
    /// "red", etc.
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Color { color }),
            Err(err) => Err(format!("Invalid color '{color_str}': {err}")),
        }
    }
}

// For compatibility with consumers that treat colors as strings.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl Serialize for Color {
    /// Serializes the color as its normalized CSS string.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Color::new(&raw).map_err(de::Error::custom)
    }
}
