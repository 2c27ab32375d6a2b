//! Named color palettes a picker offers as one-click swatches.
//!
//! Entries keep their declaration order. Values are raw `ColorInput`s, so a
//! palette can mix hex, keywords and component lists.

use serde::{Deserialize, Deserializer};

use crate::color::Color;
use crate::error::ConfigError;
use crate::input::ColorInput;
use crate::parse::parse;
use crate::translate::{localize, Translate};
use crate::validate::validate_color;

/// An ordered set of named colors.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    entries: Vec<(String, ColorInput)>,
}

impl Palette {
    /// Creates a palette from `(name, color)` entries.
    ///
    /// Requires at least one entry and unique names.
    pub fn new(entries: Vec<(String, ColorInput)>) -> Result<Self, ConfigError> {
        if entries.is_empty() {
            return Err(ConfigError::InvalidPalette(
                "palette requires at least 1 color".to_string(),
            ));
        }
        for (i, (name, _)) in entries.iter().enumerate() {
            if entries[..i].iter().any(|(other, _)| other == name) {
                return Err(ConfigError::InvalidPalette(format!(
                    "duplicate color name '{name}'"
                )));
            }
        }
        Ok(Self { entries })
    }

    /// Reads a palette from a JSON object such as
    /// `{"primary": "#3f51b5", "danger": [244, 67, 54]}`.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
        let entries = map
            .into_iter()
            .map(|(name, value)| Ok((name, serde_json::from_value(value)?)))
            .collect::<Result<Vec<(String, ColorInput)>, ConfigError>>()?;
        Self::new(entries)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if this palette has no colors. (Always false for valid palettes.)
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&ColorInput> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, input)| input)
    }

    /// Every entry validated for display, paired with its translated name.
    pub fn swatches(
        &self,
        alpha_disabled: bool,
        translate: &dyn Translate,
        locale: &str,
    ) -> Vec<(String, Color)> {
        self.entries
            .iter()
            .map(|(name, input)| {
                let color = validate_color(input, alpha_disabled, translate, locale, false);
                (localize(translate, name, locale), color)
            })
            .collect()
    }

    /// The color a click on swatch `name` selects, renamed to the swatch's
    /// translated name.
    pub fn select(&self, name: &str, translate: &dyn Translate, locale: &str) -> Option<Color> {
        let input = self.get(name)?;
        let color = parse(input, None);
        Some(color.with_name(localize(translate, name, locale)))
    }
}

impl<'de> Deserialize<'de> for Palette {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = serde_json::Map::<String, serde_json::Value>::deserialize(deserializer)?;
        let entries = map
            .into_iter()
            .map(|(name, value)| {
                serde_json::from_value(value)
                    .map(|input| (name, input))
                    .map_err(serde::de::Error::custom)
            })
            .collect::<Result<Vec<_>, D::Error>>()?;
        Palette::new(entries).map_err(serde::de::Error::custom)
    }
}
