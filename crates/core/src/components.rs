//! Component tables: the editable fields an input row shows for a color.
//!
//! Bounds and units come from [`Channel`], the same table the parser clamps
//! with, so a value accepted by a field is always accepted by `parse`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::channel::Channel;
use crate::color::Color;
use crate::error::ConfigError;
use crate::input::{ColorInput, ColorModel};
use crate::translate::{localize, Translate};

/// Translation key of the single hex field's label.
const HEX_LABEL_KEY: &str = "HEX";

/// Which set of fields to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    #[default]
    Hex,
    Rgb,
    Hsv,
    Hsl,
}

impl InputFormat {
    fn model(self) -> Option<ColorModel> {
        match self {
            InputFormat::Hex => None,
            InputFormat::Rgb => Some(ColorModel::Rgb),
            InputFormat::Hsv => Some(ColorModel::Hsv),
            InputFormat::Hsl => Some(ColorModel::Hsl),
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.model() {
            Some(model) => write!(f, "{model}"),
            None => f.write_str("hex"),
        }
    }
}

impl FromStr for InputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hex" => Ok(InputFormat::Hex),
            "rgb" => Ok(InputFormat::Rgb),
            "hsv" => Ok(InputFormat::Hsv),
            "hsl" => Ok(InputFormat::Hsl),
            _ => Err(ConfigError::UnknownFormat {
                kind: "input format",
                name: s.to_string(),
                expected: "hex, rgb, hsv, hsl",
            }),
        }
    }
}

/// Current value of a field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ComponentValue {
    Number(f64),
    Text(String),
}

impl fmt::Display for ComponentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentValue::Number(n) => write!(f, "{n}"),
            ComponentValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for ComponentValue {
    fn from(n: f64) -> Self {
        ComponentValue::Number(n)
    }
}

impl From<&str> for ComponentValue {
    fn from(s: &str) -> Self {
        ComponentValue::Text(s.to_string())
    }
}

/// One editable field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Component {
    /// Field id, also the key in a keyed input (`r`, `h`, `a`, `hex`...).
    pub key: &'static str,
    /// Translated label.
    pub name: String,
    pub value: ComponentValue,
    /// Inclusive bounds; absent for the hex field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    pub unit: &'static str,
}

/// Ordered fields for one format.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentTable {
    format: InputFormat,
    components: Vec<Component>,
}

impl ComponentTable {
    pub fn format(&self) -> InputFormat {
        self.format
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.components.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.components.iter().map(|c| c.key)
    }

    pub fn get(&self, key: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.key == key)
    }

    /// The input a field row submits after the field `key` was set to
    /// `value`.
    ///
    /// The hex field yields `#text`. Numeric fields yield a keyed input of
    /// every field's current value with `key` replaced by `value` clamped to
    /// its bounds. Text typed into a numeric field that is not a number
    /// becomes NaN, which the parser reports as an invalid component.
    pub fn with_value(&self, key: &str, value: impl Into<ComponentValue>) -> ColorInput {
        let value = value.into();
        if self.format == InputFormat::Hex {
            let text = value.to_string();
            return ColorInput::from_text(&format!("#{}", text.trim_start_matches('#')));
        }
        let edited = match value {
            ComponentValue::Number(n) => n,
            ComponentValue::Text(text) => text.trim().parse::<f64>().unwrap_or(f64::NAN),
        };
        let values = self.components.iter().map(|c| {
            let value = match (&c.value, c.key == key) {
                (_, true) => clamp_to(c, edited),
                (ComponentValue::Number(n), false) => *n,
                (ComponentValue::Text(_), false) => f64::NAN,
            };
            (c.key, value)
        });
        ColorInput::keyed(values)
    }
}

fn clamp_to(component: &Component, value: f64) -> f64 {
    match (component.min, component.max) {
        (Some(min), Some(max)) if value.is_finite() => value.clamp(min, max),
        _ => value,
    }
}

impl<'a> IntoIterator for &'a ComponentTable {
    type Item = &'a Component;
    type IntoIter = std::slice::Iter<'a, Component>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.iter()
    }
}

fn numeric(channel: Channel, value: f64, translate: &dyn Translate, locale: &str) -> Component {
    Component {
        key: channel.key(),
        name: localize(translate, channel.label_key(), locale),
        value: ComponentValue::Number(value),
        min: Some(channel.min()),
        max: Some(channel.max()),
        unit: channel.unit(),
    }
}

/// Builds the field table for `color` in `format`.
///
/// An alpha field (0 to 1) is appended to numeric formats unless
/// `alpha_disabled`; for hex, alpha travels as the last two digits instead.
pub fn components(
    color: &Color,
    format: InputFormat,
    alpha_disabled: bool,
    translate: &dyn Translate,
    locale: &str,
) -> ComponentTable {
    let mut table = Vec::with_capacity(4);
    match format.model() {
        None => {
            let hex = if alpha_disabled {
                &color.hex()[..6]
            } else {
                color.hex()
            };
            table.push(Component {
                key: "hex",
                name: localize(translate, HEX_LABEL_KEY, locale),
                value: ComponentValue::Text(hex.to_string()),
                min: None,
                max: None,
                unit: "#",
            });
        }
        Some(model) => {
            let values: [f64; 3] = match model {
                ColorModel::Rgb => color.rgb().map(f64::from),
                ColorModel::Hsv => color.hsv().map(f64::from),
                ColorModel::Hsl => color.hsl().map(f64::from),
            };
            for (channel, value) in model.channels().into_iter().zip(values) {
                table.push(numeric(channel, value, translate, locale));
            }
            if !alpha_disabled {
                table.push(numeric(Channel::Alpha, color.alpha(), translate, locale));
            }
        }
    }
    ComponentTable {
        format,
        components: table,
    }
}
