//! Raw color input as supplied by a caller.
//!
//! Input arrives as text from a field, as an ordered list of numbers from a
//! slider or gradient, or as a keyed mapping from per-channel fields. Rather
//! than sniffing shapes at parse time, callers hand over a `ColorInput`
//! whose variant already says which branch of the parser applies.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ConfigError;

/// The color model a numeric triple is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorModel {
    #[default]
    Rgb,
    Hsv,
    Hsl,
}

impl ColorModel {
    pub fn as_str(self) -> &'static str {
        match self {
            ColorModel::Rgb => "rgb",
            ColorModel::Hsv => "hsv",
            ColorModel::Hsl => "hsl",
        }
    }
}

impl fmt::Display for ColorModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorModel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rgb" => Ok(ColorModel::Rgb),
            "hsv" => Ok(ColorModel::Hsv),
            "hsl" => Ok(ColorModel::Hsl),
            _ => Err(ConfigError::UnknownFormat {
                kind: "color model",
                name: s.to_string(),
                expected: "rgb, hsv, hsl",
            }),
        }
    }
}

/// A color value exactly as the caller supplied it.
///
/// The text variants keep the original string untouched (including case and
/// whitespace) so a text field can redisplay what the user typed.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ColorInput {
    /// No value at all.
    #[default]
    Absent,
    /// The literal `none` or an empty string.
    NoneSentinel(String),
    /// `#rgb`, `#rrggbb`, `#rrggbbaa`, with or without the `#`.
    Hex(String),
    /// A bare word, expected to be a CSS color keyword.
    Named(String),
    /// `rgb(...)`, `hsl(...)` and friends.
    Functional(String),
    /// Three numbers in some model, optionally followed by alpha.
    Triple(Vec<f64>),
    /// Channel values keyed by `r g b`, `h s v` or `h s l`, plus optional `a`.
    Keyed(BTreeMap<String, f64>),
}

impl ColorInput {
    /// Classifies free text into one of the text variants.
    pub fn from_text(text: &str) -> Self {
        let t = text.trim();
        if t.is_empty() || t.eq_ignore_ascii_case("none") {
            ColorInput::NoneSentinel(text.to_string())
        } else if t.starts_with('#') || looks_like_bare_hex(t) {
            ColorInput::Hex(text.to_string())
        } else if t.contains('(') {
            ColorInput::Functional(text.to_string())
        } else {
            ColorInput::Named(text.to_string())
        }
    }

    /// Builds a keyed input from `(key, value)` pairs.
    pub fn keyed<'a>(pairs: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        ColorInput::Keyed(pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    }

    /// The original text for text variants.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ColorInput::NoneSentinel(s)
            | ColorInput::Hex(s)
            | ColorInput::Named(s)
            | ColorInput::Functional(s) => Some(s),
            ColorInput::Absent | ColorInput::Triple(_) | ColorInput::Keyed(_) => None,
        }
    }

    /// True for the "no color" states: absent, empty or `none`.
    pub fn is_none(&self) -> bool {
        matches!(self, ColorInput::Absent | ColorInput::NoneSentinel(_))
    }

    /// True for inputs built from numbers rather than text.
    pub fn is_structured(&self) -> bool {
        matches!(self, ColorInput::Triple(_) | ColorInput::Keyed(_))
    }

    /// Alpha carried by a structured input, if any.
    pub fn structured_alpha(&self) -> Option<f64> {
        match self {
            ColorInput::Triple(values) if values.len() == 4 => Some(values[3]),
            ColorInput::Keyed(map) => map
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case("a"))
                .map(|(_, &v)| v),
            _ => None,
        }
    }
}

fn looks_like_bare_hex(t: &str) -> bool {
    matches!(t.len(), 3 | 6 | 8) && t.bytes().all(|b| b.is_ascii_hexdigit())
}

impl From<&str> for ColorInput {
    fn from(text: &str) -> Self {
        ColorInput::from_text(text)
    }
}

impl From<String> for ColorInput {
    fn from(text: String) -> Self {
        ColorInput::from_text(&text)
    }
}

impl From<[f64; 3]> for ColorInput {
    fn from(values: [f64; 3]) -> Self {
        ColorInput::Triple(values.to_vec())
    }
}

impl From<[f64; 4]> for ColorInput {
    fn from(values: [f64; 4]) -> Self {
        ColorInput::Triple(values.to_vec())
    }
}

impl<T: Into<ColorInput>> From<Option<T>> for ColorInput {
    fn from(value: Option<T>) -> Self {
        value.map_or(ColorInput::Absent, Into::into)
    }
}

/// JSON shapes accepted for a color value.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawShape {
    Text(String),
    Triple(Vec<f64>),
    Keyed(BTreeMap<String, f64>),
}

impl<'de> Deserialize<'de> for ColorInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<RawShape>::deserialize(deserializer)? {
            None => ColorInput::Absent,
            Some(RawShape::Text(s)) => ColorInput::from_text(&s),
            Some(RawShape::Triple(values)) => ColorInput::Triple(values),
            Some(RawShape::Keyed(map)) => ColorInput::Keyed(map),
        })
    }
}

impl Serialize for ColorInput {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ColorInput::Absent => serializer.serialize_none(),
            ColorInput::NoneSentinel(s)
            | ColorInput::Hex(s)
            | ColorInput::Named(s)
            | ColorInput::Functional(s) => serializer.serialize_str(s),
            ColorInput::Triple(values) => serializer.collect_seq(values),
            ColorInput::Keyed(map) => serializer.collect_map(map),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_classified() {
        assert_eq!(ColorInput::from_text("#abc"), ColorInput::Hex("#abc".into()));
        assert_eq!(ColorInput::from_text("ff0000"), ColorInput::Hex("ff0000".into()));
        assert_eq!(ColorInput::from_text("red"), ColorInput::Named("red".into()));
        assert_eq!(
            ColorInput::from_text("rgb(1, 2, 3)"),
            ColorInput::Functional("rgb(1, 2, 3)".into())
        );
        assert_eq!(ColorInput::from_text("none"), ColorInput::NoneSentinel("none".into()));
        assert_eq!(ColorInput::from_text(""), ColorInput::NoneSentinel(String::new()));
    }

    #[test]
    fn bare_words_that_are_not_hex_lengths_stay_named() {
        assert_eq!(ColorInput::from_text("beef"), ColorInput::Named("beef".into()));
        assert_eq!(ColorInput::from_text("not-a-color"), ColorInput::Named("not-a-color".into()));
    }

    #[test]
    fn original_text_is_preserved() {
        let input = ColorInput::from_text("  #FFF ");
        assert_eq!(input.as_text(), Some("  #FFF "));
    }

    #[test]
    fn structured_alpha_is_found() {
        assert_eq!(ColorInput::from([1.0, 2.0, 3.0, 0.5]).structured_alpha(), Some(0.5));
        assert_eq!(ColorInput::from([1.0, 2.0, 3.0]).structured_alpha(), None);
        let keyed = ColorInput::keyed([("r", 1.0), ("g", 2.0), ("b", 3.0), ("A", 0.25)]);
        assert_eq!(keyed.structured_alpha(), Some(0.25));
        assert_eq!(ColorInput::from("#ff000080").structured_alpha(), None);
    }

    #[test]
    fn option_maps_none_to_absent() {
        let input: ColorInput = Option::<&str>::None.into();
        assert_eq!(input, ColorInput::Absent);
        assert!(input.is_none());
    }

    #[test]
    fn deserializes_every_json_shape() {
        let text: ColorInput = serde_json::from_str("\"#123456\"").unwrap();
        let triple: ColorInput = serde_json::from_str("[10, 20, 30, 0.5]").unwrap();
        let keyed: ColorInput = serde_json::from_str(r#"{"h": 10, "s": 20, "l": 30}"#).unwrap();
        let absent: ColorInput = serde_json::from_str("null").unwrap();
        assert_eq!(text, ColorInput::Hex("#123456".into()));
        assert_eq!(triple, ColorInput::Triple(vec![10.0, 20.0, 30.0, 0.5]));
        assert!(matches!(keyed, ColorInput::Keyed(ref m) if m.len() == 3));
        assert_eq!(absent, ColorInput::Absent);
    }

    #[test]
    fn serializes_back_to_the_same_shape() {
        let keyed = ColorInput::keyed([("r", 1.0), ("g", 2.0), ("b", 3.0)]);
        let json = serde_json::to_string(&keyed).unwrap();
        assert_eq!(json, r#"{"b":3.0,"g":2.0,"r":1.0}"#);
        let text = serde_json::to_string(&ColorInput::from("Red")).unwrap();
        assert_eq!(text, "\"Red\"");
    }

    #[test]
    fn color_model_parses_case_insensitively() {
        assert_eq!("HSV".parse::<ColorModel>().unwrap(), ColorModel::Hsv);
        assert!("cmyk".parse::<ColorModel>().is_err());
    }
}
