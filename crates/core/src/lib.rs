#![deny(unsafe_code)]
//! Color engine behind picker widgets.
//!
//! Parses loosely-typed color input (hex, CSS keywords, functional notation,
//! component lists and maps) into a canonical `Color` carrying RGB, HSV and
//! HSL at once. Validates under widget policies, formats CSS strings and
//! builds the editable component tables a picker displays.

pub mod channel;
pub mod color;
pub mod components;
pub mod css;
pub mod error;
pub mod hue;
pub mod input;
pub mod names;
pub mod palette;
pub mod parse;
pub mod space;
pub mod translate;
pub mod validate;

pub use channel::Channel;
pub use color::{Color, CssStyle};
pub use components::{components, Component, ComponentTable, ComponentValue, InputFormat};
pub use css::{css_color, display_text, CssFormat};
pub use error::{ColorError, ConfigError};
pub use hue::hue_to_rgb;
pub use input::{ColorInput, ColorModel};
pub use palette::Palette;
pub use parse::parse;
pub use space::{Hsl, Hsv, Rgb};
pub use translate::{localize, Catalog, Translate, Untranslated};
pub use validate::{validate_color, ValidationPolicy, Validator};
