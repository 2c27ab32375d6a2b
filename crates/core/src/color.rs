//! The canonical `Color` record every operation produces.
//!
//! A `Color` carries the same color in RGB, HSV and HSL at once, plus alpha,
//! the caller's raw input, a display name and pre-rendered CSS. It is built
//! fresh by each operation and never mutated afterwards: the `with_*`
//! methods return a new record with every space recomputed.

use serde::Serialize;

use crate::channel::Channel;
use crate::css::{hex_digits, hover_color};
use crate::error::ColorError;
use crate::input::{ColorInput, ColorModel};
use crate::names;
use crate::parse::parse;
use crate::space::{hsl_to_hsv, hsl_to_rgb, hsv_to_hsl, hsv_to_rgb, rgb_to_hsl, rgb_to_hsv};
use crate::space::{Hsl, Hsv, Rgb};

/// Name of the "no color" state.
pub const NONE_NAME: &str = "none";

/// CSS value used wherever there is nothing resolved to paint.
pub const TRANSPARENT_CSS: &str = "transparent";

/// CSS strings ready to hand to a renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CssStyle {
    pub background_color: String,
    pub hover_color: String,
}

impl CssStyle {
    fn transparent() -> Self {
        CssStyle {
            background_color: TRANSPARENT_CSS.to_string(),
            hover_color: TRANSPARENT_CSS.to_string(),
        }
    }
}

/// A parsed color in every representation the widgets need.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Color {
    raw: ColorInput,
    name: String,
    hex: String,
    rgb: [u8; 3],
    hsv: [u16; 3],
    hsl: [u16; 3],
    alpha: f64,
    css: CssStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ColorError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl Color {
    /// Builds from RGB. Gray inputs take their hue from `hue_hint`.
    ///
    /// `keyword` is kept as the name when the input was a CSS keyword.
    pub(crate) fn from_rgb(
        raw: ColorInput,
        rgb: Rgb,
        alpha: f64,
        hue_hint: Option<f64>,
        keyword: Option<&str>,
    ) -> Self {
        let hsv = rgb_to_hsv(rgb, hue_hint).rounded();
        let hsl = rgb_to_hsl(rgb, hue_hint).rounded();
        Self::assemble(raw, rgb, hsv, hsl, alpha, keyword)
    }

    /// Builds from HSV, keeping the given hue in both cylindrical spaces.
    pub(crate) fn from_hsv(raw: ColorInput, hsv: Hsv, alpha: f64) -> Self {
        let rgb = hsv_to_rgb(hsv);
        let hsl = hsv_to_hsl(hsv).rounded();
        Self::assemble(raw, rgb, hsv.rounded(), hsl, alpha, None)
    }

    /// Builds from HSL, keeping the given hue in both cylindrical spaces.
    pub(crate) fn from_hsl(raw: ColorInput, hsl: Hsl, alpha: f64) -> Self {
        let rgb = hsl_to_rgb(hsl);
        let hsv = hsl_to_hsv(hsl).rounded();
        Self::assemble(raw, rgb, hsv, hsl.rounded(), alpha, None)
    }

    /// The valid "no color" state.
    pub(crate) fn none(raw: ColorInput) -> Self {
        Color {
            raw,
            name: NONE_NAME.to_string(),
            hex: "000000".to_string(),
            rgb: [0, 0, 0],
            hsv: [0, 0, 0],
            hsl: [0, 0, 0],
            alpha: 1.0,
            css: CssStyle::transparent(),
            error: None,
            message: None,
        }
    }

    /// Fallback for input that could not be parsed at all.
    pub(crate) fn failed(raw: ColorInput, error: ColorError) -> Self {
        Color {
            error: Some(error),
            ..Color::none(raw)
        }
    }

    fn assemble(
        raw: ColorInput,
        rgb: Rgb,
        hsv: [u16; 3],
        hsl: [u16; 3],
        alpha: f64,
        keyword: Option<&str>,
    ) -> Self {
        let rgb_array = rgb.to_array();
        let hex = hex_digits(rgb_array, alpha, true);
        let name = match keyword {
            Some(keyword) => keyword.to_ascii_lowercase(),
            None => match names::name_of(rgb) {
                Some(keyword) if alpha >= 1.0 => keyword.to_string(),
                _ => format!("color-{hex}"),
            },
        };
        let css = CssStyle {
            background_color: format!("#{hex}"),
            hover_color: hover_color(hsl, alpha),
        };
        Color {
            raw,
            name,
            hex,
            rgb: rgb_array,
            hsv,
            hsl,
            alpha,
            css,
            error: None,
            message: None,
        }
    }

    /// Marks the color as failed while keeping its best-effort components.
    pub(crate) fn into_error(self, error: ColorError) -> Self {
        Color {
            error: Some(error),
            css: CssStyle::transparent(),
            ..self
        }
    }

    pub(crate) fn with_message(self, message: String) -> Self {
        Color {
            message: Some(message),
            ..self
        }
    }

    /// Same color with alpha forced to 1, keeping raw input and hue.
    pub(crate) fn opaque(self) -> Self {
        if self.alpha >= 1.0 || self.is_none() || self.error.is_some() {
            return self;
        }
        let keyword = names::lookup(&self.name).map(|_| self.name.clone());
        let hsv = self.hsv;
        let hsl = self.hsl;
        let rgb = Rgb::from(self.rgb);
        Self::assemble(self.raw, rgb, hsv, hsl, 1.0, keyword.as_deref())
    }

    // -- Derivations --

    /// Same saturation and value at a new hue (the hue slider).
    pub fn with_hue(&self, hue: f64) -> Color {
        let [_, s, v] = self.hsv;
        self.reparse(ColorModel::Hsv, [hue, s as f64, v as f64])
    }

    /// Same hue at a new saturation and value (the gradient box in HSV mode).
    pub fn with_sv(&self, saturation: f64, value: f64) -> Color {
        self.reparse(ColorModel::Hsv, [self.hsv[0] as f64, saturation, value])
    }

    /// Same hue at a new saturation and lightness (the gradient box in HSL mode).
    pub fn with_sl(&self, saturation: f64, lightness: f64) -> Color {
        self.reparse(ColorModel::Hsl, [self.hsl[0] as f64, saturation, lightness])
    }

    fn reparse(&self, model: ColorModel, [a, b, c]: [f64; 3]) -> Color {
        let input = if self.alpha < 1.0 {
            ColorInput::Triple(vec![a, b, c, self.alpha])
        } else {
            ColorInput::Triple(vec![a, b, c])
        };
        parse(&input, Some(model))
    }

    /// Same RGB at a new alpha (the alpha slider). Gray colors keep their hue.
    pub fn with_alpha(&self, alpha: f64) -> Color {
        let [r, g, b] = self.rgb;
        let raw = ColorInput::Triple(vec![r as f64, g as f64, b as f64, alpha]);
        match Channel::Alpha.clamp(alpha) {
            Some(alpha) => {
                let hue = Some(self.hsv[0] as f64);
                Color::from_rgb(raw, self.to_rgb(), alpha, hue, None)
            }
            None => Color::failed(raw, ColorError::InvalidComponent),
        }
    }

    /// Same color under a different display name (a palette selection).
    pub fn with_name(&self, name: impl Into<String>) -> Color {
        Color {
            name: name.into(),
            ..self.clone()
        }
    }

    // -- Accessors --

    /// The input exactly as the caller supplied it.
    pub fn raw(&self) -> &ColorInput {
        &self.raw
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Hex digits without `#`: `rrggbb`, or `rrggbbaa` when alpha < 1.
    pub fn hex(&self) -> &str {
        &self.hex
    }

    pub fn rgb(&self) -> [u8; 3] {
        self.rgb
    }

    pub fn to_rgb(&self) -> Rgb {
        Rgb::from(self.rgb)
    }

    pub fn hsv(&self) -> [u16; 3] {
        self.hsv
    }

    pub fn hsl(&self) -> [u16; 3] {
        self.hsl
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn css(&self) -> &CssStyle {
        &self.css
    }

    pub fn error(&self) -> Option<ColorError> {
        self.error
    }

    /// Localized error message, set by the validator.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_none(&self) -> bool {
        self.name == NONE_NAME
    }

    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::none(ColorInput::Absent)
    }
}
