//! Renders a `Color` as CSS text.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::ConfigError;
use crate::input::ColorInput;
use crate::space::rgb_to_hsl;

/// CSS notation to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CssFormat {
    #[default]
    Hex,
    Rgb,
    Hsl,
}

impl fmt::Display for CssFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CssFormat::Hex => "hex",
            CssFormat::Rgb => "rgb",
            CssFormat::Hsl => "hsl",
        })
    }
}

impl FromStr for CssFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hex" => Ok(CssFormat::Hex),
            "rgb" => Ok(CssFormat::Rgb),
            "hsl" => Ok(CssFormat::Hsl),
            _ => Err(ConfigError::UnknownFormat {
                kind: "css format",
                name: s.to_string(),
                expected: "hex, rgb, hsl",
            }),
        }
    }
}

fn alpha_byte(alpha: f64) -> u8 {
    (alpha.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// A number with at most two decimals: `210`, `33.33`.
fn format_hundredths(x: f64) -> String {
    let rounded = (x * 100.0).round() / 100.0;
    format!("{rounded}")
}

/// Alpha with at most two decimals: `0.5`, `0.25`, `1`.
fn format_alpha(alpha: f64) -> String {
    format_hundredths(alpha.clamp(0.0, 1.0))
}

/// Lowercase hex digits without `#`. Alpha digits are appended only when
/// requested and the color is not opaque.
pub(crate) fn hex_digits([r, g, b]: [u8; 3], alpha: f64, include_alpha: bool) -> String {
    if include_alpha && alpha < 1.0 {
        format!("{r:02x}{g:02x}{b:02x}{:02x}", alpha_byte(alpha))
    } else {
        format!("{r:02x}{g:02x}{b:02x}")
    }
}

/// Hover shade for a color button: ten points darker, or fifty lighter when
/// that would drop below 30% lightness.
pub(crate) fn hover_color([h, s, l]: [u16; 3], alpha: f64) -> String {
    let darker = l as i32 - 10;
    let l = if darker < 30 { l as i32 + 50 } else { darker };
    format!("hsl({h}, {s}%, {l}%, {})", format_alpha(alpha))
}

/// Renders `color` in `format`. The alpha argument or digits are written
/// only when `include_alpha` is set and alpha < 1.
pub fn css_color(color: &Color, format: CssFormat, include_alpha: bool) -> String {
    let with_alpha = include_alpha && color.alpha() < 1.0;
    match format {
        CssFormat::Hex => format!("#{}", hex_digits(color.rgb(), color.alpha(), include_alpha)),
        CssFormat::Rgb => {
            let [r, g, b] = color.rgb();
            if with_alpha {
                format!("rgb({r}, {g}, {b}, {})", format_alpha(color.alpha()))
            } else {
                format!("rgb({r}, {g}, {b})")
            }
        }
        CssFormat::Hsl => {
            // integer hsl cannot address every rgb color, so print hundredths
            let hue_hint = Some(f64::from(color.hsl()[0]));
            let hsl = rgb_to_hsl(color.to_rgb(), hue_hint);
            let h = format_hundredths(hsl.h % 360.0);
            let s = format_hundredths(hsl.s);
            let l = format_hundredths(hsl.l);
            if with_alpha {
                format!("hsl({h}, {s}%, {l}%, {})", format_alpha(color.alpha()))
            } else {
                format!("hsl({h}, {s}%, {l}%)")
            }
        }
    }
}

/// Text a picker's text field shows for `color`.
///
/// Keywords show as themselves. Anything else shows the user's own `#`
/// text when they typed hex, or formatted hex otherwise. The `none` state
/// shows the raw text. With plain colors disabled, neither keywords nor
/// `none` are shown: every color falls through to hex.
pub fn display_text(color: &Color, plain_color_disabled: bool) -> String {
    let raw_text = color.raw().as_text();
    let synthetic = plain_color_disabled || color.name().starts_with("color-");
    if !synthetic {
        return if color.is_none() {
            raw_text.unwrap_or_default().to_string()
        } else {
            color.name().to_string()
        };
    }
    match (color.raw(), raw_text) {
        (ColorInput::Hex(_), Some(text)) if text.trim_start().starts_with('#') => text.to_string(),
        _ => css_color(color, CssFormat::Hex, false),
    }
}
