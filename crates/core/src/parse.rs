//! Format parser: any supported `ColorInput` to a canonical `Color`.
//!
//! Parsing never fails outright. Input that cannot be understood yields a
//! black, transparent-styled `Color` with its `error` set, so a renderer
//! always has something to paint.

use std::collections::{BTreeMap, BTreeSet};

use crate::channel::Channel;
use crate::color::Color;
use crate::error::ColorError;
use crate::input::{ColorInput, ColorModel};
use crate::names;
use crate::space::{Hsl, Hsv, Rgb};

/// Components recovered from an input, before the other spaces are derived.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Parsed {
    Rgb(Rgb, f64),
    Keyword(&'static str, Rgb, f64),
    Hsv(Hsv, f64),
    Hsl(Hsl, f64),
}

/// Parses `input` into a `Color`.
///
/// `hint` says which model a numeric triple is in and defaults to RGB. It is
/// ignored for text and keyed input, which identify their own model.
pub fn parse(input: &ColorInput, hint: Option<ColorModel>) -> Color {
    let parsed = match input {
        ColorInput::Absent | ColorInput::NoneSentinel(_) => return Color::none(input.clone()),
        ColorInput::Hex(text) => parse_hex(text),
        ColorInput::Named(text) => parse_named(text),
        ColorInput::Functional(text) => parse_functional(text),
        ColorInput::Triple(values) => parse_triple(values, hint.unwrap_or_default()),
        ColorInput::Keyed(map) => parse_keyed(map),
    };
    match parsed {
        Ok(parsed) => {
            tracing::trace!(?parsed, "parsed color");
            build(input.clone(), parsed)
        }
        Err(error) => {
            tracing::debug!(?input, %error, "color parse failed");
            Color::failed(input.clone(), error)
        }
    }
}

fn build(raw: ColorInput, parsed: Parsed) -> Color {
    match parsed {
        Parsed::Rgb(rgb, alpha) => Color::from_rgb(raw, rgb, alpha, None, None),
        Parsed::Keyword(name, rgb, alpha) => Color::from_rgb(raw, rgb, alpha, None, Some(name)),
        Parsed::Hsv(hsv, alpha) => Color::from_hsv(raw, hsv, alpha),
        Parsed::Hsl(hsl, alpha) => Color::from_hsl(raw, hsl, alpha),
    }
}

/// Parses `#rgb`, `#rrggbb` or `#rrggbbaa` (the `#` is optional).
fn parse_hex(text: &str) -> Result<Parsed, ColorError> {
    let t = text.trim();
    let digits = t.strip_prefix('#').unwrap_or(t);
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidFormat);
    }
    let byte = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| ColorError::InvalidFormat)
    };
    let nibble = |i: usize| {
        u8::from_str_radix(&digits[i..i + 1], 16)
            .map(|n| n * 17)
            .map_err(|_| ColorError::InvalidFormat)
    };
    match digits.len() {
        3 => Ok(Parsed::Rgb(Rgb::new(nibble(0)?, nibble(1)?, nibble(2)?), 1.0)),
        6 => Ok(Parsed::Rgb(Rgb::new(byte(0)?, byte(2)?, byte(4)?), 1.0)),
        8 => {
            // two decimals, so formatting the alpha back to hex lands on the same byte
            let alpha = (byte(6)? as f64 / 255.0 * 100.0).round() / 100.0;
            Ok(Parsed::Rgb(Rgb::new(byte(0)?, byte(2)?, byte(4)?), alpha))
        }
        _ => Err(ColorError::InvalidFormat),
    }
}

fn parse_named(text: &str) -> Result<Parsed, ColorError> {
    let t = text.trim();
    if t.eq_ignore_ascii_case(names::TRANSPARENT) {
        return Ok(Parsed::Keyword(names::TRANSPARENT, Rgb::BLACK, 0.0));
    }
    names::find(t)
        .map(|(name, rgb)| Parsed::Keyword(name, rgb, 1.0))
        .ok_or(ColorError::InvalidFormat)
}

/// Parses `rgb(r, g, b[, a])`, `hsl(h, s%, l%[, a])`, `hsv(h, s%, v%[, a])`
/// and their `rgba`/`hsla`/`hsva` spellings.
fn parse_functional(text: &str) -> Result<Parsed, ColorError> {
    let t = text.trim();
    let (name, rest) = t.split_once('(').ok_or(ColorError::InvalidFormat)?;
    let args = rest.strip_suffix(')').ok_or(ColorError::InvalidFormat)?;
    let model = match name.trim().to_ascii_lowercase().as_str() {
        "rgb" | "rgba" => ColorModel::Rgb,
        "hsv" | "hsva" => ColorModel::Hsv,
        "hsl" | "hsla" => ColorModel::Hsl,
        _ => return Err(ColorError::InvalidFormat),
    };
    let channels = model.channels();
    let values = args
        .split(',')
        .enumerate()
        .map(|(i, arg)| {
            let channel = channels.get(i).copied().unwrap_or(Channel::Alpha);
            parse_argument(arg.trim(), channel)
        })
        .collect::<Result<Vec<f64>, ColorError>>()?;
    parse_triple(&values, model)
}

fn parse_argument(arg: &str, channel: Channel) -> Result<f64, ColorError> {
    let number = |s: &str| s.trim().parse::<f64>().map_err(|_| ColorError::InvalidFormat);
    match channel {
        Channel::Hue => number(arg.strip_suffix("deg").or(arg.strip_suffix('°')).unwrap_or(arg)),
        Channel::Saturation | Channel::Value | Channel::Lightness => {
            number(arg.strip_suffix('%').unwrap_or(arg))
        }
        Channel::Alpha => match arg.strip_suffix('%') {
            Some(percent) => number(percent).map(|p| p / 100.0),
            None => number(arg),
        },
        Channel::Red | Channel::Green | Channel::Blue => number(arg),
    }
}

/// Three components in `model`, optionally followed by alpha. Each is
/// clamped to its channel bounds.
fn parse_triple(values: &[f64], model: ColorModel) -> Result<Parsed, ColorError> {
    if !matches!(values.len(), 3 | 4) {
        return Err(ColorError::InvalidFormat);
    }
    let [c0, c1, c2] = model.channels();
    let a = c0.clamp(values[0]).ok_or(ColorError::InvalidComponent)?;
    let b = c1.clamp(values[1]).ok_or(ColorError::InvalidComponent)?;
    let c = c2.clamp(values[2]).ok_or(ColorError::InvalidComponent)?;
    let alpha = match values.get(3) {
        Some(&alpha) => Channel::Alpha.clamp(alpha).ok_or(ColorError::InvalidComponent)?,
        None => 1.0,
    };
    Ok(match model {
        ColorModel::Rgb => Parsed::Rgb(
            Rgb::new(a.round() as u8, b.round() as u8, c.round() as u8),
            alpha,
        ),
        ColorModel::Hsv => Parsed::Hsv(Hsv { h: a, s: b, v: c }, alpha),
        ColorModel::Hsl => Parsed::Hsl(Hsl { h: a, s: b, l: c }, alpha),
    })
}

/// Picks the model whose channel keys exactly match the map (ignoring case
/// and an optional `a`).
fn parse_keyed(map: &BTreeMap<String, f64>) -> Result<Parsed, ColorError> {
    let lowered: BTreeMap<String, f64> = map
        .iter()
        .map(|(k, &v)| (k.trim().to_ascii_lowercase(), v))
        .collect();
    let keys: BTreeSet<&str> = lowered
        .keys()
        .map(String::as_str)
        .filter(|&k| k != Channel::Alpha.key())
        .collect();
    let model = [ColorModel::Rgb, ColorModel::Hsv, ColorModel::Hsl]
        .into_iter()
        .find(|model| {
            let expected: BTreeSet<&str> = model.channels().iter().map(|c| c.key()).collect();
            expected == keys
        })
        .ok_or(ColorError::InvalidFormat)?;
    let mut values: Vec<f64> = model
        .channels()
        .iter()
        .map(|c| lowered[c.key()])
        .collect();
    if let Some(&alpha) = lowered.get(Channel::Alpha.key()) {
        values.push(alpha);
    }
    parse_triple(&values, model)
}
