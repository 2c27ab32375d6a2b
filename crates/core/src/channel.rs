//! Channel bounds and units, the single table shared by the parser (which
//! clamps with it) and the component builder (which publishes it).

use serde::Serialize;

use crate::input::ColorModel;

/// One editable channel of a color model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Red,
    Green,
    Blue,
    Hue,
    Saturation,
    Value,
    Lightness,
    Alpha,
}

impl Channel {
    /// Short key used in keyed inputs and component tables.
    pub fn key(self) -> &'static str {
        match self {
            Channel::Red => "r",
            Channel::Green => "g",
            Channel::Blue => "b",
            Channel::Hue => "h",
            Channel::Saturation => "s",
            Channel::Value => "v",
            Channel::Lightness => "l",
            Channel::Alpha => "a",
        }
    }

    /// Translation key for the field label.
    pub fn label_key(self) -> &'static str {
        match self {
            Channel::Red => "R",
            Channel::Green => "G",
            Channel::Blue => "B",
            Channel::Hue => "H",
            Channel::Saturation => "S",
            Channel::Value => "V",
            Channel::Lightness => "L",
            Channel::Alpha => "A",
        }
    }

    /// Inclusive lower bound.
    pub fn min(self) -> f64 {
        0.0
    }

    /// Inclusive upper bound. Hue accepts 360, which is the same angle as 0.
    pub fn max(self) -> f64 {
        match self {
            Channel::Red | Channel::Green | Channel::Blue => 255.0,
            Channel::Hue => 360.0,
            Channel::Saturation | Channel::Value | Channel::Lightness => 100.0,
            Channel::Alpha => 1.0,
        }
    }

    /// Unit suffix shown next to the field, empty when there is none.
    pub fn unit(self) -> &'static str {
        match self {
            Channel::Hue => "°",
            Channel::Saturation | Channel::Value | Channel::Lightness => "%",
            Channel::Red | Channel::Green | Channel::Blue | Channel::Alpha => "",
        }
    }

    /// Clamps `value` into the channel bounds. Returns `None` for NaN and
    /// infinities, which have no meaningful clamp.
    ///
    /// Alpha is also rounded to hundredths, the precision CSS output carries.
    pub fn clamp(self, value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }
        let clamped = value.clamp(self.min(), self.max());
        Some(match self {
            Channel::Alpha => (clamped * 100.0).round() / 100.0,
            _ => clamped,
        })
    }
}

impl ColorModel {
    /// The model's three channels in component order.
    pub fn channels(self) -> [Channel; 3] {
        match self {
            ColorModel::Rgb => [Channel::Red, Channel::Green, Channel::Blue],
            ColorModel::Hsv => [Channel::Hue, Channel::Saturation, Channel::Value],
            ColorModel::Hsl => [Channel::Hue, Channel::Saturation, Channel::Lightness],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_channels_clamp_to_byte_range() {
        assert_eq!(Channel::Red.clamp(300.0), Some(255.0));
        assert_eq!(Channel::Green.clamp(-5.0), Some(0.0));
        assert_eq!(Channel::Blue.clamp(128.0), Some(128.0));
    }

    #[test]
    fn hue_upper_bound_is_inclusive() {
        assert_eq!(Channel::Hue.clamp(360.0), Some(360.0));
        assert_eq!(Channel::Hue.clamp(400.0), Some(360.0));
    }

    #[test]
    fn non_finite_values_do_not_clamp() {
        assert_eq!(Channel::Alpha.clamp(f64::NAN), None);
        assert_eq!(Channel::Value.clamp(f64::INFINITY), None);
    }

    #[test]
    fn alpha_is_kept_to_hundredths() {
        assert_eq!(Channel::Alpha.clamp(0.123), Some(0.12));
        assert_eq!(Channel::Alpha.clamp(0.996), Some(1.0));
        assert_eq!(Channel::Alpha.clamp(0.5), Some(0.5));
        assert_eq!(Channel::Saturation.clamp(33.333), Some(33.333));
    }

    #[test]
    fn units_follow_channel_kind() {
        assert_eq!(Channel::Hue.unit(), "°");
        assert_eq!(Channel::Lightness.unit(), "%");
        assert_eq!(Channel::Red.unit(), "");
        assert_eq!(Channel::Alpha.unit(), "");
    }
}
