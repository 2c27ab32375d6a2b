//! Color space records and conversion functions between them.
//!
//! Provides three color types (`Rgb`, `Hsv`, `Hsl`) and pure conversion
//! functions between them. `Rgb` is 8-bit; the cylindrical spaces use `f64`
//! so a round trip through them loses nothing before the final rounding.
//!
//! Hue is in degrees [0, 360); saturation, value and lightness are
//! percentages in [0, 100].

use serde::{Deserialize, Serialize};

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Hue / saturation / value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

/// Hue / saturation / lightness.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Rgb { r, g, b }
    }
}

impl Hsv {
    /// Rounds to the integer triple stored on a `Color`.
    pub fn rounded(self) -> [u16; 3] {
        [round_hue(self.h), round_percent(self.s), round_percent(self.v)]
    }
}

impl Hsl {
    /// Rounds to the integer triple stored on a `Color`.
    pub fn rounded(self) -> [u16; 3] {
        [round_hue(self.h), round_percent(self.s), round_percent(self.l)]
    }
}

/// Wraps an angle into [0, 360). Non-finite angles become 0.
pub fn normalize_hue(h: f64) -> f64 {
    if !h.is_finite() {
        return 0.0;
    }
    let h = h.rem_euclid(360.0);
    // rem_euclid can return exactly 360.0 for tiny negative inputs
    if h >= 360.0 {
        0.0
    } else {
        h
    }
}

fn round_hue(h: f64) -> u16 {
    (normalize_hue(h).round() as u16) % 360
}

fn round_percent(p: f64) -> u16 {
    p.clamp(0.0, 100.0).round() as u16
}

fn unit_to_channel(c: f64) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Hue shared by HSV and HSL, or `None` for achromatic input.
fn rgb_hue(r: f64, g: f64, b: f64, max: f64, delta: f64) -> Option<f64> {
    if delta == 0.0 {
        return None;
    }
    let h = if max == r {
        ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };
    Some(normalize_hue(h * 60.0))
}

fn unit_channels(c: Rgb) -> (f64, f64, f64) {
    (
        c.r as f64 / 255.0,
        c.g as f64 / 255.0,
        c.b as f64 / 255.0,
    )
}

/// Converts RGB to HSV.
///
/// Zero-chroma colors (grays) have no hue of their own: `hue_hint` is used
/// when given so a picker cursor does not jump back to red while dragging
/// through gray, otherwise the hue is 0.
pub fn rgb_to_hsv(c: Rgb, hue_hint: Option<f64>) -> Hsv {
    let (r, g, b) = unit_channels(c);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let h = rgb_hue(r, g, b, max, delta)
        .or(hue_hint.map(normalize_hue))
        .unwrap_or(0.0);
    let s = if max == 0.0 { 0.0 } else { delta / max };
    Hsv {
        h,
        s: s * 100.0,
        v: max * 100.0,
    }
}

/// Converts RGB to HSL. Hue follows the same rules as [`rgb_to_hsv`].
pub fn rgb_to_hsl(c: Rgb, hue_hint: Option<f64>) -> Hsl {
    let (r, g, b) = unit_channels(c);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let h = rgb_hue(r, g, b, max, delta)
        .or(hue_hint.map(normalize_hue))
        .unwrap_or(0.0);
    let l = (max + min) / 2.0;
    let s = if delta == 0.0 {
        0.0
    } else {
        delta / (1.0 - (2.0 * l - 1.0).abs())
    };
    Hsl {
        h,
        s: s.clamp(0.0, 1.0) * 100.0,
        l: l * 100.0,
    }
}

/// Places chroma `c` on the hue circle and lifts every channel by `m`.
fn chroma_to_rgb(h: f64, c: f64, m: f64) -> Rgb {
    let hp = normalize_hue(h) / 60.0;
    let x = c * (1.0 - (hp.rem_euclid(2.0) - 1.0).abs());
    let (r, g, b) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    Rgb {
        r: unit_to_channel(r + m),
        g: unit_to_channel(g + m),
        b: unit_to_channel(b + m),
    }
}

/// Converts HSV to RGB, rounding each channel to 8 bits.
pub fn hsv_to_rgb(c: Hsv) -> Rgb {
    let s = (c.s / 100.0).clamp(0.0, 1.0);
    let v = (c.v / 100.0).clamp(0.0, 1.0);
    let chroma = v * s;
    chroma_to_rgb(c.h, chroma, v - chroma)
}

/// Converts HSL to RGB, rounding each channel to 8 bits.
pub fn hsl_to_rgb(c: Hsl) -> Rgb {
    let s = (c.s / 100.0).clamp(0.0, 1.0);
    let l = (c.l / 100.0).clamp(0.0, 1.0);
    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
    chroma_to_rgb(c.h, chroma, l - chroma / 2.0)
}

/// Converts HSV to HSL without going through RGB, so hue is kept as-is.
pub fn hsv_to_hsl(c: Hsv) -> Hsl {
    let s = (c.s / 100.0).clamp(0.0, 1.0);
    let v = (c.v / 100.0).clamp(0.0, 1.0);
    let l = v * (1.0 - s / 2.0);
    let sl = if l <= 0.0 || l >= 1.0 {
        0.0
    } else {
        (v - l) / l.min(1.0 - l)
    };
    Hsl {
        h: normalize_hue(c.h),
        s: sl.clamp(0.0, 1.0) * 100.0,
        l: l * 100.0,
    }
}

/// Converts HSL to HSV without going through RGB, so hue is kept as-is.
pub fn hsl_to_hsv(c: Hsl) -> Hsv {
    let s = (c.s / 100.0).clamp(0.0, 1.0);
    let l = (c.l / 100.0).clamp(0.0, 1.0);
    let v = l + s * l.min(1.0 - l);
    let sv = if v <= 0.0 { 0.0 } else { 2.0 * (1.0 - l / v) };
    Hsv {
        h: normalize_hue(c.h),
        s: sv.clamp(0.0, 1.0) * 100.0,
        v: v * 100.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn pure_red_to_hsv() {
        let hsv = rgb_to_hsv(Rgb::new(255, 0, 0), None);
        assert!(approx_eq(hsv.h, 0.0));
        assert!(approx_eq(hsv.s, 100.0));
        assert!(approx_eq(hsv.v, 100.0));
    }

    #[test]
    fn primaries_have_expected_hues() {
        let green = rgb_to_hsv(Rgb::new(0, 255, 0), None);
        let blue = rgb_to_hsv(Rgb::new(0, 0, 255), None);
        let magenta = rgb_to_hsl(Rgb::new(255, 0, 255), None);
        assert!(approx_eq(green.h, 120.0), "green hue {}", green.h);
        assert!(approx_eq(blue.h, 240.0), "blue hue {}", blue.h);
        assert!(approx_eq(magenta.h, 300.0), "magenta hue {}", magenta.h);
    }

    #[test]
    fn gray_without_hint_has_hue_zero() {
        let hsv = rgb_to_hsv(Rgb::new(128, 128, 128), None);
        assert_eq!(hsv.h, 0.0);
        assert_eq!(hsv.s, 0.0);
    }

    #[test]
    fn gray_keeps_hinted_hue() {
        let hsv = rgb_to_hsv(Rgb::new(40, 40, 40), Some(210.0));
        let hsl = rgb_to_hsl(Rgb::new(40, 40, 40), Some(210.0));
        assert_eq!(hsv.h, 210.0);
        assert_eq!(hsl.h, 210.0);
    }

    #[test]
    fn hint_is_ignored_for_chromatic_colors() {
        let hsv = rgb_to_hsv(Rgb::new(0, 0, 255), Some(10.0));
        assert!(approx_eq(hsv.h, 240.0));
    }

    #[test]
    fn white_in_hsl_has_full_lightness_and_no_saturation() {
        let hsl = rgb_to_hsl(Rgb::new(255, 255, 255), None);
        assert!(approx_eq(hsl.l, 100.0));
        assert!(approx_eq(hsl.s, 0.0));
    }

    #[test]
    fn hsl_of_known_color() {
        // #336699 is hsl(210, 50%, 40%)
        let hsl = rgb_to_hsl(Rgb::new(0x33, 0x66, 0x99), None);
        assert!(approx_eq(hsl.h, 210.0), "h {}", hsl.h);
        assert!(approx_eq(hsl.s, 50.0), "s {}", hsl.s);
        assert!(approx_eq(hsl.l, 40.0), "l {}", hsl.l);
    }

    #[test]
    fn hsv_to_rgb_known_values() {
        assert_eq!(hsv_to_rgb(Hsv { h: 0.0, s: 100.0, v: 100.0 }), Rgb::new(255, 0, 0));
        assert_eq!(hsv_to_rgb(Hsv { h: 60.0, s: 100.0, v: 100.0 }), Rgb::new(255, 255, 0));
        assert_eq!(hsv_to_rgb(Hsv { h: 180.0, s: 100.0, v: 50.0 }), Rgb::new(0, 128, 128));
        assert_eq!(hsv_to_rgb(Hsv { h: 300.0, s: 0.0, v: 100.0 }), Rgb::new(255, 255, 255));
    }

    #[test]
    fn hsl_to_rgb_known_values() {
        assert_eq!(hsl_to_rgb(Hsl { h: 210.0, s: 50.0, l: 40.0 }), Rgb::new(0x33, 0x66, 0x99));
        assert_eq!(hsl_to_rgb(Hsl { h: 120.0, s: 100.0, l: 25.0 }), Rgb::new(0, 128, 0));
        assert_eq!(hsl_to_rgb(Hsl { h: 0.0, s: 0.0, l: 0.0 }), Rgb::BLACK);
    }

    #[test]
    fn hue_of_360_wraps_to_red() {
        assert_eq!(hsv_to_rgb(Hsv { h: 360.0, s: 100.0, v: 100.0 }), Rgb::new(255, 0, 0));
    }

    #[test]
    fn hsv_hsl_direct_conversion_keeps_hue_at_zero_saturation() {
        let hsl = hsv_to_hsl(Hsv { h: 123.0, s: 0.0, v: 50.0 });
        assert_eq!(hsl.h, 123.0);
        assert!(approx_eq(hsl.l, 50.0));
        let hsv = hsl_to_hsv(Hsl { h: 77.0, s: 0.0, l: 0.0 });
        assert_eq!(hsv.h, 77.0);
        assert!(approx_eq(hsv.v, 0.0));
    }

    #[test]
    fn hsv_hsl_direct_conversion_matches_rgb_path() {
        let hsv = Hsv { h: 200.0, s: 60.0, v: 80.0 };
        let via_rgb = rgb_to_hsl(hsv_to_rgb(hsv), None);
        let direct = hsv_to_hsl(hsv);
        assert!((via_rgb.s - direct.s).abs() < 1.0, "{via_rgb:?} vs {direct:?}");
        assert!((via_rgb.l - direct.l).abs() < 1.0, "{via_rgb:?} vs {direct:?}");
    }

    #[test]
    fn rounded_wraps_hue_just_below_360() {
        let hsv = Hsv { h: 359.7, s: 10.2, v: 99.5 };
        assert_eq!(hsv.rounded(), [0, 10, 100]);
    }

    #[test]
    fn normalize_hue_handles_negative_and_non_finite() {
        assert!(approx_eq(normalize_hue(-30.0), 330.0));
        assert_eq!(normalize_hue(f64::NAN), 0.0);
        assert_eq!(normalize_hue(f64::INFINITY), 0.0);
        assert_eq!(normalize_hue(720.0), 0.0);
    }

    // -- Property-based tests --

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn rgb() -> impl Strategy<Value = Rgb> {
            (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| Rgb { r, g, b })
        }

        proptest! {
            #[test]
            fn rgb_hsv_round_trip_is_exact(c in rgb()) {
                let back = hsv_to_rgb(rgb_to_hsv(c, None));
                prop_assert_eq!(back, c);
            }

            #[test]
            fn rgb_hsl_round_trip_is_exact(c in rgb()) {
                let back = hsl_to_rgb(rgb_to_hsl(c, None));
                prop_assert_eq!(back, c);
            }

            #[test]
            fn hsv_and_hsl_share_hue(c in rgb()) {
                let hsv = rgb_to_hsv(c, None);
                let hsl = rgb_to_hsl(c, None);
                prop_assert!((hsv.h - hsl.h).abs() < EPSILON);
            }

            #[test]
            fn rounded_components_stay_in_range(c in rgb()) {
                let hsv = rgb_to_hsv(c, None).rounded();
                let hsl = rgb_to_hsl(c, None).rounded();
                prop_assert!(hsv[0] < 360 && hsl[0] < 360);
                prop_assert!(hsv[1] <= 100 && hsv[2] <= 100);
                prop_assert!(hsl[1] <= 100 && hsl[2] <= 100);
            }

            #[test]
            fn hsv_hsl_direct_round_trip(
                h in 0.0_f64..360.0,
                s in 0.0_f64..=100.0,
                v in 0.5_f64..=100.0,
            ) {
                let back = hsl_to_hsv(hsv_to_hsl(Hsv { h, s, v }));
                prop_assert!((back.h - h).abs() < 1e-9);
                prop_assert!((back.v - v).abs() < 1e-6, "v {} vs {}", back.v, v);
            }
        }
    }
}
