//! Base color of a hue: the fully saturated, full-value RGB for an angle.
//!
//! Used as the background of a saturation/value gradient box. The hue circle
//! is cut into six 60° sectors; in each, one channel sits at 255, one at 0
//! and the third ramps linearly up or down.

use crate::space::Rgb;

/// Returns the pure color of `hue` (degrees) at full saturation and value.
///
/// Total over `f64`: angles outside [0, 360) wrap, NaN and infinities map
/// to hue 0.
pub fn hue_to_rgb(hue: f64) -> Rgb {
    let hue = if hue.is_finite() { hue } else { 0.0 };
    let h = hue / 360.0 * 6.0;
    let sector = h.floor();
    let f = h - sector;
    let v = 255u8;
    let q = (255.0 * (1.0 - f)).round() as u8;
    let t = (255.0 * f).round() as u8;
    match (sector as i64).rem_euclid(6) {
        0 => Rgb::new(v, t, 0),
        1 => Rgb::new(q, v, 0),
        2 => Rgb::new(0, v, t),
        3 => Rgb::new(0, q, v),
        4 => Rgb::new(t, 0, v),
        _ => Rgb::new(v, 0, q),
    }
}
