//! HSV conversions and circular hue blending.
//!
//! Hue is in degrees `[0, 360)`, saturation and value in `[0, 1]`.

use crate::core::data::colour::{Colour, MalformedColourError};

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

#[must_use]
pub fn rgb_to_hsv(colour: Colour) -> Hsv {
    let r = f64::from(colour.r) / 255.0;
    let g = f64::from(colour.g) / 255.0;
    let b = f64::from(colour.b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let s = if max == 0.0 { 0.0 } else { delta / max };

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        let sector = (g - b) / delta;
        60.0 * if g < b { sector + 6.0 } else { sector }
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };

    Hsv {
        h: normalize_hue(h),
        s,
        v: max,
    }
}

pub fn hex_to_hsv(hex: &str) -> Result<Hsv, MalformedColourError> {
    Colour::from_hex(hex).map(rgb_to_hsv)
}

/// Sector-based HSV to RGB. Out-of-range saturation and value are clamped,
/// hue wraps.
#[must_use]
pub fn hsv_to_rgb(hsv: Hsv) -> Colour {
    let s = hsv.s.clamp(0.0, 1.0);
    let v = hsv.v.clamp(0.0, 1.0);

    if s == 0.0 {
        let grey = to_channel(v);
        return Colour::new(grey, grey, grey);
    }

    let h = normalize_hue(hsv.h) / 60.0;
    let sector = h.floor();
    let f = h - sector;

    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match sector as u8 % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    Colour::new(to_channel(r), to_channel(g), to_channel(b))
}

/// Blends two hues along the shorter arc of the colour wheel.
#[must_use]
pub fn interpolate_hue(h1: f64, h2: f64, t: f64) -> f64 {
    let (mut from, mut to) = (h1, h2);

    if to - from > 180.0 {
        from += 360.0;
    } else if from - to > 180.0 {
        to += 360.0;
    }

    normalize_hue(from + (to - from) * t)
}

/// `t` is not clamped; callers pass a value in `[0, 1]`.
#[must_use]
pub fn interpolate_hsv(from: Hsv, to: Hsv, t: f64) -> Colour {
    hsv_to_rgb(Hsv {
        h: interpolate_hue(from.h, to.h, t),
        s: from.s + (to.s - from.s) * t,
        v: from.v + (to.v - from.v) * t,
    })
}

fn normalize_hue(h: f64) -> f64 {
    let wrapped = h.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360.0
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

fn to_channel(unit: f64) -> u8 {
    (unit * 255.0).round().clamp(0.0, 255.0) as u8
}
