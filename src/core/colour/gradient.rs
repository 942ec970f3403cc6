//! Multi-stop gradient resolution.
//!
//! The engine assumes a sorted stop list and never validates it; see
//! [`crate::core::colour::stops`] for the editing-side invariants. Degenerate
//! lists (empty, single stop, repeated positions) resolve through fallbacks
//! instead of failing.

use crate::core::colour::hsv::{Hsv, interpolate_hsv, rgb_to_hsv};
use crate::core::data::colour::Colour;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier the stop editor assigns to each stop.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StopId(String);

impl StopId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColourStop {
    pub id: StopId,
    #[serde(rename = "color")]
    pub colour: Colour,
    pub position: f64,
}

impl ColourStop {
    pub fn new(id: impl Into<String>, colour: Colour, position: f64) -> Self {
        Self {
            id: StopId::new(id),
            colour,
            position,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
enum Bracket {
    Between { lower: usize, upper: usize, local_t: f64 },
    Single(usize),
    Empty,
}

/// Finds the first adjacent pair with `lower.position <= t <= upper.position`.
fn bracket<T>(stops: &[T], t: f64, position: impl Fn(&T) -> f64) -> Bracket {
    let Some(first) = stops.first() else {
        return Bracket::Empty;
    };

    for (lower, pair) in stops.windows(2).enumerate() {
        let (from, to) = (position(&pair[0]), position(&pair[1]));

        if from <= t && t <= to {
            let span = to - from;
            let local_t = if span > 0.0 { (t - from) / span } else { 0.0 };

            return Bracket::Between {
                lower,
                upper: lower + 1,
                local_t,
            };
        }
    }

    if t < position(first) {
        Bracket::Single(0)
    } else {
        Bracket::Single(stops.len() - 1)
    }
}

fn clamp_unit(t: f64) -> f64 {
    if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) }
}

/// Resolves a normalized position to a colour.
///
/// `t` is clamped into `[0, 1]`. An empty stop list resolves to black.
#[must_use]
pub fn resolve(stops: &[ColourStop], t: f64) -> Colour {
    match bracket(stops, clamp_unit(t), |stop| stop.position) {
        Bracket::Between {
            lower,
            upper,
            local_t,
        } => interpolate_hsv(
            rgb_to_hsv(stops[lower].colour),
            rgb_to_hsv(stops[upper].colour),
            local_t,
        ),
        Bracket::Single(index) => stops[index].colour,
        Bracket::Empty => Colour::BLACK,
    }
}

/// A stop list with every colour converted to HSV up front.
///
/// Sampling takes the same path as [`resolve`] and gives identical colours;
/// it only avoids converting the bracketing stops again for every pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedGradient {
    stops: Vec<(f64, Hsv, Colour)>,
}

impl PreparedGradient {
    #[must_use]
    pub fn new(stops: &[ColourStop]) -> Self {
        Self {
            stops: stops
                .iter()
                .map(|stop| (stop.position, rgb_to_hsv(stop.colour), stop.colour))
                .collect(),
        }
    }

    #[must_use]
    pub fn sample(&self, t: f64) -> Colour {
        match bracket(&self.stops, clamp_unit(t), |stop| stop.0) {
            Bracket::Between {
                lower,
                upper,
                local_t,
            } => interpolate_hsv(self.stops[lower].1, self.stops[upper].1, local_t),
            Bracket::Single(index) => self.stops[index].2,
            Bracket::Empty => Colour::BLACK,
        }
    }
}
