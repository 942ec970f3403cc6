use crate::core::actions::render_pass::ports::colour_map::ColourMap;
use crate::core::colour::gradient::{ColourStop, PreparedGradient};
use crate::core::data::colour::Colour;
use crate::core::fractals::mandelbrot::kernel::MAX_ITERATIONS;
use std::convert::Infallible;

/// Colours escape counts through a multi-stop gradient.
///
/// The normalized count is raised to `power_factor` before the lookup, which
/// spreads the colours of the quickly escaping points that dominate wide views.
/// Interior points are always black.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientColourMap {
    gradient: PreparedGradient,
    power_factor: f64,
}

impl GradientColourMap {
    #[must_use]
    pub fn new(stops: &[ColourStop], power_factor: f64) -> Self {
        Self {
            gradient: PreparedGradient::new(stops),
            power_factor,
        }
    }
}

impl ColourMap for GradientColourMap {
    type T = u32;
    type Failure = Infallible;

    fn map(&self, iterations: u32) -> Result<Colour, Self::Failure> {
        if iterations >= MAX_ITERATIONS {
            return Ok(Colour::BLACK);
        }

        let fraction = f64::from(iterations) / f64::from(MAX_ITERATIONS);

        Ok(self.gradient.sample(fraction.powf(self.power_factor)))
    }
}
