//! Escape-time iteration for `z -> z² + c`.

use crate::core::data::complex::Complex;

pub const MAX_ITERATIONS: u32 = 800;

const ESCAPE_RADIUS_SQUARED: f64 = 4.0;

/// How an escape-time computation finished.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Exit {
    /// Inside the main cardioid, no iteration needed.
    Cardioid,
    /// Inside the period-2 bulb, no iteration needed.
    Bulb,
    /// The orbit landed exactly on its previous value.
    FixedPoint,
    Escaped,
    /// Ran out of iterations without escaping.
    Exhausted,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct EscapeTrace {
    pub iterations: u32,
    pub steps: u32,
    pub exit: Exit,
}

impl EscapeTrace {
    #[must_use]
    pub fn is_interior(&self) -> bool {
        self.iterations == MAX_ITERATIONS
    }
}

#[must_use]
pub fn in_main_cardioid(c: Complex) -> bool {
    let x = c.real - 0.25;
    let y2 = c.imag * c.imag;
    let q = x * x + y2;

    q * (q + x) < 0.25 * y2
}

#[must_use]
pub fn in_period2_bulb(c: Complex) -> bool {
    let x = c.real + 1.0;

    x * x + c.imag * c.imag < 0.0625
}

/// Full computation including the closed-form interior tests.
#[must_use]
pub fn trace(c: Complex) -> EscapeTrace {
    if in_main_cardioid(c) {
        return interior(0, Exit::Cardioid);
    }

    if in_period2_bulb(c) {
        return interior(0, Exit::Bulb);
    }

    iterate(c)
}

/// The bounded iteration loop on its own, without the interior shortcuts.
#[must_use]
pub fn iterate(c: Complex) -> EscapeTrace {
    let mut z = Complex::ZERO;
    let mut steps = 0;

    while z.norm_sqr() < ESCAPE_RADIUS_SQUARED && steps < MAX_ITERATIONS {
        let next = z.square() + c;
        steps += 1;

        // period-1 only, exact comparison
        if next == z {
            return interior(steps, Exit::FixedPoint);
        }

        z = next;
    }

    if z.norm_sqr() >= ESCAPE_RADIUS_SQUARED {
        EscapeTrace {
            iterations: steps,
            steps,
            exit: Exit::Escaped,
        }
    } else {
        interior(steps, Exit::Exhausted)
    }
}

#[inline]
#[must_use]
pub fn escape_time(c: Complex) -> u32 {
    trace(c).iterations
}

fn interior(steps: u32, exit: Exit) -> EscapeTrace {
    EscapeTrace {
        iterations: MAX_ITERATIONS,
        steps,
        exit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardioid_centre_is_interior() {
        let result = trace(Complex::new(-0.5, 0.0));

        assert_eq!(result.iterations, MAX_ITERATIONS);
        assert_eq!(result.exit, Exit::Cardioid);
        assert_eq!(result.steps, 0);
    }

    #[test]
    fn test_bulb_centre_is_interior() {
        let result = trace(Complex::new(-1.0, 0.0));

        assert_eq!(result.iterations, MAX_ITERATIONS);
        assert_eq!(result.exit, Exit::Bulb);
    }

    #[test]
    fn test_far_point_escapes_immediately() {
        let result = trace(Complex::new(2.0, 2.0));

        assert!(result.iterations <= 2);
        assert_eq!(result.exit, Exit::Escaped);
        assert_eq!(escape_time(Complex::new(2.0, 2.0)), 1);
    }

    #[test]
    fn test_origin_is_interior() {
        assert_eq!(escape_time(Complex::ZERO), MAX_ITERATIONS);
    }

    #[test]
    fn test_origin_loop_hits_fixed_point_after_one_step() {
        let result = iterate(Complex::ZERO);

        assert_eq!(
            result,
            EscapeTrace {
                iterations: MAX_ITERATIONS,
                steps: 1,
                exit: Exit::FixedPoint
            }
        );
    }

    #[test]
    fn test_escape_bound_is_inclusive() {
        // c = -2 lands on |z|² == 4 after one step
        let result = trace(Complex::new(-2.0, 0.0));

        assert_eq!(result.exit, Exit::Escaped);
        assert_eq!(result.iterations, 1);
    }

    #[test]
    fn test_point_outside_fast_paths_counts_steps() {
        // c = 0.3: real axis just past the cusp at 0.25, escapes slowly
        let c = Complex::new(0.3, 0.0);

        assert!(!in_main_cardioid(c));
        assert!(!in_period2_bulb(c));

        let result = trace(c);
        assert_eq!(result.exit, Exit::Escaped);
        assert!(result.iterations > 5 && result.iterations < MAX_ITERATIONS);
        assert_eq!(result.iterations, result.steps);
    }

    #[test]
    fn test_interior_point_outside_fast_paths_exhausts() {
        // period-3 bulb centre, not covered by either closed-form test
        let c = Complex::new(-0.1225611668766536, 0.7448617666197442);

        assert!(!in_main_cardioid(c));
        assert!(!in_period2_bulb(c));
        assert!(trace(c).is_interior());
    }

    #[test]
    fn test_cardioid_and_bulb_shapes() {
        assert!(in_main_cardioid(Complex::new(0.0, 0.0)));
        assert!(in_main_cardioid(Complex::new(0.2, 0.0)));
        assert!(!in_main_cardioid(Complex::new(0.3, 0.0)));
        assert!(!in_main_cardioid(Complex::new(-1.0, 0.0)));

        assert!(in_period2_bulb(Complex::new(-1.2, 0.0)));
        assert!(!in_period2_bulb(Complex::new(-1.3, 0.0)));
    }
}
