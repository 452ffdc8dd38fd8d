//! Cubic-bezier timing curves, as used by CSS transitions.

/// A CSS-style `cubic-bezier(x1, y1, x2, y2)` timing function.
///
/// The curve runs from (0, 0) to (1, 1); `x` is elapsed time and `y` is progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

/// Deceleration curve of the wheel's stop animation.
pub const SPIN_EASE: CubicBezier = CubicBezier::new(0.12, 0.6, 0.03, 1.0);

impl CubicBezier {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    fn coord(p1: f64, p2: f64, s: f64) -> f64 {
        let inv = 1.0 - s;
        3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
    }

    fn slope_x(&self, s: f64) -> f64 {
        let inv = 1.0 - s;
        3.0 * inv * inv * self.x1 + 6.0 * inv * s * (self.x2 - self.x1) + 3.0 * s * s * (1.0 - self.x2)
    }

    /// Finds the curve parameter whose x equals `t`.
    fn solve_parameter(&self, t: f64) -> f64 {
        // Newton first, bisection if the slope flattens out
        let mut s = t;
        for _ in 0..8 {
            let err = Self::coord(self.x1, self.x2, s) - t;
            if err.abs() < 1e-7 {
                return s;
            }
            let slope = self.slope_x(s);
            if slope.abs() < 1e-6 {
                break;
            }
            s = (s - err / slope).clamp(0.0, 1.0);
        }

        let (mut lo, mut hi) = (0.0, 1.0);
        s = t;
        for _ in 0..64 {
            let x = Self::coord(self.x1, self.x2, s);
            if (x - t).abs() < 1e-7 {
                break;
            }
            if x < t {
                lo = s;
            } else {
                hi = s;
            }
            s = (lo + hi) / 2.0;
        }
        s
    }

    /// Progress in `[0, 1]` at elapsed fraction `t` (clamped into `[0, 1]`).
    pub fn sample(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        Self::coord(self.y1, self.y2, self.solve_parameter(t))
    }
}
