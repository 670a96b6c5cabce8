//! Cubic-bezier easing curve evaluation.
//!
//! Maps normalized time in [0, 1] to eased progress, with endpoints
//! fixed at (0, 0) and (1, 1). Depending on the control points the
//! output may slightly overshoot [0, 1], as CSS curves do.

/// A CSS-style cubic-bezier curve.
///
/// Polynomial coefficients for x(t) and y(t) are precomputed at
/// construction; evaluation solves x(t) = u with Newton-Raphson and
/// falls back to bisection where the curve is too flat.
#[derive(Debug, Clone, Copy)]
pub struct CubicBezier {
    ax: f64,
    bx: f64,
    cx: f64,
    ay: f64,
    by: f64,
    cy: f64,
}

impl CubicBezier {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        let cx = 3.0 * x1;
        let bx = 3.0 * (x2 - x1) - cx;
        let ax = 1.0 - cx - bx;

        let cy = 3.0 * y1;
        let by = 3.0 * (y2 - y1) - cy;
        let ay = 1.0 - cy - by;

        Self {
            ax,
            bx,
            cx,
            ay,
            by,
            cy,
        }
    }

    /// The CSS "ease" shape: (0.25, 0.1, 0.25, 1.0).
    pub fn ease() -> Self {
        Self::new(0.25, 0.1, 0.25, 1.0)
    }

    /// Eased progress for normalized time `t`. Input is clamped to
    /// [0, 1]; the endpoints are exact.
    pub fn sample(&self, t: f64) -> f64 {
        let u = t.clamp(0.0, 1.0);
        if u == 0.0 || u == 1.0 {
            return u;
        }
        let t = self.solve_t_for_x(u);
        ((self.ay * t + self.by) * t + self.cy) * t
    }

    #[inline]
    fn curve_x(&self, t: f64) -> f64 {
        ((self.ax * t + self.bx) * t + self.cx) * t
    }

    fn solve_t_for_x(&self, x: f64) -> f64 {
        // Newton-Raphson; x itself is a good initial guess.
        let mut t = x;
        for _ in 0..8 {
            let err = self.curve_x(t) - x;
            if err.abs() < 1e-7 {
                return t;
            }
            let slope = (3.0 * self.ax * t + 2.0 * self.bx) * t + self.cx;
            if slope.abs() < 1e-6 {
                break;
            }
            t -= err / slope;
            if !(0.0..=1.0).contains(&t) {
                break;
            }
        }

        // Bisection fallback. x(t) is monotonic on [0, 1] for valid
        // control points, so this always converges.
        let mut lo = 0.0;
        let mut hi = 1.0;
        t = x;
        for _ in 0..32 {
            let err = self.curve_x(t) - x;
            if err.abs() < 1e-7 {
                break;
            }
            if err > 0.0 {
                hi = t;
            } else {
                lo = t;
            }
            t = (lo + hi) / 2.0;
        }
        t
    }
}

impl Default for CubicBezier {
    fn default() -> Self {
        Self::ease()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_exact() {
        let curve = CubicBezier::ease();
        assert_eq!(curve.sample(0.0), 0.0);
        assert_eq!(curve.sample(1.0), 1.0);
        // Out-of-range input clamps
        assert_eq!(curve.sample(-0.5), 0.0);
        assert_eq!(curve.sample(2.0), 1.0);
    }

    #[test]
    fn test_ease_monotonic() {
        let curve = CubicBezier::ease();
        let mut prev = 0.0;
        for i in 0..=100 {
            let t = i as f64 / 100.0;
            let v = curve.sample(t);
            assert!(v >= prev, "not monotonic at t={}", t);
            prev = v;
        }
    }

    #[test]
    fn test_ease_midpoint() {
        // Reference value for cubic-bezier(0.25, 0.1, 0.25, 1.0)
        let curve = CubicBezier::ease();
        assert!((curve.sample(0.5) - 0.8024).abs() < 0.005);
    }

    #[test]
    fn test_linear_control_points_are_identity() {
        // Control points on the diagonal reduce to f(t) = t
        let curve = CubicBezier::new(0.3, 0.3, 0.7, 0.7);
        for i in 0..=20 {
            let t = i as f64 / 20.0;
            assert!((curve.sample(t) - t).abs() < 1e-5, "at t={}", t);
        }
    }
}
