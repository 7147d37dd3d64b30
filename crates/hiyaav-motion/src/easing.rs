//! Easing curves.
//!
//! Entrance timelines use `Power3Out`, the cursor look uses CSS `ease`, the
//! navbar and section framer use `EaseOut`, and the scroll glide uses
//! `ExpoOut`.
//!
//! ```
//! use hiyaav_motion::EasingFunction;
//!
//! assert_eq!(EasingFunction::Power3Out.evaluate(0.5), 0.875);
//! assert_eq!(EasingFunction::ExpoOut.evaluate(1.0), 1.0);
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EasingFunction {
    Linear,
    /// CSS `ease`.
    #[default]
    Ease,
    /// CSS `ease-out`.
    EaseOut,
    /// `1 - (1 - t)^3`.
    Power3Out,
    /// `min(1, 1.001 - 2^(-10t))`. Starts just above zero and never passes
    /// the destination.
    ExpoOut,
    /// `cubic-bezier(x1, y1, x2, y2)` timing curve.
    CubicBezier { x1: f32, y1: f32, x2: f32, y2: f32 },
}

impl EasingFunction {
    /// Custom timing curve, or `None` when an x control point leaves `[0, 1]`
    /// (the curve would no longer be a function of time).
    pub fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32) -> Option<Self> {
        let unit = 0.0..=1.0;
        (unit.contains(&x1) && unit.contains(&x2)).then_some(Self::CubicBezier { x1, y1, x2, y2 })
    }

    /// Eased progress for linear progress `t`, clamped to `[0, 1]` first.
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Self::Linear => t,
            Self::Ease => Bezier::new(0.25, 0.1, 0.25, 1.0).at(t),
            Self::EaseOut => Bezier::new(0.0, 0.0, 0.58, 1.0).at(t),
            Self::Power3Out => 1.0 - (1.0 - t).powi(3),
            Self::ExpoOut => (1.001 - (-10.0 * t).exp2()).min(1.0),
            Self::CubicBezier { x1, y1, x2, y2 } => Bezier::new(x1, y1, x2, y2).at(t),
        }
    }
}

/// Unit cubic bezier through (0, 0) and (1, 1).
struct Bezier {
    x: (f32, f32),
    y: (f32, f32),
}

impl Bezier {
    fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            x: (x1, x2),
            y: (y1, y2),
        }
    }

    fn at(&self, progress: f32) -> f32 {
        if progress <= 0.0 || progress >= 1.0 {
            return progress;
        }
        let s = self.param_for_x(progress);
        coordinate(self.y, s)
    }

    /// x(s) is monotonic for control x in [0, 1], so bisection always
    /// converges.
    fn param_for_x(&self, x: f32) -> f32 {
        let (mut lo, mut hi) = (0.0f32, 1.0f32);
        let mut s = x;
        for _ in 0..32 {
            let diff = coordinate(self.x, s) - x;
            if diff.abs() < 1e-6 {
                break;
            }
            if diff > 0.0 {
                hi = s;
            } else {
                lo = s;
            }
            s = (lo + hi) / 2.0;
        }
        s
    }
}

fn coordinate((p1, p2): (f32, f32), s: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}
