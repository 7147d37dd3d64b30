//! Endlessly repeating keyframe motion.
//!
//! Entrance timelines play once and settle. A `KeyframeLoop` never settles:
//! it walks evenly spaced keyframes over a fixed period and starts over,
//! for ambient motion such as a bouncing scroll hint.
//!
//! ```
//! use hiyaav_motion::{AnimatableProperty, EasingFunction, KeyframeLoop};
//!
//! let mut bounce = KeyframeLoop::new(
//!     AnimatableProperty::TranslateY,
//!     [0.0, 10.0, 0.0],
//!     1500.0,
//!     EasingFunction::Linear,
//! );
//! assert_eq!(bounce.advance(750.0), 10.0);
//! assert_eq!(bounce.advance(750.0), 0.0);
//! ```

use super::easing::EasingFunction;
use super::interpolate::Interpolate;
use super::types::AnimatableProperty;

#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeLoop {
    property: AnimatableProperty,
    keyframes: Vec<f64>,
    period_ms: f32,
    easing: EasingFunction,
    elapsed_ms: f32,
}

impl KeyframeLoop {
    /// `easing` applies to each segment between neighbouring keyframes.
    pub fn new(
        property: AnimatableProperty,
        keyframes: impl IntoIterator<Item = f64>,
        period_ms: f32,
        easing: EasingFunction,
    ) -> Self {
        Self {
            property,
            keyframes: keyframes.into_iter().collect(),
            period_ms: period_ms.max(0.0),
            easing,
            elapsed_ms: 0.0,
        }
    }

    pub fn property(&self) -> AnimatableProperty {
        self.property
    }

    pub fn period_ms(&self) -> f32 {
        self.period_ms
    }

    /// Position inside the current cycle, `0.0..1.0`.
    pub fn phase(&self) -> f32 {
        if self.period_ms <= 0.0 {
            return 0.0;
        }
        self.elapsed_ms / self.period_ms
    }

    pub fn value(&self) -> f64 {
        let Some(&first) = self.keyframes.first() else {
            return 0.0;
        };
        let segments = self.keyframes.len() - 1;
        if segments == 0 {
            return first;
        }
        let along = self.phase() * segments as f32;
        let index = (along.floor() as usize).min(segments - 1);
        let local = (along - index as f32).clamp(0.0, 1.0);
        let eased = self.easing.evaluate(local);
        self.keyframes[index].interpolate(&self.keyframes[index + 1], eased)
    }

    /// Move forward by `delta_ms`, wrapping at the end of the period, and
    /// return the new value.
    pub fn advance(&mut self, delta_ms: f32) -> f64 {
        if self.period_ms > 0.0 {
            self.elapsed_ms = (self.elapsed_ms + delta_ms.max(0.0)) % self.period_ms;
        }
        self.value()
    }
}
