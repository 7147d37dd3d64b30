//! Per-property transitions for state-driven looks.
//!
//! The cursor overlay does not run timelines. Its look (opacity, size, fill,
//! scale) follows whatever state the pointer is in, and each change eases
//! over a fixed time, the way a stylesheet `transition:` line behaves.
//!
//! ```
//! use hiyaav_motion::{AnimatableProperty, EasingFunction, TransitionGroup};
//!
//! let look = TransitionGroup::new()
//!     .with_property(AnimatableProperty::Opacity, 300.0, EasingFunction::Ease)
//!     .with_property(AnimatableProperty::Scale, 100.0, EasingFunction::Ease);
//! assert_eq!(look.spec_for(AnimatableProperty::Scale).map(|s| s.duration_ms), Some(100.0));
//! assert!(look.spec_for(AnimatableProperty::TranslateX).is_none());
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::easing::EasingFunction;
use super::interpolate::Interpolate;
use super::types::{AnimatableProperty, AnimatableValue};

/// How one property eases toward a new value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionSpec {
    pub duration_ms: f32,
    pub easing: EasingFunction,
}

/// The set of properties that ease instead of jumping.
#[derive(Debug, Clone, Default)]
pub struct TransitionGroup {
    timings: BTreeMap<AnimatableProperty, TransitionSpec>,
}

impl TransitionGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `property` as eased. A second declaration replaces the first.
    pub fn with_property(
        mut self,
        property: AnimatableProperty,
        duration_ms: f32,
        easing: EasingFunction,
    ) -> Self {
        self.timings.insert(
            property,
            TransitionSpec {
                duration_ms: duration_ms.max(0.0),
                easing,
            },
        );
        self
    }

    pub fn spec_for(&self, property: AnimatableProperty) -> Option<&TransitionSpec> {
        self.timings.get(&property)
    }

    pub fn len(&self) -> usize {
        self.timings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timings.is_empty()
    }
}

/// One property easing from `from` to `to`.
///
/// Finished once `elapsed_ms` reaches the duration; a cancelled transition
/// holds its last value and never advances again.
#[derive(Debug, Clone)]
pub struct ActiveTransition {
    from: AnimatableValue,
    to: AnimatableValue,
    spec: TransitionSpec,
    elapsed_ms: f32,
    cancelled: bool,
}

impl ActiveTransition {
    pub fn new(from: AnimatableValue, to: AnimatableValue, spec: &TransitionSpec) -> Self {
        Self {
            from,
            to,
            spec: *spec,
            elapsed_ms: 0.0,
            cancelled: false,
        }
    }

    pub fn target(&self) -> &AnimatableValue {
        &self.to
    }

    /// Linear progress in `0.0..=1.0`.
    pub fn progress(&self) -> f32 {
        if self.spec.duration_ms <= 0.0 {
            return 1.0;
        }
        (self.elapsed_ms / self.spec.duration_ms).min(1.0)
    }

    pub fn is_active(&self) -> bool {
        !self.cancelled && self.progress() < 1.0
    }

    pub fn current_value(&self) -> AnimatableValue {
        let t = self.progress();
        if t >= 1.0 {
            return self.to.clone();
        }
        let eased = self.spec.easing.evaluate(t);
        self.from.interpolate(&self.to, eased)
    }

    /// Advance by `delta_ms`. Returns whether there is more to play.
    pub fn update(&mut self, delta_ms: f32) -> bool {
        if !self.is_active() {
            return false;
        }
        self.elapsed_ms += delta_ms.max(0.0);
        self.is_active()
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Redirect toward `to`, starting over from wherever the value is now.
    pub fn retarget(&mut self, to: AnimatableValue, spec: &TransitionSpec) {
        let here = self.current_value();
        *self = Self::new(here, to, spec);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear(ms: f32) -> TransitionSpec {
        TransitionSpec {
            duration_ms: ms,
            easing: EasingFunction::Linear,
        }
    }

    fn number(t: &ActiveTransition) -> f64 {
        t.current_value().as_f64().unwrap()
    }

    #[test]
    fn redeclaring_a_property_replaces_its_timing() {
        let group = TransitionGroup::new()
            .with_property(AnimatableProperty::Opacity, 300.0, EasingFunction::Ease)
            .with_property(AnimatableProperty::Opacity, 150.0, EasingFunction::Linear);
        assert_eq!(group.len(), 1);
        assert_eq!(
            group.spec_for(AnimatableProperty::Opacity),
            Some(&linear(150.0))
        );
    }

    #[test]
    fn fade_in_reaches_exact_target() {
        let mut fade = ActiveTransition::new(0.0.into(), 1.0.into(), &linear(300.0));
        assert!(fade.update(150.0));
        assert!((number(&fade) - 0.5).abs() < 1e-6);

        assert!(!fade.update(200.0));
        assert_eq!(number(&fade), 1.0);
        assert!(!fade.is_active());
    }

    #[test]
    fn press_then_release_turns_back_midway() {
        // grow 20 -> 40, released halfway through
        let mut size = ActiveTransition::new(20.0.into(), 40.0.into(), &linear(300.0));
        size.update(150.0);
        size.retarget(20.0.into(), &linear(300.0));

        assert!((number(&size) - 30.0).abs() < 1e-6);
        assert_eq!(size.target(), &AnimatableValue::from(20.0));
        size.update(300.0);
        assert_eq!(number(&size), 20.0);
    }

    #[test]
    fn cancelled_transition_freezes() {
        let mut fade = ActiveTransition::new(0.0.into(), 1.0.into(), &linear(100.0));
        fade.update(40.0);
        fade.cancel();
        assert!(!fade.update(100.0));
        assert!((number(&fade) - 0.4).abs() < 1e-6);
    }

    #[test]
    fn instant_spec_is_already_done() {
        let snap = ActiveTransition::new(0.0.into(), 1.0.into(), &linear(0.0));
        assert!(!snap.is_active());
        assert_eq!(number(&snap), 1.0);
    }
}
