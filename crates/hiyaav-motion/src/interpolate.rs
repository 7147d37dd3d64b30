//! Blending between property values at an eased progress.

use super::types::AnimatableValue;

/// Blend toward `to`. `t = 0` is `self`, `t = 1` is `to`; eased curves may
/// pass values slightly outside that range.
pub trait Interpolate {
    fn interpolate(&self, to: &Self, t: f32) -> Self;
}

impl Interpolate for f64 {
    fn interpolate(&self, to: &Self, t: f32) -> Self {
        self + (to - self) * f64::from(t)
    }
}

impl Interpolate for [f32; 4] {
    fn interpolate(&self, to: &Self, t: f32) -> Self {
        std::array::from_fn(|i| self[i] + (to[i] - self[i]) * t)
    }
}

impl Interpolate for AnimatableValue {
    /// A scalar and a color cannot blend; the start value holds until the
    /// move completes.
    fn interpolate(&self, to: &Self, t: f32) -> Self {
        match (self, to) {
            (Self::F64 { value: a }, Self::F64 { value: b }) => a.interpolate(b, t).into(),
            (Self::Color { rgba: a }, Self::Color { rgba: b }) => a.interpolate(b, t).into(),
            _ if t >= 1.0 => to.clone(),
            _ => self.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slide_offset_shrinks_toward_zero() {
        let from = AnimatableValue::from(50.0);
        let to = AnimatableValue::from(0.0);
        assert_eq!(from.interpolate(&to, 0.0), from);
        assert_eq!(from.interpolate(&to, 0.75), AnimatableValue::from(12.5));
        assert_eq!(from.interpolate(&to, 1.0), to);
    }

    #[test]
    fn fill_blends_per_channel() {
        let gold: [f32; 4] = [0.83, 0.69, 0.22, 0.5];
        let white = [1.0f32; 4];
        let half = gold.interpolate(&white, 0.5);
        for (got, want) in half.iter().zip([0.915, 0.845, 0.61, 0.75]) {
            assert!((got - want).abs() < 1e-6);
        }
    }

    #[test]
    fn mixed_kinds_hold_until_done() {
        let scalar = AnimatableValue::from(1.0);
        let color = AnimatableValue::from([1.0; 4]);
        assert_eq!(scalar.interpolate(&color, 0.9), scalar);
        assert_eq!(scalar.interpolate(&color, 1.0), color);
    }
}
