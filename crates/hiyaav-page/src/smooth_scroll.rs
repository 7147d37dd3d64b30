//! Eased page scrolling.
//!
//! Wheel and touch input move a clamped target offset. Every frame the
//! rendered offset glides from where it was when the target last changed
//! toward the target along an exponential ease-out, so it decelerates into
//! place and never overshoots.

use hiyaav_config::ScrollConfig;
use hiyaav_motion::EasingFunction;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Glide {
    from: f32,
    to: f32,
    elapsed_ms: f32,
}

/// Scroll state exposed to the page each frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScrollState {
    pub target: f32,
    pub offset: f32,
    /// Pixels moved during the last frame.
    pub velocity: f32,
    pub limit: f32,
}

#[derive(Debug)]
pub struct SmoothScroll {
    config: ScrollConfig,
    easing: EasingFunction,
    target: f32,
    offset: f32,
    velocity: f32,
    limit: f32,
    glide: Option<Glide>,
    disposed: bool,
}

impl SmoothScroll {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            config,
            easing: EasingFunction::ExpoOut,
            target: 0.0,
            offset: 0.0,
            velocity: 0.0,
            limit: 0.0,
            glide: None,
            disposed: false,
        }
    }

    fn duration_ms(&self) -> f32 {
        (self.config.duration_secs * 1000.0).max(0.0)
    }

    /// Set the largest reachable offset, pulling the target and the rendered
    /// offset back inside it. A glide in progress restarts from the clamped
    /// offset.
    pub fn set_limit(&mut self, limit: f32) {
        self.limit = limit.max(0.0);
        if self.target <= self.limit && self.offset <= self.limit {
            return;
        }
        self.target = self.target.min(self.limit);
        self.offset = self.offset.min(self.limit);
        self.glide = (self.offset != self.target).then_some(Glide {
            from: self.offset,
            to: self.target,
            elapsed_ms: 0.0,
        });
    }

    pub fn on_wheel(&mut self, delta_y: f32) {
        if self.disposed {
            return;
        }
        let target = self.target + delta_y * self.config.mouse_multiplier;
        self.scroll_to(target, false);
    }

    /// Touch deltas are applied directly unless smooth touch is enabled.
    pub fn on_touch(&mut self, delta_y: f32) {
        if self.disposed {
            return;
        }
        let target = self.target + delta_y * self.config.touch_multiplier;
        self.scroll_to(target, !self.config.smooth_touch);
    }

    /// Move to an absolute offset, clamped to `[0, limit]`.
    pub fn scroll_to(&mut self, target: f32, immediate: bool) {
        if self.disposed {
            return;
        }
        self.target = target.clamp(0.0, self.limit);
        if immediate || self.duration_ms() <= 0.0 {
            self.velocity = self.target - self.offset;
            self.offset = self.target;
            self.glide = None;
            return;
        }
        if self.target == self.offset {
            self.glide = None;
            return;
        }
        self.glide = Some(Glide {
            from: self.offset,
            to: self.target,
            elapsed_ms: 0.0,
        });
    }

    /// Advance the glide by one frame. Returns the rendered offset, or
    /// `None` once the driver has been disposed.
    pub fn advance(&mut self, delta_ms: f32) -> Option<f32> {
        if self.disposed {
            return None;
        }
        let previous = self.offset;
        if let Some(glide) = self.glide.as_mut() {
            glide.elapsed_ms += delta_ms.max(0.0);
            let progress = (glide.elapsed_ms / self.config.duration_secs / 1000.0).clamp(0.0, 1.0);
            if progress >= 1.0 {
                self.offset = glide.to;
                self.glide = None;
            } else {
                let eased = self.easing.evaluate(progress);
                self.offset = glide.from + (glide.to - glide.from) * eased;
            }
        }
        self.velocity = self.offset - previous;
        Some(self.offset)
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn limit(&self) -> f32 {
        self.limit
    }

    pub fn is_scrolling(&self) -> bool {
        self.glide.is_some()
    }

    pub fn state(&self) -> ScrollState {
        ScrollState {
            target: self.target,
            offset: self.offset,
            velocity: self.velocity,
            limit: self.limit,
        }
    }

    /// Stop for good. Later input is ignored.
    pub fn dispose(&mut self) {
        self.glide = None;
        self.velocity = 0.0;
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}
