//! Custom cursor overlay.
//!
//! The overlay sits exactly on the last pointer position; only its look
//! (opacity, size, color, press scale) eases, through declarative property
//! transitions. Narrow viewports never get the overlay.

use std::collections::BTreeMap;

use hiyaav_config::CursorConfig;
use hiyaav_motion::{
    ActiveTransition, AnimatableProperty, AnimatableValue, EasingFunction, TransitionGroup,
};
use serde::{Deserialize, Serialize};

use crate::color::{self, LinPremul};
use crate::geometry::Viewport;

/// Pointer input at viewport scope.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    Move { x: f32, y: f32 },
    Down,
    Up,
    Enter,
    Leave,
}

/// Latest pointer snapshot. Replaced on every event, no history.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
    pub pressed: bool,
    pub visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorAppearance {
    Resting,
    Active,
}

/// What a renderer draws for the cursor this frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CursorOverlay {
    pub x: f32,
    pub y: f32,
    pub opacity: f32,
    pub size: f32,
    pub scale: f32,
    pub color: LinPremul,
    pub appearance: CursorAppearance,
}

const PRESSED_SCALE: f64 = 0.85;

#[derive(Debug)]
pub struct CursorFollower {
    config: CursorConfig,
    enabled: bool,
    pointer: PointerState,
    transitions: TransitionGroup,
    running: BTreeMap<AnimatableProperty, ActiveTransition>,
    overlay: CursorOverlay,
}

impl CursorFollower {
    /// Build the follower for the viewport the page mounts into. The
    /// enabled decision holds for the page lifetime.
    pub fn new(config: CursorConfig, viewport: &Viewport) -> Self {
        let enabled = viewport.width >= config.min_viewport_width;
        if !enabled {
            tracing::info!(width = viewport.width, "viewport too narrow, custom cursor disabled");
        }
        let transitions = TransitionGroup::new()
            .with_property(AnimatableProperty::Opacity, config.fade_ms, EasingFunction::Ease)
            .with_property(AnimatableProperty::Width, config.fade_ms, EasingFunction::Ease)
            .with_property(AnimatableProperty::Height, config.fade_ms, EasingFunction::Ease)
            .with_property(AnimatableProperty::BackgroundColor, config.fade_ms, EasingFunction::Ease)
            .with_property(AnimatableProperty::Scale, config.transform_ms, EasingFunction::Ease);

        Self {
            config,
            enabled,
            pointer: PointerState::default(),
            transitions,
            running: BTreeMap::new(),
            overlay: CursorOverlay {
                x: 0.0,
                y: 0.0,
                opacity: 0.0,
                size: config.resting_size,
                scale: 1.0,
                color: resting_color(),
                appearance: CursorAppearance::Resting,
            },
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    /// Current overlay, or `None` when the cursor is disabled.
    pub fn overlay(&self) -> Option<CursorOverlay> {
        self.enabled.then_some(self.overlay)
    }

    pub fn handle(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Move { x, y } => {
                self.pointer.x = x;
                self.pointer.y = y;
                self.overlay.x = x;
                self.overlay.y = y;
                if !self.pointer.visible {
                    self.set_visible(true);
                }
            }
            PointerEvent::Down => self.set_pressed(true),
            PointerEvent::Up => self.set_pressed(false),
            PointerEvent::Enter => self.set_visible(true),
            PointerEvent::Leave => self.set_visible(false),
        }
    }

    fn set_visible(&mut self, visible: bool) {
        self.pointer.visible = visible;
        let opacity: f64 = if visible { 1.0 } else { 0.0 };
        self.transition_to(AnimatableProperty::Opacity, opacity.into());
    }

    fn set_pressed(&mut self, pressed: bool) {
        if self.pointer.pressed == pressed {
            return;
        }
        self.pointer.pressed = pressed;
        let (appearance, size, color, scale) = if pressed {
            (
                CursorAppearance::Active,
                self.config.active_size,
                active_color(),
                PRESSED_SCALE,
            )
        } else {
            (
                CursorAppearance::Resting,
                self.config.resting_size,
                resting_color(),
                1.0,
            )
        };
        self.overlay.appearance = appearance;
        self.transition_to(AnimatableProperty::Width, f64::from(size).into());
        self.transition_to(AnimatableProperty::Height, f64::from(size).into());
        self.transition_to(AnimatableProperty::BackgroundColor, color.into());
        self.transition_to(AnimatableProperty::Scale, scale.into());
    }

    fn current(&self, property: AnimatableProperty) -> AnimatableValue {
        match property {
            AnimatableProperty::Opacity => f64::from(self.overlay.opacity).into(),
            AnimatableProperty::Width | AnimatableProperty::Height => {
                f64::from(self.overlay.size).into()
            }
            AnimatableProperty::Scale => f64::from(self.overlay.scale).into(),
            AnimatableProperty::BackgroundColor => self.overlay.color.into(),
            AnimatableProperty::TranslateX => f64::from(self.overlay.x).into(),
            AnimatableProperty::TranslateY => f64::from(self.overlay.y).into(),
        }
    }

    fn transition_to(&mut self, property: AnimatableProperty, to: AnimatableValue) {
        let Some(spec) = self.transitions.spec_for(property).cloned() else {
            self.apply(property, &to);
            return;
        };
        if let Some(active) = self.running.get_mut(&property) {
            if active.is_active() {
                active.retarget(to, &spec);
                return;
            }
        }
        let from = self.current(property);
        self.running
            .insert(property, ActiveTransition::new(from, to, &spec));
    }

    fn apply(&mut self, property: AnimatableProperty, value: &AnimatableValue) {
        match property {
            AnimatableProperty::Opacity => {
                if let Some(v) = value.as_f64() {
                    self.overlay.opacity = v.clamp(0.0, 1.0) as f32;
                }
            }
            // width and height always move together
            AnimatableProperty::Width => {
                if let Some(v) = value.as_f64() {
                    self.overlay.size = v as f32;
                }
            }
            AnimatableProperty::Scale => {
                if let Some(v) = value.as_f64() {
                    self.overlay.scale = v as f32;
                }
            }
            AnimatableProperty::BackgroundColor => {
                if let Some(rgba) = value.as_color() {
                    self.overlay.color = rgba;
                }
            }
            AnimatableProperty::Height
            | AnimatableProperty::TranslateX
            | AnimatableProperty::TranslateY => {}
        }
    }

    /// Advance the look transitions. Position is never eased.
    pub fn update(&mut self, delta_ms: f32) {
        let mut values = Vec::with_capacity(self.running.len());
        self.running.retain(|&property, transition| {
            let still_running = transition.update(delta_ms);
            values.push((property, transition.current_value()));
            still_running
        });
        for (property, value) in values {
            self.apply(property, &value);
        }
    }

    pub fn is_transitioning(&self) -> bool {
        !self.running.is_empty()
    }

    /// Pointer position in normalized device coordinates, `y` up.
    pub fn pointer_ndc(&self, viewport: &Viewport) -> (f32, f32) {
        if viewport.width <= 0.0 || viewport.height <= 0.0 {
            return (0.0, 0.0);
        }
        let x = (self.pointer.x / viewport.width) * 2.0 - 1.0;
        let y = -((self.pointer.y / viewport.height) * 2.0 - 1.0);
        (x.clamp(-1.0, 1.0), y.clamp(-1.0, 1.0))
    }
}

fn resting_color() -> LinPremul {
    color::gold(0.5)
}

fn active_color() -> LinPremul {
    color::gold(0.8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desktop() -> CursorFollower {
        CursorFollower::new(CursorConfig::default(), &Viewport::new(1280.0, 800.0))
    }

    #[test]
    fn test_position_tracks_without_delay() {
        let mut cursor = desktop();
        cursor.handle(PointerEvent::Move { x: 300.0, y: 200.0 });
        let overlay = cursor.overlay().unwrap();
        assert_eq!((overlay.x, overlay.y), (300.0, 200.0));
        cursor.handle(PointerEvent::Move { x: 301.0, y: 150.0 });
        let overlay = cursor.overlay().unwrap();
        assert_eq!((overlay.x, overlay.y), (301.0, 150.0));
    }

    #[test]
    fn test_fades_in_on_first_move() {
        let mut cursor = desktop();
        assert_eq!(cursor.overlay().unwrap().opacity, 0.0);
        cursor.handle(PointerEvent::Move { x: 10.0, y: 10.0 });
        assert!(cursor.pointer().visible);

        cursor.update(150.0);
        let mid = cursor.overlay().unwrap().opacity;
        assert!(mid > 0.0 && mid < 1.0);
        cursor.update(200.0);
        assert_eq!(cursor.overlay().unwrap().opacity, 1.0);
        assert!(!cursor.is_transitioning());
    }

    #[test]
    fn test_press_grows_and_release_restores() {
        let mut cursor = desktop();
        cursor.handle(PointerEvent::Enter);
        cursor.handle(PointerEvent::Down);
        assert_eq!(cursor.overlay().unwrap().appearance, CursorAppearance::Active);

        cursor.update(100.0);
        let overlay = cursor.overlay().unwrap();
        assert_eq!(overlay.scale, PRESSED_SCALE as f32);
        assert!(overlay.size > 20.0 && overlay.size < 40.0);

        cursor.update(300.0);
        assert_eq!(cursor.overlay().unwrap().size, 40.0);

        cursor.handle(PointerEvent::Up);
        cursor.update(400.0);
        let overlay = cursor.overlay().unwrap();
        assert_eq!(overlay.appearance, CursorAppearance::Resting);
        assert_eq!(overlay.size, 20.0);
        assert_eq!(overlay.scale, 1.0);
    }

    #[test]
    fn test_leave_fades_out() {
        let mut cursor = desktop();
        cursor.handle(PointerEvent::Enter);
        cursor.update(300.0);
        cursor.handle(PointerEvent::Leave);
        cursor.update(300.0);
        assert_eq!(cursor.overlay().unwrap().opacity, 0.0);
        assert!(!cursor.pointer().visible);
    }

    #[test]
    fn test_narrow_viewport_disables_overlay() {
        let mut cursor = CursorFollower::new(CursorConfig::default(), &Viewport::new(767.0, 900.0));
        cursor.handle(PointerEvent::Move { x: 5.0, y: 5.0 });
        assert!(!cursor.is_enabled());
        assert!(cursor.overlay().is_none());
        // pointer still tracked for the background camera
        assert_eq!(cursor.pointer().x, 5.0);
    }

    #[test]
    fn test_pointer_ndc() {
        let mut cursor = desktop();
        let viewport = Viewport::new(1280.0, 800.0);
        cursor.handle(PointerEvent::Move { x: 640.0, y: 400.0 });
        assert_eq!(cursor.pointer_ndc(&viewport), (0.0, 0.0));
        cursor.handle(PointerEvent::Move { x: 1280.0, y: 0.0 });
        assert_eq!(cursor.pointer_ndc(&viewport), (1.0, 1.0));
    }
}
