//! Motion primitives for the HIYAAV page runtime.
//!
//! This crate provides:
//! - **Easing**: CSS keyword curves plus `power3.out` and the scroll glide profile
//! - **Transitions**: declarative per-property timings (the cursor overlay)
//! - **Entrance timelines**: one-shot primed-to-settled step lists
//! - **Keyframe loops**: ambient motion that repeats forever
//! - **Runner**: the single frame-driven interpreter for every timeline
//!
//! # Architecture
//!
//! ```text
//! TimelineRunner
//!   ├── EntranceTimeline (steps: targets × tweens, delay, stagger, easing)
//!   └── EventQueue (primed / started / skipped / settled / cancelled)
//!
//! AnimationHost (implemented by the page document)
//!   └── read / write element properties by NodeId
//! ```

pub mod easing;
pub mod events;
pub mod interpolate;
pub mod looping;
pub mod runner;
pub mod timeline;
pub mod transition;
pub mod types;

pub use easing::EasingFunction;
pub use events::{EventQueue, TimelineEvent};
pub use interpolate::Interpolate;
pub use looping::KeyframeLoop;
pub use runner::TimelineRunner;
pub use timeline::{
    AnimationHost, EntranceTimeline, SkippedTarget, StepPosition, TimelineState, TimelineStep,
    Tween,
};
pub use transition::{ActiveTransition, TransitionGroup, TransitionSpec};
pub use types::{AnimatableProperty, AnimatableValue, NodeId, TimelineId};
