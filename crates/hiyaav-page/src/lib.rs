//! Headless runtime for the HIYAAV salon single-page site.
//!
//! The crate owns the page document and everything that moves on it:
//! - **Reveal registry**: one-shot `active` flags for elements entering view
//! - **Scroll triggers**: start entrance timelines at scroll positions
//! - **Smooth scroll**: eased wheel/touch scrolling with a clamped target
//! - **Cursor follower**: overlay that tracks the pointer with no lag
//! - **Background**: particle cloud, centerpiece and camera poses per frame
//! - **Sections**: static content mounted and released as explicit scopes
//!
//! # Architecture
//!
//! ```text
//! Page
//!   ├── Document (elements by NodeId, AnimationHost for timelines)
//!   ├── RevealRegistry / TriggerSet / TimelineRunner
//!   ├── SmoothScroll ── CursorFollower ── BackgroundRenderer
//!   └── Sections ──mount──> SectionScope ──release──> (nothing left)
//! ```

pub mod background;
pub mod color;
pub mod cursor;
pub mod document;
pub mod error;
pub mod form;
pub mod geometry;
pub mod page;
pub mod reveal;
pub mod sections;
pub mod smooth_scroll;
pub mod trigger;

pub use background::{BackgroundRenderer, BackgroundSnapshot, CameraPose, Vec3};
pub use cursor::{CursorAppearance, CursorFollower, CursorOverlay, PointerEvent, PointerState};
pub use document::{ACTIVE_CLASS, Document, Element, ElementSpec, REVEAL_CLASS};
pub use error::{FormError, PageError, Result};
pub use form::{ContactForm, FormField, Submission};
pub use geometry::{Rect, Viewport};
pub use page::{FrameReport, Page, PageEvent};
pub use reveal::{RevealRegistry, RevealState};
pub use sections::{Section, SectionKind, SectionScope};
pub use smooth_scroll::{ScrollState, SmoothScroll};
pub use trigger::{TriggerRule, TriggerSet};
