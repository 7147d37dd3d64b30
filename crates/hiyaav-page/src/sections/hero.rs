//! Hero section: headline, tagline, calls to action, feature image and the
//! bouncing scroll hint.

use hiyaav_motion::{
    AnimatableProperty, AnimationHost, EasingFunction, EntranceTimeline, KeyframeLoop, NodeId,
    TimelineStep, Tween,
};

use super::{MountContext, Section, SectionKind, SectionScope, column};
use crate::document::{Document, ElementSpec};
use crate::geometry::{Rect, Viewport};
use crate::trigger::TriggerRule;

/// Class on the hero's staggered text blocks.
pub const HERO_TEXT_CLASS: &str = "gsap-text";

const MIN_HEIGHT: f32 = 600.0;
const INDICATOR_SIZE: f32 = 32.0;
/// One down-and-back bounce of the scroll hint.
pub const INDICATOR_PERIOD_MS: f32 = 1500.0;
const INDICATOR_DROP: f64 = 10.0;

#[derive(Debug)]
struct ScrollHint {
    node: NodeId,
    bounce: KeyframeLoop,
}

/// Full-screen intro with the headline, tagline, calls to action and the
/// feature image.
#[derive(Debug, Default)]
pub struct HeroSection {
    image: Option<NodeId>,
    hint: Option<ScrollHint>,
}

impl HeroSection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn image(&self) -> Option<NodeId> {
        self.image
    }

    /// The scroll hint chevron while mounted.
    pub fn scroll_indicator(&self) -> Option<NodeId> {
        self.hint.as_ref().map(|hint| hint.node)
    }

    /// Keep the scroll hint bouncing. Does nothing while unmounted.
    pub fn tick(&mut self, delta_ms: f32, document: &mut Document) {
        let Some(hint) = self.hint.as_mut() else {
            return;
        };
        let y = hint.bounce.advance(delta_ms);
        document.write(hint.node, hint.bounce.property(), y.into());
    }
}

impl Section for HeroSection {
    fn kind(&self) -> SectionKind {
        SectionKind::Hero
    }

    fn height(&self, viewport: &Viewport) -> f32 {
        viewport.height.max(MIN_HEIGHT)
    }

    fn mount(&mut self, ctx: &mut MountContext<'_>, top: f32) -> SectionScope {
        let mut scope = SectionScope::new(SectionKind::Hero);
        let height = self.height(&ctx.viewport);
        let bounds = Rect::new(0.0, top, ctx.viewport.width, height);
        let root = scope.insert_root(ctx, bounds);

        let (x, width) = column(&ctx.viewport);
        let half = width / 2.0;
        let text_top = top + (height - 360.0).max(0.0) / 2.0;
        let blocks = [
            ("hero-title", 160.0, "Discover Your True Beauty"),
            (
                "hero-tagline",
                80.0,
                "HIYAAV Salon & Aesthetic Center offers premium beauty services that transform, enhance, and celebrate your unique beauty.",
            ),
            ("hero-actions", 56.0, "Explore Services | Book Now"),
        ];
        let mut y = text_top;
        let mut text = Vec::with_capacity(blocks.len());
        for (name, block_height, copy) in blocks {
            text.push(scope.insert(
                ctx,
                ElementSpec::new(name, Rect::new(x, y, half, block_height))
                    .class(HERO_TEXT_CLASS)
                    .text(copy),
            ));
            y += block_height + 24.0;
        }
        let image = scope.insert(
            ctx,
            ElementSpec::new("hero-image", Rect::new(x + half, text_top, half, 360.0)),
        );
        self.image = Some(image);

        let indicator = scope.insert(
            ctx,
            ElementSpec::new(
                "hero-scroll-indicator",
                Rect::new(
                    (ctx.viewport.width - INDICATOR_SIZE) / 2.0,
                    top + height - INDICATOR_SIZE * 2.5,
                    INDICATOR_SIZE,
                    INDICATOR_SIZE,
                ),
            ),
        );
        self.hint = Some(ScrollHint {
            node: indicator,
            bounce: KeyframeLoop::new(
                AnimatableProperty::TranslateY,
                [0.0, INDICATOR_DROP, 0.0],
                INDICATOR_PERIOD_MS,
                EasingFunction::EaseOut,
            ),
        });

        let timeline = EntranceTimeline::new("hero")
            .step(
                TimelineStep::new(text)
                    .tween(Tween::fade_in())
                    .tween(Tween::slide_y(100.0))
                    .duration(1000.0)
                    .stagger(200.0),
            )
            .step(
                TimelineStep::single(image)
                    .tween(Tween::fade_in())
                    .tween(Tween::scale_from(0.8))
                    .duration(1000.0)
                    .after_previous(-500.0),
            );
        scope.add_timeline(ctx, timeline, TriggerRule::Immediate, root);
        scope
    }

    fn unmounted(&mut self) {
        self.image = None;
        self.hint = None;
    }
}
