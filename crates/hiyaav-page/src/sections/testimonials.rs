//! Client testimonials shown through a three-card carousel window.

use hiyaav_motion::NodeId;
use serde::Serialize;

use super::{
    HEADING_HEIGHT, Heading, MountContext, SECTION_PADDING, Section, SectionKind, SectionScope,
    grid_cell, mount_card_section,
};
use crate::document::ElementSpec;
use crate::geometry::{Rect, Viewport};

pub const TESTIMONIAL_CARD_CLASS: &str = "testimonial-card";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Testimonial {
    pub name: &'static str,
    pub role: &'static str,
    pub quote: &'static str,
    pub rating: u8,
}

pub const TESTIMONIALS: [Testimonial; 4] = [
    Testimonial {
        name: "Sophia Anderson",
        role: "Regular Client",
        quote: "HIYAAV has completely transformed my beauty routine. The stylists are true artists who listen to what I want and always exceed my expectations.",
        rating: 5,
    },
    Testimonial {
        name: "Michael Johnson",
        role: "First-time Client",
        quote: "I was nervous about trying a new salon, but the team at HIYAAV immediately put me at ease. I've never felt more confident with my appearance.",
        rating: 5,
    },
    Testimonial {
        name: "Emma Rodriguez",
        role: "Bridal Client",
        quote: "HIYAAV made my wedding day absolutely perfect! My hair and makeup lasted all day and looked flawless in photos.",
        rating: 5,
    },
    Testimonial {
        name: "David Chen",
        role: "Monthly Client",
        quote: "I've been coming to HIYAAV for over a year now, and I'm consistently impressed by their innovative techniques and commitment to excellence.",
        rating: 5,
    },
];

/// Cards shown side by side in the carousel window.
pub const WINDOW: usize = 3;

/// Index into a fixed list, stepping with wrap-around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Carousel {
    index: usize,
    len: usize,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn next(&mut self) -> usize {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
        self.index
    }

    pub fn prev(&mut self) -> usize {
        if self.len > 0 {
            self.index = (self.index + self.len - 1) % self.len;
        }
        self.index
    }

    /// Indices of the cards in view. The window does not wrap, so it holds
    /// fewer than [`WINDOW`] cards near the end of the list.
    pub fn visible_window(&self) -> std::ops::Range<usize> {
        self.index..(self.index + WINDOW).min(self.len)
    }
}

const HEIGHT: f32 = 1000.0;

#[derive(Debug)]
pub struct TestimonialsSection {
    carousel: Carousel,
    cards: Vec<NodeId>,
}

impl Default for TestimonialsSection {
    fn default() -> Self {
        Self::new()
    }
}

impl TestimonialsSection {
    pub fn new() -> Self {
        Self {
            carousel: Carousel::new(TESTIMONIALS.len()),
            cards: Vec::new(),
        }
    }

    pub fn cards(&self) -> &[NodeId] {
        &self.cards
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn carousel_mut(&mut self) -> &mut Carousel {
        &mut self.carousel
    }

    pub fn current(&self) -> &'static Testimonial {
        &TESTIMONIALS[self.carousel.index()]
    }

    pub fn visible(&self) -> &'static [Testimonial] {
        &TESTIMONIALS[self.carousel.visible_window()]
    }
}

impl Section for TestimonialsSection {
    fn kind(&self) -> SectionKind {
        SectionKind::Testimonials
    }

    fn height(&self, _viewport: &Viewport) -> f32 {
        HEIGHT
    }

    fn mount(&mut self, ctx: &mut MountContext<'_>, top: f32) -> SectionScope {
        let mut scope = SectionScope::new(SectionKind::Testimonials);
        let bounds = Rect::new(0.0, top, ctx.viewport.width, HEIGHT);
        let root = scope.insert_root(ctx, bounds);

        let heading_top = top + SECTION_PADDING;
        let heading = Heading::insert(
            &mut scope,
            ctx,
            heading_top,
            "Client Testimonials",
            "Discover what our clients have to say about their experiences at HIYAAV.",
        );

        let grid_top = heading_top + HEADING_HEIGHT + 64.0;
        self.cards = TESTIMONIALS
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let rect = grid_cell(&ctx.viewport, grid_top, WINDOW, 280.0, 24.0, i);
                scope.insert(
                    ctx,
                    ElementSpec::new(format!("testimonial-{i}"), rect)
                        .class(TESTIMONIAL_CARD_CLASS)
                        .text(format!("{} ({}): {}", t.name, t.role, t.quote)),
                )
            })
            .collect();

        mount_card_section(&mut scope, ctx, root, &heading, &self.cards, 200.0, 0.2);
        scope
    }

    fn unmounted(&mut self) {
        self.cards.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::tests::Fixture;

    #[test]
    fn test_carousel_wraps() {
        let mut carousel = Carousel::new(4);
        assert_eq!(carousel.prev(), 3);
        assert_eq!(carousel.next(), 0);
        carousel.next();
        carousel.next();
        carousel.next();
        assert_eq!(carousel.next(), 0);
    }

    #[test]
    fn test_window_does_not_wrap() {
        let mut carousel = Carousel::new(4);
        assert_eq!(carousel.visible_window(), 0..3);
        carousel.next();
        assert_eq!(carousel.visible_window(), 1..4);
        carousel.next();
        assert_eq!(carousel.visible_window(), 2..4);
        carousel.next();
        assert_eq!(carousel.visible_window(), 3..4);
    }

    #[test]
    fn test_empty_carousel() {
        let mut carousel = Carousel::new(0);
        assert_eq!(carousel.next(), 0);
        assert_eq!(carousel.prev(), 0);
        assert!(carousel.visible_window().is_empty());
    }

    #[test]
    fn test_section_exposes_current_and_visible() {
        let mut fx = Fixture::new();
        let mut section = TestimonialsSection::new();
        let scope = section.mount(&mut fx.ctx(), 0.0);
        assert_eq!(section.cards().len(), 4);
        assert_eq!(section.current().name, "Sophia Anderson");

        section.carousel_mut().prev();
        assert_eq!(section.current().name, "David Chen");
        assert_eq!(section.visible().len(), 1);
        assert!(section.current().rating == 5);

        let timeline = fx.runner.get(scope.timelines()[1]).unwrap();
        // 300 + 3 * 200 + 800
        assert_eq!(timeline.total_duration_ms(), 1700.0);
        scope.release(&mut fx.ctx());
    }
}
