//! About section: the salon story, feature image and the four headline
//! stats that rise in one after another.

use hiyaav_motion::{EntranceTimeline, NodeId, TimelineStep, Tween};
use serde::Serialize;

use super::{
    HEADING_HEIGHT, Heading, MountContext, SECTION_PADDING, Section, SectionKind, SectionScope,
    column, grid_cell,
};
use crate::document::ElementSpec;
use crate::geometry::{Rect, Viewport};
use crate::trigger::TriggerRule;

/// Class on each statistic tile.
pub const STAT_CLASS: &str = "stat-item";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stat {
    pub value: &'static str,
    pub label: &'static str,
}

pub const STATS: [Stat; 4] = [
    Stat { value: "10+", label: "Years Experience" },
    Stat { value: "5000+", label: "Happy Clients" },
    Stat { value: "20+", label: "Expert Stylists" },
    Stat { value: "50+", label: "Premium Services" },
];

const HEIGHT: f32 = 1500.0;
const HEADING_IN_VIEW: f32 = 0.3;
const STORY: &str = "Founded with a passion for beauty and wellness, HIYAAV brings together \
expert stylists, aestheticians and therapists under one roof.";

#[derive(Debug, Default)]
pub struct AboutSection {
    stats: Vec<NodeId>,
}

impl AboutSection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stat_items(&self) -> &[NodeId] {
        &self.stats
    }
}

impl Section for AboutSection {
    fn kind(&self) -> SectionKind {
        SectionKind::About
    }

    fn height(&self, _viewport: &Viewport) -> f32 {
        HEIGHT
    }

    fn mount(&mut self, ctx: &mut MountContext<'_>, top: f32) -> SectionScope {
        let mut scope = SectionScope::new(SectionKind::About);
        let bounds = Rect::new(0.0, top, ctx.viewport.width, HEIGHT);
        let root = scope.insert_root(ctx, bounds);

        let heading_top = top + SECTION_PADDING;
        let heading = Heading::insert(&mut scope, ctx, heading_top, "About HIYAAV", STORY);

        let (x, width) = column(&ctx.viewport);
        let half = (width - 48.0) / 2.0;
        let body_top = heading_top + HEADING_HEIGHT + 64.0;
        let text = scope.insert(
            ctx,
            ElementSpec::new("about-text", Rect::new(x, body_top, half, 560.0)).text(STORY),
        );
        let image = scope.insert(
            ctx,
            ElementSpec::new("about-image", Rect::new(x + half + 48.0, body_top, half, 560.0)),
        );

        let stats_top = body_top + 560.0 + 80.0;
        let stats: Vec<NodeId> = STATS
            .iter()
            .enumerate()
            .map(|(i, stat)| {
                let rect = grid_cell(&ctx.viewport, stats_top, 4, 160.0, 24.0, i);
                scope.insert(
                    ctx,
                    ElementSpec::new(format!("about-stat-{i}"), rect)
                        .class(STAT_CLASS)
                        .text(format!("{} {}", stat.value, stat.label)),
                )
            })
            .collect();
        self.stats = stats.clone();

        scope.add_timeline(
            ctx,
            heading.reveal_timeline("about"),
            TriggerRule::InView {
                amount: HEADING_IN_VIEW,
            },
            root,
        );

        let rule = ctx.top_reaches();
        let content = EntranceTimeline::new("about")
            .step(
                TimelineStep::single(text)
                    .tween(Tween::fade_in())
                    .tween(Tween::slide_y(40.0))
                    .duration(1000.0),
            )
            .step(
                TimelineStep::single(image)
                    .tween(Tween::fade_in())
                    .tween(Tween::slide_x(40.0))
                    .duration(1000.0)
                    .delay(300.0),
            )
            .step(
                TimelineStep::new(stats)
                    .tween(Tween::fade_in())
                    .tween(Tween::slide_y(40.0))
                    .duration(800.0)
                    .delay(500.0)
                    .stagger(200.0),
            );
        scope.add_timeline(ctx, content, rule, root);
        scope
    }

    fn unmounted(&mut self) {
        self.stats.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::tests::Fixture;

    #[test]
    fn test_about_mount() {
        let mut fx = Fixture::new();
        let mut about = AboutSection::new();
        let scope = about.mount(&mut fx.ctx(), 800.0);

        assert_eq!(about.stat_items().len(), 4);
        assert_eq!(scope.timelines().len(), 2);
        assert_eq!(scope.observed(), &[scope.root().unwrap()]);

        let heading = fx.triggers.get(scope.timelines()[0]).unwrap();
        assert_eq!(heading.rule, TriggerRule::InView { amount: 0.3 });
        let content = fx.triggers.get(scope.timelines()[1]).unwrap();
        assert_eq!(content.rule, TriggerRule::TopReaches { viewport_fraction: 0.8 });

        // last stat: 500 + 3 * 200 + 800
        let timeline = fx.runner.get(scope.timelines()[1]).unwrap();
        assert_eq!(timeline.total_duration_ms(), 1900.0);

        for &stat in about.stat_items() {
            let style = fx.document.get(stat).unwrap().style;
            assert_eq!(style.opacity, 0.0);
            assert_eq!(style.translate_y, 40.0);
        }
        scope.release(&mut fx.ctx());
        about.unmounted();
        assert!(fx.document.is_empty());
    }
}
