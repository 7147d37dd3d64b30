//! Services section: one card per service offered.

use hiyaav_motion::NodeId;
use serde::Serialize;

use super::{
    HEADING_HEIGHT, Heading, MountContext, SECTION_PADDING, Section, SectionKind, SectionScope,
    grid_cell, mount_card_section,
};
use crate::document::ElementSpec;
use crate::geometry::{Rect, Viewport};

pub const SERVICE_CARD_CLASS: &str = "service-card";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Service {
    pub title: &'static str,
    pub description: &'static str,
}

pub const SERVICES: [Service; 6] = [
    Service {
        title: "Hair Styling",
        description: "From precision cuts to elaborate updos, our expert stylists create looks that enhance your natural beauty and reflect your personal style.",
    },
    Service {
        title: "Color Transformation",
        description: "Our color specialists use premium products and innovative techniques to create vibrant, dimensional color that complements your skin tone and lifestyle.",
    },
    Service {
        title: "Skin Treatments",
        description: "Rejuvenate and revitalize your skin with our customized facial treatments, designed to address specific concerns and promote a healthy, radiant complexion.",
    },
    Service {
        title: "Makeup Artistry",
        description: "Whether for a special occasion or everyday glamour, our makeup artists create flawless looks that enhance your features and boost your confidence.",
    },
    Service {
        title: "Nail Care",
        description: "Indulge in our luxurious manicure and pedicure services, featuring exquisite nail art and long-lasting finishes for perfectly polished hands and feet.",
    },
    Service {
        title: "Wellness Therapies",
        description: "Restore balance and vitality with our holistic wellness treatments, including massage therapy, aromatherapy, and relaxation rituals.",
    },
];

const HEIGHT: f32 = 1300.0;

#[derive(Debug, Default)]
pub struct ServicesSection {
    cards: Vec<NodeId>,
}

impl ServicesSection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cards(&self) -> &[NodeId] {
        &self.cards
    }
}

impl Section for ServicesSection {
    fn kind(&self) -> SectionKind {
        SectionKind::Services
    }

    fn height(&self, _viewport: &Viewport) -> f32 {
        HEIGHT
    }

    fn mount(&mut self, ctx: &mut MountContext<'_>, top: f32) -> SectionScope {
        let mut scope = SectionScope::new(SectionKind::Services);
        let bounds = Rect::new(0.0, top, ctx.viewport.width, HEIGHT);
        let root = scope.insert_root(ctx, bounds);

        let heading_top = top + SECTION_PADDING;
        let heading = Heading::insert(
            &mut scope,
            ctx,
            heading_top,
            "Our Premium Services",
            "Indulge in our comprehensive range of beauty and wellness services.",
        );

        let grid_top = heading_top + HEADING_HEIGHT + 64.0;
        self.cards = SERVICES
            .iter()
            .enumerate()
            .map(|(i, service)| {
                let rect = grid_cell(&ctx.viewport, grid_top, 3, 420.0, 32.0, i);
                scope.insert(
                    ctx,
                    ElementSpec::new(format!("service-{i}"), rect)
                        .class(SERVICE_CARD_CLASS)
                        .text(service.title),
                )
            })
            .collect();

        mount_card_section(&mut scope, ctx, root, &heading, &self.cards, 150.0, 0.2);
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
    fn test_services_cards_stagger() {
        let mut fx = Fixture::new();
        let mut services = ServicesSection::new();
        let scope = services.mount(&mut fx.ctx(), 2000.0);

        assert_eq!(services.cards().len(), 6);
        assert_eq!(fx.document.with_class(SERVICE_CARD_CLASS).count(), 6);
        let cards = fx.runner.get(scope.timelines()[1]).unwrap();
        // 300 + 5 * 150 + 800
        assert_eq!(cards.total_duration_ms(), 1850.0);
        scope.release(&mut fx.ctx());
    }
}
