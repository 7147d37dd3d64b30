//! Gallery grid of finished looks.

use hiyaav_motion::NodeId;
use serde::Serialize;

use super::{
    HEADING_HEIGHT, Heading, MountContext, SECTION_PADDING, Section, SectionKind, SectionScope,
    grid_cell, mount_card_section,
};
use crate::document::ElementSpec;
use crate::geometry::{Rect, Viewport};

pub const GALLERY_ITEM_CLASS: &str = "gallery-item";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GalleryItem {
    pub alt: &'static str,
    pub category: &'static str,
}

pub const GALLERY_ITEMS: [GalleryItem; 8] = [
    GalleryItem { alt: "Hair Styling", category: "Hair" },
    GalleryItem { alt: "Makeup Application", category: "Makeup" },
    GalleryItem { alt: "Facial Treatment", category: "Skin" },
    GalleryItem { alt: "Professional Makeup", category: "Makeup" },
    GalleryItem { alt: "Hair Coloring", category: "Hair" },
    GalleryItem { alt: "Nail Art", category: "Nails" },
    GalleryItem { alt: "Spa Treatment", category: "Wellness" },
    GalleryItem { alt: "Hair Styling", category: "Hair" },
];

const HEIGHT: f32 = 1100.0;

#[derive(Debug, Default)]
pub struct GallerySection {
    items: Vec<NodeId>,
}

impl GallerySection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[NodeId] {
        &self.items
    }

    /// Items in one category, in display order.
    pub fn by_category(category: &str) -> impl Iterator<Item = &'static GalleryItem> + '_ {
        GALLERY_ITEMS.iter().filter(move |item| item.category == category)
    }
}

impl Section for GallerySection {
    fn kind(&self) -> SectionKind {
        SectionKind::Gallery
    }

    fn height(&self, _viewport: &Viewport) -> f32 {
        HEIGHT
    }

    fn mount(&mut self, ctx: &mut MountContext<'_>, top: f32) -> SectionScope {
        let mut scope = SectionScope::new(SectionKind::Gallery);
        let bounds = Rect::new(0.0, top, ctx.viewport.width, HEIGHT);
        let root = scope.insert_root(ctx, bounds);

        let heading_top = top + SECTION_PADDING;
        let heading = Heading::insert(
            &mut scope,
            ctx,
            heading_top,
            "Our Gallery",
            "Explore our portfolio of transformative beauty services.",
        );

        let grid_top = heading_top + HEADING_HEIGHT + 64.0;
        self.items = GALLERY_ITEMS
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let rect = grid_cell(&ctx.viewport, grid_top, 4, 256.0, 16.0, i);
                scope.insert(
                    ctx,
                    ElementSpec::new(format!("gallery-{i}"), rect)
                        .class(GALLERY_ITEM_CLASS)
                        .text(format!("{} ({})", item.alt, item.category)),
                )
            })
            .collect();

        mount_card_section(&mut scope, ctx, root, &heading, &self.items, 100.0, 0.2);
        scope
    }

    fn unmounted(&mut self) {
        self.items.clear();
    }
}
