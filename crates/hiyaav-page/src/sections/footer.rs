//! Footer: quick links, copyright line and the back-to-top button.

use chrono::Datelike;
use hiyaav_motion::NodeId;

use super::navbar::NavLink;
use super::{MountContext, SECTION_PADDING, Section, SectionKind, SectionScope, column};
use crate::document::ElementSpec;
use crate::geometry::{Rect, Viewport};

pub const QUICK_LINKS: [NavLink; 6] = [
    NavLink { label: "Home", anchor: "#home" },
    NavLink { label: "About Us", anchor: "#about" },
    NavLink { label: "Services", anchor: "#services" },
    NavLink { label: "Gallery", anchor: "#gallery" },
    NavLink { label: "Testimonials", anchor: "#testimonials" },
    NavLink { label: "Contact", anchor: "#contact" },
];

const HEIGHT: f32 = 500.0;

/// Static footer: quick links, copyright line, back-to-top button.
#[derive(Debug)]
pub struct FooterSection {
    year: i32,
    back_to_top: Option<NodeId>,
}

impl Default for FooterSection {
    fn default() -> Self {
        Self::new()
    }
}

impl FooterSection {
    /// Footer stamped with the current local year.
    pub fn new() -> Self {
        Self::with_year(chrono::Local::now().year())
    }

    pub fn with_year(year: i32) -> Self {
        Self {
            year,
            back_to_top: None,
        }
    }

    pub fn copyright(&self) -> String {
        format!(
            "\u{a9} {} HIYAAV Salon & Aesthetic Center. All rights reserved.",
            self.year
        )
    }

    pub fn back_to_top(&self) -> Option<NodeId> {
        self.back_to_top
    }
}

impl Section for FooterSection {
    fn kind(&self) -> SectionKind {
        SectionKind::Footer
    }

    fn height(&self, _viewport: &Viewport) -> f32 {
        HEIGHT
    }

    fn mount(&mut self, ctx: &mut MountContext<'_>, top: f32) -> SectionScope {
        let mut scope = SectionScope::new(SectionKind::Footer);
        let bounds = Rect::new(0.0, top, ctx.viewport.width, HEIGHT);
        scope.insert_root(ctx, bounds);

        let (x, width) = column(&ctx.viewport);
        let links = QUICK_LINKS
            .iter()
            .map(|link| link.label)
            .collect::<Vec<_>>()
            .join(" ");
        scope.insert(
            ctx,
            ElementSpec::new("footer-links", Rect::new(x, top + SECTION_PADDING, width, 240.0))
                .text(links),
        );
        scope.insert(
            ctx,
            ElementSpec::new("footer-copyright", Rect::new(x, top + HEIGHT - 80.0, width, 32.0))
                .text(self.copyright()),
        );
        let button = Rect::new(x + width - 48.0, top + HEIGHT - 120.0, 48.0, 48.0);
        self.back_to_top =
            Some(scope.insert(ctx, ElementSpec::new("footer-back-to-top", button)));
        scope
    }

    fn unmounted(&mut self) {
        self.back_to_top = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::tests::Fixture;

    #[test]
    fn test_copyright_carries_year() {
        let footer = FooterSection::with_year(2031);
        assert!(footer.copyright().contains("2031 HIYAAV"));
        assert!(FooterSection::new().year >= 2024);
    }

    #[test]
    fn test_footer_has_no_timelines() {
        let mut fx = Fixture::new();
        let mut footer = FooterSection::with_year(2030);
        let scope = footer.mount(&mut fx.ctx(), 5000.0);
        assert!(scope.timelines().is_empty());
        assert!(footer.back_to_top().is_some());
        assert_eq!(scope.observed().len(), 1);
        let copyright = fx.document.find("footer-copyright").unwrap();
        assert_eq!(copyright.text.as_deref(), Some(footer.copyright().as_str()));
        scope.release(&mut fx.ctx());
    }
}
