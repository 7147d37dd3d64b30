//! Page sections.
//!
//! A section mounts by inserting its elements into the document, putting
//! its root under the reveal registry, and adding its entrance timelines
//! with their triggers. Everything it acquires is recorded in the returned
//! [`SectionScope`], and releasing the scope gives all of it back in one
//! synchronous step.

mod about;
mod contact;
mod footer;
mod gallery;
mod hero;
mod navbar;
mod services;
mod testimonials;

pub use about::{AboutSection, STATS, Stat};
pub use contact::{CONTACT_INFO, ContactInfo, ContactSection};
pub use footer::{FooterSection, QUICK_LINKS};
pub use gallery::{GALLERY_ITEMS, GalleryItem, GallerySection};
pub use hero::HeroSection;
pub use navbar::{NAV_LINKS, NavLink, NavbarSection};
pub use services::{SERVICES, Service, ServicesSection};
pub use testimonials::{Carousel, TESTIMONIALS, Testimonial, TestimonialsSection};

use hiyaav_config::HiyaavConfig;
use hiyaav_motion::{
    EasingFunction, EntranceTimeline, NodeId, TimelineId, TimelineRunner, TimelineStep, Tween,
};
use serde::Serialize;

use crate::document::{Document, ElementSpec, REVEAL_CLASS};
use crate::geometry::{Rect, Viewport};
use crate::reveal::RevealRegistry;
use crate::trigger::{TriggerRule, TriggerSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Navbar,
    Hero,
    About,
    Services,
    Gallery,
    Testimonials,
    Contact,
    Footer,
}

impl SectionKind {
    /// Page order.
    pub const ALL: [SectionKind; 8] = [
        Self::Navbar,
        Self::Hero,
        Self::About,
        Self::Services,
        Self::Gallery,
        Self::Testimonials,
        Self::Contact,
        Self::Footer,
    ];

    /// Element id used in the page, e.g. `home` for the hero.
    pub fn id(self) -> &'static str {
        match self {
            Self::Navbar => "navbar",
            Self::Hero => "home",
            Self::About => "about",
            Self::Services => "services",
            Self::Gallery => "gallery",
            Self::Testimonials => "testimonials",
            Self::Contact => "contact",
            Self::Footer => "footer",
        }
    }

    /// In-page link target, for sections the navbar links to.
    pub fn anchor(self) -> Option<&'static str> {
        match self {
            Self::Navbar | Self::Footer => None,
            Self::Hero => Some("#home"),
            Self::About => Some("#about"),
            Self::Services => Some("#services"),
            Self::Gallery => Some("#gallery"),
            Self::Testimonials => Some("#testimonials"),
            Self::Contact => Some("#contact"),
        }
    }

    pub fn from_anchor(anchor: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.anchor() == Some(anchor))
    }

    /// Whether the section takes up space in the document flow.
    pub fn in_flow(self) -> bool {
        self != Self::Navbar
    }
}

/// Mutable access to the page singletons while a section mounts or unmounts.
pub struct MountContext<'a> {
    pub document: &'a mut Document,
    pub registry: &'a mut RevealRegistry,
    pub runner: &'a mut TimelineRunner,
    pub triggers: &'a mut TriggerSet,
    pub config: &'a HiyaavConfig,
    pub viewport: Viewport,
}

impl MountContext<'_> {
    /// The "top 80%" scroll-trigger rule from configuration.
    pub fn top_reaches(&self) -> TriggerRule {
        TriggerRule::TopReaches {
            viewport_fraction: self.config.triggers.start_fraction,
        }
    }
}

/// Every resource a mounted section holds.
#[must_use = "a scope must be released on unmount"]
#[derive(Debug)]
pub struct SectionScope {
    kind: SectionKind,
    root: Option<NodeId>,
    elements: Vec<NodeId>,
    observed: Vec<NodeId>,
    timelines: Vec<TimelineId>,
}

impl SectionScope {
    pub fn new(kind: SectionKind) -> Self {
        Self {
            kind,
            root: None,
            elements: Vec::new(),
            observed: Vec::new(),
            timelines: Vec::new(),
        }
    }

    pub fn kind(&self) -> SectionKind {
        self.kind
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn elements(&self) -> &[NodeId] {
        &self.elements
    }

    pub fn observed(&self) -> &[NodeId] {
        &self.observed
    }

    pub fn timelines(&self) -> &[TimelineId] {
        &self.timelines
    }

    pub fn insert(&mut self, ctx: &mut MountContext<'_>, spec: ElementSpec) -> NodeId {
        let id = ctx.document.insert(spec.section(self.kind));
        self.elements.push(id);
        id
    }

    /// Insert the section root. In-flow roots get the reveal class and
    /// are observed.
    pub fn insert_root(&mut self, ctx: &mut MountContext<'_>, rect: Rect) -> NodeId {
        let mut spec = ElementSpec::new(self.kind.id(), rect);
        if self.kind.in_flow() {
            spec = spec.class(REVEAL_CLASS);
        } else {
            spec = spec.fixed();
        }
        let id = self.insert(ctx, spec);
        if self.kind.in_flow() {
            self.observe(ctx, id);
        }
        self.root = Some(id);
        id
    }

    pub fn observe(&mut self, ctx: &mut MountContext<'_>, node: NodeId) {
        ctx.registry.observe(node);
        self.observed.push(node);
    }

    /// Add a timeline, prime its targets and attach its trigger.
    pub fn add_timeline(
        &mut self,
        ctx: &mut MountContext<'_>,
        timeline: EntranceTimeline,
        rule: TriggerRule,
        anchor: NodeId,
    ) -> TimelineId {
        let id = ctx.runner.add(timeline);
        ctx.runner.prime(id, &mut *ctx.document);
        ctx.triggers.add(rule, anchor, id);
        self.timelines.push(id);
        id
    }

    /// Give back everything the section acquired: watches, timelines,
    /// triggers and elements, in that order.
    pub fn release(self, ctx: &mut MountContext<'_>) {
        for node in &self.observed {
            ctx.registry.unobserve(*node);
        }
        for id in &self.timelines {
            ctx.triggers.remove_for_timeline(*id);
            ctx.runner.remove(*id);
        }
        for node in &self.elements {
            ctx.document.remove(*node);
        }
        tracing::debug!(
            section = ?self.kind,
            elements = self.elements.len(),
            timelines = self.timelines.len(),
            "section released"
        );
    }
}

/// A mountable page section.
pub trait Section {
    fn kind(&self) -> SectionKind;

    /// Laid-out height for the given viewport. Zero for out-of-flow sections.
    fn height(&self, viewport: &Viewport) -> f32;

    /// Insert elements and timelines with the section starting at `top`.
    fn mount(&mut self, ctx: &mut MountContext<'_>, top: f32) -> SectionScope;

    /// Forget element handles after the scope has been released.
    fn unmounted(&mut self) {}
}

/// Horizontal padding either side of the content column.
pub(crate) const GUTTER: f32 = 32.0;
/// Vertical padding at the top of a section.
pub(crate) const SECTION_PADDING: f32 = 96.0;
const MAX_CONTENT_WIDTH: f32 = 1200.0;

/// The centered content column as `(x, width)`.
pub(crate) fn column(viewport: &Viewport) -> (f32, f32) {
    let width = (viewport.width - 2.0 * GUTTER).clamp(0.0, MAX_CONTENT_WIDTH);
    ((viewport.width - width) / 2.0, width)
}

/// Split the column into `count` equal cells per row with `gap` between
/// them; returns the rect of cell `index`.
pub(crate) fn grid_cell(
    viewport: &Viewport,
    top: f32,
    columns: usize,
    cell_height: f32,
    gap: f32,
    index: usize,
) -> Rect {
    let columns = columns.max(1);
    let (x, width) = column(viewport);
    let cell_width = ((width - gap * (columns - 1) as f32) / columns as f32).max(0.0);
    let row = index / columns;
    let col = index % columns;
    Rect::new(
        x + col as f32 * (cell_width + gap),
        top + row as f32 * (cell_height + gap),
        cell_width,
        cell_height,
    )
}

/// Section heading: a container holding the title and its gold underline.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Heading {
    pub container: NodeId,
    pub title: NodeId,
    pub underline: NodeId,
}

pub(crate) const HEADING_HEIGHT: f32 = 160.0;
const UNDERLINE_WIDTH: f64 = 100.0;

impl Heading {
    pub fn insert(
        scope: &mut SectionScope,
        ctx: &mut MountContext<'_>,
        top: f32,
        title: &str,
        blurb: &str,
    ) -> Self {
        let (x, width) = column(&ctx.viewport);
        let kind = scope.kind().id();
        let container = scope.insert(
            ctx,
            ElementSpec::new(format!("{kind}-heading"), Rect::new(x, top, width, HEADING_HEIGHT))
                .text(blurb),
        );
        let title = scope.insert(
            ctx,
            ElementSpec::new(format!("{kind}-title"), Rect::new(x, top, width, 56.0)).text(title),
        );
        let underline_x = x + (width - UNDERLINE_WIDTH as f32) / 2.0;
        let underline = scope.insert(
            ctx,
            ElementSpec::new(
                format!("{kind}-underline"),
                Rect::new(underline_x, top + 72.0, UNDERLINE_WIDTH as f32, 4.0),
            ),
        );
        Self {
            container,
            title,
            underline,
        }
    }

    /// Title rises into place; the underline grows out from zero width.
    pub fn reveal_timeline(&self, name: &str) -> EntranceTimeline {
        EntranceTimeline::new(format!("{name}-heading"))
            .step(
                TimelineStep::single(self.title)
                    .tween(Tween::fade_in())
                    .tween(Tween::slide_y(20.0))
                    .duration(600.0)
                    .easing(EasingFunction::EaseOut),
            )
            .step(
                TimelineStep::single(self.underline)
                    .tween(Tween::fade_in())
                    .tween(Tween::grow_width(0.0, UNDERLINE_WIDTH))
                    .duration(800.0)
                    .delay(300.0)
                    .easing(EasingFunction::EaseOut),
            )
    }

    /// Step sliding the whole heading block up as the section enters.
    pub fn container_step(&self) -> TimelineStep {
        TimelineStep::single(self.container)
            .tween(Tween::fade_in())
            .tween(Tween::slide_y(40.0))
            .duration(800.0)
    }
}

/// Fade-and-rise for a staggered group of cards.
pub(crate) fn card_step(cards: &[NodeId], stagger_ms: f32) -> TimelineStep {
    TimelineStep::new(cards.iter().copied())
        .tween(Tween::fade_in())
        .tween(Tween::slide_y(40.0))
        .duration(800.0)
        .delay(300.0)
        .stagger(stagger_ms)
}

/// Shared shape of the card-grid sections (services, gallery,
/// testimonials): heading, then a staggered card group.
pub(crate) fn mount_card_section(
    scope: &mut SectionScope,
    ctx: &mut MountContext<'_>,
    root: NodeId,
    heading: &Heading,
    cards: &[NodeId],
    stagger_ms: f32,
    in_view_amount: f32,
) {
    let name = scope.kind().id();
    scope.add_timeline(
        ctx,
        heading.reveal_timeline(name),
        TriggerRule::InView {
            amount: in_view_amount,
        },
        root,
    );
    let rule = ctx.top_reaches();
    scope.add_timeline(
        ctx,
        EntranceTimeline::new(name)
            .step(heading.container_step())
            .step(card_step(cards, stagger_ms)),
        rule,
        root,
    );
}
