//! Page lifecycle.
//!
//! `Page` owns the page-wide singletons (document, reveal registry,
//! timeline runner, scroll triggers, smooth-scroll driver, cursor follower,
//! background renderer) and every section. Hosts feed it input and frame
//! timestamps; each [`Page::frame`] runs the subsystems in a fixed order:
//!
//! ```text
//! scroll advance -> navbar flag -> trigger checks + play -> visibility pass
//!   -> timeline update -> scroll hint + menu drawer -> cursor transitions
//!   -> background -> form tick
//! ```

use std::collections::{BTreeMap, VecDeque};

use hiyaav_config::HiyaavConfig;
use hiyaav_motion::{NodeId, TimelineEvent, TimelineId, TimelineRunner};
use serde::Serialize;

use crate::background::{BackgroundRenderer, BackgroundSnapshot};
use crate::cursor::{CursorFollower, CursorOverlay, PointerEvent};
use crate::document::Document;
use crate::error::{PageError, Result};
use crate::form::{FormField, Submission};
use crate::geometry::Viewport;
use crate::reveal::RevealRegistry;
use crate::sections::{
    AboutSection, ContactSection, FooterSection, GallerySection, HeroSection, MountContext,
    NavbarSection, Section, SectionKind, SectionScope, ServicesSection, TestimonialsSection,
};
use crate::smooth_scroll::{ScrollState, SmoothScroll};
use crate::trigger::TriggerSet;

/// Something observable that happened on the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageEvent {
    SectionMounted { section: SectionKind },
    SectionUnmounted { section: SectionKind },
    /// An observed element crossed the reveal threshold for the first time.
    Revealed {
        node: NodeId,
        section: Option<SectionKind>,
    },
    TriggerFired { timeline_id: TimelineId },
    Timeline(TimelineEvent),
    NavbarScrolled { scrolled: bool },
    FormSubmitted { submitted_at_ms: f64 },
    FormReset,
}

/// What one frame produced, for a renderer.
#[derive(Debug, Clone, Serialize)]
pub struct FrameReport {
    pub delta_ms: f32,
    pub scroll: ScrollState,
    pub revealed: Vec<NodeId>,
    pub fired: Vec<TimelineId>,
    pub active_timelines: usize,
    pub cursor: Option<CursorOverlay>,
    pub background: BackgroundSnapshot,
}

/// Singletons lent to sections while they mount and unmount.
#[derive(Debug)]
struct Runtime {
    document: Document,
    registry: RevealRegistry,
    runner: TimelineRunner,
    triggers: TriggerSet,
}

impl Runtime {
    fn ctx<'a>(&'a mut self, config: &'a HiyaavConfig, viewport: Viewport) -> MountContext<'a> {
        MountContext {
            document: &mut self.document,
            registry: &mut self.registry,
            runner: &mut self.runner,
            triggers: &mut self.triggers,
            config,
            viewport,
        }
    }
}

#[derive(Debug)]
struct Sections {
    navbar: NavbarSection,
    hero: HeroSection,
    about: AboutSection,
    services: ServicesSection,
    gallery: GallerySection,
    testimonials: TestimonialsSection,
    contact: ContactSection,
    footer: FooterSection,
}

impl Sections {
    fn get(&self, kind: SectionKind) -> &dyn Section {
        match kind {
            SectionKind::Navbar => &self.navbar,
            SectionKind::Hero => &self.hero,
            SectionKind::About => &self.about,
            SectionKind::Services => &self.services,
            SectionKind::Gallery => &self.gallery,
            SectionKind::Testimonials => &self.testimonials,
            SectionKind::Contact => &self.contact,
            SectionKind::Footer => &self.footer,
        }
    }

    fn get_mut(&mut self, kind: SectionKind) -> &mut dyn Section {
        match kind {
            SectionKind::Navbar => &mut self.navbar,
            SectionKind::Hero => &mut self.hero,
            SectionKind::About => &mut self.about,
            SectionKind::Services => &mut self.services,
            SectionKind::Gallery => &mut self.gallery,
            SectionKind::Testimonials => &mut self.testimonials,
            SectionKind::Contact => &mut self.contact,
            SectionKind::Footer => &mut self.footer,
        }
    }
}

/// The single-page site.
#[derive(Debug)]
pub struct Page {
    config: HiyaavConfig,
    viewport: Viewport,
    runtime: Runtime,
    scroll: SmoothScroll,
    cursor: CursorFollower,
    background: BackgroundRenderer,
    sections: Sections,
    scopes: BTreeMap<SectionKind, SectionScope>,
    events: VecDeque<PageEvent>,
    started_at_ms: Option<f64>,
    last_frame_ms: Option<f64>,
    disposed: bool,
}

impl Page {
    /// Build the page singletons. Nothing is mounted yet.
    pub fn new(config: HiyaavConfig, viewport: Viewport) -> Self {
        let runtime = Runtime {
            document: Document::new(),
            registry: RevealRegistry::new(&config.reveal),
            runner: TimelineRunner::new(),
            triggers: TriggerSet::new(),
        };
        let sections = Sections {
            navbar: NavbarSection::new(&config.navbar),
            hero: HeroSection::new(),
            about: AboutSection::new(),
            services: ServicesSection::new(),
            gallery: GallerySection::new(),
            testimonials: TestimonialsSection::new(),
            contact: ContactSection::new(config.contact.reset_after_ms),
            footer: FooterSection::new(),
        };
        tracing::info!(
            width = viewport.width,
            height = viewport.height,
            "page created"
        );
        Self {
            scroll: SmoothScroll::new(config.scroll),
            cursor: CursorFollower::new(config.cursor, &viewport),
            background: BackgroundRenderer::new(config.background),
            config,
            viewport,
            runtime,
            sections,
            scopes: BTreeMap::new(),
            events: VecDeque::new(),
            started_at_ms: None,
            last_frame_ms: None,
            disposed: false,
        }
    }

    /// Mount every section that is not mounted yet, in page order.
    pub fn mount_all(&mut self) -> Result<()> {
        self.ensure_live()?;
        for kind in SectionKind::ALL {
            if !self.scopes.contains_key(&kind) {
                self.mount(kind)?;
            }
        }
        Ok(())
    }

    pub fn mount(&mut self, kind: SectionKind) -> Result<()> {
        self.ensure_live()?;
        if self.scopes.contains_key(&kind) {
            return Err(PageError::AlreadyMounted(kind));
        }
        let top = self.section_top(kind);
        let mut ctx = self.runtime.ctx(&self.config, self.viewport);
        let scope = self.sections.get_mut(kind).mount(&mut ctx, top);
        tracing::info!(
            section = ?kind,
            top,
            elements = scope.elements().len(),
            timelines = scope.timelines().len(),
            "section mounted"
        );
        self.scopes.insert(kind, scope);
        self.events.push_back(PageEvent::SectionMounted { section: kind });
        self.refresh_limit();
        Ok(())
    }

    /// Release everything the section acquired. In-flight timelines stop
    /// before their elements are removed.
    pub fn unmount(&mut self, kind: SectionKind) -> Result<()> {
        self.ensure_live()?;
        let scope = self
            .scopes
            .remove(&kind)
            .ok_or(PageError::NotMounted(kind))?;
        self.release(scope);
        self.refresh_limit();
        Ok(())
    }

    fn release(&mut self, scope: SectionScope) {
        let kind = scope.kind();
        let mut ctx = self.runtime.ctx(&self.config, self.viewport);
        scope.release(&mut ctx);
        self.sections.get_mut(kind).unmounted();
        self.collect_timeline_events();
        self.events.push_back(PageEvent::SectionUnmounted { section: kind });
        tracing::info!(section = ?kind, "section unmounted");
    }

    /// Document offset of a section's top edge. Every in-flow section keeps
    /// its slot whether or not the ones before it are mounted.
    pub fn section_top(&self, kind: SectionKind) -> f32 {
        if !kind.in_flow() {
            return 0.0;
        }
        SectionKind::ALL
            .into_iter()
            .take_while(|k| *k != kind)
            .filter(|k| k.in_flow())
            .map(|k| self.sections.get(k).height(&self.viewport))
            .sum()
    }

    /// Run one frame at host time `now_ms`.
    pub fn frame(&mut self, now_ms: f64) -> Result<FrameReport> {
        self.ensure_live()?;
        let delta_ms = self
            .last_frame_ms
            .map_or(0.0, |last| (now_ms - last).max(0.0) as f32);
        self.last_frame_ms = Some(now_ms);
        let started_at = *self.started_at_ms.get_or_insert(now_ms);

        let offset = self.scroll.advance(delta_ms).unwrap_or(self.viewport.scroll_y);
        self.viewport.scroll_y = offset;

        if let Some(scrolled) = self
            .sections
            .navbar
            .update_scrolled(&mut self.runtime.document, offset)
        {
            self.events.push_back(PageEvent::NavbarScrolled { scrolled });
        }

        let due = self
            .runtime
            .triggers
            .check(&self.runtime.document, &self.viewport);
        let mut fired = Vec::with_capacity(due.len());
        for timeline_id in due {
            if self.runtime.runner.play(timeline_id, &self.runtime.document) {
                self.events.push_back(PageEvent::TriggerFired { timeline_id });
                fired.push(timeline_id);
            }
        }

        let revealed = self
            .runtime
            .registry
            .visibility_pass(&mut self.runtime.document, &self.viewport);
        for &node in &revealed {
            let section = self.runtime.document.get(node).and_then(|el| el.section);
            self.events.push_back(PageEvent::Revealed { node, section });
        }

        self.runtime
            .runner
            .update(delta_ms, &mut self.runtime.document);
        self.collect_timeline_events();
        self.sections.hero.tick(delta_ms, &mut self.runtime.document);
        self.sections.navbar.tick(delta_ms, &mut self.runtime.document);

        self.cursor.update(delta_ms);

        let elapsed_secs = ((now_ms - started_at) / 1000.0) as f32;
        let pointer = self.cursor.pointer_ndc(&self.viewport);
        let background = self.background.frame(elapsed_secs, pointer);

        let contact_live = self.is_mounted(SectionKind::Contact);
        if contact_live && self.sections.contact.form_mut().tick(now_ms) {
            self.events.push_back(PageEvent::FormReset);
        }

        Ok(FrameReport {
            delta_ms,
            scroll: self.scroll.state(),
            revealed,
            fired,
            active_timelines: self.runtime.runner.active_count(),
            cursor: self.cursor.overlay(),
            background,
        })
    }

    pub fn wheel(&mut self, delta_y: f32) {
        self.scroll.on_wheel(delta_y);
    }

    pub fn touch(&mut self, delta_y: f32) {
        self.scroll.on_touch(delta_y);
    }

    pub fn pointer(&mut self, event: PointerEvent) {
        if self.disposed {
            return;
        }
        self.cursor.handle(event);
    }

    /// Follow an in-page link such as `#services`: glide to the section
    /// and close the mobile menu.
    pub fn navigate(&mut self, anchor: &str) -> Result<()> {
        self.ensure_live()?;
        let kind = SectionKind::from_anchor(anchor)
            .ok_or_else(|| PageError::UnknownAnchor(anchor.to_string()))?;
        let top = self
            .scopes
            .get(&kind)
            .and_then(|scope| scope.root())
            .and_then(|root| self.runtime.document.get(root))
            .map(|el| el.rect.y)
            .ok_or(PageError::NotMounted(kind))?;
        self.sections.navbar.close_menu(&mut self.runtime.document);
        tracing::debug!(anchor, top, "navigating");
        self.scroll.scroll_to(top, false);
        Ok(())
    }

    /// The footer's back-to-top button.
    pub fn scroll_to_top(&mut self) {
        self.scroll.scroll_to(0.0, false);
    }

    pub fn toggle_menu(&mut self) -> bool {
        self.sections.navbar.toggle_menu(&mut self.runtime.document)
    }

    /// Type into the contact form. Ignored while Contact is not mounted.
    pub fn set_contact_field(&mut self, field: FormField, value: impl Into<String>) {
        if !self.is_mounted(SectionKind::Contact) {
            return;
        }
        self.sections.contact.form_mut().set_field(field, value);
    }

    /// Submit the contact form at host time `now_ms`.
    pub fn submit_contact(&mut self, now_ms: f64) -> Result<Submission> {
        self.ensure_live()?;
        if !self.is_mounted(SectionKind::Contact) {
            return Err(PageError::NotMounted(SectionKind::Contact));
        }
        let submission = self.sections.contact.form_mut().submit(now_ms)?;
        self.events.push_back(PageEvent::FormSubmitted {
            submitted_at_ms: submission.submitted_at_ms,
        });
        Ok(submission)
    }

    /// New viewport size. Layout stays as mounted; the scroll limit follows
    /// the new height.
    pub fn resize(&mut self, width: f32, height: f32) {
        if self.disposed {
            return;
        }
        self.viewport.width = width;
        self.viewport.height = height;
        self.refresh_limit();
        tracing::debug!(width, height, "viewport resized");
    }

    /// Tear the page down: stop scrolling, release every section and
    /// disconnect the registry. Idempotent.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.scroll.dispose();
        while let Some((_, scope)) = self.scopes.pop_last() {
            self.release(scope);
        }
        self.runtime.registry.disconnect();
        self.runtime.triggers.clear();
        self.runtime.runner.clear();
        self.collect_timeline_events();
        self.disposed = true;
        tracing::info!("page disposed");
    }

    pub fn drain_events(&mut self) -> impl Iterator<Item = PageEvent> + '_ {
        self.collect_timeline_events();
        self.events.drain(..)
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn is_mounted(&self, kind: SectionKind) -> bool {
        self.scopes.contains_key(&kind)
    }

    pub fn scope(&self, kind: SectionKind) -> Option<&SectionScope> {
        self.scopes.get(&kind)
    }

    pub fn config(&self) -> &HiyaavConfig {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn document(&self) -> &Document {
        &self.runtime.document
    }

    pub fn registry(&self) -> &RevealRegistry {
        &self.runtime.registry
    }

    pub fn runner(&self) -> &TimelineRunner {
        &self.runtime.runner
    }

    pub fn triggers(&self) -> &TriggerSet {
        &self.runtime.triggers
    }

    pub fn scroll(&self) -> &SmoothScroll {
        &self.scroll
    }

    pub fn cursor(&self) -> &CursorFollower {
        &self.cursor
    }

    pub fn background(&self) -> &BackgroundRenderer {
        &self.background
    }

    pub fn navbar(&self) -> &NavbarSection {
        &self.sections.navbar
    }

    pub fn hero(&self) -> &HeroSection {
        &self.sections.hero
    }

    pub fn about(&self) -> &AboutSection {
        &self.sections.about
    }

    pub fn services(&self) -> &ServicesSection {
        &self.sections.services
    }

    pub fn gallery(&self) -> &GallerySection {
        &self.sections.gallery
    }

    pub fn testimonials(&self) -> &TestimonialsSection {
        &self.sections.testimonials
    }

    pub fn testimonials_mut(&mut self) -> &mut TestimonialsSection {
        &mut self.sections.testimonials
    }

    pub fn contact(&self) -> &ContactSection {
        &self.sections.contact
    }

    pub fn footer(&self) -> &FooterSection {
        &self.sections.footer
    }

    fn ensure_live(&self) -> Result<()> {
        if self.disposed {
            Err(PageError::Disposed)
        } else {
            Ok(())
        }
    }

    fn refresh_limit(&mut self) {
        let limit = self
            .viewport
            .scroll_limit(self.runtime.document.content_height());
        self.scroll.set_limit(limit);
        if !self.scroll.is_disposed() {
            self.viewport.scroll_y = self.scroll.offset();
        }
    }

    fn collect_timeline_events(&mut self) {
        self.events
            .extend(self.runtime.runner.drain_events().map(PageEvent::Timeline));
    }
}
