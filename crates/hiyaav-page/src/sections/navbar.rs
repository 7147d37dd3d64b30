//! Fixed navigation bar and the mobile menu drawer.

use std::collections::BTreeMap;

use hiyaav_config::NavbarConfig;
use hiyaav_motion::{
    ActiveTransition, AnimatableProperty, AnimationHost, EasingFunction, EntranceTimeline, NodeId,
    TimelineStep, TransitionGroup, Tween,
};
use serde::Serialize;

use super::{MountContext, Section, SectionKind, SectionScope, column};
use crate::document::{Document, ElementSpec};
use crate::geometry::{Rect, Viewport};
use crate::trigger::TriggerRule;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub label: &'static str,
    pub anchor: &'static str,
}

pub const NAV_LINKS: [NavLink; 6] = [
    NavLink { label: "Home", anchor: "#home" },
    NavLink { label: "About", anchor: "#about" },
    NavLink { label: "Services", anchor: "#services" },
    NavLink { label: "Gallery", anchor: "#gallery" },
    NavLink { label: "Testimonials", anchor: "#testimonials" },
    NavLink { label: "Contact", anchor: "#contact" },
];

pub const SCROLLED_CLASS: &str = "scrolled";
pub const MENU_OPEN_CLASS: &str = "open";

const BAR_HEIGHT: f32 = 80.0;
/// Slide time of the mobile menu drawer, both ways.
pub const MENU_SLIDE_MS: f32 = 300.0;

/// Fixed top bar: condenses once the page scrolls, carries the section
/// links and a mobile menu toggle.
#[derive(Debug)]
pub struct NavbarSection {
    threshold: f32,
    scrolled: bool,
    menu_open: bool,
    root: Option<NodeId>,
    menu: Option<NodeId>,
    menu_look: TransitionGroup,
    menu_motion: BTreeMap<AnimatableProperty, ActiveTransition>,
}

impl NavbarSection {
    pub fn new(config: &NavbarConfig) -> Self {
        Self {
            threshold: config.scrolled_threshold_px,
            scrolled: false,
            menu_open: false,
            root: None,
            menu: None,
            menu_look: TransitionGroup::new()
                .with_property(AnimatableProperty::Opacity, MENU_SLIDE_MS, EasingFunction::EaseOut)
                .with_property(
                    AnimatableProperty::TranslateX,
                    MENU_SLIDE_MS,
                    EasingFunction::EaseOut,
                ),
            menu_motion: BTreeMap::new(),
        }
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn links(&self) -> &'static [NavLink] {
        &NAV_LINKS
    }

    /// Update the condensed flag from the rendered scroll offset. Returns
    /// the new value when it changed.
    pub fn update_scrolled(&mut self, document: &mut Document, offset: f32) -> Option<bool> {
        let scrolled = offset > self.threshold;
        if scrolled == self.scrolled {
            return None;
        }
        self.scrolled = scrolled;
        if let Some(root) = self.root {
            if scrolled {
                document.add_class(root, SCROLLED_CLASS);
            } else {
                document.remove_class(root, SCROLLED_CLASS);
            }
        }
        Some(scrolled)
    }

    pub fn toggle_menu(&mut self, document: &mut Document) -> bool {
        self.set_menu(document, !self.menu_open);
        self.menu_open
    }

    pub fn close_menu(&mut self, document: &mut Document) {
        if self.menu_open {
            self.set_menu(document, false);
        }
    }

    /// Whether the drawer is still sliding.
    pub fn is_menu_moving(&self) -> bool {
        !self.menu_motion.is_empty()
    }

    fn set_menu(&mut self, document: &mut Document, open: bool) {
        self.menu_open = open;
        let Some(menu) = self.menu else {
            return;
        };
        if open {
            document.add_class(menu, MENU_OPEN_CLASS);
        } else {
            document.remove_class(menu, MENU_OPEN_CLASS);
        }
        for (property, to) in menu_look(document, menu, open) {
            let Some(spec) = self.menu_look.spec_for(property).copied() else {
                document.write(menu, property, to.into());
                continue;
            };
            if let Some(motion) = self.menu_motion.get_mut(&property).filter(|m| m.is_active()) {
                motion.retarget(to.into(), &spec);
                continue;
            }
            let from = document.read(menu, property).unwrap_or_else(|| to.into());
            self.menu_motion
                .insert(property, ActiveTransition::new(from, to.into(), &spec));
        }
    }

    /// Advance the drawer slide and write it to the menu element.
    pub fn tick(&mut self, delta_ms: f32, document: &mut Document) {
        let Some(menu) = self.menu else {
            return;
        };
        self.menu_motion.retain(|&property, motion| {
            let moving = motion.update(delta_ms);
            document.write(menu, property, motion.current_value());
            moving
        });
    }
}

/// Drawer look: open sits in place, closed is pushed one full width to the
/// right and transparent.
fn menu_look(document: &Document, menu: NodeId, open: bool) -> [(AnimatableProperty, f64); 2] {
    let width = document.get(menu).map_or(0.0, |el| f64::from(el.rect.width));
    if open {
        [(AnimatableProperty::Opacity, 1.0), (AnimatableProperty::TranslateX, 0.0)]
    } else {
        [(AnimatableProperty::Opacity, 0.0), (AnimatableProperty::TranslateX, width)]
    }
}

impl Section for NavbarSection {
    fn kind(&self) -> SectionKind {
        SectionKind::Navbar
    }

    fn height(&self, _viewport: &Viewport) -> f32 {
        0.0
    }

    fn mount(&mut self, ctx: &mut MountContext<'_>, _top: f32) -> SectionScope {
        let mut scope = SectionScope::new(SectionKind::Navbar);
        let bounds = Rect::new(0.0, 0.0, ctx.viewport.width, BAR_HEIGHT);
        let root = scope.insert_root(ctx, bounds);

        let (x, width) = column(&ctx.viewport);
        let item_y = (BAR_HEIGHT - 40.0) / 2.0;
        let groups = [
            ("navbar-logo", 0.0, 160.0, "HIYAAV"),
            ("navbar-links", 0.3, width * 0.45, "Home About Services Gallery Testimonials Contact"),
            ("navbar-social", 0.8, width * 0.12, "Instagram Facebook Twitter"),
            ("navbar-toggle", 0.95, 40.0, "Menu"),
        ];
        let mut items = Vec::with_capacity(groups.len());
        for (name, at, item_width, label) in groups {
            items.push(scope.insert(
                ctx,
                ElementSpec::new(name, Rect::new(x + width * at, item_y, item_width, 40.0))
                    .fixed()
                    .text(label),
            ));
        }
        // drawer covers the right three quarters of the screen
        let drawer_width = ctx.viewport.width * 0.75;
        let menu_rect = Rect::new(
            ctx.viewport.width - drawer_width,
            0.0,
            drawer_width,
            ctx.viewport.height,
        );
        let menu = scope.insert(ctx, ElementSpec::new("navbar-mobile-menu", menu_rect).fixed());

        self.root = Some(root);
        self.menu = Some(menu);
        self.menu_motion.clear();
        if self.scrolled {
            ctx.document.add_class(root, SCROLLED_CLASS);
        }
        if self.menu_open {
            ctx.document.add_class(menu, MENU_OPEN_CLASS);
        }
        for (property, value) in menu_look(ctx.document, menu, self.menu_open) {
            ctx.document.write(menu, property, value.into());
        }

        let timeline = EntranceTimeline::new("navbar")
            .step(
                TimelineStep::single(root)
                    .tween(Tween::fade_in())
                    .tween(Tween::slide_y(-20.0))
                    .duration(500.0)
                    .easing(EasingFunction::EaseOut),
            )
            .step(
                TimelineStep::new(items)
                    .tween(Tween::fade_in())
                    .tween(Tween::slide_y(-10.0))
                    .duration(500.0)
                    .stagger(100.0)
                    .easing(EasingFunction::EaseOut),
            );
        scope.add_timeline(ctx, timeline, TriggerRule::Immediate, root);
        scope
    }

    fn unmounted(&mut self) {
        self.root = None;
        self.menu = None;
        self.menu_motion.clear();
    }
}
