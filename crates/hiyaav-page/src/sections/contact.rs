//! Contact section: booking form and the salon's address, phone, email
//! and opening hours.

use hiyaav_motion::{EntranceTimeline, NodeId, TimelineStep, Tween};
use serde::Serialize;

use super::{
    HEADING_HEIGHT, Heading, MountContext, SECTION_PADDING, Section, SectionKind, SectionScope,
    column,
};
use crate::document::ElementSpec;
use crate::form::ContactForm;
use crate::geometry::{Rect, Viewport};
use crate::trigger::TriggerRule;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContactInfo {
    pub address: &'static str,
    pub phone: &'static str,
    pub email: &'static str,
    pub hours: [&'static str; 3],
}

pub const CONTACT_INFO: ContactInfo = ContactInfo {
    address: "123 Beauty Boulevard, Luxury District, New York, NY 10001",
    phone: "+1 (555) 123-4567",
    email: "info@hiyaav.com",
    hours: [
        "Monday - Friday: 9:00 AM - 8:00 PM",
        "Saturday: 10:00 AM - 6:00 PM",
        "Sunday: 11:00 AM - 5:00 PM",
    ],
};

const HEIGHT: f32 = 1200.0;

/// Booking form beside the salon's contact details.
#[derive(Debug)]
pub struct ContactSection {
    form: ContactForm,
    panels: Option<(NodeId, NodeId)>,
}

impl ContactSection {
    pub fn new(reset_after_ms: f64) -> Self {
        Self {
            form: ContactForm::new(reset_after_ms),
            panels: None,
        }
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ContactForm {
        &mut self.form
    }

    pub fn info(&self) -> &'static ContactInfo {
        &CONTACT_INFO
    }

    /// `(form panel, info panel)` while mounted.
    pub fn panels(&self) -> Option<(NodeId, NodeId)> {
        self.panels
    }
}

impl Section for ContactSection {
    fn kind(&self) -> SectionKind {
        SectionKind::Contact
    }

    fn height(&self, _viewport: &Viewport) -> f32 {
        HEIGHT
    }

    fn mount(&mut self, ctx: &mut MountContext<'_>, top: f32) -> SectionScope {
        let mut scope = SectionScope::new(SectionKind::Contact);
        let bounds = Rect::new(0.0, top, ctx.viewport.width, HEIGHT);
        let root = scope.insert_root(ctx, bounds);

        let heading_top = top + SECTION_PADDING;
        let heading = Heading::insert(
            &mut scope,
            ctx,
            heading_top,
            "Get in Touch",
            "Book an appointment or reach out with any questions.",
        );

        let (x, width) = column(&ctx.viewport);
        let half = (width - 48.0) / 2.0;
        let body_top = heading_top + HEADING_HEIGHT + 64.0;
        let form = scope.insert(
            ctx,
            ElementSpec::new("contact-form", Rect::new(x, body_top, half, 720.0))
                .text("Book an Appointment"),
        );
        let info = scope.insert(
            ctx,
            ElementSpec::new("contact-info", Rect::new(x + half + 48.0, body_top, half, 720.0))
                .text(CONTACT_INFO.address),
        );
        self.panels = Some((form, info));

        scope.add_timeline(
            ctx,
            heading.reveal_timeline("contact"),
            TriggerRule::InView { amount: 0.2 },
            root,
        );
        let rule = ctx.top_reaches();
        let timeline = EntranceTimeline::new("contact")
            .step(heading.container_step())
            .step(
                TimelineStep::single(form)
                    .tween(Tween::fade_in())
                    .tween(Tween::slide_x(40.0))
                    .duration(800.0)
                    .delay(300.0),
            )
            .step(
                TimelineStep::single(info)
                    .tween(Tween::fade_in())
                    .tween(Tween::slide_x(-40.0))
                    .duration(800.0)
                    .delay(500.0),
            );
        scope.add_timeline(ctx, timeline, rule, root);
        scope
    }

    fn unmounted(&mut self) {
        self.panels = None;
        if self.form.discard() {
            tracing::debug!("pending contact submission dropped on unmount");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormField;
    use crate::sections::tests::Fixture;

    #[test]
    fn test_panels_slide_in_from_opposite_sides() {
        let mut fx = Fixture::new();
        let mut contact = ContactSection::new(3000.0);
        let scope = contact.mount(&mut fx.ctx(), 0.0);
        let (form, info) = contact.panels().unwrap();

        assert_eq!(fx.document.get(form).unwrap().style.translate_x, 40.0);
        assert_eq!(fx.document.get(info).unwrap().style.translate_x, -40.0);
        let timeline = fx.runner.get(scope.timelines()[1]).unwrap();
        assert_eq!(timeline.total_duration_ms(), 1300.0);
        assert_eq!(contact.info().hours.len(), 3);

        scope.release(&mut fx.ctx());
        contact.unmounted();
        assert!(contact.panels().is_none());
    }

    #[test]
    fn test_unmount_drops_pending_submission() {
        let mut fx = Fixture::new();
        let mut contact = ContactSection::new(3000.0);
        let scope = contact.mount(&mut fx.ctx(), 0.0);
        for (field, value) in [
            (FormField::Name, "Noor"),
            (FormField::Email, "noor@example.com"),
            (FormField::Phone, "555-0142"),
            (FormField::Service, "Hair Styling"),
        ] {
            contact.form_mut().set_field(field, value);
        }
        contact.form_mut().submit(0.0).unwrap();

        scope.release(&mut fx.ctx());
        contact.unmounted();
        assert!(!contact.form().is_submitted());
        assert!(!contact.form_mut().tick(3000.0));
    }
}
