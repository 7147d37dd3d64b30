use anyhow::{Context, Result};
use hiyaav_config::HiyaavConfig;
use hiyaav_motion::TimelineEvent;
use hiyaav_page::form::FormField;
use hiyaav_page::{Page, PageEvent, PointerEvent, SectionKind, Viewport};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const FRAME_MS: f64 = 1000.0 / 60.0;

/// What the scripted session observed.
#[derive(Debug, Default, Serialize)]
struct SessionSummary {
    frames: u64,
    revealed: Vec<SectionKind>,
    timelines_started: usize,
    timelines_settled: usize,
    timelines_skipped: usize,
    final_offset: f32,
    scroll_limit: f32,
    navbar_scrolled: bool,
    form_submitted: bool,
    form_reset: bool,
    camera: [f32; 3],
}

struct Session {
    page: Page,
    now_ms: f64,
    summary: SessionSummary,
}

impl Session {
    fn new(page: Page) -> Self {
        Self {
            page,
            now_ms: 0.0,
            summary: SessionSummary::default(),
        }
    }

    fn run_frames(&mut self, count: u32) -> Result<()> {
        for _ in 0..count {
            let report = self.page.frame(self.now_ms)?;
            self.now_ms += FRAME_MS;
            self.summary.frames += 1;
            self.summary.final_offset = report.scroll.offset;
            let camera = report.background.camera.position;
            self.summary.camera = [camera.x, camera.y, camera.z];
            self.collect();
        }
        Ok(())
    }

    fn collect(&mut self) {
        for event in self.page.drain_events() {
            match event {
                PageEvent::Revealed {
                    section: Some(section),
                    ..
                } => self.summary.revealed.push(section),
                PageEvent::Timeline(event) => match event {
                    TimelineEvent::Started { .. } => {
                        self.summary.timelines_started += 1
                    }
                    TimelineEvent::Settled { .. } => {
                        self.summary.timelines_settled += 1
                    }
                    TimelineEvent::StepSkipped { .. } => {
                        self.summary.timelines_skipped += 1
                    }
                    _ => {}
                },
                PageEvent::NavbarScrolled { scrolled } => self.summary.navbar_scrolled = scrolled,
                PageEvent::FormSubmitted { .. } => self.summary.form_submitted = true,
                PageEvent::FormReset => self.summary.form_reset = true,
                _ => {}
            }
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config = HiyaavConfig::load();
    let viewport = Viewport::new(config.viewport.width, config.viewport.height);
    let mut page = Page::new(config, viewport);
    page.mount_all().context("mounting sections")?;

    let mut session = Session::new(page);
    session.run_frames(30)?;

    // move the pointer across the hero, then wheel down through the page
    for step in 0..20u8 {
        let x = f32::from(step) * viewport.width / 20.0;
        session.page.pointer(PointerEvent::Move {
            x,
            y: viewport.height / 3.0,
        });
        session.run_frames(1)?;
    }
    while session.page.scroll().target() < session.page.scroll().limit() {
        session.page.wheel(100.0);
        session.run_frames(4)?;
    }
    session.run_frames(120)?;

    // book an appointment and wait out the acknowledgment
    session.page.navigate("#contact")?;
    session.run_frames(90)?;
    for (field, value) in [
        (FormField::Name, "Maya Lin"),
        (FormField::Email, "maya@example.com"),
        (FormField::Phone, "+1 (555) 010-2030"),
        (FormField::Service, "Skin Treatments"),
        (FormField::Message, "First visit, evenings preferred."),
    ] {
        session.page.set_contact_field(field, value);
    }
    session.page.submit_contact(session.now_ms)?;
    session.run_frames(200)?;

    session.page.scroll_to_top();
    session.run_frames(90)?;

    session.summary.scroll_limit = session.page.scroll().limit();
    session.page.dispose();
    session.collect();
    tracing::info!(
        frames = session.summary.frames,
        revealed = session.summary.revealed.len(),
        "session finished"
    );

    println!("{}", serde_json::to_string_pretty(&session.summary)?);
    Ok(())
}
