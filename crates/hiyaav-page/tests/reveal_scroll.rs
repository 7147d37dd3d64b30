use std::collections::HashSet;

use anyhow::Result;
use hiyaav_config::HiyaavConfig;
use hiyaav_motion::{TimelineEvent, TimelineState};
use hiyaav_page::{ACTIVE_CLASS, Page, PageEvent, SectionKind, Viewport};

const FRAME_MS: f64 = 16.0;

fn mounted_page() -> Result<Page> {
    let mut page = Page::new(HiyaavConfig::default(), Viewport::new(1280.0, 800.0));
    page.mount_all()?;
    Ok(page)
}

fn revealed_sections(page: &mut Page) -> Vec<SectionKind> {
    page.drain_events()
        .filter_map(|event| match event {
            PageEvent::Revealed { section, .. } => section,
            _ => None,
        })
        .collect()
}

#[test]
fn only_first_viewport_activates_at_zero_scroll() -> Result<()> {
    let mut page = mounted_page()?;
    let report = page.frame(0.0)?;

    assert_eq!(report.scroll.offset, 0.0);
    assert_eq!(revealed_sections(&mut page), vec![SectionKind::Hero]);

    let document = page.document();
    let active: Vec<_> = document.with_class(ACTIVE_CLASS).map(|el| el.name.as_str()).collect();
    assert_eq!(active, vec!["home"]);
    Ok(())
}

#[test]
fn scrolling_down_activates_the_rest_once_in_order() -> Result<()> {
    let mut page = mounted_page()?;
    let mut now = 0.0;
    page.frame(now)?;
    let mut order = revealed_sections(&mut page);

    let mut last_offset = 0.0;
    for _ in 0..400 {
        page.wheel(120.0);
        now += FRAME_MS;
        let report = page.frame(now)?;
        assert!(report.scroll.offset >= last_offset, "scroll went backwards");
        assert!(report.scroll.offset <= report.scroll.target + 1e-3, "overshot target");
        last_offset = report.scroll.offset;
        order.extend(revealed_sections(&mut page));
    }
    for _ in 0..150 {
        now += FRAME_MS;
        page.frame(now)?;
        order.extend(revealed_sections(&mut page));
    }

    assert_eq!(page.scroll().offset(), page.scroll().limit());
    assert!(!page.scroll().is_scrolling());
    assert_eq!(
        order,
        vec![
            SectionKind::Hero,
            SectionKind::About,
            SectionKind::Services,
            SectionKind::Gallery,
            SectionKind::Testimonials,
            SectionKind::Contact,
            SectionKind::Footer,
        ]
    );

    // back to the top and down again: nothing re-activates
    page.scroll_to_top();
    for _ in 0..100 {
        now += FRAME_MS;
        page.frame(now)?;
    }
    assert_eq!(page.scroll().offset(), 0.0);
    page.navigate("#contact")?;
    for _ in 0..100 {
        now += FRAME_MS;
        page.frame(now)?;
    }
    assert!(revealed_sections(&mut page).is_empty());
    Ok(())
}

#[test]
fn every_timeline_plays_once_and_settles() -> Result<()> {
    let mut page = mounted_page()?;
    let mut now = 0.0;
    let mut started = Vec::new();
    page.frame(now)?;

    // glide to the bottom, back up, and down again
    let limit = page.scroll().limit();
    for target in [limit, 0.0, limit] {
        page.wheel(target - page.scroll().target());
        for _ in 0..200 {
            now += FRAME_MS;
            page.frame(now)?;
            for event in page.drain_events() {
                if let PageEvent::Timeline(TimelineEvent::Started { timeline_id, .. }) = event {
                    started.push(timeline_id);
                }
            }
        }
    }

    let unique: HashSet<_> = started.iter().collect();
    assert_eq!(unique.len(), started.len(), "a timeline started twice");
    assert_eq!(started.len(), page.runner().len());

    for kind in SectionKind::ALL {
        let scope = page.scope(kind).expect("mounted");
        for &id in scope.timelines() {
            assert_eq!(page.runner().state(id), Some(TimelineState::Settled), "{kind:?}");
        }
    }
    for &stat in page.about().stat_items() {
        let el = page.document().get(stat).expect("stat present");
        assert_eq!(el.style.opacity, 1.0);
        assert_eq!(el.style.translate_y, 0.0);
    }
    Ok(())
}

#[test]
fn remounted_section_still_reveals_in_page_order() -> Result<()> {
    let mut page = mounted_page()?;
    page.frame(0.0)?;
    page.unmount(SectionKind::About)?;
    page.mount(SectionKind::About)?;
    page.drain_events().for_each(drop);

    // touch input lands immediately; About and Services cross together
    let jump = 1900.0 / page.config().scroll.touch_multiplier;
    page.touch(jump);
    let report = page.frame(FRAME_MS)?;
    assert_eq!(report.scroll.offset, 1900.0);
    assert_eq!(
        revealed_sections(&mut page),
        vec![SectionKind::About, SectionKind::Services]
    );
    Ok(())
}
