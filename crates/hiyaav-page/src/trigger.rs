//! Scroll-position triggers for entrance timelines.
//!
//! Each timeline has at most one trigger. A trigger watches an anchor
//! element and, the first time its rule holds, hands the timeline id back to
//! the caller to play. It never fires again.

use hiyaav_motion::{NodeId, TimelineId};
use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::geometry::Viewport;

/// When a trigger fires.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TriggerRule {
    /// The anchor's top edge has reached `viewport_fraction` of the
    /// viewport height, measured from the top ("top 80%").
    TopReaches { viewport_fraction: f32 },
    /// At least `amount` of the anchor's area is inside the viewport.
    InView { amount: f32 },
    /// The first check after the trigger is added.
    Immediate,
}

impl TriggerRule {
    fn holds(&self, document: &Document, anchor: NodeId, viewport: &Viewport) -> Option<bool> {
        if let Self::Immediate = self {
            return Some(true);
        }
        let el = document.get(anchor)?;
        Some(match *self {
            Self::TopReaches { viewport_fraction } => {
                let top = if el.fixed {
                    el.rect.y
                } else {
                    el.rect.y - viewport.scroll_y
                };
                top <= viewport.height * viewport_fraction
            }
            Self::InView { amount } => {
                let ratio = viewport.intersection_ratio(&el.rect, el.fixed, 0.0);
                ratio > 0.0 && ratio >= amount
            }
            Self::Immediate => true,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScrollTrigger {
    pub rule: TriggerRule,
    pub anchor: NodeId,
    pub timeline: TimelineId,
    pub fired: bool,
}

#[derive(Debug, Default)]
pub struct TriggerSet {
    triggers: Vec<ScrollTrigger>,
}

impl TriggerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a trigger to a timeline. Returns `false` if the timeline
    /// already has one.
    pub fn add(&mut self, rule: TriggerRule, anchor: NodeId, timeline: TimelineId) -> bool {
        if self.triggers.iter().any(|t| t.timeline == timeline) {
            tracing::warn!(?timeline, "timeline already has a trigger");
            return false;
        }
        self.triggers.push(ScrollTrigger {
            rule,
            anchor,
            timeline,
            fired: false,
        });
        true
    }

    pub fn remove_for_timeline(&mut self, timeline: TimelineId) -> bool {
        let before = self.triggers.len();
        self.triggers.retain(|t| t.timeline != timeline);
        self.triggers.len() != before
    }

    pub fn get(&self, timeline: TimelineId) -> Option<&ScrollTrigger> {
        self.triggers.iter().find(|t| t.timeline == timeline)
    }

    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.triggers.iter().filter(|t| !t.fired).count()
    }

    /// Evaluate every unfired trigger. Returns the timelines to play, in
    /// the order their triggers were added.
    ///
    /// A trigger whose anchor has left the document is dropped.
    pub fn check(&mut self, document: &Document, viewport: &Viewport) -> Vec<TimelineId> {
        let mut fired = Vec::new();
        self.triggers.retain_mut(|trigger| {
            if trigger.fired {
                return true;
            }
            match trigger.rule.holds(document, trigger.anchor, viewport) {
                None => {
                    tracing::trace!(anchor = %trigger.anchor, "trigger anchor gone, dropping");
                    false
                }
                Some(true) => {
                    trigger.fired = true;
                    tracing::debug!(timeline = ?trigger.timeline, rule = ?trigger.rule, "trigger fired");
                    fired.push(trigger.timeline);
                    true
                }
                Some(false) => true,
            }
        });
        fired
    }

    pub fn clear(&mut self) {
        self.triggers.clear();
    }
}
