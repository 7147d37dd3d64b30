//! Reveal trigger registry.
//!
//! Watches elements and flags each one `active` the first time enough of it
//! is inside the viewport. Activation is one-shot: scrolling away and back
//! does nothing, and an active element never returns to pending.

use hiyaav_config::RevealConfig;
use hiyaav_motion::NodeId;
use serde::Serialize;

use crate::document::{ACTIVE_CLASS, Document};
use crate::geometry::Viewport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealState {
    Pending,
    Active,
}

#[derive(Debug, Clone, Copy)]
struct Watch {
    node: NodeId,
    state: RevealState,
}

/// Page-wide visibility registry.
///
/// Holds element ids only; an element removed from the document without
/// being unobserved is dropped from the registry on the next pass.
#[derive(Debug)]
pub struct RevealRegistry {
    threshold: f32,
    root_margin: f32,
    watches: Vec<Watch>,
    connected: bool,
}

impl RevealRegistry {
    pub fn new(config: &RevealConfig) -> Self {
        Self {
            threshold: config.threshold.clamp(0.0, 1.0),
            root_margin: config.root_margin_px,
            watches: Vec::new(),
            connected: true,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Start watching an element. Observing twice is a no-op.
    pub fn observe(&mut self, node: NodeId) {
        if !self.connected {
            tracing::warn!(%node, "observe after disconnect ignored");
            return;
        }
        if self.watches.iter().any(|w| w.node == node) {
            return;
        }
        self.watches.push(Watch {
            node,
            state: RevealState::Pending,
        });
    }

    /// Stop watching an element. Returns `true` if it was watched.
    pub fn unobserve(&mut self, node: NodeId) -> bool {
        let before = self.watches.len();
        self.watches.retain(|w| w.node != node);
        self.watches.len() != before
    }

    pub fn is_observing(&self, node: NodeId) -> bool {
        self.watches.iter().any(|w| w.node == node)
    }

    pub fn state(&self, node: NodeId) -> Option<RevealState> {
        self.watches.iter().find(|w| w.node == node).map(|w| w.state)
    }

    pub fn observed_count(&self) -> usize {
        self.watches.len()
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Check every pending element against the viewport.
    ///
    /// Newly visible elements get the `active` class and are returned in
    /// document order.
    pub fn visibility_pass(&mut self, document: &mut Document, viewport: &Viewport) -> Vec<NodeId> {
        if !self.connected {
            return Vec::new();
        }

        let before = self.watches.len();
        self.watches.retain(|w| document.contains(w.node));
        if self.watches.len() != before {
            tracing::trace!(dropped = before - self.watches.len(), "dropped watches on removed elements");
        }

        let mut activated = Vec::new();
        for watch in self
            .watches
            .iter_mut()
            .filter(|w| w.state == RevealState::Pending)
        {
            let Some(el) = document.get(watch.node) else {
                continue;
            };
            let ratio = viewport.intersection_ratio(&el.rect, el.fixed, self.root_margin);
            if ratio > 0.0 && ratio >= self.threshold {
                watch.state = RevealState::Active;
                activated.push((el.rect.y, watch.node));
            }
        }

        // top edge first; ids only break ties, a remounted element gets a fresh one
        activated.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        activated
            .into_iter()
            .map(|(_, node)| {
                document.add_class(node, ACTIVE_CLASS);
                tracing::debug!(%node, "revealed");
                node
            })
            .collect()
    }

    /// Cancel every watch. The registry stays inert afterwards.
    pub fn disconnect(&mut self) {
        self.watches.clear();
        self.connected = false;
    }
}
