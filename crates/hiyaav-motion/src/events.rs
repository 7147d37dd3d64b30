//! Timeline lifecycle events.
//!
//! The runner queues an event whenever a timeline changes state; the page
//! drains them after each frame.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::types::{NodeId, TimelineId};

/// Event emitted when a timeline changes state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimelineEvent {
    /// Targets were put into their hidden starting look.
    Primed { timeline_id: TimelineId, name: String },
    /// Playback began.
    Started { timeline_id: TimelineId, name: String },
    /// A target was missing when playback began and was left out.
    StepSkipped {
        timeline_id: TimelineId,
        step: usize,
        node: NodeId,
    },
    /// Every tween reached its settled value.
    Settled { timeline_id: TimelineId, name: String },
    /// Stopped before settling (section unmounted).
    Cancelled { timeline_id: TimelineId, name: String },
}

impl TimelineEvent {
    pub fn timeline_id(&self) -> TimelineId {
        match self {
            Self::Primed { timeline_id, .. }
            | Self::Started { timeline_id, .. }
            | Self::StepSkipped { timeline_id, .. }
            | Self::Settled { timeline_id, .. }
            | Self::Cancelled { timeline_id, .. } => *timeline_id,
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Settled { .. })
    }
}

/// Queue collecting events during update cycles.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<TimelineEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: TimelineEvent) {
        self.events.push_back(event);
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn pop(&mut self) -> Option<TimelineEvent> {
        self.events.pop_front()
    }

    /// Drain all events in the order they were pushed.
    pub fn drain(&mut self) -> impl Iterator<Item = TimelineEvent> + '_ {
        self.events.drain(..)
    }

    pub fn events_for(&self, timeline_id: TimelineId) -> Vec<&TimelineEvent> {
        self.events
            .iter()
            .filter(|e| e.timeline_id() == timeline_id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_is_fifo() {
        let a = TimelineId(1);
        let b = TimelineId(2);
        let mut queue = EventQueue::new();
        queue.push(TimelineEvent::Started { timeline_id: a, name: "a".into() });
        queue.push(TimelineEvent::Started { timeline_id: b, name: "b".into() });
        queue.push(TimelineEvent::Settled { timeline_id: a, name: "a".into() });

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.events_for(a).len(), 2);
        assert_eq!(queue.pop().map(|e| e.timeline_id()), Some(a));

        let rest: Vec<_> = queue.drain().collect();
        assert_eq!(rest.len(), 2);
        assert!(rest[1].is_settled());
        assert!(queue.is_empty());
    }
}
