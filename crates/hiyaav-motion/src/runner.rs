//! Frame-driven interpreter for entrance timelines.
//!
//! The `TimelineRunner` owns every timeline on the page. Sections add and
//! prime their timelines on mount, triggers call [`TimelineRunner::play`],
//! and the frame loop calls [`TimelineRunner::update`] once per frame.
//!
//! ```ignore
//! let id = runner.add(EntranceTimeline::new("about").step(...));
//! runner.prime(id, &mut document);
//! // later, from a trigger or a visibility callback
//! runner.play(id, &mut document);
//! // every frame
//! runner.update(16.67, &mut document);
//! for event in runner.drain_events() { ... }
//! ```

use std::collections::BTreeMap;

use super::events::{EventQueue, TimelineEvent};
use super::timeline::{AnimationHost, EntranceTimeline, TimelineState};
use super::types::TimelineId;

/// Owner of all entrance timelines, keyed by id.
///
/// Timelines are updated in id order so event order is deterministic.
#[derive(Debug, Default)]
pub struct TimelineRunner {
    timelines: BTreeMap<TimelineId, EntranceTimeline>,
    event_queue: EventQueue,
}

impl TimelineRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a timeline. It stays `Built` until primed.
    pub fn add(&mut self, timeline: EntranceTimeline) -> TimelineId {
        let id = timeline.id;
        self.timelines.insert(id, timeline);
        id
    }

    /// Put a timeline's targets into their starting look.
    pub fn prime(&mut self, id: TimelineId, host: &mut dyn AnimationHost) -> bool {
        let Some(timeline) = self.timelines.get_mut(&id) else {
            return false;
        };
        if !timeline.prime(host) {
            return false;
        }
        self.event_queue.push(TimelineEvent::Primed {
            timeline_id: id,
            name: timeline.name.clone(),
        });
        true
    }

    /// Start a timeline. A timeline plays at most once: any further call
    /// returns `false` and changes nothing.
    pub fn play(&mut self, id: TimelineId, host: &dyn AnimationHost) -> bool {
        let Some(timeline) = self.timelines.get_mut(&id) else {
            return false;
        };
        let Some(skipped) = timeline.play(host) else {
            tracing::trace!(timeline = %timeline.name, "play ignored, already triggered");
            return false;
        };

        tracing::debug!(timeline = %timeline.name, id = %id, "timeline started");
        self.event_queue.push(TimelineEvent::Started {
            timeline_id: id,
            name: timeline.name.clone(),
        });
        for miss in skipped {
            tracing::trace!(timeline = %timeline.name, node = %miss.node, "skipping absent target");
            self.event_queue.push(TimelineEvent::StepSkipped {
                timeline_id: id,
                step: miss.step,
                node: miss.node,
            });
        }
        if timeline.state() == TimelineState::Settled {
            self.event_queue.push(TimelineEvent::Settled {
                timeline_id: id,
                name: timeline.name.clone(),
            });
        }
        true
    }

    /// Advance every playing timeline by `delta_ms`.
    pub fn update(&mut self, delta_ms: f32, host: &mut dyn AnimationHost) {
        for (id, timeline) in self.timelines.iter_mut() {
            if timeline.state() != TimelineState::Playing {
                continue;
            }
            if !timeline.update(delta_ms, host) && timeline.state() == TimelineState::Settled {
                tracing::debug!(timeline = %timeline.name, "timeline settled");
                self.event_queue.push(TimelineEvent::Settled {
                    timeline_id: *id,
                    name: timeline.name.clone(),
                });
            }
        }
    }

    /// Stop a timeline so no later frame touches its targets.
    pub fn cancel(&mut self, id: TimelineId) -> bool {
        let Some(timeline) = self.timelines.get_mut(&id) else {
            return false;
        };
        if !timeline.cancel() {
            return false;
        }
        self.event_queue.push(TimelineEvent::Cancelled {
            timeline_id: id,
            name: timeline.name.clone(),
        });
        true
    }

    /// Cancel (if needed) and forget a timeline.
    pub fn remove(&mut self, id: TimelineId) -> Option<EntranceTimeline> {
        self.cancel(id);
        self.timelines.remove(&id)
    }

    pub fn get(&self, id: TimelineId) -> Option<&EntranceTimeline> {
        self.timelines.get(&id)
    }

    pub fn state(&self, id: TimelineId) -> Option<TimelineState> {
        self.timelines.get(&id).map(|t| t.state())
    }

    pub fn has_active(&self) -> bool {
        self.timelines
            .values()
            .any(|t| t.state() == TimelineState::Playing)
    }

    pub fn active_count(&self) -> usize {
        self.timelines
            .values()
            .filter(|t| t.state() == TimelineState::Playing)
            .count()
    }

    pub fn len(&self) -> usize {
        self.timelines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timelines.is_empty()
    }

    pub fn drain_events(&mut self) -> impl Iterator<Item = TimelineEvent> + '_ {
        self.event_queue.drain()
    }

    /// Cancel and drop every timeline.
    pub fn clear(&mut self) {
        let ids: Vec<TimelineId> = self.timelines.keys().copied().collect();
        for id in ids {
            self.remove(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::EasingFunction;
    use crate::timeline::tests::MapHost;
    use crate::timeline::{TimelineStep, Tween};
    use crate::types::{AnimatableProperty, NodeId};

    fn simple(name: &str, node: u64) -> EntranceTimeline {
        EntranceTimeline::new(name).step(
            TimelineStep::single(NodeId(node))
                .tween(Tween::fade_in())
                .duration(100.0)
                .easing(EasingFunction::Linear),
        )
    }

    #[test]
    fn test_full_lifecycle_events() {
        let mut host = MapHost::with_nodes(&[1]);
        let mut runner = TimelineRunner::new();
        let id = runner.add(simple("about", 1));

        assert!(runner.prime(id, &mut host));
        assert!(runner.play(id, &host));
        assert!(runner.has_active());
        runner.update(60.0, &mut host);
        runner.update(60.0, &mut host);
        assert!(!runner.has_active());

        let events: Vec<_> = runner.drain_events().collect();
        assert!(matches!(events[0], TimelineEvent::Primed { .. }));
        assert!(matches!(events[1], TimelineEvent::Started { .. }));
        assert!(matches!(events[2], TimelineEvent::Settled { .. }));
        assert_eq!(events.len(), 3);
        assert_eq!(runner.state(id), Some(TimelineState::Settled));
    }

    #[test]
    fn test_second_play_produces_no_change() {
        let mut host = MapHost::with_nodes(&[1]);
        let mut runner = TimelineRunner::new();
        let id = runner.add(simple("services", 1));
        runner.prime(id, &mut host);

        assert!(runner.play(id, &host));
        runner.update(100.0, &mut host);
        let writes = host.writes;

        assert!(!runner.play(id, &host));
        runner.update(100.0, &mut host);
        assert_eq!(host.writes, writes);
        assert_eq!(host.get(1, AnimatableProperty::Opacity), 1.0);
    }

    #[test]
    fn test_cancel_mid_animation() {
        let mut host = MapHost::with_nodes(&[1]);
        let mut runner = TimelineRunner::new();
        let id = runner.add(simple("gallery", 1));
        runner.prime(id, &mut host);
        runner.play(id, &host);
        runner.update(30.0, &mut host);
        let frozen = host.get(1, AnimatableProperty::Opacity);

        assert!(runner.cancel(id));
        runner.update(100.0, &mut host);
        assert_eq!(host.get(1, AnimatableProperty::Opacity), frozen);

        let events: Vec<_> = runner.drain_events().collect();
        assert!(matches!(events.last(), Some(TimelineEvent::Cancelled { .. })));
        assert!(runner.remove(id).is_some());
        assert!(runner.is_empty());
    }

    #[test]
    fn test_skipped_targets_reported() {
        let mut host = MapHost::default();
        let mut runner = TimelineRunner::new();
        let id = runner.add(simple("contact", 7));
        runner.prime(id, &mut host);
        assert!(runner.play(id, &host));

        let events: Vec<_> = runner.drain_events().collect();
        assert!(events.iter().any(|e| matches!(
            e,
            TimelineEvent::StepSkipped { node: NodeId(7), step: 0, .. }
        )));
        assert!(events.last().is_some_and(|e| e.is_settled()));
    }

    #[test]
    fn test_unknown_ids_are_ignored() {
        let mut host = MapHost::default();
        let mut runner = TimelineRunner::new();
        let ghost = crate::types::TimelineId(u64::MAX);
        assert!(!runner.prime(ghost, &mut host));
        assert!(!runner.play(ghost, &host));
        assert!(!runner.cancel(ghost));
        assert_eq!(runner.state(ghost), None);
    }

    #[test]
    fn test_clear_cancels_everything() {
        let mut host = MapHost::with_nodes(&[1, 2]);
        let mut runner = TimelineRunner::new();
        let a = runner.add(simple("a", 1));
        let b = runner.add(simple("b", 2));
        runner.prime(a, &mut host);
        runner.prime(b, &mut host);
        runner.play(a, &host);
        runner.clear();
        assert!(runner.is_empty());
        assert_eq!(runner.active_count(), 0);
    }
}
