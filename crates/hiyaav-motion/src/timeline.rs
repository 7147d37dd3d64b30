//! One-shot entrance timelines.
//!
//! An `EntranceTimeline` is a small list of steps, each moving a set of
//! elements from a primed (hidden / offset) look to their natural look. A
//! timeline is built, primed once, played once and then settles; it never
//! replays and never runs backwards.
//!
//! ```text
//! Built --prime--> Primed --play--> Playing --update...--> Settled
//!   \                 \                 \
//!    `------------------`-----------------`--cancel--> Cancelled
//! ```
//!
//! Elements are addressed by `NodeId` and read/written through an
//! [`AnimationHost`], so a timeline never holds on to the elements it animates.

use serde::{Deserialize, Serialize};

use super::easing::EasingFunction;
use super::interpolate::Interpolate;
use super::types::{AnimatableProperty, AnimatableValue, NodeId, TimelineId};

/// Access to the element properties a timeline animates.
pub trait AnimationHost {
    /// Whether `node` still exists.
    fn contains(&self, node: NodeId) -> bool;

    /// Current value of a property, `None` if the node is gone.
    fn read(&self, node: NodeId, property: AnimatableProperty) -> Option<AnimatableValue>;

    /// Write a property. Returns `false` if the node is gone.
    fn write(&mut self, node: NodeId, property: AnimatableProperty, value: AnimatableValue)
    -> bool;
}

/// One property moving from its primed value to its settled value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tween {
    pub property: AnimatableProperty,
    pub from: AnimatableValue,
    pub to: AnimatableValue,
}

impl Tween {
    pub fn new(property: AnimatableProperty, from: f64, to: f64) -> Self {
        Self {
            property,
            from: from.into(),
            to: to.into(),
        }
    }

    /// Transparent to opaque.
    pub fn fade_in() -> Self {
        Self::new(AnimatableProperty::Opacity, 0.0, 1.0)
    }

    /// Vertical slide from `offset` pixels back to the laid-out position.
    pub fn slide_y(offset: f64) -> Self {
        Self::new(AnimatableProperty::TranslateY, offset, 0.0)
    }

    /// Horizontal slide from `offset` pixels back to the laid-out position.
    pub fn slide_x(offset: f64) -> Self {
        Self::new(AnimatableProperty::TranslateX, offset, 0.0)
    }

    pub fn scale_from(scale: f64) -> Self {
        Self::new(AnimatableProperty::Scale, scale, 1.0)
    }

    pub fn grow_width(from: f64, to: f64) -> Self {
        Self::new(AnimatableProperty::Width, from, to)
    }
}

/// Where a step sits on the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepPosition {
    /// At the start of the timeline (plus the step's own delay).
    Start,
    /// Relative to the end of the previous step; negative offsets overlap.
    AfterPrevious { offset_ms: f32 },
}

impl Default for StepPosition {
    fn default() -> Self {
        Self::Start
    }
}

/// A group of sibling elements sharing the same tweens and timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineStep {
    pub targets: Vec<NodeId>,
    pub tweens: Vec<Tween>,
    pub duration_ms: f32,
    pub delay_ms: f32,
    /// Added to the delay of each successive sibling.
    pub stagger_ms: f32,
    pub easing: EasingFunction,
    pub position: StepPosition,
}

impl TimelineStep {
    pub fn new(targets: impl IntoIterator<Item = NodeId>) -> Self {
        Self {
            targets: targets.into_iter().collect(),
            tweens: Vec::new(),
            duration_ms: 800.0,
            delay_ms: 0.0,
            stagger_ms: 0.0,
            easing: EasingFunction::Power3Out,
            position: StepPosition::Start,
        }
    }

    pub fn single(target: NodeId) -> Self {
        Self::new([target])
    }

    pub fn tween(mut self, tween: Tween) -> Self {
        self.tweens.push(tween);
        self
    }

    pub fn duration(mut self, duration_ms: f32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn delay(mut self, delay_ms: f32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn stagger(mut self, stagger_ms: f32) -> Self {
        self.stagger_ms = stagger_ms;
        self
    }

    pub fn easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    pub fn after_previous(mut self, offset_ms: f32) -> Self {
        self.position = StepPosition::AfterPrevious { offset_ms };
        self
    }

    /// Time from the step's start until its last sibling settles.
    fn span_ms(&self, sibling_count: usize) -> f32 {
        let staggered = self.stagger_ms * sibling_count.saturating_sub(1) as f32;
        self.delay_ms + staggered + self.duration_ms
    }
}

/// Lifecycle of a timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineState {
    Built,
    Primed,
    Playing,
    Settled,
    Cancelled,
}

impl TimelineState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Settled | Self::Cancelled)
    }
}

/// A step (or one of its targets) that had nothing to animate at play time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkippedTarget {
    pub step: usize,
    pub node: NodeId,
}

#[derive(Debug, Clone)]
struct ActiveTween {
    node: NodeId,
    property: AnimatableProperty,
    from: AnimatableValue,
    to: AnimatableValue,
    start_ms: f32,
    duration_ms: f32,
    easing: EasingFunction,
    done: bool,
}

impl ActiveTween {
    fn value_at(&self, elapsed_ms: f32) -> Option<(AnimatableValue, bool)> {
        let local = elapsed_ms - self.start_ms;
        if local < 0.0 {
            return None;
        }
        let progress = if self.duration_ms > 0.0 {
            (local / self.duration_ms).clamp(0.0, 1.0)
        } else {
            1.0
        };
        if progress >= 1.0 {
            return Some((self.to.clone(), true));
        }
        let eased = self.easing.evaluate(progress);
        Some((self.from.interpolate(&self.to, eased), false))
    }
}

/// A one-shot entrance animation scoped to a single section.
#[derive(Debug, Clone)]
pub struct EntranceTimeline {
    pub id: TimelineId,
    pub name: String,
    steps: Vec<TimelineStep>,
    state: TimelineState,
    elapsed_ms: f32,
    tweens: Vec<ActiveTween>,
}

impl EntranceTimeline {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: TimelineId::new(),
            name: name.into(),
            steps: Vec::new(),
            state: TimelineState::Built,
            elapsed_ms: 0.0,
            tweens: Vec::new(),
        }
    }

    pub fn step(mut self, step: TimelineStep) -> Self {
        self.steps.push(step);
        self
    }

    pub fn steps(&self) -> &[TimelineStep] {
        &self.steps
    }

    pub fn state(&self) -> TimelineState {
        self.state
    }

    /// Every node any step refers to, in step order.
    pub fn targets(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.steps.iter().flat_map(|s| s.targets.iter().copied())
    }

    /// Total length of the timeline assuming every target is present.
    pub fn total_duration_ms(&self) -> f32 {
        let mut end = 0.0f32;
        let mut prev_end = 0.0f32;
        for step in &self.steps {
            let start = step_start(step.position, prev_end);
            prev_end = start + step.span_ms(step.targets.len());
            end = end.max(prev_end);
        }
        end
    }

    /// Put every target into its hidden / offset starting look.
    ///
    /// Returns `false` once the timeline has been played or cancelled.
    pub fn prime(&mut self, host: &mut dyn AnimationHost) -> bool {
        if !matches!(self.state, TimelineState::Built | TimelineState::Primed) {
            return false;
        }
        for step in &self.steps {
            for &node in &step.targets {
                for tween in &step.tweens {
                    host.write(node, tween.property, tween.from.clone());
                }
            }
        }
        self.state = TimelineState::Primed;
        true
    }

    /// Start playback. Each element animates from its current value to the
    /// tween's settled value.
    ///
    /// Returns `None` if the timeline already played or was cancelled.
    /// Otherwise returns the targets that were absent and therefore skipped.
    pub fn play(&mut self, host: &dyn AnimationHost) -> Option<Vec<SkippedTarget>> {
        if !matches!(self.state, TimelineState::Built | TimelineState::Primed) {
            return None;
        }

        let mut skipped = Vec::new();
        let mut prev_end = 0.0f32;
        for (index, step) in self.steps.iter().enumerate() {
            let present: Vec<NodeId> = step
                .targets
                .iter()
                .copied()
                .filter(|&node| {
                    let ok = host.contains(node);
                    if !ok {
                        skipped.push(SkippedTarget { step: index, node });
                    }
                    ok
                })
                .collect();

            let start = step_start(step.position, prev_end);
            prev_end = start + step.span_ms(present.len());

            for (sibling, node) in present.into_iter().enumerate() {
                let sibling_start = start + step.delay_ms + step.stagger_ms * sibling as f32;
                for tween in &step.tweens {
                    let from = host
                        .read(node, tween.property)
                        .unwrap_or_else(|| tween.from.clone());
                    self.tweens.push(ActiveTween {
                        node,
                        property: tween.property,
                        from,
                        to: tween.to.clone(),
                        start_ms: sibling_start,
                        duration_ms: step.duration_ms,
                        easing: step.easing,
                        done: false,
                    });
                }
            }
        }

        self.elapsed_ms = 0.0;
        self.state = if self.tweens.is_empty() {
            TimelineState::Settled
        } else {
            TimelineState::Playing
        };
        Some(skipped)
    }

    /// Advance playback and write the new values to the host.
    ///
    /// Returns `true` while the timeline is still playing. Tweens whose node
    /// disappeared mid-flight are dropped silently.
    pub fn update(&mut self, delta_ms: f32, host: &mut dyn AnimationHost) -> bool {
        if self.state != TimelineState::Playing {
            return false;
        }
        self.elapsed_ms += delta_ms;

        for tween in self.tweens.iter_mut().filter(|t| !t.done) {
            let Some((value, finished)) = tween.value_at(self.elapsed_ms) else {
                continue;
            };
            if !host.write(tween.node, tween.property, value) {
                tracing::trace!(node = %tween.node, "timeline target vanished mid-flight");
                tween.done = true;
                continue;
            }
            tween.done = finished;
        }

        if self.tweens.iter().all(|t| t.done) {
            self.tweens.clear();
            self.state = TimelineState::Settled;
            false
        } else {
            true
        }
    }

    /// Stop the timeline for good. Returns `true` if it was not already
    /// settled or cancelled.
    pub fn cancel(&mut self) -> bool {
        if self.state.is_terminal() {
            return false;
        }
        self.tweens.clear();
        self.state = TimelineState::Cancelled;
        true
    }
}

fn step_start(position: StepPosition, prev_end: f32) -> f32 {
    match position {
        StepPosition::Start => 0.0,
        StepPosition::AfterPrevious { offset_ms } => (prev_end + offset_ms).max(0.0),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Minimal host backed by a map of property values.
    #[derive(Default)]
    pub(crate) struct MapHost {
        pub nodes: HashMap<NodeId, HashMap<AnimatableProperty, AnimatableValue>>,
        pub writes: usize,
    }

    impl MapHost {
        pub fn with_nodes(ids: &[u64]) -> Self {
            let mut host = Self::default();
            for &id in ids {
                let mut props = HashMap::new();
                props.insert(AnimatableProperty::Opacity, 1.0.into());
                props.insert(AnimatableProperty::TranslateY, 0.0.into());
                host.nodes.insert(NodeId(id), props);
            }
            host
        }

        pub fn get(&self, id: u64, property: AnimatableProperty) -> f64 {
            self.nodes[&NodeId(id)][&property].as_f64().unwrap()
        }
    }

    impl AnimationHost for MapHost {
        fn contains(&self, node: NodeId) -> bool {
            self.nodes.contains_key(&node)
        }

        fn read(&self, node: NodeId, property: AnimatableProperty) -> Option<AnimatableValue> {
            self.nodes.get(&node)?.get(&property).cloned()
        }

        fn write(
            &mut self,
            node: NodeId,
            property: AnimatableProperty,
            value: AnimatableValue,
        ) -> bool {
            match self.nodes.get_mut(&node) {
                Some(props) => {
                    props.insert(property, value);
                    self.writes += 1;
                    true
                }
                None => false,
            }
        }
    }

    fn fade_up(targets: &[u64]) -> TimelineStep {
        TimelineStep::new(targets.iter().map(|&id| NodeId(id)))
            .tween(Tween::fade_in())
            .tween(Tween::slide_y(40.0))
            .easing(EasingFunction::Linear)
    }

    #[test]
    fn test_prime_hides_targets() {
        let mut host = MapHost::with_nodes(&[1, 2]);
        let mut timeline = EntranceTimeline::new("cards").step(fade_up(&[1, 2]));

        assert!(timeline.prime(&mut host));
        assert_eq!(timeline.state(), TimelineState::Primed);
        assert_eq!(host.get(1, AnimatableProperty::Opacity), 0.0);
        assert_eq!(host.get(2, AnimatableProperty::TranslateY), 40.0);
    }

    #[test]
    fn test_play_runs_to_settled() {
        let mut host = MapHost::with_nodes(&[1]);
        let mut timeline =
            EntranceTimeline::new("text").step(fade_up(&[1]).duration(100.0));
        timeline.prime(&mut host);
        assert_eq!(timeline.play(&host), Some(vec![]));

        assert!(timeline.update(50.0, &mut host));
        assert!((host.get(1, AnimatableProperty::Opacity) - 0.5).abs() < 1e-6);
        assert!((host.get(1, AnimatableProperty::TranslateY) - 20.0).abs() < 1e-6);

        assert!(!timeline.update(50.0, &mut host));
        assert_eq!(timeline.state(), TimelineState::Settled);
        assert_eq!(host.get(1, AnimatableProperty::Opacity), 1.0);
        assert_eq!(host.get(1, AnimatableProperty::TranslateY), 0.0);
    }

    #[test]
    fn test_play_twice_is_noop() {
        let mut host = MapHost::with_nodes(&[1]);
        let mut timeline = EntranceTimeline::new("once").step(fade_up(&[1]).duration(10.0));
        timeline.prime(&mut host);
        assert!(timeline.play(&host).is_some());
        assert!(timeline.play(&host).is_none());

        timeline.update(10.0, &mut host);
        let writes = host.writes;
        assert!(timeline.play(&host).is_none());
        assert!(!timeline.update(10.0, &mut host));
        assert_eq!(host.writes, writes);
        assert!(!timeline.prime(&mut host));
    }

    #[test]
    fn test_stagger_and_delay_offsets_siblings() {
        let mut host = MapHost::with_nodes(&[1, 2, 3]);
        let mut timeline = EntranceTimeline::new("stats")
            .step(fade_up(&[1, 2, 3]).duration(100.0).delay(50.0).stagger(100.0));
        timeline.prime(&mut host);
        timeline.play(&host);

        // t = 100: first sibling halfway, the others still primed.
        timeline.update(100.0, &mut host);
        assert!((host.get(1, AnimatableProperty::Opacity) - 0.5).abs() < 1e-6);
        assert_eq!(host.get(2, AnimatableProperty::Opacity), 0.0);
        assert_eq!(host.get(3, AnimatableProperty::Opacity), 0.0);

        // t = 200: second sibling halfway.
        timeline.update(100.0, &mut host);
        assert_eq!(host.get(1, AnimatableProperty::Opacity), 1.0);
        assert!((host.get(2, AnimatableProperty::Opacity) - 0.5).abs() < 1e-6);

        assert_eq!(timeline.total_duration_ms(), 50.0 + 200.0 + 100.0);
    }

    #[test]
    fn test_after_previous_overlap() {
        let timeline = EntranceTimeline::new("hero")
            .step(fade_up(&[1, 2, 3]).duration(1000.0).stagger(200.0))
            .step(
                TimelineStep::single(NodeId(4))
                    .tween(Tween::scale_from(0.8))
                    .duration(1000.0)
                    .after_previous(-500.0),
            );
        // text group ends at 1400, image starts at 900 and ends at 1900
        assert_eq!(timeline.total_duration_ms(), 1900.0);
    }

    #[test]
    fn test_missing_targets_are_skipped() {
        let mut host = MapHost::with_nodes(&[1]);
        let mut timeline = EntranceTimeline::new("partial")
            .step(fade_up(&[1, 9]).duration(10.0))
            .step(fade_up(&[8]).duration(10.0));
        timeline.prime(&mut host);

        let skipped = timeline.play(&host).unwrap();
        assert_eq!(
            skipped,
            vec![
                SkippedTarget { step: 0, node: NodeId(9) },
                SkippedTarget { step: 1, node: NodeId(8) },
            ]
        );
        assert!(!timeline.update(10.0, &mut host));
        assert_eq!(timeline.state(), TimelineState::Settled);
        assert_eq!(host.get(1, AnimatableProperty::Opacity), 1.0);
    }

    #[test]
    fn test_all_targets_missing_settles_immediately() {
        let host = MapHost::default();
        let mut timeline = EntranceTimeline::new("ghost").step(fade_up(&[5]));
        assert_eq!(timeline.play(&host).map(|s| s.len()), Some(1));
        assert_eq!(timeline.state(), TimelineState::Settled);
    }

    #[test]
    fn test_target_removed_mid_flight() {
        let mut host = MapHost::with_nodes(&[1, 2]);
        let mut timeline = EntranceTimeline::new("cards").step(fade_up(&[1, 2]).duration(100.0));
        timeline.prime(&mut host);
        timeline.play(&host);
        timeline.update(30.0, &mut host);

        host.nodes.remove(&NodeId(2));
        timeline.update(30.0, &mut host);
        assert!(!timeline.update(100.0, &mut host));
        assert_eq!(host.get(1, AnimatableProperty::Opacity), 1.0);
    }

    #[test]
    fn test_cancel_freezes_elements() {
        let mut host = MapHost::with_nodes(&[1]);
        let mut timeline = EntranceTimeline::new("about").step(fade_up(&[1]).duration(100.0));
        timeline.prime(&mut host);
        timeline.play(&host);
        timeline.update(40.0, &mut host);

        assert!(timeline.cancel());
        let writes = host.writes;
        assert!(!timeline.update(40.0, &mut host));
        assert_eq!(host.writes, writes);
        assert!(!timeline.cancel());
        assert!(timeline.play(&host).is_none());
    }
}
