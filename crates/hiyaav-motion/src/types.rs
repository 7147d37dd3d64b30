//! Identifiers and property values shared by timelines and transitions.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// An element in the host document. Motion code never owns elements, it
/// only names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

static NEXT_TIMELINE: AtomicU64 = AtomicU64::new(1);

/// Handle of an entrance timeline. Fresh ids are never reused within a
/// process, so a remounted section cannot collide with its old timelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimelineId(pub u64);

impl TimelineId {
    pub fn new() -> Self {
        Self(NEXT_TIMELINE.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for TimelineId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TimelineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timeline-{}", self.0)
    }
}

/// Element properties a timeline or transition may drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimatableProperty {
    Opacity,
    /// Pixels from the laid-out x.
    TranslateX,
    /// Pixels from the laid-out y.
    TranslateY,
    Scale,
    Width,
    Height,
    /// Linear RGBA fill.
    BackgroundColor,
}

/// Either a scalar or an RGBA color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnimatableValue {
    F64 { value: f64 },
    Color { rgba: [f32; 4] },
}

impl AnimatableValue {
    pub fn as_f64(&self) -> Option<f64> {
        if let Self::F64 { value } = self { Some(*value) } else { None }
    }

    pub fn as_color(&self) -> Option<[f32; 4]> {
        if let Self::Color { rgba } = self { Some(*rgba) } else { None }
    }
}

impl From<f64> for AnimatableValue {
    fn from(value: f64) -> Self {
        Self::F64 { value }
    }
}

impl From<[f32; 4]> for AnimatableValue {
    fn from(rgba: [f32; 4]) -> Self {
        Self::Color { rgba }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_timeline_ids_increase() {
        let first = TimelineId::new();
        let second = TimelineId::new();
        assert!(second > first);
        assert_eq!(TimelineId(7).to_string(), "timeline-7");
    }

    #[test]
    fn scalar_is_not_a_color() {
        let opacity = AnimatableValue::from(0.25);
        assert_eq!(opacity.as_f64(), Some(0.25));
        assert_eq!(opacity.as_color(), None);
        assert_eq!(AnimatableValue::from([0.1, 0.2, 0.3, 1.0]).as_f64(), None);
    }

    #[test]
    fn values_serialize_tagged() {
        let json = serde_json::to_string(&AnimatableValue::from(1.0)).unwrap();
        assert_eq!(json, r#"{"type":"f64","value":1.0}"#);
        assert_eq!(NodeId(12).to_string(), "#12");
    }
}
