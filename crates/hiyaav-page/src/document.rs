//! In-memory page document.
//!
//! The `Document` owns every element on the page. Everything else (reveal
//! registry, timelines, triggers) refers to elements by `NodeId` only, so
//! removing an element is all it takes to make later lookups miss.

use std::collections::{BTreeMap, BTreeSet};

use hiyaav_motion::{AnimatableProperty, AnimatableValue, AnimationHost, NodeId};
use serde::Serialize;

use crate::color::LinPremul;
use crate::geometry::Rect;
use crate::sections::SectionKind;

/// Class marking elements watched by the reveal registry.
pub const REVEAL_CLASS: &str = "reveal";
/// Class added once a revealed element has been seen.
pub const ACTIVE_CLASS: &str = "active";

/// Animated visual state of an element, on top of its layout rect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VisualStyle {
    pub opacity: f32,
    pub translate_x: f32,
    pub translate_y: f32,
    pub scale: f32,
    /// Width override; `None` uses the layout width.
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub background: Option<LinPremul>,
}

impl Default for VisualStyle {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
            scale: 1.0,
            width: None,
            height: None,
            background: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Element {
    pub id: NodeId,
    pub name: String,
    pub section: Option<SectionKind>,
    pub classes: BTreeSet<String>,
    pub rect: Rect,
    /// Positioned against the viewport rather than the document.
    pub fixed: bool,
    pub text: Option<String>,
    pub style: VisualStyle,
}

impl Element {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// Whether a renderer would currently draw anything for this element.
    pub fn is_shown(&self) -> bool {
        self.style.opacity > 0.0
    }
}

/// Everything needed to insert an element.
#[derive(Debug, Clone, Default)]
pub struct ElementSpec {
    name: String,
    section: Option<SectionKind>,
    classes: BTreeSet<String>,
    rect: Rect,
    fixed: bool,
    text: Option<String>,
}

impl ElementSpec {
    pub fn new(name: impl Into<String>, rect: Rect) -> Self {
        Self {
            name: name.into(),
            rect,
            ..Self::default()
        }
    }

    pub fn section(mut self, section: SectionKind) -> Self {
        self.section = Some(section);
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.insert(class.into());
        self
    }

    pub fn fixed(mut self) -> Self {
        self.fixed = true;
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

#[derive(Debug, Default)]
pub struct Document {
    elements: BTreeMap<NodeId, Element>,
    next_id: u64,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, spec: ElementSpec) -> NodeId {
        self.next_id += 1;
        let id = NodeId(self.next_id);
        self.elements.insert(
            id,
            Element {
                id,
                name: spec.name,
                section: spec.section,
                classes: spec.classes,
                rect: spec.rect,
                fixed: spec.fixed,
                text: spec.text,
                style: VisualStyle::default(),
            },
        );
        id
    }

    pub fn remove(&mut self, id: NodeId) -> Option<Element> {
        self.elements.remove(&id)
    }

    pub fn get(&self, id: NodeId) -> Option<&Element> {
        self.elements.get(&id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        self.elements.get_mut(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.elements.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Add a class. Returns `true` if the element exists and lacked it.
    pub fn add_class(&mut self, id: NodeId, class: &str) -> bool {
        self.elements
            .get_mut(&id)
            .is_some_and(|el| el.classes.insert(class.to_string()))
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) -> bool {
        self.elements
            .get_mut(&id)
            .is_some_and(|el| el.classes.remove(class))
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.elements.get(&id).is_some_and(|el| el.has_class(class))
    }

    /// Elements carrying `class`, in insertion order.
    pub fn with_class<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.elements.values().filter(move |el| el.has_class(class))
    }

    /// First element with the given name.
    pub fn find(&self, name: &str) -> Option<&Element> {
        self.elements.values().find(|el| el.name == name)
    }

    pub fn in_section(&self, section: SectionKind) -> impl Iterator<Item = &Element> + '_ {
        self.elements
            .values()
            .filter(move |el| el.section == Some(section))
    }

    /// Bottom edge of the lowest in-flow element.
    pub fn content_height(&self) -> f32 {
        self.elements
            .values()
            .filter(|el| !el.fixed)
            .map(|el| el.rect.bottom())
            .fold(0.0, f32::max)
    }
}

impl AnimationHost for Document {
    fn contains(&self, node: NodeId) -> bool {
        self.elements.contains_key(&node)
    }

    fn read(&self, node: NodeId, property: AnimatableProperty) -> Option<AnimatableValue> {
        let el = self.elements.get(&node)?;
        let style = &el.style;
        let value: f32 = match property {
            AnimatableProperty::Opacity => style.opacity,
            AnimatableProperty::TranslateX => style.translate_x,
            AnimatableProperty::TranslateY => style.translate_y,
            AnimatableProperty::Scale => style.scale,
            AnimatableProperty::Width => style.width.unwrap_or(el.rect.width),
            AnimatableProperty::Height => style.height.unwrap_or(el.rect.height),
            AnimatableProperty::BackgroundColor => return style.background.map(Into::into),
        };
        Some(f64::from(value).into())
    }

    fn write(
        &mut self,
        node: NodeId,
        property: AnimatableProperty,
        value: AnimatableValue,
    ) -> bool {
        let Some(el) = self.elements.get_mut(&node) else {
            return false;
        };
        let style = &mut el.style;
        match (property, value) {
            (AnimatableProperty::BackgroundColor, AnimatableValue::Color { rgba }) => {
                style.background = Some(rgba);
            }
            (property, AnimatableValue::F64 { value }) => {
                let v = value as f32;
                match property {
                    AnimatableProperty::Opacity => style.opacity = v.clamp(0.0, 1.0),
                    AnimatableProperty::TranslateX => style.translate_x = v,
                    AnimatableProperty::TranslateY => style.translate_y = v,
                    AnimatableProperty::Scale => style.scale = v,
                    AnimatableProperty::Width => style.width = Some(v),
                    AnimatableProperty::Height => style.height = Some(v),
                    AnimatableProperty::BackgroundColor => {}
                }
            }
            (property, value) => {
                tracing::warn!(?property, ?value, "mismatched value type ignored");
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_card() -> (Document, NodeId) {
        let mut doc = Document::new();
        let id = doc.insert(
            ElementSpec::new("card", Rect::new(0.0, 100.0, 300.0, 200.0))
                .section(SectionKind::Services)
                .class(REVEAL_CLASS),
        );
        (doc, id)
    }

    #[test]
    fn test_insert_and_classes() {
        let (mut doc, id) = doc_with_card();
        assert!(doc.has_class(id, REVEAL_CLASS));
        assert!(doc.add_class(id, ACTIVE_CLASS));
        assert!(!doc.add_class(id, ACTIVE_CLASS));
        assert_eq!(doc.with_class(ACTIVE_CLASS).count(), 1);
        assert_eq!(doc.in_section(SectionKind::Services).count(), 1);
        assert_eq!(doc.find("card").map(|e| e.id), Some(id));
    }

    #[test]
    fn test_removed_elements_stop_resolving() {
        let (mut doc, id) = doc_with_card();
        assert!(doc.remove(id).is_some());
        assert!(!doc.contains(id));
        assert!(!doc.add_class(id, ACTIVE_CLASS));
        assert!(!doc.write(id, AnimatableProperty::Opacity, 1.0.into()));
        assert_eq!(doc.read(id, AnimatableProperty::Opacity), None);
    }

    #[test]
    fn test_host_read_write() {
        let (mut doc, id) = doc_with_card();
        assert_eq!(doc.read(id, AnimatableProperty::Width), Some(300.0.into()));
        assert!(doc.write(id, AnimatableProperty::Width, 120.0.into()));
        assert!(doc.write(id, AnimatableProperty::TranslateY, 40.0.into()));
        assert!(doc.write(id, AnimatableProperty::Opacity, 1.5.into()));

        let style = doc.get(id).unwrap().style;
        assert_eq!(style.width, Some(120.0));
        assert_eq!(style.translate_y, 40.0);
        assert_eq!(style.opacity, 1.0);
        assert_eq!(doc.read(id, AnimatableProperty::BackgroundColor), None);
    }

    #[test]
    fn test_content_height_ignores_fixed() {
        let (mut doc, _) = doc_with_card();
        doc.insert(ElementSpec::new("nav", Rect::new(0.0, 0.0, 300.0, 5000.0)).fixed());
        assert_eq!(doc.content_height(), 300.0);
    }
}
