//! Page geometry: layout rects and the scrolled viewport.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in document pixels (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn area(&self) -> f32 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }

    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        (right >= x && bottom >= y).then(|| Rect::new(x, y, right - x, bottom - y))
    }

    /// Grow (or with a negative margin, shrink) on every side.
    pub fn inflate(&self, margin: f32) -> Rect {
        Rect::new(
            self.x - margin,
            self.y - margin,
            (self.width + 2.0 * margin).max(0.0),
            (self.height + 2.0 * margin).max(0.0),
        )
    }
}

/// The window onto the document: its size plus the rendered scroll offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub scroll_y: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            scroll_y: 0.0,
        }
    }

    /// Visible region in document coordinates.
    pub fn visible_rect(&self) -> Rect {
        Rect::new(0.0, self.scroll_y, self.width, self.height)
    }

    /// Largest scroll offset for a document of the given height.
    pub fn scroll_limit(&self, content_height: f32) -> f32 {
        (content_height - self.height).max(0.0)
    }

    /// Fraction of `rect` inside the viewport (grown by `margin`).
    ///
    /// Fixed elements are positioned relative to the viewport, not the
    /// document. A zero-area rect counts as fully visible while it touches
    /// the viewport.
    pub fn intersection_ratio(&self, rect: &Rect, fixed: bool, margin: f32) -> f32 {
        let root = if fixed {
            Rect::new(0.0, 0.0, self.width, self.height)
        } else {
            self.visible_rect()
        }
        .inflate(margin);

        let Some(overlap) = rect.intersection(&root) else {
            return 0.0;
        };
        let area = rect.area();
        if area <= 0.0 {
            return 1.0;
        }
        (overlap.area() / area).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersection_ratio_partial() {
        let mut viewport = Viewport::new(1000.0, 800.0);
        let rect = Rect::new(0.0, 700.0, 1000.0, 1000.0);
        assert!((viewport.intersection_ratio(&rect, false, 0.0) - 0.1).abs() < 1e-6);

        viewport.scroll_y = 300.0;
        assert!((viewport.intersection_ratio(&rect, false, 0.0) - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_intersection_ratio_outside() {
        let viewport = Viewport::new(1000.0, 800.0);
        let rect = Rect::new(0.0, 900.0, 1000.0, 100.0);
        assert_eq!(viewport.intersection_ratio(&rect, false, 0.0), 0.0);
        // A margin pulls it in.
        assert!(viewport.intersection_ratio(&rect, false, 150.0) > 0.0);
    }

    #[test]
    fn test_fixed_elements_ignore_scroll() {
        let mut viewport = Viewport::new(1000.0, 800.0);
        viewport.scroll_y = 5000.0;
        let navbar = Rect::new(0.0, 0.0, 1000.0, 80.0);
        assert_eq!(viewport.intersection_ratio(&navbar, true, 0.0), 1.0);
        assert_eq!(viewport.intersection_ratio(&navbar, false, 0.0), 0.0);
    }

    #[test]
    fn test_zero_area_rect() {
        let viewport = Viewport::new(1000.0, 800.0);
        let line = Rect::new(0.0, 100.0, 1000.0, 0.0);
        assert_eq!(viewport.intersection_ratio(&line, false, 0.0), 1.0);
    }

    #[test]
    fn test_scroll_limit() {
        let viewport = Viewport::new(1000.0, 800.0);
        assert_eq!(viewport.scroll_limit(5000.0), 4200.0);
        assert_eq!(viewport.scroll_limit(500.0), 0.0);
    }
}
