use serde::{Deserialize, Serialize};

/// A point in viewport coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned box in viewport coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Horizontal midpoint of the top edge
    pub fn top_center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top)
    }
}

/// A normalized user selection, handed to the host once per gesture
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelectionEvent {
    pub text: String,
    pub anchor: Point,
}

/// Normalize a drag selection.
///
/// The anchor sits at the top-center of the selection box, where the host
/// places its follow-up affordance.
pub fn capture(raw_selection: &str, bounding_box: Rect) -> Option<SelectionEvent> {
    let text = raw_selection.trim();
    if text.is_empty() {
        return None;
    }

    Some(SelectionEvent {
        text: text.to_string(),
        anchor: bounding_box.top_center(),
    })
}
