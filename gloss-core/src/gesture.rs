use crate::capture::{capture, Point, Rect, SelectionEvent};
use crate::layout::{OffsetLocator, TextPosition};
use crate::resolve::{resolve_with, Granularity, Resolution};

/// One completed pointer gesture
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture<'a> {
    /// Press and release without a drag selection
    Click { point: Point },
    /// Release ending a drag selection
    Release {
        selection: &'a str,
        bounding_box: Rect,
    },
}

/// What a gesture turned into
#[derive(Debug, Clone, PartialEq)]
pub enum GestureOutcome {
    Resolved {
        position: TextPosition,
        resolution: Resolution,
    },
    Captured(SelectionEvent),
}

impl GestureOutcome {
    /// Selection event for the host. Resolved spans carry no anchor of their
    /// own, so the caller supplies one.
    pub fn into_event(self, anchor: Point) -> SelectionEvent {
        match self {
            GestureOutcome::Resolved { resolution, .. } => SelectionEvent {
                text: resolution.text,
                anchor,
            },
            GestureOutcome::Captured(event) => event,
        }
    }
}

/// Turn a gesture into a resolution or a capture, never both.
///
/// A release only ever captures: a blank drag selection yields nothing and
/// does not fall back to resolving.
pub fn route<L: OffsetLocator + ?Sized>(
    gesture: Gesture<'_>,
    paragraphs: &[&str],
    locator: &L,
    granularity: Granularity,
) -> Option<GestureOutcome> {
    let outcome = match gesture {
        Gesture::Release {
            selection,
            bounding_box,
        } => capture(selection, bounding_box).map(GestureOutcome::Captured),
        Gesture::Click { point } => {
            let position = locator.offset_at(point)?;
            let paragraph = paragraphs.get(position.paragraph)?;
            resolve_with(paragraph, position.offset, granularity)
                .map(|resolution| GestureOutcome::Resolved { position, resolution })
        }
    };

    tracing::debug!(?gesture, routed = outcome.is_some(), "gesture routed");
    outcome
}
