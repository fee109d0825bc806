use crate::capture::Point;
use crate::compose::Segment;
use crate::model::Highlight;

/// Pointer intent over a rendered segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    HoverIn,
    HoverOut,
    Click,
}

/// Callbacks a renderer wires marked segments back to
pub trait HighlightHost {
    fn on_highlight_click(&mut self, highlight: &Highlight);

    /// Show a transient note overlay near `at`
    fn show_note(&mut self, note: &str, at: Point);

    fn hide_note(&mut self);
}

/// Route an intent on `segment` to the host.
///
/// Plain segments have no interactions. Hover never shows an absent or blank
/// note. Returns whether the host was called.
pub fn dispatch<H: HighlightHost + ?Sized>(
    segment: &Segment<'_>,
    intent: Intent,
    at: Point,
    host: &mut H,
) -> bool {
    let Some(highlight) = segment.highlight() else {
        return false;
    };

    match intent {
        Intent::Click => {
            host.on_highlight_click(highlight);
            true
        }
        Intent::HoverIn => match highlight.visible_note() {
            Some(note) => {
                host.show_note(note, at);
                true
            }
            None => false,
        },
        Intent::HoverOut => {
            if highlight.visible_note().is_none() {
                return false;
            }
            host.hide_note();
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::compose;
    use crate::model::HighlightColor;

    #[derive(Default)]
    struct Recorder {
        clicked: Vec<String>,
        shown: Option<(String, Point)>,
        hides: usize,
    }

    impl HighlightHost for Recorder {
        fn on_highlight_click(&mut self, highlight: &Highlight) {
            self.clicked.push(highlight.text.clone());
        }

        fn show_note(&mut self, note: &str, at: Point) {
            self.shown = Some((note.to_string(), at));
        }

        fn hide_note(&mut self) {
            self.shown = None;
            self.hides += 1;
        }
    }

    #[test]
    fn test_click_reports_highlight() {
        let highlights = vec![Highlight::new("cat", HighlightColor::Yellow)];
        let segments = compose("The cat sat.", &highlights);
        let mut host = Recorder::default();

        assert!(!dispatch(&segments[0], Intent::Click, Point::default(), &mut host));
        assert!(dispatch(&segments[1], Intent::Click, Point::default(), &mut host));
        assert_eq!(host.clicked, vec!["cat".to_string()]);
    }

    #[test]
    fn test_hover_shows_and_hides_note() {
        let highlights = vec![Highlight::new("cat", HighlightColor::Yellow).with_note("a pet")];
        let segments = compose("The cat sat.", &highlights);
        let mut host = Recorder::default();
        let at = Point::new(4.0, 0.0);

        dispatch(&segments[1], Intent::HoverIn, at, &mut host);
        assert_eq!(host.shown, Some(("a pet".to_string(), at)));

        dispatch(&segments[1], Intent::HoverOut, at, &mut host);
        assert_eq!(host.shown, None);
        assert_eq!(host.hides, 1);
    }

    #[test]
    fn test_hover_without_note_is_suppressed() {
        let highlights = vec![
            Highlight::new("cat", HighlightColor::Yellow),
            Highlight::new("sat", HighlightColor::Green).with_note("  "),
        ];
        let segments = compose("The cat sat.", &highlights);
        let mut host = Recorder::default();

        for segment in &segments {
            assert!(!dispatch(segment, Intent::HoverIn, Point::default(), &mut host));
            assert!(!dispatch(segment, Intent::HoverOut, Point::default(), &mut host));
        }
        assert_eq!(host.shown, None);
        assert_eq!(host.hides, 0);
    }
}
