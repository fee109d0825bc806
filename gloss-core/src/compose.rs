//! Highlight compositor
//!
//! Re-applies saved highlights over a paragraph on every draw. Placement is
//! order-dependent and first-occurrence-only: each highlight lands in the
//! first plain segment that still contains its text, and nowhere else.

use crate::model::{Highlight, HighlightColor, Span};

/// A run of paragraph text, either plain or carrying its highlight
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment<'a> {
    Plain(&'a str),
    Marked {
        text: &'a str,
        highlight: &'a Highlight,
    },
}

impl<'a> Segment<'a> {
    pub fn text(&self) -> &'a str {
        match *self {
            Segment::Plain(text) => text,
            Segment::Marked { text, .. } => text,
        }
    }

    pub fn highlight(&self) -> Option<&'a Highlight> {
        match *self {
            Segment::Plain(_) => None,
            Segment::Marked { highlight, .. } => Some(highlight),
        }
    }

    pub fn color(&self) -> Option<HighlightColor> {
        self.highlight().map(|h| h.color)
    }

    pub fn note(&self) -> Option<&'a str> {
        self.highlight().and_then(|h| h.note.as_deref())
    }

    pub fn is_marked(&self) -> bool {
        matches!(self, Segment::Marked { .. })
    }

    pub fn char_len(&self) -> usize {
        self.text().chars().count()
    }
}

/// Split `paragraph` into plain and marked segments.
///
/// `highlights` is the full list; ones whose text does not occur in a still
/// plain part of this paragraph are dropped for this call.
pub fn compose<'a>(paragraph: &'a str, highlights: &'a [Highlight]) -> Vec<Segment<'a>> {
    let mut segments = vec![Segment::Plain(paragraph)];

    for highlight in highlights {
        let needle = highlight.text.as_str();
        if needle.is_empty() {
            continue;
        }

        let hit = segments.iter().enumerate().find_map(|(i, seg)| match seg {
            Segment::Plain(text) => text.find(needle).map(|pos| (i, *text, pos)),
            Segment::Marked { .. } => None,
        });
        let Some((index, text, pos)) = hit else {
            continue;
        };

        let end = pos + needle.len();
        let pieces = [
            Segment::Plain(&text[..pos]),
            Segment::Marked {
                text: &text[pos..end],
                highlight,
            },
            Segment::Plain(&text[end..]),
        ];
        segments.splice(
            index..=index,
            pieces.into_iter().filter(|s| !s.text().is_empty()),
        );
    }

    segments
}

/// Find the segment covering a paragraph-local char offset
pub fn segment_at<'s, 'a>(segments: &'s [Segment<'a>], offset: usize) -> Option<&'s Segment<'a>> {
    let mut start = 0;
    for segment in segments {
        let end = start + segment.char_len();
        if offset >= start && offset < end {
            return Some(segment);
        }
        start = end;
    }
    None
}

/// Char spans of the marked segments, in paragraph order
pub fn marked_spans<'a>(segments: &[Segment<'a>]) -> Vec<(Span, &'a Highlight)> {
    let mut spans = Vec::new();
    let mut start = 0;
    for segment in segments {
        let end = start + segment.char_len();
        if let Some(highlight) = segment.highlight() {
            spans.push((Span::new(start, end), highlight));
        }
        start = end;
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hl(text: &str, color: HighlightColor) -> Highlight {
        Highlight::new(text, color)
    }

    fn shape(segments: &[Segment]) -> Vec<(bool, String)> {
        segments
            .iter()
            .map(|s| (s.is_marked(), s.text().to_string()))
            .collect()
    }

    #[test]
    fn test_compose_single() {
        let highlights = vec![hl("cat", HighlightColor::Yellow)];
        let segments = compose("The cat sat.", &highlights);

        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0], Segment::Plain("The "));
        assert_eq!(segments[1].text(), "cat");
        assert_eq!(segments[1].color(), Some(HighlightColor::Yellow));
        assert_eq!(segments[2], Segment::Plain(" sat."));
    }

    #[test]
    fn test_compose_first_occurrence_only() {
        let highlights = vec![hl("cat", HighlightColor::Yellow)];
        let segments = compose("cat cat", &highlights);

        assert_eq!(
            shape(&segments),
            vec![(true, "cat".to_string()), (false, " cat".to_string())]
        );
    }

    #[test]
    fn test_compose_without_highlights() {
        assert_eq!(compose("anything at all", &[]), vec![Segment::Plain("anything at all")]);
        assert_eq!(compose("", &[]), vec![Segment::Plain("")]);
    }

    #[test]
    fn test_duplicate_highlight_takes_next_occurrence() {
        // The second "cat" can only land in text left plain by the first
        let highlights = vec![
            hl("cat", HighlightColor::Yellow),
            hl("cat", HighlightColor::Green),
        ];
        let segments = compose("cat and cat", &highlights);

        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].color(), Some(HighlightColor::Yellow));
        assert_eq!(segments[1], Segment::Plain(" and "));
        assert_eq!(segments[2].color(), Some(HighlightColor::Green));
    }

    #[test]
    fn test_order_dependent_placement() {
        // "brown fox" claims the text first, so "fox" finds no plain home
        let highlights = vec![
            hl("brown fox", HighlightColor::Blue),
            hl("fox", HighlightColor::Pink),
        ];
        let segments = compose("the brown fox", &highlights);
        assert_eq!(
            shape(&segments),
            vec![(false, "the ".to_string()), (true, "brown fox".to_string())]
        );

        // Reversed, "fox" wins and "brown fox" is dropped
        let reversed: Vec<_> = highlights.iter().rev().cloned().collect();
        let segments = compose("the brown fox", &reversed);
        assert_eq!(
            shape(&segments),
            vec![(false, "the brown ".to_string()), (true, "fox".to_string())]
        );
    }

    #[test]
    fn test_later_highlight_fills_remaining_plain_text() {
        let highlights = vec![hl("middle", HighlightColor::Yellow), hl("b", HighlightColor::Blue)];
        let segments = compose("a middle b", &highlights);
        assert_eq!(
            shape(&segments),
            vec![
                (false, "a ".to_string()),
                (true, "middle".to_string()),
                (false, " ".to_string()),
                (true, "b".to_string()),
            ]
        );
    }

    #[test]
    fn test_unmatched_and_empty_highlights_are_dropped() {
        let highlights = vec![hl("dog", HighlightColor::Yellow), hl("", HighlightColor::Green)];
        assert_eq!(compose("The cat sat.", &highlights), vec![Segment::Plain("The cat sat.")]);
    }

    #[test]
    fn test_whole_paragraph_highlight() {
        let highlights = vec![hl("all of it", HighlightColor::Purple).with_note("n")];
        let segments = compose("all of it", &highlights);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].note(), Some("n"));
    }

    #[test]
    fn test_compose_is_idempotent() {
        let highlights = vec![
            hl("quick", HighlightColor::Yellow),
            hl("fox", HighlightColor::Green),
        ];
        let text = "The quick brown fox jumps over the quick dog";
        assert_eq!(compose(text, &highlights), compose(text, &highlights));
    }

    #[test]
    fn test_segment_lookup_by_char_offset() {
        let highlights = vec![hl("café", HighlightColor::Yellow)];
        let segments = compose("le café noir", &highlights);

        assert_eq!(segment_at(&segments, 2).map(|s| s.text()), Some("le "));
        assert_eq!(segment_at(&segments, 3).map(|s| s.text()), Some("café"));
        assert_eq!(segment_at(&segments, 6).map(|s| s.text()), Some("café"));
        assert_eq!(segment_at(&segments, 7).map(|s| s.text()), Some(" noir"));
        assert!(segment_at(&segments, 12).is_none());

        let spans = marked_spans(&segments);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].0, Span::new(3, 7));
    }
}
