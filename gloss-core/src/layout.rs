//! Screen-to-text mapping
//!
//! Hosts own text layout. The core only needs to turn a point into a
//! paragraph-local offset, which hosts provide through [`OffsetLocator`].
//! [`TextLayout`] is the grid implementation both terminal hosts share: one
//! unwrapped row per paragraph, scrolled vertically. Chars take their
//! terminal display width, so CJK and emoji cover two cells.

use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthChar;

use crate::capture::{Point, Rect};
use crate::model::Span;

/// A paragraph index and a char offset inside that paragraph
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TextPosition {
    pub paragraph: usize,
    pub offset: usize,
}

impl TextPosition {
    pub fn new(paragraph: usize, offset: usize) -> Self {
        Self { paragraph, offset }
    }
}

/// Host capability mapping a viewport point to text
pub trait OffsetLocator {
    /// Position of the char under `point`, or `None` when it is not over text
    fn offset_at(&self, point: Point) -> Option<TextPosition>;
}

/// Display columns where each char of `line` starts, plus the line width
fn column_starts(line: &str) -> Vec<usize> {
    let mut starts = Vec::with_capacity(line.len() + 1);
    let mut column = 0;
    starts.push(column);
    for c in line.chars() {
        column += UnicodeWidthChar::width(c).unwrap_or(1);
        starts.push(column);
    }
    starts
}

/// Grid layout of unwrapped paragraphs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextLayout {
    x: u16,
    y: u16,
    width: u16,
    height: u16,
    scroll: usize,
    // Per paragraph: start column of every char, then the total width
    columns: Vec<Vec<usize>>,
}

impl TextLayout {
    pub fn new<'a>(
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        paragraphs: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self {
            x,
            y,
            width,
            height,
            scroll: 0,
            columns: paragraphs.into_iter().map(column_starts).collect(),
        }
    }

    pub fn with_scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll.min(self.max_scroll());
        self
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn max_scroll(&self) -> usize {
        self.columns.len().saturating_sub(self.height as usize)
    }

    /// Smallest scroll change that brings `paragraph` into view
    pub fn scroll_to_show(&mut self, paragraph: usize) {
        let visible = self.height.max(1) as usize;
        if paragraph < self.scroll {
            self.scroll = paragraph;
        } else if paragraph >= self.scroll + visible {
            self.scroll = paragraph + 1 - visible;
        }
    }

    pub fn scroll_by(&mut self, delta: isize) {
        let target = self.scroll as isize + delta;
        self.scroll = target.clamp(0, self.max_scroll() as isize) as usize;
    }

    fn row_of(&self, point: Point) -> Option<usize> {
        let y = point.y.floor();
        if y < self.y as f64 || y >= self.y as f64 + self.height as f64 {
            return None;
        }
        Some(y as usize - self.y as usize + self.scroll)
    }

    fn col_of(&self, point: Point) -> Option<usize> {
        let x = point.x.floor();
        if x < self.x as f64 || x >= self.x as f64 + self.width as f64 {
            return None;
        }
        Some(x as usize - self.x as usize)
    }

    /// Char whose cells cover `column`, or the char count when the column
    /// lies past the line end.
    fn char_at_column(starts: &[usize], column: usize) -> usize {
        starts.partition_point(|&start| start <= column).saturating_sub(1)
    }

    /// Display column where `position` starts
    fn column_of(&self, position: TextPosition) -> Option<usize> {
        self.columns
            .get(position.paragraph)?
            .get(position.offset)
            .copied()
    }

    /// Like [`OffsetLocator::offset_at`] but snaps to the nearest caret
    /// position, so a drag can end past a line end or below the text.
    pub fn nearest_position(&self, point: Point) -> Option<TextPosition> {
        let last = self.columns.len().checked_sub(1)?;
        let y = point.y.floor().max(self.y as f64);
        let row = (y as usize - self.y as usize + self.scroll).min(last);
        let column = point.x.floor().max(self.x as f64) as usize - self.x as usize;
        let offset = Self::char_at_column(&self.columns[row], column);
        Some(TextPosition::new(row, offset))
    }

    /// Screen cell of a position, if it is scrolled into view
    pub fn cell_of(&self, position: TextPosition) -> Option<(u16, u16)> {
        if position.paragraph < self.scroll {
            return None;
        }
        let row = position.paragraph - self.scroll;
        let column = self.column_of(position)?;
        if row >= self.height as usize || column >= self.width as usize {
            return None;
        }
        Some((self.x + column as u16, self.y + row as u16))
    }

    /// Bounding box of a span inside one paragraph, in cell units
    pub fn span_rect(&self, paragraph: usize, span: Span) -> Option<Rect> {
        let (left, top) = self.cell_of(TextPosition::new(paragraph, span.start))?;
        let start = self.column_of(TextPosition::new(paragraph, span.start))?;
        let end = self.column_of(TextPosition::new(paragraph, span.end))?;
        let visible = (self.width as usize).saturating_sub(start);
        Some(Rect::new(
            left as f64,
            top as f64,
            (end - start).min(visible) as f64,
            1.0,
        ))
    }

    /// Text between two caret positions and the box it covers on screen.
    ///
    /// Positions may be given in either order. Paragraphs are joined with
    /// `\n`.
    pub fn selection(
        &self,
        paragraphs: &[&str],
        a: TextPosition,
        b: TextPosition,
    ) -> Option<(String, Rect)> {
        let (from, to) = if a <= b { (a, b) } else { (b, a) };
        if from == to || to.paragraph >= paragraphs.len() {
            return None;
        }

        let mut text = String::new();
        let mut left = usize::MAX;
        let mut right = 0;
        for index in from.paragraph..=to.paragraph {
            let line = paragraphs[index];
            let measured;
            let starts: &[usize] = match self.columns.get(index) {
                Some(starts) => starts,
                None => {
                    measured = column_starts(line);
                    &measured
                }
            };
            let len = starts.len() - 1;
            let start = if index == from.paragraph { from.offset.min(len) } else { 0 };
            let end = if index == to.paragraph { to.offset.min(len) } else { len };

            if index > from.paragraph {
                text.push('\n');
            }
            text.push_str(Span::new(start, end).slice(line));

            left = left.min(starts[start]);
            right = right.max(starts[end]);
        }

        let first_row = from.paragraph as f64 - self.scroll as f64;
        let rows = (to.paragraph - from.paragraph + 1) as f64;
        let rect = Rect::new(
            self.x as f64 + left as f64,
            self.y as f64 + first_row,
            right.saturating_sub(left) as f64,
            rows,
        );
        Some((text, rect))
    }
}

impl OffsetLocator for TextLayout {
    fn offset_at(&self, point: Point) -> Option<TextPosition> {
        let row = self.row_of(point)?;
        let column = self.col_of(point)?;
        let starts = self.columns.get(row)?;
        let offset = Self::char_at_column(starts, column);
        (offset < starts.len() - 1).then(|| TextPosition::new(row, offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: [&str; 4] = ["The quick brown fox.", "", "Jumps over", "the lazy dog"];

    fn layout() -> TextLayout {
        TextLayout::new(2, 1, 30, 3, TEXT)
    }

    #[test]
    fn test_offset_at_maps_cells() {
        let layout = layout();

        assert_eq!(layout.offset_at(Point::new(2.0, 1.0)), Some(TextPosition::new(0, 0)));
        assert_eq!(layout.offset_at(Point::new(6.5, 1.9)), Some(TextPosition::new(0, 4)));
        assert_eq!(layout.offset_at(Point::new(3.0, 3.0)), Some(TextPosition::new(2, 1)));

        // Past the line end, on an empty line, outside the area
        assert_eq!(layout.offset_at(Point::new(25.0, 1.0)), None);
        assert_eq!(layout.offset_at(Point::new(2.0, 2.0)), None);
        assert_eq!(layout.offset_at(Point::new(1.0, 1.0)), None);
        assert_eq!(layout.offset_at(Point::new(2.0, 4.0)), None);
    }

    #[test]
    fn test_scroll_shifts_rows() {
        let layout = layout().with_scroll(1);
        assert_eq!(layout.offset_at(Point::new(2.0, 3.0)), Some(TextPosition::new(3, 0)));
        assert_eq!(layout.cell_of(TextPosition::new(3, 4)), Some((6, 3)));
        assert_eq!(layout.cell_of(TextPosition::new(0, 0)), None);

        // Clamped to the last full page
        assert_eq!(layout.clone().with_scroll(10).scroll(), 1);
    }

    #[test]
    fn test_cell_round_trip() {
        let layout = layout();
        for point in [Point::new(4.0, 1.0), Point::new(10.0, 3.0)] {
            let position = layout.offset_at(point).unwrap();
            let (x, y) = layout.cell_of(position).unwrap();
            assert_eq!(Point::new(x as f64, y as f64), point);
        }
    }

    #[test]
    fn test_scroll_to_show() {
        let mut layout = layout();
        layout.scroll_to_show(3);
        assert_eq!(layout.scroll(), 1);
        layout.scroll_to_show(0);
        assert_eq!(layout.scroll(), 0);
        layout.scroll_by(5);
        assert_eq!(layout.scroll(), 1);
        layout.scroll_by(-5);
        assert_eq!(layout.scroll(), 0);
    }

    #[test]
    fn test_nearest_position_snaps() {
        let layout = layout();
        assert_eq!(layout.nearest_position(Point::new(40.0, 1.0)), Some(TextPosition::new(0, 20)));
        assert_eq!(layout.nearest_position(Point::new(0.0, 0.0)), Some(TextPosition::new(0, 0)));
        assert_eq!(layout.nearest_position(Point::new(5.0, 50.0)), Some(TextPosition::new(3, 3)));
    }

    #[test]
    fn test_selection_single_paragraph() {
        let layout = layout();
        let (text, rect) = layout
            .selection(&TEXT, TextPosition::new(0, 9), TextPosition::new(0, 4))
            .unwrap();

        assert_eq!(text, "quick");
        assert_eq!(rect, Rect::new(6.0, 1.0, 5.0, 1.0));
        assert!(layout
            .selection(&TEXT, TextPosition::new(0, 4), TextPosition::new(0, 4))
            .is_none());
    }

    #[test]
    fn test_selection_across_paragraphs() {
        let layout = layout();
        let (text, rect) = layout
            .selection(&TEXT, TextPosition::new(0, 16), TextPosition::new(2, 5))
            .unwrap();

        assert_eq!(text, "fox.\n\nJumps");
        assert_eq!(rect, Rect::new(2.0, 1.0, 20.0, 3.0));
    }

    #[test]
    fn test_span_rect() {
        let layout = layout();
        assert_eq!(
            layout.span_rect(0, Span::new(4, 9)),
            Some(Rect::new(6.0, 1.0, 5.0, 1.0))
        );
        assert_eq!(layout.span_rect(3, Span::new(0, 3)), None);
    }

    const WIDE: [&str; 1] = ["日本語 ab cd"];

    #[test]
    fn test_wide_chars_take_two_cells() {
        let layout = TextLayout::new(0, 0, 40, 5, WIDE);

        // "ab" starts at column 7, after three double-width chars and a space
        assert_eq!(layout.offset_at(Point::new(7.0, 0.0)), Some(TextPosition::new(0, 4)));
        // Both cells of a wide char map to it
        assert_eq!(layout.offset_at(Point::new(0.0, 0.0)), Some(TextPosition::new(0, 0)));
        assert_eq!(layout.offset_at(Point::new(1.0, 0.0)), Some(TextPosition::new(0, 0)));
        assert_eq!(layout.offset_at(Point::new(5.0, 0.0)), Some(TextPosition::new(0, 2)));
        assert_eq!(layout.offset_at(Point::new(12.0, 0.0)), None);

        assert_eq!(layout.cell_of(TextPosition::new(0, 4)), Some((7, 0)));
        assert_eq!(layout.nearest_position(Point::new(30.0, 0.0)), Some(TextPosition::new(0, 9)));
    }

    #[test]
    fn test_wide_char_boxes() {
        let layout = TextLayout::new(0, 0, 40, 5, WIDE);

        assert_eq!(
            layout.span_rect(0, Span::new(0, 3)),
            Some(Rect::new(0.0, 0.0, 6.0, 1.0))
        );
        let (text, rect) = layout
            .selection(&WIDE, TextPosition::new(0, 2), TextPosition::new(0, 6))
            .unwrap();
        assert_eq!(text, "語 ab");
        assert_eq!(rect, Rect::new(4.0, 0.0, 5.0, 1.0));
    }

    #[test]
    fn test_zero_width_mark_is_not_hit() {
        // "e" plus a combining acute accent, then "x"
        let layout = TextLayout::new(0, 0, 10, 1, ["e\u{301}x"]);
        assert_eq!(layout.offset_at(Point::new(0.0, 0.0)), Some(TextPosition::new(0, 0)));
        assert_eq!(layout.offset_at(Point::new(1.0, 0.0)), Some(TextPosition::new(0, 2)));
    }
}
