use crate::layout::TextPosition;

/// Keyboard caret over the paragraphs of a document.
///
/// Rows are paragraphs and columns are char offsets, so a position can be
/// handed straight to the resolver.
#[derive(Debug, Clone)]
pub struct CursorState {
    pub row: usize,
    pub col: usize,
    /// Char length of each paragraph
    line_lengths: Vec<usize>,
    /// Paragraph chars, for word motions
    lines: Vec<Vec<char>>,
}

impl CursorState {
    pub fn new() -> Self {
        Self {
            row: 0,
            col: 0,
            line_lengths: Vec::new(),
            lines: Vec::new(),
        }
    }

    /// Load content, one line per paragraph
    pub fn set_content(&mut self, content: &str) {
        self.lines = content.split('\n').map(|l| l.chars().collect()).collect();
        self.line_lengths = self.lines.iter().map(Vec::len).collect();
        self.row = 0;
        self.col = 0;
    }

    /// Get current cursor position as (row, col)
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn position(&self) -> TextPosition {
        TextPosition::new(self.row, self.col)
    }

    /// Move to a position, clamped to the content
    pub fn set_position(&mut self, position: TextPosition) {
        if self.lines.is_empty() {
            return;
        }
        self.row = position.paragraph.min(self.lines.len() - 1);
        self.col = position.offset.min(self.line_len(self.row));
    }

    /// Get the number of lines
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line_len(&self, row: usize) -> usize {
        self.line_lengths.get(row).copied().unwrap_or(0)
    }

    // Cursor movement methods

    pub fn move_up(&mut self) {
        if self.row > 0 {
            self.row -= 1;
            self.col = self.col.min(self.line_len(self.row));
        }
    }

    pub fn move_down(&mut self) {
        if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = self.col.min(self.line_len(self.row));
        }
    }

    pub fn move_left(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            // Move to end of previous line
            self.row -= 1;
            self.col = self.line_len(self.row);
        }
    }

    pub fn move_right(&mut self) {
        if self.col < self.line_len(self.row) {
            self.col += 1;
        } else if self.row + 1 < self.lines.len() {
            // Move to start of next line
            self.row += 1;
            self.col = 0;
        }
    }

    pub fn move_to_start(&mut self) {
        self.col = 0;
    }

    pub fn move_to_end(&mut self) {
        self.col = self.line_len(self.row);
    }

    pub fn move_to_top(&mut self) {
        self.row = 0;
        self.col = 0;
    }

    pub fn move_to_bottom(&mut self) {
        if !self.lines.is_empty() {
            self.row = self.lines.len() - 1;
            self.col = 0;
        }
    }

    pub fn move_word_forward(&mut self) {
        let Some(chars) = self.lines.get(self.row) else {
            return;
        };
        let mut col = self.col;

        // Skip current word, then the whitespace after it
        while col < chars.len() && !chars[col].is_whitespace() {
            col += 1;
        }
        while col < chars.len() && chars[col].is_whitespace() {
            col += 1;
        }

        if col >= chars.len() && self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        } else {
            self.col = col;
        }
    }

    pub fn move_word_back(&mut self) {
        if self.col == 0 {
            if self.row > 0 {
                self.row -= 1;
                self.col = self.line_len(self.row);
            }
            return;
        }

        let Some(chars) = self.lines.get(self.row) else {
            return;
        };
        let mut col = self.col.min(chars.len());

        while col > 0 && chars[col - 1].is_whitespace() {
            col -= 1;
        }
        while col > 0 && !chars[col - 1].is_whitespace() {
            col -= 1;
        }

        self.col = col;
    }
}

impl Default for CursorState {
    fn default() -> Self {
        Self::new()
    }
}
