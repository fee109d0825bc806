use uuid::Uuid;

use crate::capture::{Point, SelectionEvent};
use crate::compose::{compose, segment_at};
use crate::cursor::CursorState;
use crate::gesture::{route, Gesture, GestureOutcome};
use crate::interaction::{dispatch, HighlightHost, Intent};
use crate::layout::{OffsetLocator, TextLayout, TextPosition};
use crate::model::{Document, Highlight, HighlightColor, Span};
use crate::resolve::resolve_with;
use crate::settings::Settings;

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Visual,
    Input,
    ColorPicker,
    Help,
}

/// Focus area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Reader,
    Sidebar,
}

/// Input target for text input mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputTarget {
    Note,
    FilePath,
}

/// Transient note shown while a highlight is hovered
#[derive(Debug, Clone, PartialEq)]
pub struct NoteOverlay {
    pub text: String,
    pub at: Point,
}

/// Receives interactions on marked segments
#[derive(Debug, Default)]
pub struct Feedback {
    pub clicked: Option<Uuid>,
    pub note: Option<NoteOverlay>,
}

impl HighlightHost for Feedback {
    fn on_highlight_click(&mut self, highlight: &Highlight) {
        self.clicked = Some(highlight.id);
    }

    fn show_note(&mut self, note: &str, at: Point) {
        self.note = Some(NoteOverlay {
            text: note.to_string(),
            at,
        });
    }

    fn hide_note(&mut self) {
        self.note = None;
    }
}

/// Platform-agnostic application state
pub struct App {
    pub document: Option<Document>,
    pub settings: Settings,
    pub cursor: CursorState,
    pub layout: TextLayout,
    pub mode: Mode,
    pub focus: Focus,
    pub running: bool,

    // Keyboard selection anchor (visual mode)
    pub selection_start: Option<TextPosition>,
    // Pointer drag: (origin, current)
    pub drag: Option<(TextPosition, TextPosition)>,
    // Last resolved click, shown until the highlight flow ends
    pub marked: Option<(usize, Span)>,

    // Sidebar state
    pub sidebar_selected: usize,

    // Input state
    pub input_buffer: String,
    pub input_target: InputTarget,

    // Picker state
    pub color_selected: usize,

    // Pending highlight (during creation workflow)
    pub pending: Option<SelectionEvent>,
    pub pending_color: HighlightColor,
    // Highlight whose note is being edited
    pub editing: Option<Uuid>,

    pub feedback: Feedback,
    hovered: Option<(usize, Uuid)>,
    // Where the last hover happened, replayed after the list changes
    last_hover: Option<(TextPosition, Point)>,

    // Status message
    pub status_message: Option<String>,
}

impl App {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        let pending_color = settings.default_color;
        Self {
            document: None,
            settings,
            cursor: CursorState::new(),
            layout: TextLayout::default(),
            mode: Mode::Normal,
            focus: Focus::Reader,
            running: true,

            selection_start: None,
            drag: None,
            marked: None,

            sidebar_selected: 0,

            input_buffer: String::new(),
            input_target: InputTarget::Note,

            color_selected: color_index(pending_color),

            pending: None,
            pending_color,
            editing: None,

            feedback: Feedback::default(),
            hovered: None,
            last_hover: None,

            status_message: None,
        }
    }

    pub fn load_document(&mut self, doc: Document) {
        tracing::info!(title = %doc.title, highlights = doc.highlights.len(), "document loaded");
        self.cursor.set_content(&doc.content);
        self.layout = TextLayout::new(0, 0, 0, 0, doc.content.split('\n'));
        self.document = Some(doc);
        self.sidebar_selected = 0;
        self.hovered = None;
        self.last_hover = None;
        self.feedback = Feedback::default();
        self.reset_pending();
    }

    /// Rebuild the layout for the reader area, keeping the scroll position
    pub fn set_viewport(&mut self, x: u16, y: u16, width: u16, height: u16) {
        let scroll = self.layout.scroll();
        let layout = match &self.document {
            Some(doc) => TextLayout::new(x, y, width, height, doc.content.split('\n')),
            None => TextLayout::new(x, y, width, height, std::iter::empty()),
        };
        self.layout = layout.with_scroll(scroll);
    }

    /// Paragraphs of the loaded document
    pub fn paragraphs(&self) -> Vec<&str> {
        self.document
            .as_ref()
            .map(|d| d.paragraphs())
            .unwrap_or_default()
    }

    pub fn scroll_by(&mut self, delta: isize) {
        self.layout.scroll_by(delta);
    }

    // Cursor movement methods

    pub fn move_up(&mut self) {
        self.cursor.move_up();
        self.cursor_moved();
    }

    pub fn move_down(&mut self) {
        self.cursor.move_down();
        self.cursor_moved();
    }

    pub fn move_left(&mut self) {
        self.cursor.move_left();
        self.cursor_moved();
    }

    pub fn move_right(&mut self) {
        self.cursor.move_right();
        self.cursor_moved();
    }

    pub fn move_to_top(&mut self) {
        self.cursor.move_to_top();
        self.cursor_moved();
    }

    pub fn move_to_bottom(&mut self) {
        self.cursor.move_to_bottom();
        self.cursor_moved();
    }

    pub fn move_word_forward(&mut self) {
        self.cursor.move_word_forward();
        self.cursor_moved();
    }

    pub fn move_word_back(&mut self) {
        self.cursor.move_word_back();
        self.cursor_moved();
    }

    /// Keep the caret in view and treat it as hovering what it sits on
    fn cursor_moved(&mut self) {
        self.layout.scroll_to_show(self.cursor.row);
        let position = self.cursor.position();
        let at = self.point_of(position);
        self.hover(Some(position), at);
    }

    /// Screen point of a position, origin when scrolled out of view
    pub fn point_of(&self, position: TextPosition) -> Point {
        self.layout
            .cell_of(position)
            .map(|(x, y)| Point::new(x as f64, y as f64))
            .unwrap_or_default()
    }

    /// Enter visual/selection mode
    pub fn enter_visual_mode(&mut self) {
        self.mode = Mode::Visual;
        self.selection_start = Some(self.cursor.position());
    }

    pub fn exit_visual_mode(&mut self) {
        self.mode = Mode::Normal;
        self.selection_start = None;
    }

    /// Ordered caret range currently selected by keyboard or pointer
    pub fn get_selection_range(&self) -> Option<(TextPosition, TextPosition)> {
        let (a, b) = match (self.mode, self.selection_start, self.drag) {
            (Mode::Visual, Some(start), _) => (start, self.cursor.position()),
            (_, _, Some((origin, current))) => (origin, current),
            _ => return None,
        };
        Some(if a <= b { (a, b) } else { (b, a) })
    }

    /// Capture the visual selection and start the highlight workflow
    pub fn finish_visual(&mut self) -> bool {
        let Some(start) = self.selection_start else {
            return false;
        };
        let end = self.cursor.position();
        self.exit_visual_mode();
        self.capture_between(start, end)
    }

    fn capture_between(&mut self, a: TextPosition, b: TextPosition) -> bool {
        let outcome = {
            let paragraphs = self.paragraphs();
            self.layout
                .selection(&paragraphs, a, b)
                .and_then(|(text, bounding_box)| {
                    route(
                        Gesture::Release {
                            selection: &text,
                            bounding_box,
                        },
                        &paragraphs,
                        &self.layout,
                        self.settings.granularity,
                    )
                })
        };

        match outcome {
            Some(outcome) => {
                let event = outcome.into_event(Point::default());
                // Compose works per paragraph, so this could never render
                if event.text.contains('\n') {
                    self.set_status("Highlights cannot span paragraphs");
                    return false;
                }
                self.begin_highlight(event);
                true
            }
            None => {
                self.set_status("Nothing selected");
                false
            }
        }
    }

    // Pointer gestures

    pub fn pointer_down(&mut self, point: Point) {
        self.drag = self.layout.nearest_position(point).map(|p| (p, p));
    }

    pub fn pointer_drag(&mut self, point: Point) {
        if let (Some((origin, _)), Some(current)) = (self.drag, self.layout.nearest_position(point)) {
            self.drag = Some((origin, current));
        }
    }

    /// End a press: a drag captures, a plain click resolves
    pub fn pointer_up(&mut self, point: Point) {
        let Some((origin, current)) = self.drag.take() else {
            return;
        };
        let end = self.layout.nearest_position(point).unwrap_or(current);

        if origin != end {
            self.capture_between(origin, end);
        } else {
            self.click(point);
        }
    }

    pub fn pointer_move(&mut self, point: Point) {
        let position = self.layout.offset_at(point);
        self.hover(position, point);
    }

    /// Handle a plain click at a screen point
    pub fn click(&mut self, point: Point) -> bool {
        let Some(position) = self.layout.offset_at(point) else {
            return false;
        };
        if self.click_highlight(position, point) {
            return true;
        }

        let outcome = {
            let paragraphs = self.paragraphs();
            route(
                Gesture::Click { point },
                &paragraphs,
                &self.layout,
                self.settings.granularity,
            )
        };
        match outcome {
            Some(outcome) => {
                self.accept_outcome(outcome);
                true
            }
            None => false,
        }
    }

    /// Keyboard equivalent of a click: resolve at the caret
    pub fn resolve_at_cursor(&mut self) -> bool {
        let position = self.cursor.position();
        let at = self.point_of(position);
        if self.click_highlight(position, at) {
            return true;
        }

        let resolution = self
            .document
            .as_ref()
            .and_then(|d| d.paragraph(position.paragraph))
            .and_then(|p| resolve_with(p, position.offset, self.settings.granularity));

        match resolution {
            Some(resolution) => {
                self.accept_outcome(GestureOutcome::Resolved {
                    position,
                    resolution,
                });
                true
            }
            None => {
                self.set_status("Nothing to highlight here");
                false
            }
        }
    }

    fn accept_outcome(&mut self, outcome: GestureOutcome) {
        let anchor = match &outcome {
            GestureOutcome::Resolved {
                position,
                resolution,
            } => {
                self.marked = Some((position.paragraph, resolution.span));
                self.cursor.set_position(TextPosition::new(
                    position.paragraph,
                    resolution.span.start,
                ));
                self.layout
                    .span_rect(position.paragraph, resolution.span)
                    .map(|r| r.top_center())
                    .unwrap_or_default()
            }
            GestureOutcome::Captured(event) => event.anchor,
        };
        self.begin_highlight(outcome.into_event(anchor));
    }

    /// Report a click on a marked segment. Returns false over plain text.
    fn click_highlight(&mut self, position: TextPosition, at: Point) -> bool {
        let Some(doc) = self.document.as_ref() else {
            return false;
        };
        let Some(paragraph) = doc.paragraph(position.paragraph) else {
            return false;
        };
        let segments = compose(paragraph, &doc.highlights);
        let Some(segment) = segment_at(&segments, position.offset) else {
            return false;
        };
        if !dispatch(segment, Intent::Click, at, &mut self.feedback) {
            return false;
        }

        if let Some(id) = self.feedback.clicked.take() {
            self.select_highlight(id);
        }
        true
    }

    fn highlight_id_at(&self, position: TextPosition) -> Option<Uuid> {
        let doc = self.document.as_ref()?;
        let paragraph = doc.paragraph(position.paragraph)?;
        let segments = compose(paragraph, &doc.highlights);
        segment_at(&segments, position.offset)
            .and_then(|s| s.highlight())
            .map(|h| h.id)
    }

    /// Track which highlight is under the pointer or caret
    pub fn hover(&mut self, position: Option<TextPosition>, at: Point) {
        self.last_hover = position.map(|p| (p, at));
        let current = position
            .and_then(|pos| self.highlight_id_at(pos).map(|id| (pos.paragraph, id)));
        if current == self.hovered {
            return;
        }

        if let Some((paragraph, id)) = self.hovered.take() {
            if !self.dispatch_to(paragraph, id, Intent::HoverOut, at) {
                // Highlight is gone; drop any overlay it left behind
                self.feedback.hide_note();
            }
        }
        if let Some((paragraph, id)) = current {
            if self.settings.show_notes {
                self.dispatch_to(paragraph, id, Intent::HoverIn, at);
            }
        }
        self.hovered = current;
    }

    fn dispatch_to(&mut self, paragraph: usize, id: Uuid, intent: Intent, at: Point) -> bool {
        let Some(doc) = self.document.as_ref() else {
            return false;
        };
        let Some(text) = doc.paragraph(paragraph) else {
            return false;
        };
        compose(text, &doc.highlights)
            .iter()
            .find(|s| s.highlight().is_some_and(|h| h.id == id))
            .is_some_and(|segment| dispatch(segment, intent, at, &mut self.feedback))
    }

    /// Re-run the last hover against the current highlight list
    fn refresh_hover(&mut self) {
        self.hovered = None;
        self.feedback.hide_note();
        if let Some((position, at)) = self.last_hover {
            self.hover(Some(position), at);
        }
    }

    pub fn note_overlay(&self) -> Option<&NoteOverlay> {
        self.feedback.note.as_ref()
    }

    // Highlight workflow

    /// Hold a selection while the user picks a color and note
    pub fn begin_highlight(&mut self, event: SelectionEvent) {
        tracing::debug!(text = %event.text, x = event.anchor.x, y = event.anchor.y, "selection pending");
        self.pending = Some(event);
        self.pending_color = self.settings.default_color;
        self.color_selected = color_index(self.pending_color);
        self.mode = Mode::ColorPicker;
    }

    /// Confirm the picked color and move on to the note
    pub fn choose_color(&mut self, color: HighlightColor) {
        self.pending_color = color;
        self.color_selected = color_index(color);
        self.input_buffer.clear();
        self.input_target = InputTarget::Note;
        self.mode = Mode::Input;
    }

    /// Complete highlight creation or note editing
    pub fn complete_highlight(&mut self) -> bool {
        let note = self.input_buffer.trim().to_string();

        if let Some(id) = self.editing.take() {
            let updated = self
                .document
                .as_mut()
                .is_some_and(|doc| doc.set_note(id, &note));
            self.reset_pending();
            if updated {
                self.refresh_hover();
                self.set_status("Note updated");
            }
            return updated;
        }

        let Some(event) = self.pending.take() else {
            return false;
        };
        let Some(doc) = self.document.as_mut() else {
            return false;
        };

        let mut highlight = Highlight::new(event.text, self.pending_color);
        if !note.is_empty() {
            highlight = highlight.with_note(note);
        }
        doc.add_highlight(highlight);
        self.sidebar_selected = doc.highlights.len() - 1;

        self.reset_pending();
        self.refresh_hover();
        self.set_status("Highlight added");
        true
    }

    pub fn cancel_highlight(&mut self) {
        self.reset_pending();
    }

    fn reset_pending(&mut self) {
        self.pending = None;
        self.editing = None;
        self.marked = None;
        self.input_buffer.clear();
        self.pending_color = self.settings.default_color;
        self.mode = Mode::Normal;
    }

    /// Get currently selected highlight
    pub fn selected_highlight(&self) -> Option<&Highlight> {
        self.document.as_ref()?.highlights.get(self.sidebar_selected)
    }

    fn select_highlight(&mut self, id: Uuid) {
        let index = self
            .document
            .as_ref()
            .and_then(|d| d.highlights.iter().position(|h| h.id == id));
        if let Some(index) = index {
            self.sidebar_selected = index;
            self.set_status("Highlight selected");
        }
    }

    /// Where a highlight is currently rendered, if anywhere
    pub fn highlight_position(&self, id: Uuid) -> Option<TextPosition> {
        let (paragraph, span) = self.document.as_ref()?.placement_of(id)?;
        Some(TextPosition::new(paragraph, span.start))
    }

    fn jump_to_selected(&mut self) {
        let Some(id) = self.selected_highlight().map(|h| h.id) else {
            return;
        };
        if let Some(position) = self.highlight_position(id) {
            self.cursor.set_position(position);
            self.layout.scroll_to_show(position.paragraph);
        }
    }

    /// Navigate to next highlight
    pub fn next_highlight(&mut self) {
        let count = self.document.as_ref().map_or(0, |d| d.highlights.len());
        if count > 0 {
            self.sidebar_selected = (self.sidebar_selected + 1) % count;
            self.jump_to_selected();
        }
    }

    /// Navigate to previous highlight
    pub fn prev_highlight(&mut self) {
        let count = self.document.as_ref().map_or(0, |d| d.highlights.len());
        if count > 0 {
            self.sidebar_selected = if self.sidebar_selected == 0 {
                count - 1
            } else {
                self.sidebar_selected - 1
            };
            self.jump_to_selected();
        }
    }

    /// Delete selected highlight
    pub fn delete_selected_highlight(&mut self) -> bool {
        let Some(id) = self.selected_highlight().map(|h| h.id) else {
            return false;
        };

        if let Some(doc) = self.document.as_mut() {
            if doc.remove_highlight(id).is_some() {
                let count = doc.highlights.len();
                if self.sidebar_selected >= count && count > 0 {
                    self.sidebar_selected = count - 1;
                }
                self.refresh_hover();
                self.set_status("Highlight deleted");
                return true;
            }
        }
        false
    }

    /// Start editing the note of the selected highlight
    pub fn edit_selected_note(&mut self) -> bool {
        let Some((id, note)) = self
            .selected_highlight()
            .map(|h| (h.id, h.note.clone().unwrap_or_default()))
        else {
            return false;
        };

        self.editing = Some(id);
        self.input_buffer = note;
        self.input_target = InputTarget::Note;
        self.mode = Mode::Input;
        true
    }

    /// Set status message
    pub fn set_status(&mut self, msg: &str) {
        self.status_message = Some(msg.to_string());
    }

    /// Clear status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Toggle focus between reader and sidebar
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Reader => Focus::Sidebar,
            Focus::Sidebar => Focus::Reader,
        };
    }

    /// Get title for display
    pub fn title(&self) -> String {
        self.document
            .as_ref()
            .map(|d| d.filename.clone().unwrap_or_else(|| d.title.clone()))
            .unwrap_or_else(|| "Untitled".to_string())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

fn color_index(color: HighlightColor) -> usize {
    HighlightColor::all()
        .iter()
        .position(|c| *c == color)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_with(content: &str) -> App {
        let mut app = App::new();
        app.load_document(Document::new("Test".to_string(), content.to_string()));
        app.set_viewport(0, 0, 80, 10);
        app
    }

    fn add(app: &mut App, color: HighlightColor, note: &str) {
        app.choose_color(color);
        app.input_buffer = note.to_string();
        assert!(app.complete_highlight());
    }

    #[test]
    fn test_click_starts_highlight_flow() {
        let mut app = app_with("The quick brown fox.");

        assert!(app.click(Point::new(6.0, 0.0)));
        assert_eq!(app.mode, Mode::ColorPicker);
        assert_eq!(app.marked, Some((0, Span::new(4, 9))));

        let pending = app.pending.as_ref().unwrap();
        assert_eq!(pending.text, "quick");
        assert_eq!(pending.anchor, Point::new(6.5, 0.0));

        add(&mut app, HighlightColor::Green, "speed");
        let doc = app.document.as_ref().unwrap();
        assert_eq!(doc.highlights.len(), 1);
        assert_eq!(doc.highlights[0].note.as_deref(), Some("speed"));
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.marked, None);
    }

    #[test]
    fn test_click_on_highlight_selects_it() {
        let mut app = app_with("The cat sat. The dog ran.");
        app.document.as_mut().unwrap().add_highlight(Highlight::new("cat", HighlightColor::Yellow));
        app.document.as_mut().unwrap().add_highlight(Highlight::new("dog", HighlightColor::Blue));

        assert!(app.click(Point::new(18.0, 0.0)));
        assert_eq!(app.sidebar_selected, 1);
        assert_eq!(app.mode, Mode::Normal);
        assert!(app.pending.is_none());
    }

    #[test]
    fn test_single_char_click_does_nothing() {
        let mut app = app_with("A.");
        assert!(!app.click(Point::new(0.0, 0.0)));
        assert_eq!(app.mode, Mode::Normal);
    }

    #[test]
    fn test_drag_captures_selection() {
        let mut app = app_with("The quick brown fox.");

        app.pointer_down(Point::new(3.0, 0.0));
        app.pointer_drag(Point::new(10.0, 0.0));
        assert_eq!(
            app.get_selection_range(),
            Some((TextPosition::new(0, 3), TextPosition::new(0, 10)))
        );
        app.pointer_up(Point::new(15.0, 0.0));

        let pending = app.pending.as_ref().unwrap();
        assert_eq!(pending.text, "quick brown");
        assert_eq!(pending.anchor, Point::new(9.0, 0.0));
        assert_eq!(app.marked, None);
        assert!(app.drag.is_none());
    }

    #[test]
    fn test_blank_drag_is_ignored() {
        let mut app = app_with("one   two");
        app.pointer_down(Point::new(3.0, 0.0));
        app.pointer_up(Point::new(6.0, 0.0));

        assert!(app.pending.is_none());
        assert_eq!(app.mode, Mode::Normal);
    }

    #[test]
    fn test_visual_selection_across_paragraphs() {
        let mut app = app_with("first line\nsecond line");
        app.move_word_forward();
        app.enter_visual_mode();
        app.move_down();
        app.move_word_back();
        app.move_word_forward();
        assert!(!app.finish_visual());

        assert!(app.pending.is_none());
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(
            app.status_message.as_deref(),
            Some("Highlights cannot span paragraphs")
        );
    }

    #[test]
    fn test_visual_selection_within_paragraph() {
        let mut app = app_with("first line\nsecond line");
        app.enter_visual_mode();
        app.move_word_forward();
        assert!(app.finish_visual());

        // Trailing space is trimmed by capture
        assert_eq!(app.pending.as_ref().unwrap().text, "first");
        assert_eq!(app.mode, Mode::ColorPicker);
    }

    #[test]
    fn test_hover_shows_note_and_clears() {
        let mut app = app_with("The cat sat.");
        app.document
            .as_mut()
            .unwrap()
            .add_highlight(Highlight::new("cat", HighlightColor::Yellow).with_note("pet"));

        app.pointer_move(Point::new(5.0, 0.0));
        assert_eq!(app.note_overlay().map(|n| n.text.as_str()), Some("pet"));

        app.pointer_move(Point::new(9.0, 0.0));
        assert!(app.note_overlay().is_none());
    }

    #[test]
    fn test_deleting_hovered_highlight_hides_note() {
        let mut app = app_with("The cat sat.");
        app.document
            .as_mut()
            .unwrap()
            .add_highlight(Highlight::new("cat", HighlightColor::Yellow).with_note("pet"));

        app.pointer_move(Point::new(5.0, 0.0));
        assert_eq!(app.note_overlay().map(|n| n.text.as_str()), Some("pet"));

        assert!(app.delete_selected_highlight());
        assert!(app.note_overlay().is_none());
    }

    #[test]
    fn test_editing_hovered_note_updates_overlay() {
        let mut app = app_with("The cat sat.");
        app.document
            .as_mut()
            .unwrap()
            .add_highlight(Highlight::new("cat", HighlightColor::Yellow).with_note("pet"));
        app.pointer_move(Point::new(5.0, 0.0));

        assert!(app.edit_selected_note());
        app.input_buffer = "feline".to_string();
        assert!(app.complete_highlight());
        assert_eq!(app.note_overlay().map(|n| n.text.as_str()), Some("feline"));

        assert!(app.edit_selected_note());
        app.input_buffer = "  ".to_string();
        assert!(app.complete_highlight());
        assert!(app.note_overlay().is_none());
    }

    #[test]
    fn test_hover_respects_settings() {
        let mut app = app_with("The cat sat.");
        app.settings.show_notes = false;
        app.document
            .as_mut()
            .unwrap()
            .add_highlight(Highlight::new("cat", HighlightColor::Yellow).with_note("pet"));

        app.pointer_move(Point::new(5.0, 0.0));
        assert!(app.note_overlay().is_none());
    }

    #[test]
    fn test_resolve_at_cursor_uses_granularity() {
        let mut app = app_with("Go now; later");
        app.settings.granularity = crate::resolve::Granularity::Phrase;
        app.move_right();

        assert!(app.resolve_at_cursor());
        assert_eq!(app.pending.as_ref().unwrap().text, "Go now;");
    }

    #[test]
    fn test_edit_and_delete_selected() {
        let mut app = app_with("The cat sat.");
        app.click(Point::new(4.0, 0.0));
        add(&mut app, HighlightColor::Pink, "");
        assert_eq!(app.selected_highlight().unwrap().note, None);

        assert!(app.edit_selected_note());
        app.input_buffer = "a note".to_string();
        assert!(app.complete_highlight());
        assert_eq!(app.selected_highlight().unwrap().note.as_deref(), Some("a note"));

        assert!(app.delete_selected_highlight());
        assert!(app.selected_highlight().is_none());
        assert!(!app.delete_selected_highlight());
    }

    #[test]
    fn test_next_highlight_moves_cursor() {
        let mut app = app_with("alpha beta\ngamma delta");
        let doc = app.document.as_mut().unwrap();
        doc.add_highlight(Highlight::new("beta", HighlightColor::Yellow));
        doc.add_highlight(Highlight::new("delta", HighlightColor::Green));

        app.next_highlight();
        assert_eq!(app.sidebar_selected, 1);
        assert_eq!(app.cursor.position(), TextPosition::new(1, 6));

        app.next_highlight();
        assert_eq!(app.cursor.position(), TextPosition::new(0, 6));

        app.prev_highlight();
        assert_eq!(app.sidebar_selected, 1);
    }
}
