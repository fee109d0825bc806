//! Gloss Web - WebAssembly version of the text highlighting tool
//!
//! This crate provides a browser-based version of Gloss using Ratzilla
//! for terminal rendering in the DOM. Input is keyboard-only; the caret
//! stands in for the pointer.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::Terminal;
use ratzilla::{event::KeyCode, DomBackend, WebRenderer};
use wasm_bindgen::prelude::*;

use gloss_core::{App, Document, Focus, HighlightColor, InputTarget, Mode};

pub mod io;
mod ui;

const STORAGE_KEY: &str = "gloss-document";

/// Sample document content for demo
const SAMPLE_CONTENT: &str = r#"# Welcome to Gloss

This is a demonstration of Gloss running in your browser via WebAssembly.

Move the caret with h/j/k/l and press Enter on a word to highlight it. Pick a color, type an optional note, and press Enter again.

Press v to start a selection, move to extend it, then press a to highlight the whole range.

Highlights are matched by their text. If the same words appear twice in a paragraph, only the first one is marked.

Rest the caret on a highlight with a note to read the note. Use ] and [ to jump between highlights, n to edit a note, d to delete.

Press e to download your highlights as JSON, or E for a Markdown summary.
"#;

fn log(message: &str) {
    web_sys::console::log_1(&message.into());
}

/// Initialize the Gloss web application
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();

    let mut app = App::new();
    let doc = match io::load_from_storage(STORAGE_KEY) {
        Ok(Some(doc)) => doc,
        Ok(None) => Document::new("Demo Document".to_string(), SAMPLE_CONTENT.to_string()),
        Err(e) => {
            log(&format!("Discarding saved document: {:?}", e));
            Document::new("Demo Document".to_string(), SAMPLE_CONTENT.to_string())
        }
    };
    app.load_document(doc);
    app.set_status("Welcome to Gloss! Press Enter on a word to highlight it, '?' for help");

    // Wrap in Rc<RefCell> for shared state
    let app_state = Rc::new(RefCell::new(app));

    // Create terminal with DOM backend
    let backend = DomBackend::new()
        .map_err(|e| JsValue::from_str(&format!("Failed to create backend: {:?}", e)))?;
    let mut terminal = Terminal::new(backend)
        .map_err(|e| JsValue::from_str(&format!("Failed to create terminal: {:?}", e)))?;

    // Set up keyboard handler
    terminal.on_key_event({
        let app_state_cloned = app_state.clone();
        move |event| {
            let mut app = app_state_cloned.borrow_mut();
            app.clear_status();
            let before = app.document.as_ref().map(|d| d.updated_at);

            match app.mode {
                Mode::Normal => handle_normal_mode(&mut app, event.code),
                Mode::Visual => handle_visual_mode(&mut app, event.code),
                Mode::Input => handle_input_mode(&mut app, event.code),
                Mode::ColorPicker => handle_color_picker(&mut app, event.code),
                Mode::Help => {
                    app.mode = Mode::Normal;
                }
            }

            if let Some(doc) = &app.document {
                if before != Some(doc.updated_at) {
                    if let Err(e) = io::save_to_storage(STORAGE_KEY, doc) {
                        log(&format!("Save failed: {:?}", e));
                    }
                }
            }
        }
    });

    // Draw loop
    terminal.draw_web(move |frame| {
        let mut app = app_state.borrow_mut();
        ui::draw(frame, &mut app);
    });

    log("Gloss WASM initialized");

    Ok(())
}

fn handle_normal_mode(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('?') => app.mode = Mode::Help,

        // Navigation
        KeyCode::Char('j') | KeyCode::Down => {
            if app.focus == Focus::Reader {
                app.move_down();
            } else {
                app.next_highlight();
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            if app.focus == Focus::Reader {
                app.move_up();
            } else {
                app.prev_highlight();
            }
        }
        KeyCode::Char('h') | KeyCode::Left => app.move_left(),
        KeyCode::Char('l') | KeyCode::Right => app.move_right(),
        KeyCode::Char('w') => app.move_word_forward(),
        KeyCode::Char('b') => app.move_word_back(),
        KeyCode::Char('g') => app.move_to_top(),
        KeyCode::Char('G') => app.move_to_bottom(),

        // Highlight navigation
        KeyCode::Char(']') => app.next_highlight(),
        KeyCode::Char('[') => app.prev_highlight(),

        // Highlighting
        KeyCode::Enter => {
            app.resolve_at_cursor();
        }
        KeyCode::Char('v') => app.enter_visual_mode(),
        KeyCode::Char('n') => {
            app.edit_selected_note();
        }
        KeyCode::Char('d') => {
            app.delete_selected_highlight();
        }

        // Focus toggle
        KeyCode::Tab => app.toggle_focus(),

        // Export
        KeyCode::Char('e') => {
            if let Some(doc) = &app.document {
                match gloss_core::to_json(doc) {
                    Ok(json) => {
                        if let Err(e) = io::download("gloss-export.json", "application/json", &json) {
                            app.set_status(&format!("Export failed: {:?}", e));
                        } else {
                            app.set_status("Exported to gloss-export.json");
                        }
                    }
                    Err(e) => app.set_status(&format!("Serialization failed: {}", e)),
                }
            }
        }
        KeyCode::Char('E') => {
            if let Some(doc) = &app.document {
                let summary = gloss_core::render_summary(doc);
                if let Err(e) = io::download("gloss-summary.md", "text/markdown", &summary) {
                    app.set_status(&format!("Export failed: {:?}", e));
                } else {
                    app.set_status("Exported to gloss-summary.md");
                }
            }
        }

        _ => {}
    }
}

fn handle_visual_mode(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.exit_visual_mode(),
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('h') | KeyCode::Left => app.move_left(),
        KeyCode::Char('l') | KeyCode::Right => app.move_right(),
        KeyCode::Char('w') => app.move_word_forward(),
        KeyCode::Char('b') => app.move_word_back(),
        KeyCode::Char('a') | KeyCode::Enter => {
            app.finish_visual();
        }
        _ => {}
    }
}

fn handle_input_mode(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.cancel_highlight(),
        KeyCode::Enter => {
            if app.input_target == InputTarget::Note {
                app.complete_highlight();
            }
        }
        KeyCode::Backspace => {
            app.input_buffer.pop();
        }
        KeyCode::Char(c) => {
            app.input_buffer.push(c);
        }
        _ => {}
    }
}

fn handle_color_picker(app: &mut App, code: KeyCode) {
    let colors = HighlightColor::all();

    match code {
        KeyCode::Esc => app.cancel_highlight(),
        KeyCode::Char('j') | KeyCode::Down => {
            app.color_selected = (app.color_selected + 1) % colors.len();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.color_selected = if app.color_selected == 0 {
                colors.len() - 1
            } else {
                app.color_selected - 1
            };
        }
        KeyCode::Enter => app.choose_color(colors[app.color_selected]),
        KeyCode::Char(c @ '1'..='5') => {
            let index = c as usize - '1' as usize;
            if let Some(color) = colors.get(index) {
                app.choose_color(*color);
            }
        }
        _ => {}
    }
}
