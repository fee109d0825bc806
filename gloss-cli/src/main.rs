//! Gloss CLI - Terminal-based text highlighting tool

mod config;
mod io;
mod logging;
mod ui;

use std::io::stdout;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyModifiers,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use gloss_core::{App, Focus, HighlightColor, InputTarget, Mode, Point};

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(name = "gloss", version, about = "Highlight and annotate text files in the terminal")]
struct Args {
    /// Text file to open
    file: Option<PathBuf>,

    /// Path to config.toml
    #[arg(long, env = "GLOSS_CONFIG")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = args.config.unwrap_or_else(config::default_config_path);
    let (config, config_error) = match Config::load(&config_path) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    let log_path = logging::init(&config.reader.log_filter, &config.data.dir)?;
    tracing::info!(config = %config_path.display(), log = %log_path.display(), "starting");
    if let Some(e) = &config_error {
        tracing::warn!("using default config: {:#}", e);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let data_dir = config.data.dir.clone();
    let mut app = App::with_settings(config.reader);

    // Load file if provided
    if let Some(path) = &args.file {
        open_file(&mut app, path);
    } else {
        app.set_status("No file loaded. Press 'o' to open one.");
    }
    if config_error.is_some() {
        app.set_status("Config could not be parsed, using defaults (see gloss.log)");
    }

    // Main loop
    let res = run_app(&mut terminal, &mut app, &data_dir);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = res {
        tracing::error!("exiting on error: {:#}", e);
        eprintln!("Error: {}", e);
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App, data_dir: &Path) -> Result<()> {
    while app.running {
        terminal.draw(|f| ui::draw(f, app))?;

        match event::read()? {
            Event::Key(key) => {
                // Clear status on any key
                app.clear_status();

                match app.mode {
                    Mode::Normal => handle_normal_mode(app, key, data_dir),
                    Mode::Visual => handle_visual_mode(app, key.code),
                    Mode::Input => handle_input_mode(app, key.code),
                    Mode::ColorPicker => handle_color_picker(app, key.code),
                    Mode::Help => {
                        app.mode = Mode::Normal;
                    }
                }
            }
            Event::Mouse(mouse) => handle_mouse(app, mouse),
            _ => {}
        }
    }
    Ok(())
}

fn open_file(app: &mut App, path: &Path) {
    match io::load_file(path) {
        Ok(doc) => {
            app.load_document(doc);
            app.set_status(&format!("Loaded {}", path.display()));
        }
        Err(e) => {
            tracing::warn!("open failed: {:#}", e);
            app.set_status(&format!("Error: {}", e));
        }
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    // Pickers and dialogs are keyboard-driven
    if app.mode != Mode::Normal {
        return;
    }

    let point = Point::new(mouse.column as f64, mouse.row as f64);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            app.clear_status();
            app.focus = Focus::Reader;
            app.pointer_down(point);
        }
        MouseEventKind::Drag(MouseButton::Left) => app.pointer_drag(point),
        MouseEventKind::Up(MouseButton::Left) => app.pointer_up(point),
        MouseEventKind::Moved => app.pointer_move(point),
        MouseEventKind::ScrollDown => app.scroll_by(3),
        MouseEventKind::ScrollUp => app.scroll_by(-3),
        _ => {}
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent, data_dir: &Path) {
    match key.code {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.running = false,
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
                match io::export_document(doc, data_dir) {
                    Ok(path) => app.set_status(&format!("Exported to {}", path.display())),
                    Err(e) => app.set_status(&format!("Export failed: {}", e)),
                }
            }
        }
        KeyCode::Char('E') => {
            if let Some(doc) = &app.document {
                match io::export_summary(doc, data_dir) {
                    Ok(path) => app.set_status(&format!("Summary written to {}", path.display())),
                    Err(e) => app.set_status(&format!("Export failed: {}", e)),
                }
            }
        }

        // Open file
        KeyCode::Char('o') => {
            app.input_buffer.clear();
            app.input_target = InputTarget::FilePath;
            app.mode = Mode::Input;
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
        KeyCode::Enter => match app.input_target {
            InputTarget::Note => {
                app.complete_highlight();
            }
            InputTarget::FilePath => {
                let path = PathBuf::from(app.input_buffer.trim());
                app.input_buffer.clear();
                app.mode = Mode::Normal;
                open_file(app, &path);
            }
        },
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
        // Quick select
        KeyCode::Char(c @ '1'..='5') => {
            let index = c as usize - '1' as usize;
            if let Some(color) = colors.get(index) {
                app.choose_color(*color);
            }
        }
        _ => {}
    }
}
