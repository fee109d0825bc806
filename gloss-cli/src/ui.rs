//! Terminal UI rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use gloss_core::{compose, App, Focus, HighlightColor, InputTarget, Mode, Point, TextPosition};

// Catppuccin Mocha colors
const BASE: Color = Color::Rgb(30, 30, 46);
const SURFACE0: Color = Color::Rgb(49, 50, 68);
const SURFACE1: Color = Color::Rgb(69, 71, 90);
const TEXT: Color = Color::Rgb(205, 214, 244);
const SUBTEXT0: Color = Color::Rgb(166, 173, 200);
const YELLOW: Color = Color::Rgb(249, 226, 175);
const GREEN: Color = Color::Rgb(166, 227, 161);
const BLUE: Color = Color::Rgb(137, 180, 250);
const PINK: Color = Color::Rgb(245, 194, 231);
const MAUVE: Color = Color::Rgb(203, 166, 247);

pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_title_bar(frame, app, chunks[0]);
    draw_main_area(frame, app, chunks[1]);
    draw_status_bar(frame, app, chunks[2]);

    // Draw popups/overlays
    match app.mode {
        Mode::ColorPicker => draw_color_picker(frame, app),
        Mode::Input => draw_input_dialog(frame, app),
        Mode::Help => draw_help(frame),
        Mode::Normal => draw_note_overlay(frame, app),
        Mode::Visual => {}
    }
}

fn draw_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let count = app.document.as_ref().map_or(0, |d| d.highlights.len());
    let current = if count > 0 { app.sidebar_selected + 1 } else { 0 };

    let title_bar = Paragraph::new(format!(" Gloss - {} [{}/{}]", app.title(), current, count))
        .style(Style::default().fg(TEXT).bg(SURFACE0));

    frame.render_widget(title_bar, area);
}

fn draw_main_area(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Reader
            Constraint::Length(32), // Sidebar
        ])
        .split(area);

    draw_reader(frame, app, chunks[0]);
    draw_sidebar(frame, app, chunks[1]);
}

fn draw_reader(frame: &mut Frame, app: &mut App, area: Rect) {
    let border = if app.focus == Focus::Reader { BLUE } else { SUBTEXT0 };
    let mode_indicator = match app.mode {
        Mode::Visual => " [VISUAL]",
        _ => "",
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(format!("Reader{}", mode_indicator));

    let inner = block.inner(area);
    frame.render_widget(block, area);
    app.set_viewport(inner.x, inner.y, inner.width, inner.height);

    let Some(doc) = &app.document else {
        return;
    };

    let selection = app.get_selection_range();
    let cursor = (app.focus == Focus::Reader).then(|| app.cursor.position());
    let scroll = app.layout.scroll();

    let lines: Vec<Line> = doc
        .paragraphs()
        .iter()
        .enumerate()
        .skip(scroll)
        .take(inner.height as usize)
        .map(|(index, paragraph)| {
            let mut spans = Vec::new();
            let mut offset = 0;
            for segment in compose(paragraph, &doc.highlights) {
                let base = match segment.color() {
                    Some(color) => Style::default().fg(BASE).bg(highlight_color(color)),
                    None => Style::default().fg(TEXT),
                };
                for ch in segment.text().chars() {
                    let position = TextPosition::new(index, offset);
                    let mut style = base;

                    if let Some((start, end)) = selection {
                        if position >= start && position < end {
                            style = style.bg(SURFACE1).add_modifier(Modifier::BOLD);
                        }
                    }
                    if let Some((paragraph, span)) = app.marked {
                        if paragraph == index && span.contains(offset) {
                            style = style.add_modifier(Modifier::UNDERLINED | Modifier::BOLD);
                        }
                    }
                    if cursor == Some(position) {
                        style = style.add_modifier(Modifier::REVERSED);
                    }

                    spans.push(Span::styled(ch.to_string(), style));
                    offset += 1;
                }
            }
            // Caret past the end of a line
            if cursor == Some(TextPosition::new(index, offset)) {
                spans.push(Span::styled(" ", Style::default().add_modifier(Modifier::REVERSED)));
            }
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn draw_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let border = if app.focus == Focus::Sidebar { BLUE } else { SUBTEXT0 };
    let count = app.document.as_ref().map_or(0, |d| d.highlights.len());

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(format!("Highlights ({})", count));

    let Some(doc) = &app.document else {
        frame.render_widget(block, area);
        return;
    };

    let items: Vec<ListItem> = doc
        .highlights
        .iter()
        .enumerate()
        .map(|(i, hl)| {
            let selected = i == app.sidebar_selected;
            let marker = if selected { ">" } else { " " };
            let preview: String = hl.text.chars().take(20).collect::<String>().replace('\n', " ");
            let placed = if doc.paragraph_of(hl).is_some() { "" } else { " ?" };

            let style = if selected {
                Style::default().fg(TEXT).bg(SURFACE1)
            } else {
                Style::default().fg(TEXT)
            };

            let mut lines = vec![Line::from(vec![
                Span::styled(format!("{} ", marker), style),
                Span::styled("  ", Style::default().bg(highlight_color(hl.color))),
                Span::styled(format!(" \"{}\"{}", preview, placed), style),
            ])];
            if let Some(note) = hl.visible_note() {
                lines.push(Line::from(Span::styled(
                    format!("     {}", note.chars().take(24).collect::<String>()),
                    style.fg(SUBTEXT0),
                )));
            }
            ListItem::new(lines)
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mode_str = match app.mode {
        Mode::Normal => "NORMAL",
        Mode::Visual => "VISUAL",
        Mode::Input => "INPUT",
        Mode::ColorPicker => "COLOR",
        Mode::Help => "HELP",
    };

    let status = app.status_message.as_deref().unwrap_or("");
    let help_hint = "click word | drag select | v select | e export | ? help";

    let status_bar = Paragraph::new(format!(
        " {} | {}",
        mode_str,
        if status.is_empty() { help_hint } else { status },
    ))
    .style(Style::default().fg(SUBTEXT0).bg(SURFACE0));

    frame.render_widget(status_bar, area);
}

fn draw_color_picker(frame: &mut Frame, app: &App) {
    let anchor = app.pending.as_ref().map(|p| p.anchor).unwrap_or_default();
    let area = popup_at(anchor, 28, HighlightColor::all().len() as u16 + 2, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(MAUVE))
        .title("Color (1-5 or j/k)");

    let items: Vec<ListItem> = HighlightColor::all()
        .iter()
        .enumerate()
        .map(|(i, color)| {
            let selected = i == app.color_selected;
            let marker = if selected { ">" } else { " " };
            let style = if selected {
                Style::default().fg(highlight_color(*color)).bg(SURFACE1)
            } else {
                Style::default().fg(highlight_color(*color))
            };
            ListItem::new(format!("{} {} {}", i + 1, marker, color.label())).style(style)
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn draw_input_dialog(frame: &mut Frame, app: &App) {
    let area = match (app.input_target, &app.pending) {
        (InputTarget::Note, Some(pending)) => popup_at(pending.anchor, 50, 5, frame.area()),
        _ => centered_rect(60, 5, frame.area()),
    };
    frame.render_widget(Clear, area);

    let title = match app.input_target {
        InputTarget::Note if app.editing.is_some() => "Edit note (Enter to save)",
        InputTarget::Note => "Note, optional (Enter to save)",
        InputTarget::FilePath => "Enter file path",
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(GREEN))
        .title(title);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let input = Paragraph::new(format!("{}_", app.input_buffer))
        .style(Style::default().fg(TEXT))
        .wrap(Wrap { trim: false });
    frame.render_widget(input, inner);
}

fn draw_note_overlay(frame: &mut Frame, app: &App) {
    let Some(overlay) = app.note_overlay() else {
        return;
    };

    let width = note_width(&overlay.text);
    let below = Point::new(overlay.at.x, overlay.at.y + 1.0);
    let area = popup_at(below, width, 3, frame.area());
    frame.render_widget(Clear, area);

    let note = Paragraph::new(overlay.text.as_str())
        .style(Style::default().fg(TEXT))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(YELLOW)),
        );
    frame.render_widget(note, area);
}

fn draw_help(frame: &mut Frame) {
    let area = centered_rect(60, 22, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BLUE))
        .title("Help (press any key to close)");

    let heading = Style::default().fg(MAUVE).add_modifier(Modifier::BOLD);
    let help_text = vec![
        Line::from(Span::styled("Mouse", heading)),
        Line::from("  click     Highlight the word under the pointer"),
        Line::from("  drag      Highlight the dragged selection"),
        Line::from("  hover     Show a highlight's note"),
        Line::from(""),
        Line::from(Span::styled("Keyboard", heading)),
        Line::from("  h/j/k/l   Move caret      w/b  Word motion"),
        Line::from("  Enter     Highlight at caret"),
        Line::from("  v, a      Select, then add highlight"),
        Line::from("  ]/[       Next/prev highlight"),
        Line::from("  n         Edit note of selected highlight"),
        Line::from("  d         Delete selected highlight"),
        Line::from("  Tab       Toggle reader/sidebar"),
        Line::from(""),
        Line::from(Span::styled("File", heading)),
        Line::from("  o         Open file"),
        Line::from("  e / E     Export JSON / Markdown summary"),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(Span::styled("Press any key to close", Style::default().fg(SUBTEXT0))),
    ];

    frame.render_widget(Paragraph::new(help_text).block(block), area);
}

/// Overlay width for a note, border included
fn note_width(note: &str) -> u16 {
    (note.chars().count().min(36) as u16 + 4).max(12)
}

fn highlight_color(color: HighlightColor) -> Color {
    match color {
        HighlightColor::Yellow => YELLOW,
        HighlightColor::Green => GREEN,
        HighlightColor::Blue => BLUE,
        HighlightColor::Pink => PINK,
        HighlightColor::Purple => MAUVE,
    }
}

/// Box of the given size whose top edge is centered on `anchor`, kept on screen
fn popup_at(anchor: Point, width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let max_x = area.x + area.width - width;
    let max_y = area.y + area.height - height;

    let x = (anchor.x - width as f64 / 2.0).max(area.x as f64) as u16;
    let y = (anchor.y.max(area.y as f64)) as u16;
    Rect::new(x.min(max_x), y.min(max_y), width, height)
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popup_centers_on_anchor() {
        let screen = Rect::new(0, 0, 100, 40);
        assert_eq!(popup_at(Point::new(50.0, 10.0), 20, 5, screen), Rect::new(40, 10, 20, 5));
    }

    #[test]
    fn test_note_width_is_bounded() {
        assert_eq!(note_width("ok"), 12);
        assert_eq!(note_width("a note of twenty chars"), 26);
        assert_eq!(note_width(&"x".repeat(70_000)), 40);
    }

    #[test]
    fn test_popup_stays_on_screen() {
        let screen = Rect::new(0, 0, 100, 40);
        assert_eq!(popup_at(Point::new(2.0, 39.0), 20, 5, screen), Rect::new(0, 35, 20, 5));
        assert_eq!(popup_at(Point::new(99.0, 0.0), 20, 5, screen), Rect::new(80, 0, 20, 5));
    }
}
