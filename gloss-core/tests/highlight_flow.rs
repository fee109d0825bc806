use gloss_core::{
    capture, compose, resolve, to_json, App, Document, Highlight, HighlightColor, Mode, Point,
    Rect, Segment, Span,
};

const ESSAY: &str = "The quick brown fox.\nThe fox ran past the quick dog.";

fn loaded_app() -> App {
    let mut app = App::new();
    app.load_document(Document::new("Essay".to_string(), ESSAY.to_string()));
    app.set_viewport(1, 1, 60, 5);
    app
}

#[test]
fn resolve_matches_documented_examples() {
    let res = resolve("The quick brown fox.", 4).unwrap();
    assert_eq!(res.span, Span::new(4, 9));
    assert_eq!(res.text, "quick");

    assert!(resolve("A.", 0).is_none());
}

#[test]
fn capture_matches_documented_examples() {
    let bbox = Rect::new(100.0, 20.0, 50.0, 18.0);
    let event = capture("  hello world  ", bbox).unwrap();
    assert_eq!(event.text, "hello world");
    assert_eq!(event.anchor, Point::new(125.0, 20.0));

    assert!(capture("   ", bbox).is_none());
}

#[test]
fn highlights_render_per_paragraph() {
    let mut app = loaded_app();

    // Click "quick" on the first row, inside the 1-cell border offset
    assert!(app.click(Point::new(6.0, 1.0)));
    app.choose_color(HighlightColor::Yellow);
    assert!(app.complete_highlight());

    // Drag over "fox ran" on the second row
    app.pointer_down(Point::new(5.0, 2.0));
    app.pointer_drag(Point::new(10.0, 2.0));
    app.pointer_up(Point::new(12.0, 2.0));
    assert_eq!(app.mode, Mode::ColorPicker);
    app.choose_color(HighlightColor::Blue);
    app.input_buffer = "chase".to_string();
    assert!(app.complete_highlight());

    let doc = app.document.as_ref().unwrap();
    let paragraphs = doc.paragraphs();

    let first = compose(paragraphs[0], &doc.highlights);
    assert_eq!(first.len(), 3);
    assert_eq!(first[1].text(), "quick");
    assert_eq!(first[1].color(), Some(HighlightColor::Yellow));

    // "quick" matches again in the second paragraph, independently
    let second = compose(paragraphs[1], &doc.highlights);
    let marked: Vec<_> = second
        .iter()
        .filter(|s| s.is_marked())
        .map(|s| (s.text(), s.note()))
        .collect();
    assert_eq!(marked, vec![("fox ran", Some("chase")), ("quick", None)]);

    let json = to_json(doc).unwrap();
    assert!(json.contains("\"text\": \"fox ran\""));
    assert!(json.contains("\"note\": \"chase\""));
}

#[test]
fn removing_a_highlight_shrinks_the_render() {
    let mut doc = Document::new("Essay".to_string(), ESSAY.to_string());
    let hl = Highlight::new("fox", HighlightColor::Green);
    let id = hl.id;
    doc.add_highlight(hl);

    let paragraph = doc.paragraph(0).unwrap().to_string();
    assert!(compose(&paragraph, &doc.highlights).iter().any(Segment::is_marked));

    assert!(doc.remove_highlight(id).is_some());
    assert_eq!(
        compose(&paragraph, &doc.highlights),
        vec![Segment::Plain(paragraph.as_str())]
    );
}

#[test]
fn click_lands_on_word_after_wide_chars() {
    let mut app = App::new();
    app.load_document(Document::new("Wide".to_string(), "日本語 ab cd".to_string()));
    app.set_viewport(1, 1, 60, 5);

    // Column 8 is the first cell of "ab" once the border offset is added
    assert!(app.click(Point::new(8.0, 1.0)));
    let pending = app.pending.as_ref().unwrap();
    assert_eq!(pending.text, "ab");
    assert_eq!(pending.anchor, Point::new(9.0, 1.0));
}
