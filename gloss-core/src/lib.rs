//! Gloss Core - Platform-agnostic text highlighting library
//!
//! This crate holds the pure text logic behind Gloss: resolving a click to
//! the span under it, normalizing drag selections, and re-applying saved
//! highlights over paragraphs as plain/marked segments. Host state and
//! export live here too, so the CLI and WASM builds share them.

pub mod app;
pub mod capture;
pub mod compose;
pub mod cursor;
pub mod error;
pub mod export;
pub mod gesture;
pub mod interaction;
pub mod layout;
pub mod model;
pub mod resolve;
pub mod settings;

pub use app::{App, Feedback, Focus, InputTarget, Mode, NoteOverlay};
pub use capture::{capture, Point, Rect, SelectionEvent};
pub use compose::{compose, marked_spans, segment_at, Segment};
pub use cursor::CursorState;
pub use error::{GlossError, Result};
pub use export::{render_summary, to_json, ExportDocument, ExportHighlight};
pub use gesture::{route, Gesture, GestureOutcome};
pub use interaction::{dispatch, HighlightHost, Intent};
pub use layout::{OffsetLocator, TextLayout, TextPosition};
pub use model::{Document, Highlight, HighlightColor, Span};
pub use resolve::{resolve, resolve_with, Granularity, Resolution};
pub use settings::Settings;
