pub mod document;
pub mod highlight;
pub mod span;

pub use document::Document;
pub use highlight::{Highlight, HighlightColor};
pub use span::Span;
