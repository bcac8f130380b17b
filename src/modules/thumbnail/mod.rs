//! Symbolic SVG placeholder thumbnails derived from HTML markup.

mod synthesizer;

pub use synthesizer::{analyze_html, synthesize, thumbnail_for, HtmlSummary};
