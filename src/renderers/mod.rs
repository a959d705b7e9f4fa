//! Output renderers.

pub mod svg;

pub use svg::{escape, render_document, write_element};
