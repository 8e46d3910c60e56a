//! Page text extraction

pub mod formatter;
pub mod page;

pub use formatter::{format_page, format_text, html_to_lines};
pub use page::extract_text;
