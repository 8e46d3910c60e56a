//! Markup to clean line-oriented text
//!
//! Two pure steps: [`html_to_lines`] walks the parsed document and emits every
//! text node on its own line (skipping `script` and `style` subtrees), then
//! [`format_text`] collapses the result into non-empty trimmed lines.
//! [`format_text`] is idempotent.

use scraper::{ElementRef, Html, Node};

const SKIPPED_TAGS: &[&str] = &["script", "style"];

/// Text of every node in document order, one node per line
#[must_use]
pub fn html_to_lines(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut buf = String::with_capacity(html.len() / 2);
    collect_text(&document.root_element(), &mut buf);
    buf
}

fn collect_text(element: &ElementRef<'_>, buf: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                if !buf.is_empty() {
                    buf.push('\n');
                }
                buf.push_str(text);
            }
            Node::Element(el) => {
                if SKIPPED_TAGS.contains(&el.name()) {
                    continue;
                }
                if let Some(child_ref) = ElementRef::wrap(child) {
                    collect_text(&child_ref, buf);
                }
            }
            _ => {}
        }
    }
}

/// Line-break characters a line is split on, beyond `\n` and `\r`
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{1c}' | '\u{1d}' | '\u{1e}' | '\u{85}'
            | '\u{2028}' | '\u{2029}'
    )
}

/// Collapse text into trimmed, non-empty lines joined by single newlines
///
/// ```
/// use serpsheet::content::format_text;
///
/// assert_eq!(format_text("  a \n\n\n b\r\n\t\n"), "a\nb");
/// ```
#[must_use]
pub fn format_text(text: &str) -> String {
    text.split(is_line_break)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// [`html_to_lines`] followed by [`format_text`]
#[must_use]
pub fn format_page(html: &str) -> String {
    format_text(&html_to_lines(html))
}
