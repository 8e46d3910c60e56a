//! Positioned text runs from a page content stream
//!
//! Walks the text-showing operators of page 1 while tracking the graphics
//! and text matrices, producing one [`TextSpan`] per show operation. Glyph
//! widths are not read from the fonts; a span's width is estimated from its
//! character count and the effective font size.
//!
//! Strings are decoded through the encoding of the font selected by `Tf`.
//! Text in a font whose encoding cannot be resolved (a CID font without a
//! `ToUnicode` map, for one) is positioned but never emitted as a span.

use std::collections::BTreeMap;

use lopdf::content::Content;
use lopdf::{Document, Encoding, Object};
use tracing::debug;

/// Average glyph advance as a fraction of the font size
const GLYPH_WIDTH_EM: f64 = 0.5;

/// `TJ` adjustments at least this large (thousandths of an em) read as a space
const TJ_SPACE_THRESHOLD: f64 = 250.0;

/// A run of text at a position in user space (origin bottom-left)
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpan {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub font_size: f64,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Matrix([f64; 6]);

impl Matrix {
    const IDENTITY: Self = Self([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

    fn translate(tx: f64, ty: f64) -> Self {
        Self([1.0, 0.0, 0.0, 1.0, tx, ty])
    }

    /// `self × other` in PDF row-vector convention
    fn then(self, other: Self) -> Self {
        let [a1, b1, c1, d1, e1, f1] = self.0;
        let [a2, b2, c2, d2, e2, f2] = other.0;
        Self([
            a1 * a2 + b1 * c2,
            a1 * b2 + b1 * d2,
            c1 * a2 + d1 * c2,
            c1 * b2 + d1 * d2,
            e1 * a2 + f1 * c2 + e2,
            e1 * b2 + f1 * d2 + f2,
        ])
    }

    fn horizontal_scale(self) -> f64 {
        self.0[0].hypot(self.0[1])
    }

    fn vertical_scale(self) -> f64 {
        self.0[2].hypot(self.0[3])
    }
}

/// How strings shown in one page font turn into text
enum FontText<'a> {
    Mapped(Encoding<'a>),
    Unmapped,
}

struct TextState<'a> {
    fonts: BTreeMap<Vec<u8>, FontText<'a>>,
    font: Option<Vec<u8>>,
    ctm: Matrix,
    saved: Vec<Matrix>,
    tm: Matrix,
    tlm: Matrix,
    font_size: f64,
    leading: f64,
    spans: Vec<TextSpan>,
}

impl<'a> TextState<'a> {
    fn new(fonts: BTreeMap<Vec<u8>, FontText<'a>>) -> Self {
        Self {
            fonts,
            font: None,
            ctm: Matrix::IDENTITY,
            saved: Vec::new(),
            tm: Matrix::IDENTITY,
            tlm: Matrix::IDENTITY,
            font_size: 0.0,
            leading: 0.0,
            spans: Vec::new(),
        }
    }

    fn move_line(&mut self, tx: f64, ty: f64) {
        self.tlm = Matrix::translate(tx, ty).then(self.tlm);
        self.tm = self.tlm;
    }

    fn next_line(&mut self) {
        self.move_line(0.0, -self.leading);
    }

    /// Text of `bytes` in the current font, `None` when it cannot be read
    fn decode(&self, bytes: &[u8]) -> Option<String> {
        let text = match self.font.as_ref().and_then(|name| self.fonts.get(name)) {
            Some(FontText::Mapped(encoding)) => Document::decode_text(encoding, bytes).ok()?,
            Some(FontText::Unmapped) => return None,
            // Font missing from the page resources
            None => decode_bytes(bytes),
        };
        is_readable(&text).then_some(text)
    }

    fn show_string(&mut self, obj: Option<&Object>) {
        if let Some(Object::String(bytes, _)) = obj {
            let text = self.decode(bytes);
            self.show(text, bytes.len());
        }
    }

    fn show_array(&mut self, items: &[Object]) {
        let mut text = Some(String::new());
        let mut raw_len = 0;
        for item in items {
            match item {
                Object::String(bytes, _) => {
                    raw_len += bytes.len();
                    text = text.zip(self.decode(bytes)).map(|(mut acc, part)| {
                        acc.push_str(&part);
                        acc
                    });
                }
                other if number(other).is_some_and(|n| -n >= TJ_SPACE_THRESHOLD) => {
                    if let Some(acc) = text.as_mut() {
                        acc.push(' ');
                    }
                }
                _ => {}
            }
        }
        self.show(text, raw_len);
    }

    /// Emit a span for `text` and advance the text matrix
    ///
    /// Undecodable text still advances, by `raw_len` glyphs.
    fn show(&mut self, text: Option<String>, raw_len: usize) {
        let glyphs = text.as_ref().map_or(raw_len, |t| t.chars().count()) as f64;
        let advance = glyphs * GLYPH_WIDTH_EM * self.font_size;

        let rendering = self.tm.then(self.ctm);
        let [.., x, y] = rendering.0;
        let trimmed = text.as_deref().map(str::trim).unwrap_or_default();
        if !trimmed.is_empty() {
            self.spans.push(TextSpan {
                x,
                y,
                width: advance * rendering.horizontal_scale(),
                font_size: self.font_size * rendering.vertical_scale(),
                text: trimmed.to_string(),
            });
        }

        self.tm = Matrix::translate(advance, 0.0).then(self.tm);
    }

    fn apply(&mut self, operator: &str, operands: &[Object]) {
        match operator {
            "q" => self.saved.push(self.ctm),
            "Q" => {
                if let Some(ctm) = self.saved.pop() {
                    self.ctm = ctm;
                }
            }
            "cm" => {
                if let Some(m) = matrix(operands) {
                    self.ctm = m.then(self.ctm);
                }
            }
            "BT" => {
                self.tm = Matrix::IDENTITY;
                self.tlm = Matrix::IDENTITY;
            }
            "Tf" => {
                if let Some(Object::Name(name)) = operands.first() {
                    self.font = Some(name.clone());
                }
                if let Some(size) = operands.get(1).and_then(number) {
                    self.font_size = size;
                }
            }
            "TL" => {
                if let Some(leading) = operands.first().and_then(number) {
                    self.leading = leading;
                }
            }
            "Td" | "TD" => {
                if let (Some(tx), Some(ty)) = (
                    operands.first().and_then(number),
                    operands.get(1).and_then(number),
                ) {
                    if operator == "TD" {
                        self.leading = -ty;
                    }
                    self.move_line(tx, ty);
                }
            }
            "Tm" => {
                if let Some(m) = matrix(operands) {
                    self.tm = m;
                    self.tlm = m;
                }
            }
            "T*" => self.next_line(),
            "Tj" => self.show_string(operands.first()),
            "'" => {
                self.next_line();
                self.show_string(operands.first());
            }
            "\"" => {
                self.next_line();
                self.show_string(operands.get(2));
            }
            "TJ" => {
                if let Some(Object::Array(items)) = operands.first() {
                    self.show_array(items);
                }
            }
            _ => {}
        }
    }
}

fn number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(f64::from(*r)),
        _ => None,
    }
}

fn matrix(operands: &[Object]) -> Option<Matrix> {
    if operands.len() != 6 {
        return None;
    }
    let mut m = [0.0; 6];
    for (slot, obj) in m.iter_mut().zip(operands) {
        *slot = number(obj)?;
    }
    Some(Matrix(m))
}

/// UTF-16BE when BOM-marked, otherwise one byte per character (Latin-1)
fn decode_bytes(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Rejects glyph ids and other binary that leaked through as text
fn is_readable(text: &str) -> bool {
    !text
        .chars()
        .any(|c| c == char::REPLACEMENT_CHARACTER || (c.is_control() && !c.is_whitespace()))
}

fn page_fonts(
    document: &Document,
    page_id: lopdf::ObjectId,
) -> BTreeMap<Vec<u8>, FontText<'_>> {
    let fonts = match document.get_page_fonts(page_id) {
        Ok(fonts) => fonts,
        Err(e) => {
            debug!("Failed to read page fonts: {}", e);
            return BTreeMap::new();
        }
    };
    fonts
        .into_iter()
        .map(|(name, font)| {
            let text = match font.get_font_encoding(document) {
                Ok(encoding) => FontText::Mapped(encoding),
                Err(e) => {
                    debug!(
                        font = %String::from_utf8_lossy(&name),
                        error = %e,
                        "Font has no usable text encoding"
                    );
                    FontText::Unmapped
                }
            };
            (name, text)
        })
        .collect()
}

/// Text spans of the first page, in content-stream order
///
/// A document without pages yields no spans.
pub fn page_one_spans(document: &Document) -> Result<Vec<TextSpan>, lopdf::Error> {
    let Some(page_id) = document.get_pages().values().next().copied() else {
        return Ok(Vec::new());
    };

    let data = document.get_page_content(page_id)?;
    let content = Content::decode(&data)?;

    let mut state = TextState::new(page_fonts(document, page_id));
    for op in &content.operations {
        state.apply(&op.operator, &op.operands);
    }
    Ok(state.spans)
}
