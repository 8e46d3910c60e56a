//! Test utilities shared by the serpsheet integration tests

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, StringFormat, dictionary};
use serpsheet::browser::PageDriver;
use serpsheet::error::TransportError;

pub const SEARCH_HOME: &str = "https://search.example/";
pub const RESULTS_URL: &str = "https://search.example/search?q=test";

#[derive(Default)]
struct FakeState {
    current: Option<String>,
    on_results: bool,
    results_index: usize,
    navigations: Vec<String>,
    typed: Vec<String>,
    clicks: usize,
}

/// Scripted stand-in for a browser tab
///
/// Navigating to [`SEARCH_HOME`] and pressing Enter lands on the first of the
/// configured results pages; clicking "next" advances through them. Any other
/// URL serves the markup registered with [`FakeDriver::with_page`].
#[derive(Default)]
pub struct FakeDriver {
    results_pages: Vec<String>,
    pages: HashMap<String, String>,
    unreachable: HashSet<String>,
    state: Mutex<FakeState>,
}

impl FakeDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_results_page(mut self, html: impl Into<String>) -> Self {
        self.results_pages.push(html.into());
        self
    }

    pub fn with_page(mut self, url: &str, html: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), html.into());
        self
    }

    /// Navigation to `url` fails as if the host were down
    pub fn unreachable(mut self, url: &str) -> Self {
        self.unreachable.insert(url.to_string());
        self
    }

    pub fn navigations(&self) -> Vec<String> {
        self.lock().navigations.clone()
    }

    pub fn typed(&self) -> Vec<String> {
        self.lock().typed.clone()
    }

    pub fn clicks(&self) -> usize {
        self.lock().clicks
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }
}

#[async_trait]
impl PageDriver for FakeDriver {
    async fn navigate(&self, url: &str) -> Result<(), TransportError> {
        let mut state = self.lock();
        state.navigations.push(url.to_string());
        if self.unreachable.contains(url) {
            return Err(TransportError::navigation(url, "net::ERR_NAME_NOT_RESOLVED"));
        }
        state.current = Some(url.to_string());
        state.on_results = false;
        Ok(())
    }

    async fn current_url(&self) -> Option<String> {
        let state = self.lock();
        if state.on_results {
            Some(RESULTS_URL.to_string())
        } else {
            state.current.clone()
        }
    }

    async fn type_into(&self, _selector: &str, text: &str) -> Result<(), TransportError> {
        self.lock().typed.push(text.to_string());
        Ok(())
    }

    async fn press_enter(&self, _selector: &str) -> Result<(), TransportError> {
        let mut state = self.lock();
        state.on_results = true;
        state.results_index = 0;
        Ok(())
    }

    async fn wait_for_element(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), TransportError> {
        let html = self.content().await?;
        if html.contains(&format!("<{selector}")) {
            Ok(())
        } else {
            Err(TransportError::Timeout {
                operation: format!("Waiting for '{selector}'"),
                secs: timeout.as_secs(),
            })
        }
    }

    async fn content(&self) -> Result<String, TransportError> {
        let state = self.lock();
        if state.on_results {
            return Ok(self
                .results_pages
                .get(state.results_index)
                .cloned()
                .unwrap_or_default());
        }
        let current = state.current.clone().unwrap_or_default();
        if current == SEARCH_HOME {
            return Ok("<html><head><title>Search</title></head><body><textarea name='q'></textarea></body></html>".to_string());
        }
        self.pages
            .get(&current)
            .cloned()
            .ok_or_else(|| TransportError::Session(format!("no page scripted for {current}")))
    }

    async fn click_if_present(&self, _selector: &str) -> Result<bool, TransportError> {
        let mut state = self.lock();
        if !state.on_results || state.results_index + 1 >= self.results_pages.len() {
            return Ok(false);
        }
        state.results_index += 1;
        state.clicks += 1;
        Ok(true)
    }
}

/// Results page markup with one `.g` block per link
pub fn results_html(links: &[&str]) -> String {
    let blocks: String = links
        .iter()
        .map(|href| format!(r#"<div class="g"><a href="{href}"><h3>{href}</h3></a></div>"#))
        .collect();
    format!(r#"<html><body><div id="search">{blocks}</div></body></html>"#)
}

/// Single-page PDF; each inner slice is one line, cells placed 200pt apart
pub fn pdf_with_lines(lines: &[&[&str]]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    single_page(doc, font_id, lines, |text| Object::string_literal(text))
}

/// Glyph id used by the CID fixtures: printable ASCII shifted down by 29
fn glyph_id(c: char) -> u16 {
    c as u16 - 29
}

fn glyph_string(text: &str) -> Object {
    let bytes = text.chars().flat_map(|c| glyph_id(c).to_be_bytes()).collect();
    Object::String(bytes, StringFormat::Hexadecimal)
}

/// Like [`pdf_with_lines`], but shown through a Type0 `Identity-H` font
///
/// Strings are two-byte glyph ids. With `to_unicode` the font carries a CMap
/// mapping them back to text; without it the text cannot be recovered.
pub fn cid_pdf_with_lines(lines: &[&[&str]], to_unicode: bool) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let descendant_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "CIDFontType2",
        "BaseFont" => "AAAAAA+Arial",
        "CIDSystemInfo" => dictionary! {
            "Registry" => Object::string_literal("Adobe"),
            "Ordering" => Object::string_literal("Identity"),
            "Supplement" => 0,
        },
    });
    let mut font = dictionary! {
        "Type" => "Font",
        "Subtype" => "Type0",
        "BaseFont" => "AAAAAA+Arial",
        "Encoding" => "Identity-H",
        "DescendantFonts" => vec![descendant_id.into()],
    };
    if to_unicode {
        let cmap_id = doc.add_object(Stream::new(dictionary! {}, shifted_ascii_cmap()));
        font.set("ToUnicode", cmap_id);
    }
    let font_id = doc.add_object(font);
    single_page(doc, font_id, lines, glyph_string)
}

fn shifted_ascii_cmap() -> Vec<u8> {
    format!(
        "/CIDInit /ProcSet findresource begin
12 dict begin
begincmap
/CIDSystemInfo
<< /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def
/CMapName /Adobe-Identity-UCS def
/CMapType 2 def
1 begincodespacerange
<0000> <FFFF>
endcodespacerange
1 beginbfrange
<{:04X}> <{:04X}> <0020>
endbfrange
endcmap
CMapName currentdict /CMap defineresource pop
end
end
",
        glyph_id(' '),
        glyph_id('~'),
    )
    .into_bytes()
}

fn single_page(
    mut doc: Document,
    font_id: lopdf::ObjectId,
    lines: &[&[&str]],
    encode: impl Fn(&str) -> Object,
) -> Vec<u8> {
    let pages_id = doc.new_object_id();
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut operations = Vec::new();
    for (row, cells) in lines.iter().enumerate() {
        let y = 750 - 20 * row as i64;
        for (col, text) in cells.iter().enumerate() {
            let x = 50 + 200 * col as i64;
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec!["F1".into(), 10.into()]));
            operations.push(Operation::new("Td", vec![x.into(), y.into()]));
            operations.push(Operation::new("Tj", vec![encode(text)]));
            operations.push(Operation::new("ET", vec![]));
        }
    }
    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

/// PDF holding a 3-column table under a title line
pub fn table_pdf() -> Vec<u8> {
    pdf_with_lines(&[
        &["Quarterly figures"],
        &["Region", "Units", "Revenue"],
        &["North", "10", "1200.5"],
        &["South", "7", "830"],
    ])
}

/// The table of [`table_pdf`] in a subset-embedded CID font
pub fn cid_table_pdf(to_unicode: bool) -> Vec<u8> {
    cid_pdf_with_lines(
        &[
            &["Region", "Units"],
            &["North", "10"],
            &["South", "7"],
        ],
        to_unicode,
    )
}

/// PDF with running text only
pub fn prose_pdf() -> Vec<u8> {
    pdf_with_lines(&[
        &["This document has no tables."],
        &["Only a couple of lines of text."],
    ])
}

/// In-memory sink for a scoped tracing subscriber
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
