//! PDF download and page-1 table extraction
//!
//! [`extract_table`] archives the linked PDF, then reads the first table on
//! its first page on a blocking worker thread. Only page 1 is examined.

mod archive;
pub mod layout;
pub mod table;

use std::path::Path;

use lopdf::Document;
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::error::PdfError;

pub use archive::PdfArchive;
pub use layout::TextSpan;
pub use table::{ExtractedTable, detect_table};

/// Download `url` into `archive` and extract the first table on page 1
pub async fn extract_table(
    client: &Client,
    url: &str,
    archive: &PdfArchive,
) -> Result<ExtractedTable, PdfError> {
    let path = archive.download(client, url).await?;
    info!("PDF file saved to {}", path.display());

    let parse_path = path.clone();
    let parsed = tokio::task::spawn_blocking(move || first_table_in_file(&parse_path)).await;

    match parsed {
        Ok(Some(table)) => {
            info!(
                "Table with {} columns and {} rows found in {}",
                table.columns.len(),
                table.row_count(),
                path.display()
            );
            Ok(table)
        }
        Ok(None) => Err(PdfError::NoTable),
        Err(e) => {
            warn!("PDF parsing task failed: {}", e);
            Err(PdfError::NoTable)
        }
    }
}

/// First table on page 1 of the PDF at `path`, if there is one
///
/// Unreadable documents are treated as having no table.
#[must_use]
pub fn first_table_in_file(path: &Path) -> Option<ExtractedTable> {
    let document = match Document::load(path) {
        Ok(doc) => doc,
        Err(e) => {
            debug!("Failed to parse PDF {}: {}", path.display(), e);
            return None;
        }
    };
    first_table(&document)
}

/// In-memory variant of [`first_table_in_file`]
#[must_use]
pub fn first_table_in_bytes(bytes: &[u8]) -> Option<ExtractedTable> {
    match Document::load_mem(bytes) {
        Ok(doc) => first_table(&doc),
        Err(e) => {
            debug!("Failed to parse PDF bytes: {}", e);
            None
        }
    }
}

fn first_table(document: &Document) -> Option<ExtractedTable> {
    match layout::page_one_spans(document) {
        Ok(spans) => detect_table(&spans),
        Err(e) => {
            debug!("Failed to read page 1 content: {}", e);
            None
        }
    }
}
