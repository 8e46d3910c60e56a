//! Per-link outcomes and the assembled report

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// Why a link produced neither text nor a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FailureReason {
    CannotClassify,
    CannotFetch,
    NoTable,
    Timeout,
    /// Harvested but never processed because the run was stopped
    Cancelled,
}

impl FailureReason {
    /// Text written into the summary sheet
    #[must_use]
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::CannotClassify => "Unable to check the type of the link",
            Self::CannotFetch => "Unable to download the PDF file",
            Self::NoTable => "No Table data found/Unable to get table data",
            Self::Timeout => "Unable to get text from link",
            Self::Cancelled => "Not processed: the run was stopped",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// 1-based processing position of a link whose table got its own sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SheetRef(usize);

impl SheetRef {
    #[must_use]
    pub const fn new(position: usize) -> Self {
        Self(position)
    }

    #[must_use]
    pub const fn position(&self) -> usize {
        self.0
    }
}

impl fmt::Display for SheetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LinkOutcome {
    TextExtracted(String),
    TableFound(SheetRef),
    Failure(FailureReason),
}

impl LinkOutcome {
    /// The "Web link text" cell for this outcome
    #[must_use]
    pub fn summary_text(&self) -> String {
        match self {
            Self::TextExtracted(text) => text.clone(),
            Self::TableFound(sheet) => format!("Refer to sheet {sheet} for table data"),
            Self::Failure(reason) => reason.describe().to_string(),
        }
    }
}

/// One row of the summary sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessedLink {
    pub url: String,
    pub outcome: LinkOutcome,
}

impl ProcessedLink {
    pub fn new(url: impl Into<String>, outcome: LinkOutcome) -> Self {
        Self {
            url: url.into(),
            outcome,
        }
    }
}

/// What a finished run wrote
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub path: PathBuf,
    pub links: Vec<ProcessedLink>,
    pub table_sheets: usize,
}

impl Report {
    /// No link was processed; the workbook holds only its initial empty sheet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    #[must_use]
    pub fn failures(&self) -> usize {
        self.links
            .iter()
            .filter(|l| matches!(l.outcome, LinkOutcome::Failure(_)))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_texts() {
        assert_eq!(
            LinkOutcome::TableFound(SheetRef::new(2)).summary_text(),
            "Refer to sheet 2 for table data"
        );
        assert_eq!(
            LinkOutcome::Failure(FailureReason::NoTable).summary_text(),
            "No Table data found/Unable to get table data"
        );
        assert_eq!(
            LinkOutcome::TextExtracted("hello".into()).summary_text(),
            "hello"
        );
    }
}
