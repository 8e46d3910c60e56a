//! Error types for the harvesting pipeline
//!
//! `TransportError` is the single boundary every browser and HTTP failure is
//! normalized into, so per-link call sites only ever match one error kind.
//! Run-level failures surface as `PipelineError`.

use std::path::PathBuf;

use chromiumoxide::error::CdpError;
use thiserror::Error;

/// Network or browser failure while talking to a remote page
#[derive(Debug, Error)]
pub enum TransportError {
    /// Browser navigation failed (DNS, TLS, refused connection, crashed tab)
    #[error("navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    /// An operation exceeded its time budget
    #[error("{operation} timed out after {secs}s")]
    Timeout { operation: String, secs: u64 },

    /// The DevTools session itself misbehaved
    #[error("browser session error: {0}")]
    Session(String),

    /// Plain HTTP request failure
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-success status
    #[error("request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// Local I/O failure while landing fetched bytes
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TransportError {
    pub fn http(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Http {
            url: url.into(),
            source,
        }
    }

    pub fn navigation(url: impl Into<String>, message: impl ToString) -> Self {
        Self::Navigation {
            url: url.into(),
            message: message.to_string(),
        }
    }

    #[must_use]
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Timeout { .. } => true,
            Self::Http { source, .. } => source.is_timeout(),
            _ => false,
        }
    }
}

impl From<CdpError> for TransportError {
    fn from(err: CdpError) -> Self {
        Self::Session(err.to_string())
    }
}

/// Invalid or unreadable configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("search query cannot be empty or whitespace-only")]
    EmptyQuery,

    #[error("max_pages must be at least 1")]
    ZeroPages,

    #[error("{field} must be at least 1 second")]
    ZeroTimeout { field: &'static str },

    #[error("invalid {field} delay range: min {min_ms}ms is greater than max {max_ms}ms")]
    InvalidPacing {
        field: &'static str,
        min_ms: u64,
        max_ms: u64,
    },

    #[error("invalid search URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid CSS selector for {field}: '{selector}'")]
    InvalidSelector {
        field: &'static str,
        selector: String,
    },

    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure on the PDF path of a single link
#[derive(Debug, Error)]
pub enum PdfError {
    /// Download failed; nothing was archived
    #[error("failed to download PDF: {0}")]
    Fetch(#[from] TransportError),

    /// Saved, but page 1 holds no recognizable table
    #[error("no table found on page 1")]
    NoTable,
}

/// Failure writing the output workbook
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Run-level failure; per-link problems never surface here
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to start browser: {0}")]
    Browser(String),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("report error: {0}")]
    Report(#[from] ReportError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    pub(crate) fn browser(err: &anyhow::Error) -> Self {
        // {:#} keeps the whole context chain
        Self::Browser(format!("{err:#}"))
    }
}

/// Convenience alias for pipeline results
pub type PipelineResult<T> = Result<T, PipelineError>;
