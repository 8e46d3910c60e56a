pub mod browser;
pub mod browser_setup;
pub mod cancel;
pub mod classify;
pub mod config;
pub mod content;
pub mod error;
pub mod harvest;
pub mod http;
pub mod logging;
pub mod pdf;
pub mod pipeline;
pub mod report;
pub mod utils;

pub use browser::{BrowserSession, PageDriver, with_page_timeout};
pub use browser_setup::{LaunchOptions, download_managed_browser, find_browser_executable, launch_browser};
pub use cancel::CancelFlag;
pub use classify::{LinkKind, classify, kind_from_content_type};
pub use config::HarvestConfig;
pub use content::{extract_text, format_page, format_text};
pub use error::{ConfigError, PdfError, PipelineError, PipelineResult, ReportError, TransportError};
pub use harvest::{DelayRange, LinkSet, PacingPolicy, SearchPlan, harvest};
pub use logging::LogTail;
pub use pdf::{ExtractedTable, PdfArchive, extract_table};
pub use pipeline::{run, run_with_driver};
pub use report::{FailureReason, LinkOutcome, ProcessedLink, Report, ReportAssembler, SheetRef};
