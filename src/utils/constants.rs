//! Shared configuration constants for serpsheet
//!
//! Default values used by the config builder and the pipeline stages, kept in
//! one place so the CLI help, the builder and the tests agree.

use std::time::Duration;

/// Search engine home page the harvester opens
pub const DEFAULT_SEARCH_URL: &str = "https://www.google.com/";

/// Search box on the engine home page
pub const DEFAULT_SEARCH_INPUT_SELECTOR: &str = "textarea[name='q'], input[name='q']";

/// One organic result block ("class g" convention)
pub const DEFAULT_RESULT_SELECTOR: &str = ".g";

/// First anchor inside a result block carries the result URL
pub const DEFAULT_LINK_SELECTOR: &str = "a[href]";

/// "Next" pagination control
pub const DEFAULT_NEXT_PAGE_SELECTOR: &str = "#pnnext";

/// Result pages read per run; one page unless raised explicitly
pub const DEFAULT_MAX_PAGES: usize = 1;

/// Pause after a page settles: 10-20 seconds
pub const DEFAULT_SETTLE_DELAY_MS: (u64, u64) = (10_000, 20_000);

/// Pause around typing into the search box: 5-8 seconds
pub const DEFAULT_KEYSTROKE_DELAY_MS: (u64, u64) = (5_000, 8_000);

/// Browser page-load budget for any navigation
pub const DEFAULT_PAGE_LOAD_TIMEOUT_SECS: u64 = 60;

/// How long a visited page gets to expose its `<title>`
pub const DEFAULT_TITLE_WAIT_SECS: u64 = 10;

/// Budget for content-type probes and PDF downloads
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 60;

/// Poll interval used when waiting for an element to appear
pub const ELEMENT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Output workbook written into the output directory
pub const OUTPUT_FILE_NAME: &str = "output.xlsx";

/// Archive directory for downloaded PDFs
pub const PDF_DIR_NAME: &str = "Pdf_Files";

/// Append-only run log
pub const LOG_FILE_NAME: &str = "log_file.log";

/// Summary sheet name, always written last
pub const RESULTS_SHEET_NAME: &str = "Results";

/// Largest string a single spreadsheet cell accepts
pub const MAX_CELL_CHARS: usize = 32_767;

/// Default interval for `watch-log`
pub const DEFAULT_LOG_POLL_SECS: u64 = 2;

/// Chrome user agent string sent by both the browser and the HTTP client
///
/// Keep within a few releases of current stable Chrome.
pub const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.6834.160 Safari/537.36";
