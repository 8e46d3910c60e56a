//! Spreadsheet report: one sheet per extracted table plus a summary sheet

pub mod assembler;
pub mod types;

pub use assembler::ReportAssembler;
pub use types::{FailureReason, LinkOutcome, ProcessedLink, Report, SheetRef};
