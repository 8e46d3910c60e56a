//! Workbook writer
//!
//! The output file is created empty when the run starts and rewritten once
//! at the end with every table sheet followed by the summary sheet.

use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, Workbook, Worksheet};
use tracing::{debug, info};

use super::types::{ProcessedLink, Report, SheetRef};
use crate::error::ReportError;
use crate::pdf::ExtractedTable;
use crate::utils::constants::{MAX_CELL_CHARS, RESULTS_SHEET_NAME};
use crate::utils::safe_truncate_chars;

const SUMMARY_HEADERS: [&str; 2] = ["links", "Web link text"];

pub struct ReportAssembler {
    path: PathBuf,
    workbook: Workbook,
    header_format: Format,
    table_sheets: usize,
}

impl ReportAssembler {
    /// Initialize `path` with an empty single-sheet workbook
    pub fn create(path: impl Into<PathBuf>) -> Result<Self, ReportError> {
        let path = path.into();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let mut initial = Workbook::new();
        initial.add_worksheet();
        initial.save(&path)?;
        debug!("Initialized output workbook {}", path.display());

        Ok(Self {
            path,
            workbook: Workbook::new(),
            header_format: Format::new().set_bold(),
            table_sheets: 0,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `table` to a sheet named after the link's 1-based `position`
    ///
    /// The sheet joins the workbook only once every cell is written; on error
    /// the workbook is unchanged.
    pub fn add_table_sheet(
        &mut self,
        position: usize,
        table: &ExtractedTable,
    ) -> Result<SheetRef, ReportError> {
        let sheet = SheetRef::new(position);
        let mut worksheet = Worksheet::new();
        worksheet.set_name(sheet.to_string())?;

        for (col, name) in table.columns.iter().enumerate() {
            write_text(&mut worksheet, 0, col, name, Some(&self.header_format))?;
        }
        for (r, row) in table.rows.iter().enumerate() {
            for (col, value) in row.iter().enumerate() {
                write_cell(&mut worksheet, r + 1, col, value)?;
            }
        }

        self.workbook.push_worksheet(worksheet);
        self.table_sheets += 1;
        info!("Table written to sheet {}", sheet);
        Ok(sheet)
    }

    /// Append the summary sheet and save
    ///
    /// With no processed links nothing is written and the initial empty
    /// workbook stays in place.
    pub fn finish(mut self, links: Vec<ProcessedLink>) -> Result<Report, ReportError> {
        if links.is_empty() {
            return Ok(Report {
                path: self.path,
                links,
                table_sheets: 0,
            });
        }

        let worksheet = self.workbook.add_worksheet();
        worksheet.set_name(RESULTS_SHEET_NAME)?;
        for (col, header) in SUMMARY_HEADERS.iter().enumerate() {
            write_text(worksheet, 0, col, header, Some(&self.header_format))?;
        }
        for (r, link) in links.iter().enumerate() {
            write_text(worksheet, r + 1, 0, &link.url, None)?;
            write_text(worksheet, r + 1, 1, &link.outcome.summary_text(), None)?;
        }
        worksheet.set_column_width(0, 60)?;
        worksheet.set_column_width(1, 80)?;

        self.workbook.save(&self.path)?;
        info!(
            "Report saved to {} ({} links, {} table sheets)",
            self.path.display(),
            links.len(),
            self.table_sheets
        );

        Ok(Report {
            path: self.path,
            links,
            table_sheets: self.table_sheets,
        })
    }
}

fn write_text(
    worksheet: &mut Worksheet,
    row: usize,
    col: usize,
    text: &str,
    format: Option<&Format>,
) -> Result<(), ReportError> {
    let (row, col) = cell_index(row, col)?;
    let text = safe_truncate_chars(text, MAX_CELL_CHARS);
    match format {
        Some(format) => worksheet.write_string_with_format(row, col, text, format)?,
        None => worksheet.write_string(row, col, text)?,
    };
    Ok(())
}

/// Numeric-looking values are stored as numbers
fn write_cell(
    worksheet: &mut Worksheet,
    row: usize,
    col: usize,
    value: &str,
) -> Result<(), ReportError> {
    match parse_number(value) {
        Some(number) => {
            let (row, col) = cell_index(row, col)?;
            worksheet.write_number(row, col, number)?;
            Ok(())
        }
        None => write_text(worksheet, row, col, value, None),
    }
}

fn parse_number(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

fn cell_index(row: usize, col: usize) -> Result<(u32, u16), ReportError> {
    match (u32::try_from(row), u16::try_from(col)) {
        (Ok(row), Ok(col)) => Ok((row, col)),
        _ => Err(ReportError::Xlsx(rust_xlsxwriter::XlsxError::RowColumnLimitError)),
    }
}
