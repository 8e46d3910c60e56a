//! First-table detection over positioned text

use std::collections::HashMap;

use super::layout::TextSpan;

/// Spans whose baselines differ by less than this fraction of the font size
/// share a row
const ROW_TOLERANCE_EM: f64 = 0.3;

/// Horizontal gap, in font-size units, that separates two cells
const CELL_GAP_EM: f64 = 1.0;

/// Tabular data lifted from a PDF
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ExtractedTable {
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Arrange spans into rows of cells, top of the page first
#[must_use]
pub fn layout_rows(spans: &[TextSpan]) -> Vec<Vec<String>> {
    let mut sorted: Vec<&TextSpan> = spans.iter().collect();
    sorted.sort_by(|a, b| b.y.total_cmp(&a.y).then(a.x.total_cmp(&b.x)));

    let mut rows: Vec<Vec<&TextSpan>> = Vec::new();
    let mut row_y = f64::NAN;
    for span in sorted {
        let tolerance = (span.font_size * ROW_TOLERANCE_EM).max(1.0);
        match rows.last_mut() {
            Some(row) if (row_y - span.y).abs() <= tolerance => row.push(span),
            _ => {
                row_y = span.y;
                rows.push(vec![span]);
            }
        }
    }

    rows.into_iter().map(merge_cells).collect()
}

fn merge_cells(mut row: Vec<&TextSpan>) -> Vec<String> {
    row.sort_by(|a, b| a.x.total_cmp(&b.x));

    let mut cells: Vec<String> = Vec::new();
    let mut cell_end = f64::NEG_INFINITY;
    for span in row {
        let gap_limit = span.font_size.max(1.0) * CELL_GAP_EM;
        match cells.last_mut() {
            Some(cell) if span.x - cell_end < gap_limit => {
                cell.push(' ');
                cell.push_str(&span.text);
            }
            _ => cells.push(span.text.clone()),
        }
        cell_end = cell_end.max(span.x + span.width);
    }
    cells
}

/// The first run of at least two consecutive rows with the same number
/// (at least two) of cells; its first row names the columns
#[must_use]
pub fn detect_table(spans: &[TextSpan]) -> Option<ExtractedTable> {
    let rows = layout_rows(spans);

    let mut start = 0;
    while start < rows.len() {
        let width = rows[start].len();
        let mut end = start + 1;
        while end < rows.len() && rows[end].len() == width {
            end += 1;
        }

        if width >= 2 && end - start >= 2 {
            let mut run = rows[start..end].iter().cloned();
            let header = run.next()?;
            return Some(ExtractedTable {
                columns: column_names(header),
                rows: run.collect(),
            });
        }
        start = end;
    }
    None
}

/// Blank names become `Column N`; repeats get `.1`, `.2`, … appended
fn column_names(header: Vec<String>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    header
        .into_iter()
        .enumerate()
        .map(|(i, name)| {
            let base = if name.trim().is_empty() {
                format!("Column {}", i + 1)
            } else {
                name
            };
            let count = seen.entry(base.clone()).or_insert(0);
            let unique = if *count == 0 {
                base
            } else {
                format!("{base}.{count}")
            };
            *count += 1;
            unique
        })
        .collect()
}
