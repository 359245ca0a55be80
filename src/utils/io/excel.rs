//! Region spreadsheet reading
//!
//! Region sheets have a fixed layout: a block of title and header rows,
//! then one facility per row group in the first ten columns. Cells are read
//! as text; numbers keep their shortest textual form (`1.0` reads as `1`).

use std::path::Path;
use std::time::Instant;

use calamine::{Data, Reader, open_workbook_auto};

use crate::algorithm::repair::{Cell, RAW_COLUMNS, RawTable};
use crate::error::{PipelineError, Result};
use crate::utils::logging::{log_operation_complete, log_operation_start};

/// Text of one spreadsheet cell, `None` for an empty cell
#[must_use]
pub fn cell_text(cell: &Data) -> Cell {
    let text = match cell {
        Data::Empty => return None,
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{f:.0}"),
        other => other.to_string().trim().to_string(),
    };
    (!text.is_empty()).then_some(text)
}

/// Read the first worksheet of a region file into a raw table
///
/// # Arguments
/// * `path` - Region spreadsheet
/// * `header_rows` - Number of leading sheet rows to skip
///
/// # Returns
/// `Ok(None)` when the file does not exist; the region is then skipped
///
/// # Errors
/// Returns an error if the file exists but cannot be read as a workbook
pub fn read_region_sheet(path: &Path, header_rows: usize) -> Result<Option<RawTable>> {
    if !path.is_file() {
        return Ok(None);
    }

    let start = Instant::now();
    log_operation_start("Reading region sheet", path);

    let mut workbook =
        open_workbook_auto(path).map_err(|e| PipelineError::spreadsheet(path, e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| PipelineError::spreadsheet(path, "workbook has no worksheets"))?
        .map_err(|e| PipelineError::spreadsheet(path, e.to_string()))?;

    // The range starts at the first used cell, not at A1
    let (first_row, first_col) = range
        .start()
        .map_or((0, 0), |(r, c)| (r as usize, c as usize));

    let rows: Vec<Vec<Cell>> = range
        .rows()
        .enumerate()
        .filter(|(i, _)| first_row + i >= header_rows)
        .map(|(_, row)| {
            (0..RAW_COLUMNS.len())
                .map(|col| {
                    col.checked_sub(first_col)
                        .and_then(|k| row.get(k))
                        .and_then(cell_text)
                })
                .collect()
        })
        .collect();

    log_operation_complete("read", path, rows.len(), Some(start.elapsed()));
    Ok(Some(RawTable::from_sheet_rows(rows)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&Data::Empty), None);
        assert_eq!(cell_text(&Data::String("  ".to_string())), None);
        assert_eq!(cell_text(&Data::String(" 内科 ".to_string())), Some("内科".to_string()));
        assert_eq!(cell_text(&Data::Float(12.0)), Some("12".to_string()));
        assert_eq!(cell_text(&Data::Float(2.5)), Some("2.5".to_string()));
        assert_eq!(cell_text(&Data::Int(7)), Some("7".to_string()));
    }

    #[test]
    fn test_missing_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_region_sheet(&dir.path().join("99.xlsx"), 11).unwrap();
        assert!(result.is_none());
    }
}
