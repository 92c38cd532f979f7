//! Serialize result tables to xlsx.

use std::path::Path;

use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::Workbook;

use crate::error::FootprintError;
use crate::workbook::table::{Cell, TableView};

/// Render a table view to an xlsx workbook in memory.
pub fn to_xlsx(view: &TableView, sheet_name: &str) -> Result<Vec<u8>, FootprintError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (col, header) in view.headers.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }

    for (row_idx, row) in view.rows.iter().enumerate() {
        let row_num = (row_idx + 1) as u32;
        for (col_idx, cell) in row.iter().enumerate() {
            let col = col_idx as u16;
            match cell {
                Cell::Empty => {}
                Cell::Text(s) => {
                    worksheet.write_string(row_num, col, s)?;
                }
                Cell::Number(d) => match d.to_f64() {
                    Some(f) => {
                        worksheet.write_number(row_num, col, f)?;
                    }
                    // out of f64 range; keep the exact digits as text
                    None => {
                        worksheet.write_string(row_num, col, d.to_string())?;
                    }
                },
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

/// Write bytes to `path` atomically: the content lands in a temporary
/// file in the same directory and is renamed over the target, so a crash
/// mid-write never leaves a torn workbook behind.
pub fn save_atomic(bytes: &[u8], path: &Path) -> Result<(), FootprintError> {
    use std::io::Write;

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.persist(path).map_err(|e| FootprintError::Io(e.error))?;
    Ok(())
}
