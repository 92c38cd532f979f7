//! Workbook I/O: reading named sheets with explicit header validation,
//! and writing result tables back out as xlsx.

pub mod table;
pub mod writer;

use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};
use rust_decimal::Decimal;

use crate::error::FootprintError;

pub const SHEET_BOM: &str = "BOM";
pub const SHEET_SPEC: &str = "Material Spec Sheet";
pub const SHEET_SALES: &str = "Sales Data";
pub const SHEET_OUTPUT: &str = "Sales BOM Mat";

/// A sheet loaded into memory: one header row plus its data rows.
///
/// Rows keep their 1-based sheet position so that errors and warnings can
/// point at the offending spreadsheet row.
pub struct Sheet {
    name: String,
    header: Vec<String>,
    rows: Vec<(u32, Vec<Data>)>,
}

/// Open an xlsx container from bytes and load the named sheet.
///
/// The first non-empty row of the used range is taken as the header row;
/// rows that are entirely empty are dropped.
pub fn read_sheet(bytes: &[u8], sheet_name: &str) -> Result<Sheet, FootprintError> {
    let cursor = Cursor::new(bytes);
    let mut workbook: Xlsx<_> = calamine::open_workbook_from_rs(cursor)
        .map_err(|e| FootprintError::FileFormat(format!("failed to open xlsx: {e}")))?;

    let range = workbook
        .worksheet_range(sheet_name)
        .map_err(|e| FootprintError::MissingSheet {
            sheet: sheet_name.to_string(),
            detail: e.to_string(),
        })?;

    let (start_row, _) = range.start().unwrap_or((0, 0));

    let mut header: Option<Vec<String>> = None;
    let mut rows = Vec::new();

    for (offset, cells) in range.rows().enumerate() {
        // calamine rows are 0-based within the used range
        let sheet_row = start_row + offset as u32 + 1;

        if cells.iter().all(|c| matches!(c, Data::Empty)) {
            continue;
        }

        match header {
            None => {
                header = Some(
                    cells
                        .iter()
                        .map(|c| cell_as_string(Some(c)).unwrap_or_default())
                        .collect(),
                );
            }
            Some(_) => rows.push((sheet_row, cells.to_vec())),
        }
    }

    let header = header.ok_or_else(|| {
        FootprintError::schema(sheet_name, 1, "sheet has no header row")
    })?;

    Ok(Sheet {
        name: sheet_name.to_string(),
        header,
        rows,
    })
}

impl Sheet {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolve a required column by its trimmed header name.
    pub fn column(&self, name: &str) -> Result<usize, FootprintError> {
        self.header
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| FootprintError::MissingColumn {
                sheet: self.name.clone(),
                column: name.to_string(),
            })
    }

    /// Iterate data rows as (1-based sheet row, cells).
    pub fn rows(&self) -> impl Iterator<Item = (u32, &[Data])> {
        self.rows.iter().map(|(n, cells)| (*n, cells.as_slice()))
    }
}

/// Coerce a cell to a non-empty trimmed string.
pub fn cell_as_string(cell: Option<&Data>) -> Option<String> {
    match cell? {
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Data::Float(f) => Some(f.to_string()),
        Data::Int(i) => Some(i.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => Some(dt.to_string()),
        Data::Empty => None,
        other => Some(format!("{other}")),
    }
}

/// Coerce a cell to a decimal. Numbers stored as text are accepted;
/// anything else non-numeric returns `None`.
pub fn cell_as_decimal(cell: Option<&Data>) -> Option<Decimal> {
    match cell? {
        Data::Float(f) => Some(f64_to_decimal(*f)),
        Data::Int(i) => Some(Decimal::from(*i)),
        Data::String(s) => s.trim().parse::<Decimal>().ok(),
        _ => None,
    }
}

/// Convert f64 to Decimal through a string round-trip, so that values
/// like 0.2 don't pick up binary-float artifacts.
fn f64_to_decimal(f: f64) -> Decimal {
    let s = format!("{f}");
    s.parse::<Decimal>()
        .unwrap_or_else(|_| Decimal::try_from(f).unwrap_or_default())
}
