//! Per-kind sheet readers. Each reader validates the sheet's required
//! columns, applies the documented defaults for missing cells, and
//! collects soft anomalies as [`RowWarning`]s instead of dropping rows
//! silently.
//!
//! [`RowWarning`]: crate::model::RowWarning

pub mod bom;
pub mod sales;
pub mod spec;

use calamine::Data;
use rust_decimal::Decimal;

use crate::error::FootprintError;
use crate::workbook::cell_as_decimal;

/// A numeric cell the pipeline cannot proceed without.
fn required_decimal(
    sheet: &str,
    row: u32,
    column: &str,
    cell: Option<&Data>,
) -> Result<Decimal, FootprintError> {
    cell_as_decimal(cell).ok_or_else(|| {
        FootprintError::schema(
            sheet,
            row,
            format!("missing or non-numeric '{column}'"),
        )
    })
}
