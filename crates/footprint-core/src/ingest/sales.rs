use crate::error::FootprintError;
use crate::model::{RowWarning, SalesRow};
use crate::workbook::{self, cell_as_string, SHEET_SALES};

use super::required_decimal;

/// Read the "Sales Data" sheet into raw rows.
///
/// Rows are kept even when `INV_MATERIALCODE` is blank (they surface as
/// unmatched in the aggregation); period decomposition and validation
/// happen in the aggregator.
pub fn read_sales(bytes: &[u8]) -> Result<(Vec<SalesRow>, Vec<RowWarning>), FootprintError> {
    let sheet = workbook::read_sheet(bytes, SHEET_SALES)?;

    let period = sheet.column("Period")?;
    let yyyymm = sheet.column("yyyymm")?;
    let inv_material_code = sheet.column("INV_MATERIALCODE")?;
    let sales_qty = sheet.column("SalesQty")?;

    let mut rows = Vec::new();
    let mut warnings = Vec::new();

    for (row_num, cells) in sheet.rows() {
        let code = cell_as_string(cells.get(inv_material_code)).unwrap_or_default();
        if code.is_empty() {
            warnings.push(RowWarning {
                row: row_num,
                detail: "blank 'INV_MATERIALCODE', row will not match any SKU".into(),
            });
        }

        rows.push(SalesRow {
            row: row_num,
            period: cell_as_string(cells.get(period)).unwrap_or_default(),
            yyyymm: cell_as_string(cells.get(yyyymm)).unwrap_or_default(),
            inv_material_code: code,
            sales_qty: required_decimal(
                SHEET_SALES,
                row_num,
                "SalesQty",
                cells.get(sales_qty),
            )?,
        });
    }

    Ok((rows, warnings))
}
