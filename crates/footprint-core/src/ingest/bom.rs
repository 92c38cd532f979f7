use crate::error::FootprintError;
use crate::model::{BomRow, RowWarning};
use crate::workbook::{self, cell_as_string, SHEET_BOM};

use super::required_decimal;

/// Read the "BOM" sheet into raw rows.
///
/// Rows without a SKU ID can never join to anything, so they are skipped
/// with a warning rather than failing the batch.
pub fn read_bom(bytes: &[u8]) -> Result<(Vec<BomRow>, Vec<RowWarning>), FootprintError> {
    let sheet = workbook::read_sheet(bytes, SHEET_BOM)?;

    let sku_id = sheet.column("SKU ID")?;
    let sku_name = sheet.column("SKU Name")?;
    let family_code = sheet.column("Family Code")?;
    let family_description = sheet.column("Family Description")?;
    let pm_id = sheet.column("pm id")?;
    let material_description = sheet.column("MaterialDescription")?;
    let number_per_case = sheet.column("Number per case")?;
    let consumption_per_case = sheet.column("Consumption per case")?;

    let mut rows = Vec::new();
    let mut warnings = Vec::new();

    for (row_num, cells) in sheet.rows() {
        let Some(id) = cell_as_string(cells.get(sku_id)) else {
            warnings.push(RowWarning {
                row: row_num,
                detail: "missing 'SKU ID', row skipped".into(),
            });
            continue;
        };

        rows.push(BomRow {
            row: row_num,
            sku_id: id,
            sku_name: cell_as_string(cells.get(sku_name)).unwrap_or_default(),
            family_code: cell_as_string(cells.get(family_code)).unwrap_or_default(),
            family_description: cell_as_string(cells.get(family_description))
                .unwrap_or_default(),
            pm_id: cell_as_string(cells.get(pm_id)).unwrap_or_default(),
            material_description: cell_as_string(cells.get(material_description))
                .unwrap_or_default(),
            number_per_case: required_decimal(
                SHEET_BOM,
                row_num,
                "Number per case",
                cells.get(number_per_case),
            )?,
            consumption_per_case: required_decimal(
                SHEET_BOM,
                row_num,
                "Consumption per case",
                cells.get(consumption_per_case),
            )?,
        });
    }

    Ok((rows, warnings))
}
