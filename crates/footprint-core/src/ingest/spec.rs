use calamine::Data;
use rust_decimal::Decimal;

use crate::error::FootprintError;
use crate::model::{PackForm, RowWarning, SpecRow};
use crate::workbook::{self, cell_as_decimal, cell_as_string, SHEET_SPEC};

/// Read the "Material Spec Sheet" sheet into raw rows, applying the
/// ingest defaults: missing `MOC` and `Cleaned Material Type` become
/// "NA", missing `Weight in Gram` becomes 0.
pub fn read_spec(bytes: &[u8]) -> Result<(Vec<SpecRow>, Vec<RowWarning>), FootprintError> {
    let sheet = workbook::read_sheet(bytes, SHEET_SPEC)?;

    let pm_id = sheet.column("pm id")?;
    let mother_code = sheet.column("Mother Code")?;
    let weight_in_gram = sheet.column("Weight in Gram")?;
    let moc = sheet.column("MOC")?;
    let cleaned_material_type = sheet.column("Cleaned Material Type")?;
    let moc_pct = sheet.column("MOC %")?;
    let form = sheet.column("Rigid / Flexible")?;
    let container_capacity = sheet.column("Container Capacity in case of Rigids")?;
    let capacity_uom = sheet.column("Container Capacity UOM")?;

    let mut rows = Vec::new();
    let mut warnings = Vec::new();

    for (row_num, cells) in sheet.rows() {
        let Some(id) = cell_as_string(cells.get(pm_id)) else {
            warnings.push(RowWarning {
                row: row_num,
                detail: "missing 'pm id', row skipped".into(),
            });
            continue;
        };

        let form_raw = cell_as_string(cells.get(form)).unwrap_or_default();

        rows.push(SpecRow {
            row: row_num,
            pm_id: id,
            mother_code: cell_as_string(cells.get(mother_code)).unwrap_or_default(),
            weight_in_gram: defaulted_decimal(
                cells.get(weight_in_gram),
                "Weight in Gram",
                row_num,
                &mut warnings,
            ),
            moc: cell_as_string(cells.get(moc)).unwrap_or_else(|| "NA".into()),
            cleaned_material_type: cell_as_string(cells.get(cleaned_material_type))
                .unwrap_or_else(|| "NA".into()),
            moc_pct: defaulted_decimal(cells.get(moc_pct), "MOC %", row_num, &mut warnings),
            form: PackForm::from_str_loose(&form_raw),
            form_raw,
            container_capacity: optional_decimal(
                cells.get(container_capacity),
                "Container Capacity in case of Rigids",
                row_num,
                &mut warnings,
            ),
            capacity_uom: cell_as_string(cells.get(capacity_uom)),
        });
    }

    Ok((rows, warnings))
}

/// Numeric cell defaulting to 0. Empty cells default silently; cells with
/// non-numeric text default with a warning.
fn defaulted_decimal(
    cell: Option<&Data>,
    column: &str,
    row: u32,
    warnings: &mut Vec<RowWarning>,
) -> Decimal {
    match cell_as_decimal(cell) {
        Some(d) => d,
        None => {
            if let Some(text) = cell_as_string(cell) {
                warnings.push(RowWarning {
                    row,
                    detail: format!("non-numeric '{column}' value '{text}', treated as 0"),
                });
            }
            Decimal::ZERO
        }
    }
}

/// Numeric cell that may legitimately be absent. Non-numeric text is
/// reported and treated as absent.
fn optional_decimal(
    cell: Option<&Data>,
    column: &str,
    row: u32,
    warnings: &mut Vec<RowWarning>,
) -> Option<Decimal> {
    match cell_as_decimal(cell) {
        Some(d) => Some(d),
        None => {
            if let Some(text) = cell_as_string(cell) {
                warnings.push(RowWarning {
                    row,
                    detail: format!("non-numeric '{column}' value '{text}', ignored"),
                });
            }
            None
        }
    }
}
