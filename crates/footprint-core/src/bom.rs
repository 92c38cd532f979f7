//! BOM normalization: derive the per-consumer-unit consumption figure.

use crate::error::FootprintError;
use crate::model::{BomRecord, BomRow};
use crate::workbook::SHEET_BOM;

/// Derive `Consumption per Consumer IT` for every BOM row.
///
/// A zero `Number per case` fails the whole batch: the upload is
/// rejected rather than persisting a table with undefined figures.
pub fn normalize(rows: Vec<BomRow>) -> Result<Vec<BomRecord>, FootprintError> {
    rows.into_iter()
        .map(|r| {
            if r.number_per_case.is_zero() {
                return Err(FootprintError::computation(
                    SHEET_BOM,
                    r.row,
                    format!("'Number per case' is zero for SKU '{}'", r.sku_id),
                ));
            }
            let consumption_per_unit = r.consumption_per_case / r.number_per_case;
            Ok(BomRecord {
                sku_id: r.sku_id,
                sku_name: r.sku_name,
                family_code: r.family_code,
                family_description: r.family_description,
                pm_id: r.pm_id,
                material_description: r.material_description,
                number_per_case: r.number_per_case,
                consumption_per_case: r.consumption_per_case,
                consumption_per_unit,
            })
        })
        .collect()
}
