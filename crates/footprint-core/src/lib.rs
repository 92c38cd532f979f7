pub mod bom;
pub mod classify;
pub mod error;
pub mod ingest;
pub mod lookup;
pub mod model;
pub mod sales;
pub mod workbook;

use serde::{Deserialize, Serialize};

use error::FootprintError;
use model::{BomRecord, EnrichedTable, RowWarning, SpecRecord};

/// Output of the BOM normalization stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BomTable {
    pub records: Vec<BomRecord>,
    pub warnings: Vec<RowWarning>,
}

/// Output of the spec classification stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecTable {
    pub records: Vec<SpecRecord>,
    pub warnings: Vec<RowWarning>,
}

/// Stage 1: read a raw BOM workbook and derive per-unit consumption.
pub fn normalize_bom(bytes: &[u8]) -> Result<BomTable, FootprintError> {
    let (rows, warnings) = ingest::bom::read_bom(bytes)?;
    let records = bom::normalize(rows)?;
    tracing::debug!(
        records = records.len(),
        warnings = warnings.len(),
        "normalized BOM table"
    );
    Ok(BomTable { records, warnings })
}

/// Stage 2: read a raw material-spec workbook, classify materials and
/// derive EPR categories and capacity buckets.
pub fn classify_spec(bytes: &[u8]) -> Result<SpecTable, FootprintError> {
    let (rows, mut warnings) = ingest::spec::read_spec(bytes)?;
    let classified = classify::classify(rows);
    warnings.extend(classified.warnings);
    tracing::debug!(
        records = classified.records.len(),
        warnings = warnings.len(),
        "classified spec table"
    );
    Ok(SpecTable {
        records: classified.records,
        warnings,
    })
}

/// Stage 3: read a raw sales workbook and join it against the outputs
/// of stages 1 and 2, producing the enriched table with its grand total.
pub fn aggregate_sales(
    bytes: &[u8],
    bom: &[BomRecord],
    spec: &[SpecRecord],
) -> Result<EnrichedTable, FootprintError> {
    let (rows, warnings) = ingest::sales::read_sales(bytes)?;
    for w in &warnings {
        tracing::warn!(row = w.row, "{}", w.detail);
    }
    let table = sales::aggregate(rows, bom, spec)?;
    tracing::debug!(
        rows = table.rows.len(),
        total = %table.total_footprint,
        "aggregated sales table"
    );
    Ok(table)
}
