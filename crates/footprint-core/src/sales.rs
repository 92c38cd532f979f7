//! Sales aggregation: period decomposition, joins against the
//! normalized BOM and classified spec tables, per-row footprint and the
//! grand total.

use std::collections::HashMap;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::FootprintError;
use crate::lookup::month_name;
use crate::model::{BomRecord, EnrichedRow, EnrichedTable, SalesRecord, SalesRow, SpecRecord};
use crate::workbook::SHEET_SALES;

const FOOTPRINT_DIVISOR: i64 = 1_000_000;

/// Join sales rows to the BOM and spec tables and compute footprints.
///
/// Both joins are left joins: a sales row without a BOM match (or whose
/// pm id has no spec rows) is kept with empty fields and no footprint.
/// The spec join is one-to-many: a sales row fans out into one enriched
/// row per sub-component of its packaging material.
pub fn aggregate(
    sales: Vec<SalesRow>,
    bom: &[BomRecord],
    spec: &[SpecRecord],
) -> Result<EnrichedTable, FootprintError> {
    // first occurrence wins; BOM is expected to be unique per SKU
    let mut bom_by_sku: HashMap<&str, &BomRecord> = HashMap::new();
    for b in bom {
        bom_by_sku.entry(b.sku_id.as_str()).or_insert(b);
    }

    let mut spec_by_pm: HashMap<&str, Vec<&SpecRecord>> = HashMap::new();
    for s in spec {
        spec_by_pm.entry(s.pm_id.as_str()).or_default().push(s);
    }

    let mut rows = Vec::new();
    let mut unmatched_bom = 0usize;
    let mut unmatched_spec = 0usize;

    for raw in sales {
        let record = decompose(raw)?;

        let Some(bom_match) = bom_by_sku.get(record.inv_material_code.as_str()) else {
            unmatched_bom += 1;
            rows.push(EnrichedRow {
                sales: record,
                bom: None,
                spec: None,
                footprint: None,
            });
            continue;
        };

        match spec_by_pm.get(bom_match.pm_id.as_str()) {
            Some(spec_matches) => {
                for spec_match in spec_matches {
                    let footprint = bom_match.consumption_per_unit
                        * record.sales_qty
                        * spec_match.weight_in_gram
                        / Decimal::from(FOOTPRINT_DIVISOR);
                    rows.push(EnrichedRow {
                        sales: record.clone(),
                        bom: Some((*bom_match).clone()),
                        spec: Some((*spec_match).clone()),
                        footprint: Some(footprint),
                    });
                }
            }
            None => {
                unmatched_spec += 1;
                rows.push(EnrichedRow {
                    sales: record,
                    bom: Some((*bom_match).clone()),
                    spec: None,
                    footprint: None,
                });
            }
        }
    }

    // undefined footprints count as zero in the grand total
    let total: Decimal = rows.iter().filter_map(|r| r.footprint).sum();
    let total_footprint = total.round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero);

    if unmatched_bom > 0 || unmatched_spec > 0 {
        tracing::warn!(
            unmatched_bom,
            unmatched_spec,
            "sales rows without a full join"
        );
    }

    Ok(EnrichedTable {
        rows,
        total_footprint,
        unmatched_bom,
        unmatched_spec,
    })
}

/// Derive the period fields for one sales row.
fn decompose(raw: SalesRow) -> Result<SalesRecord, FootprintError> {
    let (quarter, fy_year) = split_period(&raw.period, raw.row)?;
    let (year, month) = split_yyyymm(&raw.yyyymm, raw.row)?;
    Ok(SalesRecord {
        quarter,
        fy_year,
        month,
        year,
        yyyymm: raw.yyyymm,
        inv_material_code: raw.inv_material_code,
        sales_qty: raw.sales_qty,
    })
}

/// `Period` must be exactly "<Quarter> <FY Year>".
fn split_period(period: &str, row: u32) -> Result<(String, String), FootprintError> {
    let mut tokens = period.split_whitespace();
    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(quarter), Some(fy_year), None) => {
            Ok((quarter.to_string(), fy_year.to_string()))
        }
        _ => Err(FootprintError::schema(
            SHEET_SALES,
            row,
            format!("'Period' must be '<Quarter> <FY Year>', got '{period}'"),
        )),
    }
}

/// `yyyymm` must stringify to six ASCII digits. The month code maps
/// through the fixed table; unmapped codes pass through unchanged.
fn split_yyyymm(yyyymm: &str, row: u32) -> Result<(String, String), FootprintError> {
    let s = yyyymm.trim();
    if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FootprintError::schema(
            SHEET_SALES,
            row,
            format!("'yyyymm' must be six digits, got '{yyyymm}'"),
        ));
    }
    let year = s[..4].to_string();
    let code = &s[4..];
    let month = month_name(code)
        .map(str::to_string)
        .unwrap_or_else(|| code.to_string());
    Ok((year, month))
}
