//! Spec classification: material-class assignment, composition pivot,
//! EPR categorisation and container-capacity bucketing.

use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::lookup::{conversion_factor, material_class};
use crate::model::{
    CapacityBucket, EprCategory, MaterialClass, PackForm, RowWarning, SpecRecord, SpecRow,
};

/// Composition pivot entry for one (pm id, physical form) pair.
///
/// Class sums are rounded to whole percent before categorisation.
#[derive(Debug, Clone)]
pub struct PivotRow {
    pub pm_id: String,
    /// Trimmed, lowercased "Rigid / Flexible" key.
    pub form: String,
    pub plastic: Decimal,
    pub metal: Decimal,
    pub na: Decimal,
    pub total: Decimal,
    pub considered_under_epr: bool,
    pub category: EprCategory,
}

/// Classifier output: one record per input row plus soft warnings
/// (currently only unconvertible container capacities).
#[derive(Debug, Clone)]
pub struct ClassifiedSpec {
    pub records: Vec<SpecRecord>,
    pub warnings: Vec<RowWarning>,
}

/// Classify all spec rows. Never fails: every decision-table outcome is
/// a typed category, with `Unclassified` as the fallback.
pub fn classify(rows: Vec<SpecRow>) -> ClassifiedSpec {
    let pivot = build_pivot(&rows);
    let mut warnings = Vec::new();

    let records = rows
        .into_iter()
        .map(|r| {
            let class = material_class(&r.cleaned_material_type);
            let form_key = r.form_raw.trim().to_lowercase();
            let category = category_for(&pivot, &r.pm_id, &form_key);

            let factor = r.capacity_uom.as_deref().and_then(conversion_factor);
            if r.container_capacity.is_some() && factor.is_none() {
                let uom = r.capacity_uom.as_deref().unwrap_or("");
                warnings.push(RowWarning {
                    row: r.row,
                    detail: format!(
                        "no conversion factor for UOM '{uom}', capacity left undefined"
                    ),
                });
            }
            let capacity_kg_lt = match (r.container_capacity, factor) {
                (Some(capacity), Some(factor)) => Some(capacity * factor),
                _ => None,
            };
            let capacity_bucket = if r.form == PackForm::Flexible {
                Some(CapacityBucket::Na)
            } else {
                capacity_kg_lt.map(bucket_for)
            };

            SpecRecord {
                pm_id: r.pm_id,
                mother_code: r.mother_code,
                weight_in_gram: r.weight_in_gram,
                moc: r.moc,
                cleaned_material_type: r.cleaned_material_type,
                moc_pct: r.moc_pct,
                form_raw: r.form_raw,
                form: r.form,
                container_capacity: r.container_capacity,
                capacity_uom: r.capacity_uom,
                material_class: class,
                category,
                capacity_kg_lt,
                capacity_bucket,
            }
        })
        .collect();

    ClassifiedSpec { records, warnings }
}

/// Group by (pm id, form), sum `MOC %` per material class, round to
/// whole percent, and derive the per-pair EPR category.
pub fn build_pivot(rows: &[SpecRow]) -> Vec<PivotRow> {
    let mut sums: BTreeMap<(String, String), (Decimal, Decimal, Decimal)> = BTreeMap::new();

    for r in rows {
        let key = (r.pm_id.clone(), r.form_raw.trim().to_lowercase());
        let entry = sums.entry(key).or_default();
        match material_class(&r.cleaned_material_type) {
            MaterialClass::Plastic => entry.0 += r.moc_pct,
            MaterialClass::Metal => entry.1 += r.moc_pct,
            MaterialClass::Na => entry.2 += r.moc_pct,
        }
    }

    sums.into_iter()
        .map(|((pm_id, form), (plastic, metal, na))| {
            let plastic = round_whole(plastic);
            let metal = round_whole(metal);
            let na = round_whole(na);
            let total = plastic + metal + na;
            let considered_under_epr = plastic > Decimal::ZERO;
            let category = epr_category(&form, plastic);
            PivotRow {
                pm_id,
                form,
                plastic,
                metal,
                na,
                total,
                considered_under_epr,
                category,
            }
        })
        .collect()
}

/// Half-away-from-zero rounding to whole percent.
fn round_whole(d: Decimal) -> Decimal {
    d.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// The EPR decision table, evaluated in order, first match wins.
fn epr_category(form: &str, plastic: Decimal) -> EprCategory {
    let is_rigid = form == "rigid";
    let is_flexible = form == "flexible";

    if (is_rigid || is_flexible) && plastic.is_zero() {
        EprCategory::Na
    } else if is_rigid && plastic == Decimal::ONE_HUNDRED {
        EprCategory::CatI
    } else if is_flexible && plastic == Decimal::ONE_HUNDRED {
        EprCategory::CatII
    } else if is_flexible && plastic < Decimal::ONE_HUNDRED {
        EprCategory::CatIII
    } else {
        EprCategory::Unclassified
    }
}

/// Category for a sub-component row, merged back by pm id.
///
/// When one pm id carries both rigid and flexible sub-components the
/// pivot entry matching the row's own form wins; otherwise the first
/// entry in key order.
fn category_for(pivot: &[PivotRow], pm_id: &str, form_key: &str) -> EprCategory {
    let mut first = None;
    for p in pivot.iter().filter(|p| p.pm_id == pm_id) {
        if p.form == form_key {
            return p.category;
        }
        if first.is_none() {
            first = Some(p.category);
        }
    }
    first.unwrap_or(EprCategory::Unclassified)
}

fn bucket_for(capacity_kg_lt: Decimal) -> CapacityBucket {
    if capacity_kg_lt < Decimal::new(9, 1) {
        CapacityBucket::Small
    } else if capacity_kg_lt < Decimal::new(49, 1) {
        CapacityBucket::Medium
    } else {
        CapacityBucket::Large
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn row(pm_id: &str, material: &str, pct: Decimal, form: &str) -> SpecRow {
        let form_raw = form.to_string();
        SpecRow {
            row: 2,
            pm_id: pm_id.into(),
            mother_code: "M-001".into(),
            weight_in_gram: dec!(50),
            moc: "film".into(),
            cleaned_material_type: material.into(),
            moc_pct: pct,
            form: PackForm::from_str_loose(&form_raw),
            form_raw,
            container_capacity: None,
            capacity_uom: None,
        }
    }

    #[test]
    fn fully_plastic_rigid_is_cat_i_for_every_subcomponent() {
        let result = classify(vec![
            row("P1", "HDPE- High-Density Polyethylene", dec!(60), "Rigid"),
            row("P1", "PP- Polypropylene", dec!(40), "Rigid"),
        ]);
        assert!(result
            .records
            .iter()
            .all(|r| r.category == EprCategory::CatI));
    }

    #[test]
    fn fully_plastic_flexible_is_cat_ii() {
        let result = classify(vec![row(
            "P1",
            "LDPE- Low-Density Polyethylene",
            dec!(100),
            "Flexible",
        )]);
        assert_eq!(result.records[0].category, EprCategory::CatII);
    }

    #[test]
    fn partially_plastic_flexible_is_cat_iii() {
        let result = classify(vec![
            row("P1", "LDPE- Low-Density Polyethylene", dec!(70), "Flexible"),
            row("P1", "AL- Aluminium", dec!(30), "Flexible"),
        ]);
        assert!(result
            .records
            .iter()
            .all(|r| r.category == EprCategory::CatIII));
    }

    #[test]
    fn zero_plastic_is_na_for_both_forms() {
        let rigid = classify(vec![row("P1", "AL- Aluminium", dec!(100), "Rigid")]);
        assert_eq!(rigid.records[0].category, EprCategory::Na);

        let flexible = classify(vec![row("P1", "AL- Aluminium", dec!(100), "Flexible")]);
        assert_eq!(flexible.records[0].category, EprCategory::Na);
    }

    #[test]
    fn partially_plastic_rigid_is_unclassified() {
        let result = classify(vec![
            row("P1", "PP- Polypropylene", dec!(50), "Rigid"),
            row("P1", "AL- Aluminium", dec!(50), "Rigid"),
        ]);
        assert!(result
            .records
            .iter()
            .all(|r| r.category == EprCategory::Unclassified));
    }

    #[test]
    fn unknown_form_is_unclassified() {
        let result = classify(vec![row("P1", "PP- Polypropylene", dec!(100), "Tube")]);
        assert_eq!(result.records[0].category, EprCategory::Unclassified);
    }

    #[test]
    fn plastic_share_rounds_half_up_before_the_table() {
        // 99.5 rounds to 100 -> Cat I
        let result = classify(vec![
            row("P1", "PP- Polypropylene", dec!(99.5), "Rigid"),
            row("P1", "NA", dec!(0.4), "Rigid"),
        ]);
        assert_eq!(result.records[0].category, EprCategory::CatI);
    }

    #[test]
    fn pivot_totals_and_epr_flag() {
        let pivot = build_pivot(&[
            row("P1", "PP- Polypropylene", dec!(55), "Rigid"),
            row("P1", "AL- Aluminium", dec!(30), "Rigid"),
            row("P1", "NA", dec!(15), "Rigid"),
        ]);
        assert_eq!(pivot.len(), 1);
        let p = &pivot[0];
        assert_eq!(p.plastic, dec!(55));
        assert_eq!(p.metal, dec!(30));
        assert_eq!(p.na, dec!(15));
        assert_eq!(p.total, dec!(100));
        assert!(p.considered_under_epr);
    }

    #[test]
    fn form_casing_does_not_split_the_pivot() {
        let pivot = build_pivot(&[
            row("P1", "PP- Polypropylene", dec!(60), "Rigid"),
            row("P1", "PP- Polypropylene", dec!(40), "RIGID "),
        ]);
        assert_eq!(pivot.len(), 1);
        assert_eq!(pivot[0].plastic, dec!(100));
    }

    #[test]
    fn mixed_form_pm_id_prefers_matching_form() {
        let result = classify(vec![
            row("P1", "PP- Polypropylene", dec!(100), "Rigid"),
            row("P1", "LDPE- Low-Density Polyethylene", dec!(70), "Flexible"),
        ]);
        let rigid = result
            .records
            .iter()
            .find(|r| r.form == PackForm::Rigid)
            .unwrap();
        let flexible = result
            .records
            .iter()
            .find(|r| r.form == PackForm::Flexible)
            .unwrap();
        assert_eq!(rigid.category, EprCategory::CatI);
        assert_eq!(flexible.category, EprCategory::CatIII);
    }

    #[test]
    fn capacity_converts_and_buckets() {
        let mut r = row("P1", "PP- Polypropylene", dec!(100), "Rigid");
        r.container_capacity = Some(dec!(5000));
        r.capacity_uom = Some("G".into());
        let result = classify(vec![r]);
        let rec = &result.records[0];
        assert_eq!(rec.capacity_kg_lt, Some(dec!(5.000)));
        assert_eq!(rec.capacity_bucket, Some(CapacityBucket::Large));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn capacity_bucket_boundaries() {
        assert_eq!(bucket_for(dec!(0.89)), CapacityBucket::Small);
        assert_eq!(bucket_for(dec!(0.9)), CapacityBucket::Medium);
        assert_eq!(bucket_for(dec!(4.89)), CapacityBucket::Medium);
        assert_eq!(bucket_for(dec!(4.9)), CapacityBucket::Large);
    }

    #[test]
    fn flexible_rows_get_na_bucket() {
        let mut r = row("P1", "LDPE- Low-Density Polyethylene", dec!(100), "Flexible");
        r.container_capacity = Some(dec!(2));
        r.capacity_uom = Some("LT".into());
        let result = classify(vec![r]);
        assert_eq!(
            result.records[0].capacity_bucket,
            Some(CapacityBucket::Na)
        );
    }

    #[test]
    fn unknown_uom_null_propagates_with_warning() {
        let mut r = row("P1", "PP- Polypropylene", dec!(100), "Rigid");
        r.container_capacity = Some(dec!(5));
        r.capacity_uom = Some("GAL".into());
        let result = classify(vec![r]);
        let rec = &result.records[0];
        assert_eq!(rec.capacity_kg_lt, None);
        assert_eq!(rec.capacity_bucket, None);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].detail.contains("GAL"));
    }

    #[test]
    fn classification_is_idempotent() {
        let rows = vec![
            row("P1", "PP- Polypropylene", dec!(60), "Rigid"),
            row("P1", "AL- Aluminium", dec!(40), "Rigid"),
            row("P2", "LDPE- Low-Density Polyethylene", dec!(100), "Flexible"),
        ];
        let first = classify(rows);

        // re-derive from the classified records' raw fields
        let rows_again: Vec<SpecRow> = first
            .records
            .iter()
            .map(|rec| SpecRow {
                row: 2,
                pm_id: rec.pm_id.clone(),
                mother_code: rec.mother_code.clone(),
                weight_in_gram: rec.weight_in_gram,
                moc: rec.moc.clone(),
                cleaned_material_type: rec.cleaned_material_type.clone(),
                moc_pct: rec.moc_pct,
                form: rec.form.clone(),
                form_raw: rec.form_raw.clone(),
                container_capacity: rec.container_capacity,
                capacity_uom: rec.capacity_uom.clone(),
            })
            .collect();
        let second = classify(rows_again);

        let categories = |spec: &ClassifiedSpec| -> Vec<EprCategory> {
            spec.records.iter().map(|r| r.category).collect()
        };
        assert_eq!(categories(&first), categories(&second));
    }
}
