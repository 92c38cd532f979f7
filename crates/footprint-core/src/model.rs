use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Physical form of a packaging material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackForm {
    Rigid,
    Flexible,
    /// Anything that is neither "rigid" nor "flexible" (including blank).
    Other(String),
}

impl PackForm {
    pub fn from_str_loose(s: &str) -> PackForm {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "rigid" => PackForm::Rigid,
            "flexible" => PackForm::Flexible,
            _ => PackForm::Other(lower),
        }
    }
}

impl fmt::Display for PackForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackForm::Rigid => write!(f, "rigid"),
            PackForm::Flexible => write!(f, "flexible"),
            PackForm::Other(s) => write!(f, "{s}"),
        }
    }
}

/// Coarse material class assigned via the classification table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaterialClass {
    Plastic,
    Metal,
    #[serde(rename = "NA")]
    Na,
}

impl fmt::Display for MaterialClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaterialClass::Plastic => write!(f, "Plastic"),
            MaterialClass::Metal => write!(f, "Metal"),
            MaterialClass::Na => write!(f, "NA"),
        }
    }
}

/// EPR category of a packaging material, derived from its plastic share
/// and physical form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EprCategory {
    #[serde(rename = "NA")]
    Na,
    #[serde(rename = "Cat I")]
    CatI,
    #[serde(rename = "Cat II")]
    CatII,
    #[serde(rename = "Cat III")]
    CatIII,
    Unclassified,
}

impl fmt::Display for EprCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EprCategory::Na => write!(f, "NA"),
            EprCategory::CatI => write!(f, "Cat I"),
            EprCategory::CatII => write!(f, "Cat II"),
            EprCategory::CatIII => write!(f, "Cat III"),
            EprCategory::Unclassified => write!(f, "Unclassified"),
        }
    }
}

/// Container capacity bucket for rigid packaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CapacityBucket {
    /// Flexible packaging has no capacity bucket.
    #[serde(rename = "NA")]
    Na,
    #[serde(rename = "containers < 0.9L")]
    Small,
    #[serde(rename = "containers > 0.9L and < 4.9L")]
    Medium,
    #[serde(rename = "containers > 4.9L")]
    Large,
}

impl fmt::Display for CapacityBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapacityBucket::Na => write!(f, "NA"),
            CapacityBucket::Small => write!(f, "containers < 0.9L"),
            CapacityBucket::Medium => write!(f, "containers > 0.9L and < 4.9L"),
            CapacityBucket::Large => write!(f, "containers > 4.9L"),
        }
    }
}

/// A soft per-row anomaly collected during ingestion or classification.
///
/// Warnings never abort a batch; they are surfaced so that defaulted or
/// skipped cells are reported with a count instead of disappearing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowWarning {
    /// 1-based sheet row the warning refers to.
    pub row: u32,
    pub detail: String,
}

/// Raw BOM row as read from the "BOM" sheet.
#[derive(Debug, Clone)]
pub struct BomRow {
    /// 1-based sheet row, for error context.
    pub row: u32,
    pub sku_id: String,
    pub sku_name: String,
    pub family_code: String,
    pub family_description: String,
    pub pm_id: String,
    pub material_description: String,
    pub number_per_case: Decimal,
    pub consumption_per_case: Decimal,
}

/// A normalized BOM record with the derived per-consumer-unit consumption.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BomRecord {
    pub sku_id: String,
    pub sku_name: String,
    pub family_code: String,
    pub family_description: String,
    pub pm_id: String,
    pub material_description: String,
    pub number_per_case: Decimal,
    pub consumption_per_case: Decimal,
    /// `consumption_per_case / number_per_case`.
    pub consumption_per_unit: Decimal,
}

/// Raw material-spec row as read from the "Material Spec Sheet" sheet,
/// with ingest defaults already applied (missing MOC and material type
/// become "NA", missing weight becomes 0).
#[derive(Debug, Clone)]
pub struct SpecRow {
    /// 1-based sheet row, for error context.
    pub row: u32,
    pub pm_id: String,
    pub mother_code: String,
    pub weight_in_gram: Decimal,
    pub moc: String,
    pub cleaned_material_type: String,
    pub moc_pct: Decimal,
    /// "Rigid / Flexible" cell exactly as it appeared.
    pub form_raw: String,
    pub form: PackForm,
    pub container_capacity: Option<Decimal>,
    pub capacity_uom: Option<String>,
}

/// A classified spec record: the raw row plus everything the classifier
/// derives (material class, EPR category, converted capacity and bucket).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecRecord {
    pub pm_id: String,
    pub mother_code: String,
    pub weight_in_gram: Decimal,
    pub moc: String,
    pub cleaned_material_type: String,
    pub moc_pct: Decimal,
    pub form_raw: String,
    pub form: PackForm,
    pub container_capacity: Option<Decimal>,
    pub capacity_uom: Option<String>,
    pub material_class: MaterialClass,
    pub category: EprCategory,
    /// Capacity converted to KG/LT; `None` when the UOM had no
    /// conversion factor or no capacity was given.
    pub capacity_kg_lt: Option<Decimal>,
    pub capacity_bucket: Option<CapacityBucket>,
}

/// Raw sales row as read from the "Sales Data" sheet.
#[derive(Debug, Clone)]
pub struct SalesRow {
    /// 1-based sheet row, for error context.
    pub row: u32,
    pub period: String,
    pub yyyymm: String,
    pub inv_material_code: String,
    pub sales_qty: Decimal,
}

/// A sales record with the derived period fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesRecord {
    pub quarter: String,
    pub fy_year: String,
    pub month: String,
    pub year: String,
    pub yyyymm: String,
    pub inv_material_code: String,
    pub sales_qty: Decimal,
}

/// One row of the final enriched sales table. BOM and spec fields are
/// absent when the corresponding join found no match, and the footprint
/// is only defined when both joins succeeded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedRow {
    pub sales: SalesRecord,
    pub bom: Option<BomRecord>,
    pub spec: Option<SpecRecord>,
    pub footprint: Option<Decimal>,
}

/// The full enriched sales table plus its grand total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedTable {
    pub rows: Vec<EnrichedRow>,
    /// Sum of all defined footprints, rounded to 3 decimal places.
    pub total_footprint: Decimal,
    /// Sales rows with no matching BOM record.
    pub unmatched_bom: usize,
    /// Sales rows whose BOM matched but whose pm id had no spec rows.
    pub unmatched_spec: usize,
}
