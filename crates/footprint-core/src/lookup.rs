//! Compiled-in reference tables: material classification, unit
//! conversion and month names.

use crate::model::MaterialClass;
use rust_decimal::Decimal;

/// Cleaned material type -> coarse class. Unlisted labels classify as NA.
const MATERIAL_CLASSES: &[(&str, MaterialClass)] = &[
    ("HDPE- High-Density Polyethylene", MaterialClass::Plastic),
    ("NA", MaterialClass::Na),
    ("PP- Polypropylene", MaterialClass::Plastic),
    ("PET-Polyethylene Terephthalate", MaterialClass::Plastic),
    ("AL- Aluminium", MaterialClass::Metal),
    ("LDPE- Low-Density Polyethylene", MaterialClass::Plastic),
];

/// Classify a cleaned material type label.
pub fn material_class(cleaned_material_type: &str) -> MaterialClass {
    let key = cleaned_material_type.trim();
    MATERIAL_CLASSES
        .iter()
        .find(|(label, _)| *label == key)
        .map(|(_, class)| *class)
        .unwrap_or(MaterialClass::Na)
}

/// Multiplying factor that converts a container capacity in the given
/// UOM to KG/LT. Returns `None` for units without a known factor.
pub fn conversion_factor(uom: &str) -> Option<Decimal> {
    match uom.trim().to_ascii_uppercase().as_str() {
        "LT" | "KG" => Some(Decimal::ONE),
        "G" => Some(Decimal::new(1, 3)),
        "MG" => Some(Decimal::new(1, 6)),
        _ => None,
    }
}

/// Short month name for a two-digit month code.
pub fn month_name(code: &str) -> Option<&'static str> {
    match code {
        "01" => Some("Jan"),
        "02" => Some("Feb"),
        "03" => Some("Mar"),
        "04" => Some("Apr"),
        "05" => Some("May"),
        "06" => Some("Jun"),
        "07" => Some("Jul"),
        "08" => Some("Aug"),
        "09" => Some("Sept"),
        "10" => Some("Oct"),
        "11" => Some("Nov"),
        "12" => Some("Dec"),
        _ => None,
    }
}
