//! Flat tabular views of the typed result records.
//!
//! Both the xlsx writer and the gateway's HTML previews render the same
//! `TableView`, so the column layout is defined in exactly one place.

use rust_decimal::Decimal;

use crate::model::{BomRecord, EnrichedTable, SpecRecord};

/// One output cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(Decimal),
}

impl Cell {
    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    fn opt_number(d: Option<Decimal>) -> Cell {
        match d {
            Some(d) => Cell::Number(d),
            None => Cell::Empty,
        }
    }

    /// Rendered form, as it would appear in a preview.
    pub fn display(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(d) => d.to_string(),
        }
    }
}

/// A header row plus data rows, ready for rendering.
#[derive(Debug, Clone)]
pub struct TableView {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<Cell>>,
}

pub const BOM_HEADERS: &[&str] = &[
    "SKU ID",
    "SKU Name",
    "Family Code",
    "Family Description",
    "pm id",
    "MaterialDescription",
    "Number per case",
    "Consumption per case",
    "Consumption per Consumer IT",
];

pub const SPEC_HEADERS: &[&str] = &[
    "pm id",
    "Mother Code",
    "Weight in Gram",
    "MOC",
    "Cleaned Material Type",
    "MOC %",
    "Rigid / Flexible",
    "Container Capacity in case of Rigids",
    "Container Capacity UOM",
    "Material Class",
    "Category",
    "Container Capacity in KG / LT",
    "Container Capacity",
];

pub const ENRICHED_HEADERS: &[&str] = &[
    "yyyymm",
    "INV_MATERIALCODE",
    "SalesQty",
    "Quarter",
    "FY Year",
    "Month",
    "Year",
    "SKU ID",
    "SKU Name",
    "Family Code",
    "Family Description",
    "pm id",
    "MaterialDescription",
    "Number per case",
    "Consumption per case",
    "Consumption per Consumer IT",
    "Mother Code",
    "Weight in Gram",
    "MOC",
    "Cleaned Material Type",
    "MOC %",
    "Rigid / Flexible",
    "Material Class",
    "Category",
    "Container Capacity",
    "Footprint",
];

pub fn bom_view(records: &[BomRecord]) -> TableView {
    let rows = records
        .iter()
        .map(|r| {
            vec![
                Cell::text(&r.sku_id),
                Cell::text(&r.sku_name),
                Cell::text(&r.family_code),
                Cell::text(&r.family_description),
                Cell::text(&r.pm_id),
                Cell::text(&r.material_description),
                Cell::Number(r.number_per_case),
                Cell::Number(r.consumption_per_case),
                Cell::Number(r.consumption_per_unit),
            ]
        })
        .collect();

    TableView {
        headers: BOM_HEADERS.to_vec(),
        rows,
    }
}

pub fn spec_view(records: &[SpecRecord]) -> TableView {
    let rows = records
        .iter()
        .map(|r| {
            vec![
                Cell::text(&r.pm_id),
                Cell::text(&r.mother_code),
                Cell::Number(r.weight_in_gram),
                Cell::text(&r.moc),
                Cell::text(&r.cleaned_material_type),
                Cell::Number(r.moc_pct),
                Cell::text(&r.form_raw),
                Cell::opt_number(r.container_capacity),
                match &r.capacity_uom {
                    Some(uom) => Cell::text(uom),
                    None => Cell::Empty,
                },
                Cell::text(&r.material_class.to_string()),
                Cell::text(&r.category.to_string()),
                Cell::opt_number(r.capacity_kg_lt),
                match r.capacity_bucket {
                    Some(bucket) => Cell::text(&bucket.to_string()),
                    None => Cell::Empty,
                },
            ]
        })
        .collect();

    TableView {
        headers: SPEC_HEADERS.to_vec(),
        rows,
    }
}

/// The enriched sales table, including the trailing grand-total row.
pub fn enriched_view(table: &EnrichedTable) -> TableView {
    let mut rows: Vec<Vec<Cell>> = table
        .rows
        .iter()
        .map(|r| {
            let mut cells = vec![
                Cell::text(&r.sales.yyyymm),
                Cell::text(&r.sales.inv_material_code),
                Cell::Number(r.sales.sales_qty),
                Cell::text(&r.sales.quarter),
                Cell::text(&r.sales.fy_year),
                Cell::text(&r.sales.month),
                Cell::text(&r.sales.year),
            ];

            match &r.bom {
                Some(b) => cells.extend([
                    Cell::text(&b.sku_id),
                    Cell::text(&b.sku_name),
                    Cell::text(&b.family_code),
                    Cell::text(&b.family_description),
                    Cell::text(&b.pm_id),
                    Cell::text(&b.material_description),
                    Cell::Number(b.number_per_case),
                    Cell::Number(b.consumption_per_case),
                    Cell::Number(b.consumption_per_unit),
                ]),
                None => cells.extend((0..9).map(|_| Cell::Empty)),
            }

            match &r.spec {
                Some(s) => cells.extend([
                    Cell::text(&s.mother_code),
                    Cell::Number(s.weight_in_gram),
                    Cell::text(&s.moc),
                    Cell::text(&s.cleaned_material_type),
                    Cell::Number(s.moc_pct),
                    Cell::text(&s.form_raw),
                    Cell::text(&s.material_class.to_string()),
                    Cell::text(&s.category.to_string()),
                    match s.capacity_bucket {
                        Some(bucket) => Cell::text(&bucket.to_string()),
                        None => Cell::Empty,
                    },
                ]),
                None => cells.extend((0..9).map(|_| Cell::Empty)),
            }

            cells.push(Cell::opt_number(r.footprint));
            cells
        })
        .collect();

    // Trailing total row: only "SKU Name" and "Footprint" are populated.
    let mut total = vec![Cell::Empty; ENRICHED_HEADERS.len()];
    for (header, cell) in ENRICHED_HEADERS.iter().zip(total.iter_mut()) {
        match *header {
            "SKU Name" => *cell = Cell::text("Total"),
            "Footprint" => *cell = Cell::Number(table.total_footprint),
            _ => {}
        }
    }
    rows.push(total);

    TableView {
        headers: ENRICHED_HEADERS.to_vec(),
        rows,
    }
}
