//! End-to-end tests for the three-stage pipeline.
//!
//! Input workbooks are built in memory with rust_xlsxwriter and fed
//! straight into the stage entry points, so no fixture files are needed.

use footprint_core::error::FootprintError;
use footprint_core::model::{CapacityBucket, EprCategory};
use footprint_core::workbook::table::{enriched_view, Cell};
use footprint_core::workbook::{self, writer, SHEET_OUTPUT};
use footprint_core::{aggregate_sales, classify_spec, normalize_bom};
use rust_decimal_macros::dec;
use rust_xlsxwriter::Workbook;

fn bom_workbook() -> Vec<u8> {
    let mut workbook = Workbook::new();
    let ws = workbook.add_worksheet();
    ws.set_name("BOM").unwrap();
    let headers = [
        "SKU ID",
        "SKU Name",
        "Family Code",
        "Family Description",
        "pm id",
        "MaterialDescription",
        "Number per case",
        "Consumption per case",
    ];
    for (col, h) in headers.iter().enumerate() {
        ws.write_string(0, col as u16, *h).unwrap();
    }
    ws.write_string(1, 0, "S1").unwrap();
    ws.write_string(1, 1, "Cleaner 500ml").unwrap();
    ws.write_string(1, 2, "F10").unwrap();
    ws.write_string(1, 3, "Household").unwrap();
    ws.write_string(1, 4, "P1").unwrap();
    ws.write_string(1, 5, "Bottle 500ml").unwrap();
    ws.write_number(1, 6, 10.0).unwrap();
    ws.write_number(1, 7, 2.0).unwrap();
    workbook.save_to_buffer().unwrap()
}

fn spec_workbook() -> Vec<u8> {
    let mut workbook = Workbook::new();
    let ws = workbook.add_worksheet();
    ws.set_name("Material Spec Sheet").unwrap();
    let headers = [
        "pm id",
        "Mother Code",
        "Weight in Gram",
        "MOC",
        "Cleaned Material Type",
        "MOC %",
        "Rigid / Flexible",
        "Container Capacity in case of Rigids",
        "Container Capacity UOM",
    ];
    for (col, h) in headers.iter().enumerate() {
        ws.write_string(0, col as u16, *h).unwrap();
    }
    ws.write_string(1, 0, "P1").unwrap();
    ws.write_string(1, 1, "M-001").unwrap();
    ws.write_number(1, 2, 50.0).unwrap();
    ws.write_string(1, 3, "bottle body").unwrap();
    ws.write_string(1, 4, "PP- Polypropylene").unwrap();
    ws.write_number(1, 5, 100.0).unwrap();
    ws.write_string(1, 6, "Rigid").unwrap();
    ws.write_number(1, 7, 5000.0).unwrap();
    ws.write_string(1, 8, "G").unwrap();
    workbook.save_to_buffer().unwrap()
}

fn sales_workbook() -> Vec<u8> {
    let mut workbook = Workbook::new();
    let ws = workbook.add_worksheet();
    ws.set_name("Sales Data").unwrap();
    for (col, h) in ["Period", "yyyymm", "INV_MATERIALCODE", "SalesQty"]
        .iter()
        .enumerate()
    {
        ws.write_string(0, col as u16, *h).unwrap();
    }
    ws.write_string(1, 0, "Q1 FY24").unwrap();
    ws.write_string(1, 1, "202403").unwrap();
    ws.write_string(1, 2, "S1").unwrap();
    ws.write_number(1, 3, 1000.0).unwrap();
    workbook.save_to_buffer().unwrap()
}

// ---------------------------------------------------------------------------
// Full pipeline: BOM -> spec -> sales, checking every derived field
// ---------------------------------------------------------------------------
#[test]
fn full_pipeline_end_to_end() {
    let bom = normalize_bom(&bom_workbook()).unwrap();
    assert_eq!(bom.records.len(), 1);
    assert_eq!(bom.records[0].consumption_per_unit, dec!(0.2));

    let spec = classify_spec(&spec_workbook()).unwrap();
    assert_eq!(spec.records.len(), 1);
    let s = &spec.records[0];
    assert_eq!(s.category, EprCategory::CatI);
    assert_eq!(s.capacity_kg_lt, Some(dec!(5.0)));
    assert_eq!(s.capacity_bucket, Some(CapacityBucket::Large));

    let table = aggregate_sales(&sales_workbook(), &bom.records, &spec.records).unwrap();
    assert_eq!(table.rows.len(), 1);
    let row = &table.rows[0];
    assert_eq!(row.sales.quarter, "Q1");
    assert_eq!(row.sales.fy_year, "FY24");
    assert_eq!(row.sales.month, "Mar");
    assert_eq!(row.sales.year, "2024");
    // 0.2 * 1000 * 50 / 1_000_000
    assert_eq!(row.footprint, Some(dec!(0.01)));
    assert_eq!(table.total_footprint, dec!(0.01));
    assert_eq!(table.unmatched_bom, 0);
    assert_eq!(table.unmatched_spec, 0);
}

// ---------------------------------------------------------------------------
// The written workbook carries the total row and round-trips
// ---------------------------------------------------------------------------
#[test]
fn written_workbook_has_total_row() {
    let bom = normalize_bom(&bom_workbook()).unwrap();
    let spec = classify_spec(&spec_workbook()).unwrap();
    let table = aggregate_sales(&sales_workbook(), &bom.records, &spec.records).unwrap();

    let view = enriched_view(&table);
    let bytes = writer::to_xlsx(&view, SHEET_OUTPUT).unwrap();

    let sheet = workbook::read_sheet(&bytes, SHEET_OUTPUT).unwrap();
    let sku_name = sheet.column("SKU Name").unwrap();
    let footprint = sheet.column("Footprint").unwrap();

    let rows: Vec<_> = sheet.rows().collect();
    assert_eq!(rows.len(), 2);

    let (_, total_cells) = rows.last().unwrap();
    assert_eq!(
        workbook::cell_as_string(total_cells.get(sku_name)),
        Some("Total".into())
    );
    assert_eq!(
        workbook::cell_as_decimal(total_cells.get(footprint)),
        Some(dec!(0.01))
    );
    // every other cell of the total row is blank
    for (col, _) in total_cells.iter().enumerate() {
        if col != sku_name && col != footprint {
            assert_eq!(workbook::cell_as_string(total_cells.get(col)), None);
        }
    }
}

// ---------------------------------------------------------------------------
// Unmatched sales rows survive with empty fields and no footprint
// ---------------------------------------------------------------------------
#[test]
fn unmatched_sales_row_keeps_nulls() {
    let mut workbook = Workbook::new();
    let ws = workbook.add_worksheet();
    ws.set_name("Sales Data").unwrap();
    for (col, h) in ["Period", "yyyymm", "INV_MATERIALCODE", "SalesQty"]
        .iter()
        .enumerate()
    {
        ws.write_string(0, col as u16, *h).unwrap();
    }
    ws.write_string(1, 0, "Q2 FY24").unwrap();
    ws.write_string(1, 1, "202406").unwrap();
    ws.write_string(1, 2, "UNKNOWN").unwrap();
    ws.write_number(1, 3, 5.0).unwrap();
    let sales_bytes = workbook.save_to_buffer().unwrap();

    let bom = normalize_bom(&bom_workbook()).unwrap();
    let spec = classify_spec(&spec_workbook()).unwrap();
    let table = aggregate_sales(&sales_bytes, &bom.records, &spec.records).unwrap();

    assert_eq!(table.rows.len(), 1);
    assert!(table.rows[0].bom.is_none());
    assert!(table.rows[0].footprint.is_none());
    assert_eq!(table.unmatched_bom, 1);
    assert_eq!(table.total_footprint, dec!(0));

    // the view renders the BOM/spec gap as empty cells
    let view = enriched_view(&table);
    let sku_id_col = view.headers.iter().position(|h| *h == "SKU ID").unwrap();
    assert_eq!(view.rows[0][sku_id_col], Cell::Empty);
}

// ---------------------------------------------------------------------------
// Wrong workbook kind fails with a missing-sheet error
// ---------------------------------------------------------------------------
#[test]
fn wrong_sheet_is_rejected() {
    let err = aggregate_sales(&bom_workbook(), &[], &[]).unwrap_err();
    assert!(matches!(err, FootprintError::MissingSheet { .. }));
}
