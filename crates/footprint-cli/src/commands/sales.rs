use std::path::PathBuf;

use footprint_core::error::FootprintError;
use footprint_core::workbook::{table, writer, SHEET_OUTPUT};

use crate::output;

pub fn run(
    input_file: PathBuf,
    bom_path: PathBuf,
    spec_path: PathBuf,
    output_format: &str,
    out: PathBuf,
) -> Result<(), FootprintError> {
    let bom = footprint_core::normalize_bom(&std::fs::read(&bom_path)?)?;
    let spec = footprint_core::classify_spec(&std::fs::read(&spec_path)?)?;
    let enriched =
        footprint_core::aggregate_sales(&std::fs::read(&input_file)?, &bom.records, &spec.records)?;

    let view = table::enriched_view(&enriched);
    let xlsx = writer::to_xlsx(&view, SHEET_OUTPUT)?;
    writer::save_atomic(&xlsx, &out)?;

    match output_format {
        "json" => output::json::print(&enriched)?,
        _ => {
            output::table::print_view(&view, &[]);
            println!();
            println!(
                "Total footprint: {} ({} rows, {} without BOM match, {} without spec match)",
                enriched.total_footprint,
                enriched.rows.len(),
                enriched.unmatched_bom,
                enriched.unmatched_spec
            );
        }
    }

    eprintln!("Wrote {}", out.display());

    Ok(())
}
