use std::path::PathBuf;

use footprint_core::error::FootprintError;
use footprint_core::workbook::{table, writer, SHEET_BOM};

use crate::output;

pub fn run(
    input_file: PathBuf,
    output_format: &str,
    out: Option<PathBuf>,
) -> Result<(), FootprintError> {
    let bytes = std::fs::read(&input_file)?;
    let bom = footprint_core::normalize_bom(&bytes)?;
    let view = table::bom_view(&bom.records);

    if let Some(path) = &out {
        let xlsx = writer::to_xlsx(&view, SHEET_BOM)?;
        writer::save_atomic(&xlsx, path)?;
    }

    match output_format {
        "json" => output::json::print(&bom)?,
        _ => output::table::print_view(&view, &bom.warnings),
    }

    if let Some(path) = out {
        eprintln!("Wrote {}", path.display());
    }

    Ok(())
}
