use std::path::PathBuf;

use footprint_core::error::FootprintError;
use footprint_core::workbook::{table, writer, SHEET_SPEC};

use crate::output;

pub fn run(
    input_file: PathBuf,
    output_format: &str,
    out: Option<PathBuf>,
) -> Result<(), FootprintError> {
    let bytes = std::fs::read(&input_file)?;
    let spec = footprint_core::classify_spec(&bytes)?;
    let view = table::spec_view(&spec.records);

    if let Some(path) = &out {
        let xlsx = writer::to_xlsx(&view, SHEET_SPEC)?;
        writer::save_atomic(&xlsx, path)?;
    }

    match output_format {
        "json" => output::json::print(&spec)?,
        _ => output::table::print_view(&view, &spec.warnings),
    }

    if let Some(path) = out {
        eprintln!("Wrote {}", path.display());
    }

    Ok(())
}
