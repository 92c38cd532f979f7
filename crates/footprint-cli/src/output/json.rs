use footprint_core::error::FootprintError;
use serde::Serialize;

pub fn print<T: Serialize>(value: &T) -> Result<(), FootprintError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
