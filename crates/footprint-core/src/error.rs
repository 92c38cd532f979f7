#[derive(Debug, thiserror::Error)]
pub enum FootprintError {
    #[error("not a readable xlsx workbook: {0}")]
    FileFormat(String),

    #[error("sheet '{sheet}' not found in workbook: {detail}")]
    MissingSheet { sheet: String, detail: String },

    #[error("sheet '{sheet}': required column '{column}' not found in header row")]
    MissingColumn { sheet: String, column: String },

    #[error("sheet '{sheet}', row {row}: {detail}")]
    Schema { sheet: String, row: u32, detail: String },

    #[error("sheet '{sheet}', row {row}: {detail}")]
    Computation { sheet: String, row: u32, detail: String },

    #[error("failed to write workbook: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FootprintError {
    pub fn schema(sheet: &str, row: u32, detail: impl Into<String>) -> Self {
        FootprintError::Schema {
            sheet: sheet.to_string(),
            row,
            detail: detail.into(),
        }
    }

    pub fn computation(sheet: &str, row: u32, detail: impl Into<String>) -> Self {
        FootprintError::Computation {
            sheet: sheet.to_string(),
            row,
            detail: detail.into(),
        }
    }
}
