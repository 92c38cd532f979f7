use std::path::{Path, PathBuf};
use std::sync::Arc;

use footprint_core::model::{BomRecord, SpecRecord};
use tokio::sync::RwLock;

/// Which of the three input kinds an upload belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Bom,
    Spec,
    Sales,
}

impl UploadKind {
    pub fn dir_name(&self) -> &'static str {
        match self {
            UploadKind::Bom => "bom",
            UploadKind::Spec => "spec",
            UploadKind::Sales => "sales",
        }
    }

    pub fn prefix(&self) -> &'static str {
        match self {
            UploadKind::Bom => "bom_",
            UploadKind::Spec => "spec_",
            UploadKind::Sales => "sales_",
        }
    }
}

/// The most recent successfully processed upload of each kind.
///
/// Uploads run the stage to completion first and swap their result in
/// under the write lock, so readers never see a half-updated table and a
/// failed upload leaves the previous state untouched.
#[derive(Default)]
pub struct Tables {
    pub bom: Option<Vec<BomRecord>>,
    pub spec: Option<Vec<SpecRecord>>,
    pub latest_sales: Option<PathBuf>,
}

#[derive(Clone)]
pub struct ServerState {
    data_dir: PathBuf,
    pub tables: Arc<RwLock<Tables>>,
}

impl ServerState {
    pub fn new(data_dir: PathBuf) -> std::io::Result<ServerState> {
        for kind in [UploadKind::Bom, UploadKind::Spec, UploadKind::Sales] {
            std::fs::create_dir_all(data_dir.join(kind.dir_name()))?;
        }
        std::fs::create_dir_all(data_dir.join("output"))?;
        Ok(ServerState {
            data_dir,
            tables: Arc::new(RwLock::new(Tables::default())),
        })
    }

    pub fn upload_dir(&self, kind: UploadKind) -> PathBuf {
        self.data_dir.join(kind.dir_name())
    }

    pub fn output_dir(&self) -> PathBuf {
        self.data_dir.join("output")
    }

    /// Target path for an upload: kind directory + kind prefix +
    /// sanitized client filename.
    pub fn upload_path(&self, kind: UploadKind, client_filename: &str) -> PathBuf {
        let name = format!("{}{}", kind.prefix(), sanitize_filename(client_filename));
        self.upload_dir(kind).join(name)
    }
}

/// Only .xlsx uploads are accepted.
pub fn allowed_file(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("xlsx"))
        .unwrap_or(false)
}

/// Reduce a client-supplied filename to a safe basename: path
/// separators and anything outside [A-Za-z0-9._-] become '_', and
/// leading dots are stripped so the result can never escape the upload
/// directory or hide itself.
pub fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let trimmed = cleaned.trim_start_matches('.');
    if trimmed.is_empty() {
        "upload.xlsx".to_string()
    } else {
        trimmed.to_string()
    }
}
