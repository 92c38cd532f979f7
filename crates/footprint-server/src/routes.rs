//! HTTP routes: one upload endpoint per input kind plus the download
//! endpoint for the enriched workbook.

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tracing::{info, warn};

use footprint_core::workbook::{table, writer, SHEET_BOM, SHEET_OUTPUT, SHEET_SPEC};

use crate::preview;
use crate::state::{allowed_file, ServerState, UploadKind};

pub const OUTPUT_FILENAME: &str = "Sales_bom_mat.xlsx";

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

fn error_page(status: StatusCode, message: &str) -> Response {
    (status, Html(preview::message_page(message))).into_response()
}

/// Pull the "file" field out of a multipart upload.
async fn read_upload(multipart: &mut Multipart) -> Result<(String, Vec<u8>), Response> {
    let mut filename: Option<String> = None;
    let mut data: Option<Vec<u8>> = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("file") {
            filename = field.file_name().map(|s| s.to_string());
            match field.bytes().await {
                Ok(bytes) => data = Some(bytes.to_vec()),
                Err(e) => {
                    warn!("failed to read upload body: {e}");
                    return Err(error_page(
                        StatusCode::BAD_REQUEST,
                        "Failed to read uploaded file",
                    ));
                }
            }
        }
    }

    match (filename, data) {
        (Some(name), Some(bytes)) if !name.is_empty() && !bytes.is_empty() => Ok((name, bytes)),
        _ => Err(error_page(StatusCode::BAD_REQUEST, "No file provided")),
    }
}

async fn home(State(state): State<ServerState>) -> Html<String> {
    let tables = state.tables.read().await;
    Html(preview::home_page(
        tables.bom.is_some(),
        tables.spec.is_some(),
        tables.latest_sales.is_some(),
    ))
}

async fn upload_bom(State(state): State<ServerState>, mut multipart: Multipart) -> Response {
    let (filename, bytes) = match read_upload(&mut multipart).await {
        Ok(upload) => upload,
        Err(response) => return response,
    };
    if !allowed_file(&filename) {
        return error_page(
            StatusCode::BAD_REQUEST,
            "Invalid BOM file: only .xlsx uploads are accepted",
        );
    }

    let bom = match footprint_core::normalize_bom(&bytes) {
        Ok(bom) => bom,
        Err(e) => {
            warn!("BOM upload rejected: {e}");
            return error_page(
                StatusCode::UNPROCESSABLE_ENTITY,
                &format!("Error processing BOM: {e}"),
            );
        }
    };

    let view = table::bom_view(&bom.records);
    let path = state.upload_path(UploadKind::Bom, &filename);
    if let Err(e) =
        writer::to_xlsx(&view, SHEET_BOM).and_then(|xlsx| writer::save_atomic(&xlsx, &path))
    {
        warn!("failed to persist BOM table: {e}");
        return error_page(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to persist BOM table",
        );
    }

    info!(records = bom.records.len(), path = %path.display(), "BOM table updated");
    state.tables.write().await.bom = Some(bom.records);

    Html(preview::preview_page(
        "BOM sheet uploaded successfully",
        &view,
        &bom.warnings,
    ))
    .into_response()
}

async fn upload_spec(State(state): State<ServerState>, mut multipart: Multipart) -> Response {
    let (filename, bytes) = match read_upload(&mut multipart).await {
        Ok(upload) => upload,
        Err(response) => return response,
    };
    if !allowed_file(&filename) {
        return error_page(
            StatusCode::BAD_REQUEST,
            "Invalid Material Spec file: only .xlsx uploads are accepted",
        );
    }

    let spec = match footprint_core::classify_spec(&bytes) {
        Ok(spec) => spec,
        Err(e) => {
            warn!("spec upload rejected: {e}");
            return error_page(
                StatusCode::UNPROCESSABLE_ENTITY,
                &format!("Error processing Material Spec Sheet: {e}"),
            );
        }
    };

    let view = table::spec_view(&spec.records);
    let path = state.upload_path(UploadKind::Spec, &filename);
    if let Err(e) =
        writer::to_xlsx(&view, SHEET_SPEC).and_then(|xlsx| writer::save_atomic(&xlsx, &path))
    {
        warn!("failed to persist spec table: {e}");
        return error_page(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to persist Material Spec table",
        );
    }

    info!(records = spec.records.len(), path = %path.display(), "spec table updated");
    state.tables.write().await.spec = Some(spec.records);

    Html(preview::preview_page(
        "Material Spec sheet uploaded successfully",
        &view,
        &spec.warnings,
    ))
    .into_response()
}

async fn upload_sales(State(state): State<ServerState>, mut multipart: Multipart) -> Response {
    let (filename, bytes) = match read_upload(&mut multipart).await {
        Ok(upload) => upload,
        Err(response) => return response,
    };
    if !allowed_file(&filename) {
        return error_page(
            StatusCode::BAD_REQUEST,
            "Invalid Sales file: only .xlsx uploads are accepted",
        );
    }

    let (bom_records, spec_records) = {
        let tables = state.tables.read().await;
        match (&tables.bom, &tables.spec) {
            (Some(bom), Some(spec)) => (bom.clone(), spec.clone()),
            _ => {
                return error_page(
                    StatusCode::CONFLICT,
                    "Upload the BOM and Material Spec sheets before sales data",
                )
            }
        }
    };

    let enriched = match footprint_core::aggregate_sales(&bytes, &bom_records, &spec_records) {
        Ok(table) => table,
        Err(e) => {
            warn!("sales upload rejected: {e}");
            return error_page(
                StatusCode::UNPROCESSABLE_ENTITY,
                &format!("Error processing Sales Sheet: {e}"),
            );
        }
    };

    // keep the raw sales file so /download can recompute later
    let sales_path = state.upload_path(UploadKind::Sales, &filename);
    if let Err(e) = writer::save_atomic(&bytes, &sales_path) {
        warn!("failed to persist sales file: {e}");
        return error_page(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to persist sales file",
        );
    }

    let view = table::enriched_view(&enriched);
    let output_path = state.output_dir().join(OUTPUT_FILENAME);
    if let Err(e) =
        writer::to_xlsx(&view, SHEET_OUTPUT).and_then(|xlsx| writer::save_atomic(&xlsx, &output_path))
    {
        warn!("failed to write enriched workbook: {e}");
        return error_page(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to write enriched workbook",
        );
    }

    info!(
        rows = enriched.rows.len(),
        total = %enriched.total_footprint,
        "sales table recomputed"
    );
    state.tables.write().await.latest_sales = Some(sales_path);

    let message = format!(
        "Sales sheet processed successfully: {} rows, total footprint {}, \
         {} without BOM match, {} without spec match",
        enriched.rows.len(),
        enriched.total_footprint,
        enriched.unmatched_bom,
        enriched.unmatched_spec
    );
    Html(preview::preview_page(&message, &view, &[])).into_response()
}

async fn download(State(state): State<ServerState>) -> Response {
    let (bom_records, spec_records, sales_path) = {
        let tables = state.tables.read().await;
        match (&tables.bom, &tables.spec, &tables.latest_sales) {
            (Some(bom), Some(spec), Some(path)) => (bom.clone(), spec.clone(), path.clone()),
            _ => {
                return error_page(
                    StatusCode::CONFLICT,
                    "No sales file found for processing",
                )
            }
        }
    };

    let bytes = match tokio::fs::read(&sales_path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("failed to read persisted sales file: {e}");
            return error_page(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to read persisted sales file",
            );
        }
    };

    let enriched = match footprint_core::aggregate_sales(&bytes, &bom_records, &spec_records) {
        Ok(table) => table,
        Err(e) => {
            warn!("download recomputation failed: {e}");
            return error_page(
                StatusCode::INTERNAL_SERVER_ERROR,
                &format!("Error processing Sales Sheet: {e}"),
            );
        }
    };

    let view = table::enriched_view(&enriched);
    let xlsx = match writer::to_xlsx(&view, SHEET_OUTPUT) {
        Ok(xlsx) => xlsx,
        Err(e) => {
            warn!("failed to render enriched workbook: {e}");
            return error_page(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to render enriched workbook",
            );
        }
    };

    let output_path = state.output_dir().join(OUTPUT_FILENAME);
    if let Err(e) = writer::save_atomic(&xlsx, &output_path) {
        warn!("failed to write enriched workbook: {e}");
        return error_page(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to write enriched workbook",
        );
    }

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{OUTPUT_FILENAME}\""),
            ),
        ],
        xlsx,
    )
        .into_response()
}

pub fn make_app(state: ServerState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/upload/bom", post(upload_bom))
        .route("/upload/spec", post(upload_spec))
        .route("/upload/sales", post(upload_sales))
        .route("/download", get(download))
        .layer(DefaultBodyLimit::max(32 * 1024 * 1024))
        .with_state(state)
}

pub async fn run_server(state: ServerState, port: u16) -> anyhow::Result<()> {
    let app = make_app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
    Ok(axum::serve(listener, app).await?)
}
