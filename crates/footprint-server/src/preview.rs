//! Minimal HTML rendering for the upload form and table previews.

use footprint_core::model::RowWarning;
use footprint_core::workbook::table::TableView;

/// Escape text for safe embedding in HTML.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html><head><meta charset=\"utf-8\"><title>{}</title></head>\n\
         <body>\n{}\n</body></html>\n",
        escape(title),
        body
    )
}

fn upload_form(action: &str, label: &str) -> String {
    format!(
        "<form action=\"{action}\" method=\"post\" enctype=\"multipart/form-data\">\n\
         <label>{label}: <input type=\"file\" name=\"file\" accept=\".xlsx\"></label>\n\
         <button type=\"submit\">Upload</button>\n</form>"
    )
}

/// The landing page: three upload forms plus the state of each table.
pub fn home_page(bom_loaded: bool, spec_loaded: bool, sales_loaded: bool) -> String {
    let status = |loaded: bool| if loaded { "loaded" } else { "not uploaded" };
    let body = format!(
        "<h1>Packaging footprint</h1>\n\
         {}\n<p>BOM table: {}</p>\n\
         {}\n<p>Material spec table: {}</p>\n\
         {}\n<p>Sales data: {}</p>\n\
         <p><a href=\"/download\">Download enriched sales workbook</a></p>",
        upload_form("/upload/bom", "BOM sheet"),
        status(bom_loaded),
        upload_form("/upload/spec", "Material spec sheet"),
        status(spec_loaded),
        upload_form("/upload/sales", "Sales sheet"),
        status(sales_loaded),
    );
    page("Packaging footprint", &body)
}

/// Render a table view as an HTML table.
pub fn table_html(view: &TableView) -> String {
    let mut html = String::from("<table>\n<tr>");
    for header in &view.headers {
        html.push_str("<th>");
        html.push_str(&escape(header));
        html.push_str("</th>");
    }
    html.push_str("</tr>\n");

    for row in &view.rows {
        html.push_str("<tr>");
        for cell in row {
            html.push_str("<td>");
            html.push_str(&escape(&cell.display()));
            html.push_str("</td>");
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</table>");
    html
}

/// A successful upload: flash message, preview table, warnings.
pub fn preview_page(message: &str, view: &TableView, warnings: &[RowWarning]) -> String {
    let mut body = format!(
        "<p>{}</p>\n<p><a href=\"/\">Back</a></p>\n{}",
        escape(message),
        table_html(view)
    );
    if !warnings.is_empty() {
        body.push_str("\n<ul>");
        for w in warnings {
            body.push_str(&format!(
                "<li>row {}: {}</li>",
                w.row,
                escape(&w.detail)
            ));
        }
        body.push_str("</ul>");
    }
    page(message, &body)
}

/// A plain message page (used for errors).
pub fn message_page(message: &str) -> String {
    let body = format!(
        "<p>{}</p>\n<p><a href=\"/\">Back</a></p>",
        escape(message)
    );
    page(message, &body)
}
