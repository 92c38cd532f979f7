use footprint_core::model::RowWarning;
use footprint_core::workbook::table::TableView;

/// Print a table view with padded columns, followed by any warnings.
pub fn print_view(view: &TableView, warnings: &[RowWarning]) {
    let rendered: Vec<Vec<String>> = view
        .rows
        .iter()
        .map(|row| row.iter().map(|c| c.display()).collect())
        .collect();

    let mut widths: Vec<usize> = view.headers.iter().map(|h| h.len()).collect();
    for row in &rendered {
        for (i, cell) in row.iter().enumerate() {
            if cell.len() > widths[i] {
                widths[i] = cell.len();
            }
        }
    }

    let header_line: Vec<String> = view
        .headers
        .iter()
        .enumerate()
        .map(|(i, h)| format!("{:<width$}", h, width = widths[i]))
        .collect();
    println!("{}", header_line.join("  "));

    for row in &rendered {
        let line: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| format!("{:<width$}", cell, width = widths[i]))
            .collect();
        println!("{}", line.join("  "));
    }

    if !warnings.is_empty() {
        println!();
        for w in warnings {
            println!("warning: row {}: {}", w.row, w.detail);
        }
    }
}
