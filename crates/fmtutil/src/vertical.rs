use std::fmt::Write as _;

use searchsql_client::TabularResult;

use crate::cell_text;

const ROW_MARK: &str = "***************************";

/// Render a tabular result one row per block, `column: value` per line.
///
/// Useful when a table is too wide for the terminal.
pub fn format_vertical(result: &TabularResult) -> String {
    let mut buf = String::new();
    let _ = writeln!(
        buf,
        "fetched rows / total rows = {}/{}",
        result.size, result.total
    );

    for (idx, row) in result.rows.iter().enumerate() {
        let _ = writeln!(buf, "{ROW_MARK} {}. row {ROW_MARK}", idx + 1);
        for (column, value) in result.columns.iter().zip(row) {
            let _ = writeln!(buf, "{}: {}", column.display_name(), cell_text(value));
        }
    }

    buf
}
