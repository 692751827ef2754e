use std::fmt::Write as _;

use searchsql_client::TabularResult;

use crate::cell_text;

/// Render a tabular result as a fixed-width text table.
///
/// Output starts with the `fetched rows / total rows` summary line and ends
/// with a trailing newline. Column widths are recomputed from scratch on
/// every call, so rendering the same result twice is byte-identical.
pub fn format_table(result: &TabularResult) -> String {
    let header: Vec<String> = result
        .columns
        .iter()
        .map(|c| c.display_name().to_string())
        .collect();
    let rows: Vec<Vec<String>> = result
        .rows
        .iter()
        .map(|row| row.iter().map(cell_text).collect())
        .collect();

    // Width per column: max of header and widest cell.
    let mut widths: Vec<usize> = header.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            if cell.len() > widths[idx] {
                widths[idx] = cell.len();
            }
        }
    }

    let mut buf = String::new();
    let _ = writeln!(
        buf,
        "fetched rows / total rows = {}/{}",
        result.size, result.total
    );

    push_rule(&mut buf, &widths, '+');
    push_row(&mut buf, &header, &widths);
    push_rule(&mut buf, &widths, '|');
    for row in &rows {
        push_row(&mut buf, row, &widths);
    }
    push_rule(&mut buf, &widths, '+');

    buf
}

/// A horizontal rule. The outer corners vary (`+` for the frame, `|` for
/// the header separator); interior column boundaries are always `+`.
fn push_rule(buf: &mut String, widths: &[usize], corner: char) {
    buf.push(corner);
    for (idx, width) in widths.iter().enumerate() {
        if idx > 0 {
            buf.push('+');
        }
        for _ in 0..width + 2 {
            buf.push('-');
        }
    }
    buf.push(corner);
    buf.push('\n');
}

fn push_row(buf: &mut String, cells: &[String], widths: &[usize]) {
    buf.push('|');
    for (cell, &width) in cells.iter().zip(widths) {
        let _ = write!(buf, " {cell: <width$} |");
    }
    buf.push('\n');
}
