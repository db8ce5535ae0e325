use serde_json::Value;

pub const HEADER: &str = "Row Num, Column Values:";
pub const NO_DATA: &str = "No data found.";

/// Placeholder for a missing cell; `column` is 1-based.
pub fn missing_cell(column: usize) -> String {
    format!("undefined_col_{}", column)
}

pub fn render_cell(value: &Value, column: usize) -> String {
    match value {
        Value::Null => missing_cell(column),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// `Row <n>: <v1>, <v2>, ...` with `n` 1-based. When `pad_to` is set, short
/// rows are filled with placeholders up to that many columns.
pub fn format_row(row_index: usize, row: &[Value], pad_to: Option<usize>) -> String {
    let width = pad_to.map_or(row.len(), |pad_to| pad_to.max(row.len()));
    let values = (0..width)
        .map(|col_index| match row.get(col_index) {
            Some(value) => render_cell(value, col_index + 1),
            None => missing_cell(col_index + 1),
        })
        .collect::<Vec<_>>();

    format!("Row {}: {}", row_index + 1, values.join(", "))
}

/// Every line to print for `rows`, header included.
pub fn format_rows(rows: &[Vec<Value>], pad_to: Option<usize>) -> Vec<String> {
    if rows.is_empty() {
        return vec![NO_DATA.to_owned()];
    }

    std::iter::once(HEADER.to_owned())
        .chain(
            rows.iter()
                .enumerate()
                .map(|(index, row)| format_row(index, row, pad_to)),
        )
        .collect()
}
