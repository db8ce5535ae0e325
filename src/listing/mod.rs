pub mod list_values;
pub mod row_format;
