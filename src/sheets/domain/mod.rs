pub mod a1_notation;
pub mod column;
pub mod sheet_metadata;
pub mod spreadsheet_id;
