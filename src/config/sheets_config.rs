use crate::sheets::domain::spreadsheet_id::SpreadsheetId;

#[derive(serde::Deserialize, Debug, Clone)]
pub struct SpreadsheetConfig {
    pub spreadsheet_id: SpreadsheetId,
    /// Sheet title to list; the first sheet when unset.
    pub sheet: Option<Box<str>>,
}
