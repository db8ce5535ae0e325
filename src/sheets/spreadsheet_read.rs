use google_sheets4::api::Sheet;
use serde_json::Value;

use super::{domain::a1_notation::A1Notation, spreadsheet_manager::SpreadsheetManagerError};

pub trait SpreadsheetRead {
    /// Every sheet of the spreadsheet, in tab order. Non-grid tabs (charts)
    /// are included as returned.
    fn fetch_sheets(
        &self,
    ) -> impl std::future::Future<Output = error_stack::Result<Vec<Sheet>, SpreadsheetManagerError>>
           + Send;

    /// Cell values of `range`, row-major. An empty range yields no rows.
    fn read_range(
        &self,
        range: &A1Notation,
    ) -> impl std::future::Future<
        Output = error_stack::Result<Vec<Vec<Value>>, SpreadsheetManagerError>,
    > + Send;
}
