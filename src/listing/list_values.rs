use std::io::Write;

use error_stack::{report, Result, ResultExt};
use google_sheets4::api::Sheet;
use thiserror::Error;

use super::row_format::format_rows;
use crate::sheets::{
    domain::sheet_metadata::{sheet_title, SheetMetadata},
    spreadsheet_read::SpreadsheetRead,
};

#[derive(Debug, Error)]
pub enum ListingError {
    #[error("Failed to fetch sheet metadata")]
    FailedToFetchMetadata,
    #[error("Spreadsheet has no sheets")]
    NoSheets,
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),
    #[error("Selected sheet is not a readable grid")]
    MalformedSheet,
    #[error("Failed to fetch sheet values")]
    FailedToFetchValues,
    #[error("Failed to write output")]
    FailedToWrite,
}

#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Sheet title; the first sheet when `None`.
    pub sheet: Option<String>,
    /// Fill short rows with placeholders up to the sheet's column count.
    pub pad_missing: bool,
}

/// Picks the first sheet or the one titled `title`. Only the picked sheet has
/// to carry a title and grid size; other tabs (charts) are not inspected.
pub fn select_sheet(sheets: Vec<Sheet>, title: Option<&str>) -> Result<SheetMetadata, ListingError> {
    let sheet = match title {
        None => sheets.into_iter().next().ok_or(report!(ListingError::NoSheets))?,
        Some(title) => {
            let available = sheets
                .iter()
                .filter_map(sheet_title)
                .map(str::to_owned)
                .collect::<Vec<_>>();
            sheets
                .into_iter()
                .find(|sheet| sheet_title(sheet) == Some(title))
                .ok_or(report!(ListingError::SheetNotFound(title.to_owned())))
                .attach_printable_lazy(|| format!("available sheets: {}", available.join(", ")))?
        }
    };

    SheetMetadata::try_from(sheet).change_context(ListingError::MalformedSheet)
}

/// Fetches the metadata, then every cell of the selected sheet, and writes
/// the listing. Nothing is written unless both calls succeed.
pub async fn list_values<R, W>(
    reader: &R,
    options: &ListOptions,
    out: &mut W,
) -> Result<(), ListingError>
where
    R: SpreadsheetRead,
    W: Write,
{
    let sheets = reader
        .fetch_sheets()
        .await
        .change_context(ListingError::FailedToFetchMetadata)?;

    let sheet = select_sheet(sheets, options.sheet.as_deref())?;
    let range = sheet.full_range();
    log::info!(
        "Listing sheet '{}' ({} rows x {} columns) via {}",
        sheet.title,
        sheet.row_count,
        sheet.column_count,
        range
    );

    let rows = reader
        .read_range(&range)
        .await
        .change_context(ListingError::FailedToFetchValues)?;

    let pad_to = options
        .pad_missing
        .then_some(sheet.column_count as usize);

    for line in format_rows(&rows, pad_to) {
        writeln!(out, "{}", line).change_context(ListingError::FailedToWrite)?;
    }
    out.flush().change_context(ListingError::FailedToWrite)?;

    Ok(())
}
