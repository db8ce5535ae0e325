use std::fmt::Debug;

use error_stack::{report, ResultExt};
use google_sheets4::{api::Sheet, Sheets};
use serde_json::Value;
use thiserror::Error;

use super::{
    domain::{a1_notation::A1Notation, spreadsheet_id::SpreadsheetId},
    http_client::{HttpClient, HttpsConnector},
    spreadsheet_read::SpreadsheetRead,
};

pub struct SpreadsheetManager {
    pub spreadsheet_id: SpreadsheetId,
    /// Requested on every call; must match the scopes the user consented to.
    scopes: Vec<String>,
    hub: Sheets<HttpsConnector>,
}

impl Debug for SpreadsheetManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SpreadsheetManager {{ spreadsheet_id: {}, scopes: {:?} }}",
            self.spreadsheet_id, self.scopes
        )
    }
}

#[derive(Error, Debug)]
pub enum SpreadsheetManagerError {
    #[error("Failed to fetch spreadsheet metadata")]
    FailedToFetchMetadata,
    #[error("Malformed sheet metadata")]
    MalformedMetadata,
    #[error("Failed to fetch range")]
    FailedToFetchRange,
}

impl SpreadsheetManager {
    pub fn new<A>(
        spreadsheet_id: SpreadsheetId,
        client: HttpClient,
        auth: A,
        scopes: Vec<String>,
    ) -> Self
    where
        A: google_sheets4::client::GetToken + 'static,
    {
        SpreadsheetManager {
            spreadsheet_id,
            scopes,
            hub: Sheets::new(client, auth),
        }
    }
}

impl SpreadsheetRead for SpreadsheetManager {
    async fn fetch_sheets(&self) -> error_stack::Result<Vec<Sheet>, SpreadsheetManagerError> {
        let response = self
            .hub
            .spreadsheets()
            .get(self.spreadsheet_id.as_ref())
            .add_scopes(&self.scopes)
            .doit()
            .await
            .change_context(SpreadsheetManagerError::FailedToFetchMetadata)
            .attach_printable_lazy(|| format!("spreadsheet: {}", self.spreadsheet_id))?;

        let spreadsheet = response.1;
        if let Some(title) = spreadsheet.properties.and_then(|p| p.title) {
            log::info!("Fetched metadata of spreadsheet '{}'", title);
        }

        let sheets = spreadsheet
            .sheets
            .ok_or(report!(SpreadsheetManagerError::MalformedMetadata))
            .attach_printable("sheets not present in spreadsheet response")?;
        log::debug!("Spreadsheet has {} sheets", sheets.len());

        Ok(sheets)
    }

    async fn read_range(
        &self,
        range: &A1Notation,
    ) -> error_stack::Result<Vec<Vec<Value>>, SpreadsheetManagerError> {
        log::debug!("Fetching range {}", range);
        let response = self
            .hub
            .spreadsheets()
            .values_get(self.spreadsheet_id.as_ref(), range.as_ref())
            .add_scopes(&self.scopes)
            .doit()
            .await
            .change_context(SpreadsheetManagerError::FailedToFetchRange)
            .attach_printable_lazy(|| format!("Failed to fetch values for range {}", range))?;

        Ok(response.1.values.unwrap_or_default())
    }
}
