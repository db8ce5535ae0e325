use google_sheets4::api::Sheet;
use thiserror::Error;

use super::a1_notation::{A1Notation, FullGrid};

/// Title and grid size of one sheet, as reported by `spreadsheets.get`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetMetadata {
    pub title: String,
    pub row_count: u32,
    pub column_count: u32,
}

impl SheetMetadata {
    /// Range covering every cell of the sheet.
    pub fn full_range(&self) -> A1Notation {
        FullGrid {
            rows: self.row_count,
            columns: self.column_count,
        }
        .to_a1_notation(&self.title)
    }
}

/// Title of a raw sheet, if the response carried one.
pub fn sheet_title(sheet: &Sheet) -> Option<&str> {
    sheet.properties.as_ref()?.title.as_deref()
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SheetMetadataError {
    #[error("Missing {0}")]
    Missing(SheetMetadataField),
    #[error("Negative {0}: {1}")]
    Negative(SheetMetadataField, i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetMetadataField {
    Properties,
    Title,
    GridProperties,
    RowCount,
    ColumnCount,
}

impl std::fmt::Display for SheetMetadataField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SheetMetadataField::Properties => "sheet properties",
            SheetMetadataField::Title => "sheet title",
            SheetMetadataField::GridProperties => "grid properties",
            SheetMetadataField::RowCount => "row count",
            SheetMetadataField::ColumnCount => "column count",
        };
        write!(f, "{}", name)
    }
}

fn non_negative(
    value: Option<i32>,
    field: SheetMetadataField,
) -> Result<u32, SheetMetadataError> {
    let value = value.ok_or(SheetMetadataError::Missing(field))?;
    u32::try_from(value).map_err(|_| SheetMetadataError::Negative(field, value))
}

impl TryFrom<Sheet> for SheetMetadata {
    type Error = SheetMetadataError;

    fn try_from(sheet: Sheet) -> Result<Self, Self::Error> {
        let properties = sheet
            .properties
            .ok_or(SheetMetadataError::Missing(SheetMetadataField::Properties))?;

        let title = properties
            .title
            .ok_or(SheetMetadataError::Missing(SheetMetadataField::Title))?;

        let grid = properties
            .grid_properties
            .ok_or(SheetMetadataError::Missing(SheetMetadataField::GridProperties))?;

        Ok(SheetMetadata {
            title,
            row_count: non_negative(grid.row_count, SheetMetadataField::RowCount)?,
            column_count: non_negative(grid.column_count, SheetMetadataField::ColumnCount)?,
        })
    }
}
