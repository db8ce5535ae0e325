use std::{fmt::Formatter, str::FromStr, sync::LazyLock};

use regex::Regex;
use thiserror::Error;

static URL_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/spreadsheets/d/([A-Za-z0-9_-]+)").expect("spreadsheet url regex is valid")
});

static BARE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("spreadsheet id regex is valid"));

/// Spreadsheet key, accepted either bare or inside a docs.google.com URL.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(try_from = "String")]
pub struct SpreadsheetId(String);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpreadsheetIdError {
    #[error("Spreadsheet id is empty")]
    Empty,
    #[error("No spreadsheet id found in url: {0}")]
    NoIdInUrl(String),
    #[error("Invalid spreadsheet id: {0}")]
    Invalid(String),
}

impl FromStr for SpreadsheetId {
    type Err = SpreadsheetIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(SpreadsheetIdError::Empty);
        }

        if s.contains("://") {
            return URL_ID
                .captures(s)
                .and_then(|captures| captures.get(1))
                .map(|id| SpreadsheetId(id.as_str().to_owned()))
                .ok_or_else(|| SpreadsheetIdError::NoIdInUrl(s.to_owned()));
        }

        if BARE_ID.is_match(s) {
            Ok(SpreadsheetId(s.to_owned()))
        } else {
            Err(SpreadsheetIdError::Invalid(s.to_owned()))
        }
    }
}

impl TryFrom<String> for SpreadsheetId {
    type Error = SpreadsheetIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl AsRef<str> for SpreadsheetId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SpreadsheetId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "1BxiMVs0XRA5nFMdKvBdBZjgmUUqptlbs74OgvE2upms";

    #[test]
    fn test_bare_id() {
        let id: SpreadsheetId = SAMPLE.parse().unwrap();
        assert_eq!(id.as_ref(), SAMPLE);
    }

    #[test]
    fn test_id_from_url() {
        let url = format!("https://docs.google.com/spreadsheets/d/{SAMPLE}/edit#gid=0");
        let id: SpreadsheetId = url.parse().unwrap();
        assert_eq!(id.to_string(), SAMPLE);
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let id: SpreadsheetId = format!("  {SAMPLE}\n").parse().unwrap();
        assert_eq!(id.as_ref(), SAMPLE);
    }

    #[test]
    fn test_empty_id() {
        assert_eq!("   ".parse::<SpreadsheetId>(), Err(SpreadsheetIdError::Empty));
    }

    #[test]
    fn test_url_without_id() {
        assert!(matches!(
            "https://docs.google.com/document/d/abc".parse::<SpreadsheetId>(),
            Err(SpreadsheetIdError::NoIdInUrl(_))
        ));
    }

    #[test]
    fn test_invalid_characters() {
        assert!(matches!(
            "not an id".parse::<SpreadsheetId>(),
            Err(SpreadsheetIdError::Invalid(_))
        ));
    }
}
