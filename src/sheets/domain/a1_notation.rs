use std::fmt::Formatter;

use super::column::Column;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct A1Notation(String);

impl std::fmt::Display for A1Notation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<A1Notation> for String {
    fn from(a1_notation: A1Notation) -> Self {
        a1_notation.0
    }
}

impl AsRef<str> for A1Notation {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Quotes a sheet title for use in a range, doubling embedded quotes.
pub fn quote_sheet_name(sheet_name: &str) -> String {
    format!("'{}'", sheet_name.replace('\'', "''"))
}

/// Rectangle anchored at `A1` spanning `columns` x `rows`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FullGrid {
    pub rows: u32,
    pub columns: u32,
}

impl FullGrid {
    /// `'<sheet>'!A1:<last column><rows>`, or just `'<sheet>'` when the
    /// grid is empty.
    pub fn to_a1_notation(&self, sheet_name: &str) -> A1Notation {
        let sheet = quote_sheet_name(sheet_name);
        if self.rows == 0 || self.columns == 0 {
            A1Notation(sheet)
        } else {
            A1Notation(format!("{}!A1:{}{}", sheet, Column(self.columns), self.rows))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_grid_with_sheet_name() {
        let grid = FullGrid {
            rows: 10,
            columns: 3,
        };
        assert_eq!(grid.to_a1_notation("Sheet1").as_ref(), "'Sheet1'!A1:C10");
    }

    #[test]
    fn test_full_grid_past_column_z() {
        let grid = FullGrid {
            rows: 1000,
            columns: 28,
        };
        assert_eq!(
            grid.to_a1_notation("Class Data").as_ref(),
            "'Class Data'!A1:AB1000"
        );
    }

    #[test]
    fn test_full_grid_last_single_letter_column() {
        let grid = FullGrid {
            rows: 5,
            columns: 26,
        };
        assert_eq!(grid.to_a1_notation("Sheet1").as_ref(), "'Sheet1'!A1:Z5");
    }

    #[test]
    fn test_zero_columns_selects_whole_sheet() {
        let grid = FullGrid {
            rows: 7,
            columns: 0,
        };
        assert_eq!(grid.to_a1_notation("Sheet1").as_ref(), "'Sheet1'");
    }

    #[test]
    fn test_empty_grid_selects_whole_sheet() {
        let grid = FullGrid {
            rows: 0,
            columns: 4,
        };
        assert_eq!(grid.to_a1_notation("Empty").as_ref(), "'Empty'");
    }

    #[test]
    fn test_sheet_name_quotes_are_doubled() {
        assert_eq!(quote_sheet_name("Bob's sheet"), "'Bob''s sheet'");
        let grid = FullGrid {
            rows: 2,
            columns: 2,
        };
        assert_eq!(
            grid.to_a1_notation("Bob's sheet").to_string(),
            "'Bob''s sheet'!A1:B2"
        );
    }
}
