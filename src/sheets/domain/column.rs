use std::fmt::Formatter;

/// 1-based spreadsheet column (`A` is 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Column(pub u32);

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", number_to_letters(self.0))
    }
}

/// Bijective base-26: 1 -> A, 26 -> Z, 27 -> AA. Zero yields an empty string.
pub fn number_to_letters(number: u32) -> String {
    let mut number = number;
    let mut result = String::new();
    while number > 0 {
        let remainder = (number - 1) % 26;
        let letter = (remainder as u8 + b'A') as char;
        result.push(letter);
        number = (number - remainder) / 26;
    }
    result.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_display_a() {
        assert_eq!(Column(1).to_string(), "A");
    }

    #[test]
    fn test_column_display_z() {
        assert_eq!(Column(26).to_string(), "Z");
    }

    #[test]
    fn test_column_display_aa() {
        assert_eq!(Column(27).to_string(), "AA");
    }

    #[test]
    fn test_column_display_az() {
        assert_eq!(Column(26 + 26).to_string(), "AZ");
    }

    #[test]
    fn test_column_display_ba() {
        assert_eq!(Column(26 * 2 + 1).to_string(), "BA");
    }

    #[test]
    fn test_column_display_aaa() {
        assert_eq!(Column(26 * 26 + 26 + 1).to_string(), "AAA");
    }

    #[test]
    fn test_column_zero_is_empty() {
        assert_eq!(number_to_letters(0), "");
    }

    #[test]
    fn test_last_column_of_a_sheet() {
        assert_eq!(number_to_letters(18278), "ZZZ");
    }
}
