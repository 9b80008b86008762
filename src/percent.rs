use crate::errors::{CheckError, Result};
use serde::{Deserialize, Serialize};

/// A percentage pulled out of free-form page text.
///
/// Keeps the original cell text so assertion failures can show what the page
/// actually said, not just the number we made of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Percent {
    pub value: f64,
    pub source: String,
    pub captured_at: chrono::DateTime<chrono::Utc>,
}

impl Percent {
    pub fn new(value: f64, source: impl Into<String>) -> Self {
        Self {
            value,
            source: source.into(),
            captured_at: chrono::Utc::now(),
        }
    }
}

/// Parse a percentage from a text fragment such as `"20,95%"`, `"20.95 %"`
/// or `"≈ 20,95"`.
///
/// Everything that is not an ASCII digit, comma, period or minus sign is
/// stripped, then the comma is treated as the decimal separator. The value is
/// returned as written on the page (`"20,95%"` gives `20.95`, not `0.2095`).
///
/// Text with both a comma and a period ends up with two periods and is
/// rejected by the float parser. Several separated digit groups are not
/// disambiguated: the cleaner joins them into one literal.
pub fn parse_percent(text: &str) -> Result<Percent> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    cleaned
        .parse::<f64>()
        .map(|value| Percent::new(value, text))
        .map_err(|_| CheckError::PercentParse {
            text: text.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comma_is_decimal_separator() {
        assert_eq!(parse_percent("20,95%").unwrap().value, 20.95);
    }

    #[test]
    fn period_already_valid() {
        assert_eq!(parse_percent("20.95%").unwrap().value, 20.95);
    }

    #[test]
    fn approximation_marker_and_whitespace_stripped() {
        assert_eq!(parse_percent("≈ 20,95%").unwrap().value, 20.95);
        assert_eq!(parse_percent("  0,13 % ").unwrap().value, 0.13);
    }

    #[test]
    fn integer_percent() {
        assert_eq!(parse_percent("78%").unwrap().value, 78.0);
    }

    #[test]
    fn minus_sign_preserved() {
        assert_eq!(parse_percent("-5,5").unwrap().value, -5.5);
    }

    #[test]
    fn keeps_source_text() {
        let p = parse_percent("≈ 20,95%").unwrap();
        assert_eq!(p.source, "≈ 20,95%");
    }

    #[test]
    fn empty_input_fails() {
        let err = parse_percent("").unwrap_err();
        assert!(matches!(err, CheckError::PercentParse { ref text } if text.is_empty()));
    }

    #[test]
    fn non_numeric_input_fails() {
        let err = parse_percent("abc").unwrap_err();
        assert!(matches!(err, CheckError::PercentParse { ref text } if text == "abc"));
    }

    #[test]
    fn mixed_separators_fail() {
        // "1.234,5" cleans to "1.234.5", which is not a float literal
        assert!(parse_percent("1.234,5%").is_err());
    }

    #[test]
    fn separated_digit_groups_concatenate() {
        // not disambiguated: the cleaner joins the groups into one literal
        assert_eq!(parse_percent("12 of 34").unwrap().value, 1234.0);
    }
}
