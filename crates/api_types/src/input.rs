//! Lenient numeric input parsing.

use projection::ProjectionError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while validating client input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{0} must be a number")]
    NotANumber(&'static str),

    #[error("{0} must not be negative")]
    Negative(&'static str),

    #[error("{0} must be a whole number")]
    Fractional(&'static str),

    #[error("{0} is too large")]
    TooLarge(&'static str),

    #[error(transparent)]
    Projection(#[from] ProjectionError),
}

/// A class count as sent by a form: a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CountInput {
    Number(serde_json::Number),
    Text(String),
}

impl CountInput {
    /// Parses the input as a non-negative whole count.
    pub fn parse(&self, field: &'static str) -> Result<u32, InputError> {
        match self {
            CountInput::Number(number) => {
                if let Some(value) = number.as_u64() {
                    return u32::try_from(value).map_err(|_| InputError::TooLarge(field));
                }
                let value = number.as_f64().ok_or(InputError::NotANumber(field))?;
                count_from_f64(value, field)
            }
            CountInput::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return Err(InputError::Missing(field));
                }
                if let Ok(value) = text.parse::<u64>() {
                    return u32::try_from(value).map_err(|_| InputError::TooLarge(field));
                }
                let value: f64 = text.parse().map_err(|_| InputError::NotANumber(field))?;
                count_from_f64(value, field)
            }
        }
    }
}

impl From<u32> for CountInput {
    fn from(value: u32) -> Self {
        CountInput::Number(value.into())
    }
}

fn count_from_f64(value: f64, field: &'static str) -> Result<u32, InputError> {
    if !value.is_finite() {
        return Err(InputError::NotANumber(field));
    }
    if value < 0.0 {
        return Err(InputError::Negative(field));
    }
    if value.fract() != 0.0 {
        return Err(InputError::Fractional(field));
    }
    if value > f64::from(u32::MAX) {
        return Err(InputError::TooLarge(field));
    }
    Ok(value as u32)
}

/// Parses an optional count, treating absence as an error.
pub fn require_count(input: Option<&CountInput>, field: &'static str) -> Result<u32, InputError> {
    input.ok_or(InputError::Missing(field))?.parse(field)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<u32, InputError> {
        let input: CountInput = serde_json::from_str(json).unwrap();
        input.parse("total_classes")
    }

    #[test]
    fn test_accepts_numbers_and_numeric_strings() {
        assert_eq!(parse("40"), Ok(40));
        assert_eq!(parse("40.0"), Ok(40));
        assert_eq!(parse(r#""40""#), Ok(40));
        assert_eq!(parse(r#"" 12 ""#), Ok(12));
    }

    #[test]
    fn test_rejects_bad_counts() {
        assert_eq!(parse(r#""forty""#), Err(InputError::NotANumber("total_classes")));
        assert_eq!(parse("-1"), Err(InputError::Negative("total_classes")));
        assert_eq!(parse(r#""-3""#), Err(InputError::Negative("total_classes")));
        assert_eq!(parse("2.5"), Err(InputError::Fractional("total_classes")));
        assert_eq!(parse(r#""""#), Err(InputError::Missing("total_classes")));
        assert_eq!(parse("5000000000"), Err(InputError::TooLarge("total_classes")));
    }

    #[test]
    fn test_require_count_missing() {
        assert_eq!(
            require_count(None, "leaves_taken"),
            Err(InputError::Missing("leaves_taken"))
        );
    }
}
