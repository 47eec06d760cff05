//! Text-sourced parameters (path segments, query strings, form fields).

use crate::error::{ErrorKind, Violation};

/// Parse a single raw text parameter into a typed value.
pub trait FromParam: Sized {
    fn from_param(raw: &str) -> Result<Self, Violation>;
}

impl FromParam for String {
    fn from_param(raw: &str) -> Result<Self, Violation> {
        Ok(raw.to_string())
    }
}

impl FromParam for i64 {
    fn from_param(raw: &str) -> Result<Self, Violation> {
        raw.trim().parse().map_err(|_| {
            Violation::new(
                ErrorKind::IntParsing,
                "Input should be a valid integer, unable to parse string as an integer",
            )
        })
    }
}

impl FromParam for f64 {
    fn from_param(raw: &str) -> Result<Self, Violation> {
        raw.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| {
                Violation::new(
                    ErrorKind::FloatType,
                    "Input should be a valid number, unable to parse string as a number",
                )
            })
    }
}

/// Accepts the usual truthy/falsy tokens, case-insensitively.
impl FromParam for bool {
    fn from_param(raw: &str) -> Result<Self, Violation> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "on" | "yes" | "y" | "t" => Ok(true),
            "0" | "false" | "off" | "no" | "n" | "f" => Ok(false),
            _ => Err(Violation::new(
                ErrorKind::BoolParsing,
                "Input should be a valid boolean, unable to interpret input",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_accepts_truthy_tokens() {
        for token in ["1", "true", "on", "yes", "TRUE", "Yes"] {
            assert!(bool::from_param(token).unwrap(), "{token}");
        }
        for token in ["0", "false", "off", "no"] {
            assert!(!bool::from_param(token).unwrap(), "{token}");
        }
        assert_eq!(
            bool::from_param("maybe").unwrap_err().kind,
            ErrorKind::BoolParsing
        );
    }

    #[test]
    fn int_rejects_non_numeric() {
        assert_eq!(i64::from_param("42").unwrap(), 42);
        assert_eq!(i64::from_param("-1").unwrap(), -1);
        assert_eq!(i64::from_param("foo").unwrap_err().kind, ErrorKind::IntParsing);
        assert_eq!(i64::from_param("1.5").unwrap_err().kind, ErrorKind::IntParsing);
    }

    #[test]
    fn text_is_taken_verbatim() {
        assert_eq!(String::from_param(" a b ").unwrap(), " a b ");
    }

    #[test]
    fn float_rejects_non_finite() {
        assert_eq!(f64::from_param("2.5").unwrap(), 2.5);
        assert!(f64::from_param("inf").is_err());
        assert!(f64::from_param("NaN").is_err());
    }
}
