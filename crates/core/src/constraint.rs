//! Declarative constraint checks shared by parameters and body fields.

use serde_json::json;

use crate::error::{ErrorKind, Violation};

/// Character-length bounds for a text value (both inclusive).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Length {
    pub min: Option<usize>,
    pub max: Option<usize>,
}

impl Length {
    pub fn max(max: usize) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    pub fn min(min: usize) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    pub fn between(min: usize, max: usize) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Length is counted in characters, not bytes.
    pub fn check(&self, value: &str) -> Result<(), Violation> {
        let len = value.chars().count();
        if let Some(min) = self.min {
            if len < min {
                let unit = if min == 1 { "character" } else { "characters" };
                return Err(Violation::new(
                    ErrorKind::StringTooShort,
                    format!("String should have at least {min} {unit}"),
                )
                .with_ctx(json!({ "min_length": min })));
            }
        }
        if let Some(max) = self.max {
            if len > max {
                let unit = if max == 1 { "character" } else { "characters" };
                return Err(Violation::new(
                    ErrorKind::StringTooLong,
                    format!("String should have at most {max} {unit}"),
                )
                .with_ctx(json!({ "max_length": max })));
            }
        }
        Ok(())
    }
}

/// Inclusive numeric bounds (`ge` / `le`).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Range {
    pub ge: Option<i64>,
    pub le: Option<i64>,
}

impl Range {
    pub fn at_least(ge: i64) -> Self {
        Self {
            ge: Some(ge),
            le: None,
        }
    }

    pub fn between(ge: i64, le: i64) -> Self {
        Self {
            ge: Some(ge),
            le: Some(le),
        }
    }

    pub fn check(&self, value: i64) -> Result<(), Violation> {
        if let Some(ge) = self.ge {
            if value < ge {
                return Err(Violation::new(
                    ErrorKind::GreaterThanEqual,
                    format!("Input should be greater than or equal to {ge}"),
                )
                .with_ctx(json!({ "ge": ge })));
            }
        }
        if let Some(le) = self.le {
            if value > le {
                return Err(Violation::new(
                    ErrorKind::LessThanEqual,
                    format!("Input should be less than or equal to {le}"),
                )
                .with_ctx(json!({ "le": le })));
            }
        }
        Ok(())
    }
}
