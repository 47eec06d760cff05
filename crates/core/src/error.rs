//! Validation error model.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::loc::Loc;

/// Result type for anything that validates a whole request or shape.
pub type ValidationResult<T> = Result<T, ValidationErrors>;

/// Machine-readable category of a single violation (the `type` field on the wire).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Missing,
    IntParsing,
    IntType,
    FloatType,
    FiniteNumber,
    StringType,
    BoolParsing,
    BoolType,
    ListType,
    DictType,
    StringTooShort,
    StringTooLong,
    GreaterThanEqual,
    LessThanEqual,
    Enum,
    UrlParsing,
    UrlScheme,
    UrlTooLong,
    JsonInvalid,
    ContentType,
    FileType,
    QueryInvalid,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Missing => "missing",
            ErrorKind::IntParsing => "int_parsing",
            ErrorKind::IntType => "int_type",
            ErrorKind::FloatType => "float_type",
            ErrorKind::FiniteNumber => "finite_number",
            ErrorKind::StringType => "string_type",
            ErrorKind::BoolParsing => "bool_parsing",
            ErrorKind::BoolType => "bool_type",
            ErrorKind::ListType => "list_type",
            ErrorKind::DictType => "dict_type",
            ErrorKind::StringTooShort => "string_too_short",
            ErrorKind::StringTooLong => "string_too_long",
            ErrorKind::GreaterThanEqual => "greater_than_equal",
            ErrorKind::LessThanEqual => "less_than_equal",
            ErrorKind::Enum => "enum",
            ErrorKind::UrlParsing => "url_parsing",
            ErrorKind::UrlScheme => "url_scheme",
            ErrorKind::UrlTooLong => "url_too_long",
            ErrorKind::JsonInvalid => "json_invalid",
            ErrorKind::ContentType => "content_type",
            ErrorKind::FileType => "file_type",
            ErrorKind::QueryInvalid => "query_invalid",
        }
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A violation that does not yet know where it happened.
///
/// Parsers and constraint checks return these; the caller attaches a [`Loc`]
/// with [`Violation::at`].
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub kind: ErrorKind,
    pub msg: String,
    pub ctx: Option<Value>,
}

impl Violation {
    pub fn new(kind: ErrorKind, msg: impl Into<String>) -> Self {
        Self {
            kind,
            msg: msg.into(),
            ctx: None,
        }
    }

    pub fn with_ctx(mut self, ctx: Value) -> Self {
        self.ctx = Some(ctx);
        self
    }

    pub fn missing() -> Self {
        Self::new(ErrorKind::Missing, "Field required")
    }

    pub fn at(self, loc: Loc) -> FieldError {
        FieldError {
            loc,
            msg: self.msg,
            kind: self.kind,
            ctx: self.ctx,
        }
    }
}

/// One located violation, serialized as a single entry of the `detail` list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub loc: Loc,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: ErrorKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ctx: Option<Value>,
}

impl core::fmt::Display for FieldError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {} ({})", self.loc, self.msg, self.kind)
    }
}

/// Every violation found while validating one request, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Error, Serialize)]
#[serde(transparent)]
#[error("{} validation error(s): {}", .0.len(), summary(.0))]
pub struct ValidationErrors(Vec<FieldError>);

fn summary(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identical violations (same location, kind and message) are kept once.
    pub fn push(&mut self, error: FieldError) {
        if !self.0.contains(&error) {
            self.0.push(error);
        }
    }

    /// Record `violation` at `loc`.
    pub fn add(&mut self, loc: Loc, violation: Violation) {
        self.push(violation.at(loc));
    }

    /// Unwrap a check result, recording the violation on failure.
    pub fn check<T>(&mut self, loc: &Loc, result: Result<T, Violation>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(violation) => {
                self.add(loc.clone(), violation);
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Close a validation pass.
    ///
    /// Any recorded violation wins over `value`; a `None` value with no
    /// recorded violation is reported as an invalid root.
    pub fn finish<T>(mut self, value: Option<T>) -> ValidationResult<T> {
        match value {
            Some(value) if self.is_empty() => Ok(value),
            None if self.is_empty() => {
                self.add(
                    Loc::root(),
                    Violation::new(ErrorKind::DictType, "Input could not be validated"),
                );
                Err(self)
            }
            _ => Err(self),
        }
    }
}

impl IntoIterator for ValidationErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<FieldError> for ValidationErrors {
    fn from(error: FieldError) -> Self {
        Self(vec![error])
    }
}
