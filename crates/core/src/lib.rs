//! `fieldcheck-core` — validation foundation.
//!
//! Pure building blocks (no HTTP): the error taxonomy, field locations, JSON
//! shape validation and text-parameter parsing. Everything here collects
//! violations instead of stopping at the first one.

pub mod constraint;
pub mod error;
pub mod http_url;
pub mod loc;
pub mod param;
pub mod validate;

pub use constraint::{Length, Range};
pub use error::{ErrorKind, FieldError, ValidationErrors, ValidationResult, Violation};
pub use http_url::HttpUrl;
pub use loc::{Loc, Location, Segment};
pub use param::FromParam;
pub use validate::{Fields, Validate};
