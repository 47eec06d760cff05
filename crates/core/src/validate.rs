//! JSON shape validation with aggregated error reporting.
//!
//! A [`Validate`] implementation inspects a `serde_json::Value`, records every
//! violation it finds into a shared [`ValidationErrors`], and returns `None`
//! if the value could not be built. Struct implementations should evaluate
//! *all* fields before combining them with `?`, so that one bad field never
//! hides another:
//!
//! ```ignore
//! let fields = Fields::of(value, loc, errors)?;
//! let name = fields.required::<String>("name", errors);
//! let price = fields.required::<f64>("price", errors);
//! Some(Self { name: name?, price: price? })
//! ```

use std::collections::BTreeSet;

use serde_json::{Map, Value};

use crate::error::{ErrorKind, ValidationErrors, ValidationResult, Violation};
use crate::loc::Loc;

/// A shape that can be validated out of a JSON value.
pub trait Validate: Sized {
    fn validate(value: &Value, loc: &Loc, errors: &mut ValidationErrors) -> Option<Self>;

    /// Validate a complete document rooted at `loc`.
    fn validate_at(value: &Value, loc: &Loc) -> ValidationResult<Self> {
        let mut errors = ValidationErrors::new();
        let validated = Self::validate(value, loc, &mut errors);
        errors.finish(validated)
    }
}

impl Validate for String {
    fn validate(value: &Value, loc: &Loc, errors: &mut ValidationErrors) -> Option<Self> {
        match value {
            Value::String(s) => Some(s.clone()),
            _ => {
                errors.add(
                    loc.clone(),
                    Violation::new(ErrorKind::StringType, "Input should be a valid string"),
                );
                None
            }
        }
    }
}

impl Validate for f64 {
    fn validate(value: &Value, loc: &Loc, errors: &mut ValidationErrors) -> Option<Self> {
        match value.as_f64() {
            Some(n) => Some(n),
            None => {
                errors.add(
                    loc.clone(),
                    Violation::new(ErrorKind::FloatType, "Input should be a valid number"),
                );
                None
            }
        }
    }
}

impl Validate for i64 {
    fn validate(value: &Value, loc: &Loc, errors: &mut ValidationErrors) -> Option<Self> {
        match value.as_i64() {
            Some(n) => Some(n),
            None => {
                errors.add(
                    loc.clone(),
                    Violation::new(ErrorKind::IntType, "Input should be a valid integer"),
                );
                None
            }
        }
    }
}

impl Validate for bool {
    fn validate(value: &Value, loc: &Loc, errors: &mut ValidationErrors) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            _ => {
                errors.add(
                    loc.clone(),
                    Violation::new(ErrorKind::BoolType, "Input should be a valid boolean"),
                );
                None
            }
        }
    }
}

fn list_items<'a>(value: &'a Value, loc: &Loc, errors: &mut ValidationErrors) -> Option<&'a [Value]> {
    match value {
        Value::Array(items) => Some(items),
        _ => {
            errors.add(
                loc.clone(),
                Violation::new(ErrorKind::ListType, "Input should be a valid list"),
            );
            None
        }
    }
}

/// Every element is validated, even after an earlier one fails.
impl<T: Validate> Validate for Vec<T> {
    fn validate(value: &Value, loc: &Loc, errors: &mut ValidationErrors) -> Option<Self> {
        let items = list_items(value, loc, errors)?;
        let validated: Vec<Option<T>> = items
            .iter()
            .enumerate()
            .map(|(i, item)| T::validate(item, &loc.index(i), errors))
            .collect();
        validated.into_iter().collect()
    }
}

/// Duplicates collapse; element locations still use the incoming index.
impl<T: Validate + Ord> Validate for BTreeSet<T> {
    fn validate(value: &Value, loc: &Loc, errors: &mut ValidationErrors) -> Option<Self> {
        Vec::<T>::validate(value, loc, errors).map(|items| items.into_iter().collect())
    }
}

/// Field accessor over a JSON object.
pub struct Fields<'a> {
    map: &'a Map<String, Value>,
    loc: &'a Loc,
}

impl<'a> Fields<'a> {
    /// Records a `dict_type` violation when `value` is not an object.
    pub fn of(value: &'a Value, loc: &'a Loc, errors: &mut ValidationErrors) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self { map, loc }),
            _ => {
                errors.add(
                    loc.clone(),
                    Violation::new(
                        ErrorKind::DictType,
                        "Input should be a valid dictionary or object to extract fields from",
                    ),
                );
                None
            }
        }
    }

    pub fn loc(&self) -> &Loc {
        self.loc
    }

    /// Required field; absence is a `missing` violation.
    pub fn required<T: Validate>(&self, name: &str, errors: &mut ValidationErrors) -> Option<T> {
        let loc = self.loc.key(name);
        match self.map.get(name) {
            Some(value) => T::validate(value, &loc, errors),
            None => {
                errors.add(loc, Violation::missing());
                None
            }
        }
    }

    /// Optional field; absence and `null` both mean `None`.
    ///
    /// The outer `Option` is `None` only when a present value was invalid.
    pub fn optional<T: Validate>(&self, name: &str, errors: &mut ValidationErrors) -> Option<Option<T>> {
        match self.map.get(name) {
            None | Some(Value::Null) => Some(None),
            Some(value) => T::validate(value, &self.loc.key(name), errors).map(Some),
        }
    }

    /// Field with a default applied only when the key is missing.
    pub fn or_default<T: Validate + Default>(&self, name: &str, errors: &mut ValidationErrors) -> Option<T> {
        match self.map.get(name) {
            None => Some(T::default()),
            Some(value) => T::validate(value, &self.loc.key(name), errors),
        }
    }
}
