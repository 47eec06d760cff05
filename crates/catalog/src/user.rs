use serde::Serialize;
use serde_json::Value;

use fieldcheck_core::{Fields, Loc, Validate, ValidationErrors};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub username: String,
    pub full_name: Option<String>,
}

impl Validate for User {
    fn validate(value: &Value, loc: &Loc, errors: &mut ValidationErrors) -> Option<Self> {
        let fields = Fields::of(value, loc, errors)?;
        let username = fields.required("username", errors);
        let full_name = fields.optional("full_name", errors);
        Some(Self {
            username: username?,
            full_name: full_name?,
        })
    }
}
