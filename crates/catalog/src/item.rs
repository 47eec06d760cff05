use serde::Serialize;
use serde_json::Value;

use fieldcheck_core::{Fields, Loc, Validate, ValidationErrors};

/// Simple item shape (name, price, optional offer flag).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    pub name: String,
    pub price: f64,
    pub is_offer: Option<bool>,
}

impl Validate for Item {
    fn validate(value: &Value, loc: &Loc, errors: &mut ValidationErrors) -> Option<Self> {
        let fields = Fields::of(value, loc, errors)?;
        let name = fields.required("name", errors);
        let price = fields.required("price", errors);
        let is_offer = fields.optional("is_offer", errors);
        Some(Self {
            name: name?,
            price: price?,
            is_offer: is_offer?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldcheck_core::ErrorKind;
    use serde_json::json;

    #[test]
    fn ignores_unknown_fields() {
        let item = Item::validate_at(
            &json!({"name": "Foo", "price": 42.0, "tax": 3.2, "description": "x"}),
            &Loc::body(),
        )
        .unwrap();
        assert_eq!(item, Item { name: "Foo".into(), price: 42.0, is_offer: None });
    }

    #[test]
    fn is_offer_must_be_boolean() {
        let err = Item::validate_at(&json!({"name": "Foo", "price": 1, "is_offer": "maybe"}), &Loc::body())
            .unwrap_err();
        assert_eq!(err.iter().next().unwrap().kind, ErrorKind::BoolType);
    }
}
