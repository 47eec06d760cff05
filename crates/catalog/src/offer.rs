use serde::Serialize;
use serde_json::Value;

use fieldcheck_core::{Fields, Loc, Validate, ValidationErrors};

use crate::Product;

/// A named bundle of products.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Offer {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub items: Vec<Product>,
}

impl Validate for Offer {
    fn validate(value: &Value, loc: &Loc, errors: &mut ValidationErrors) -> Option<Self> {
        let fields = Fields::of(value, loc, errors)?;
        let name = fields.required("name", errors);
        let description = fields.optional("description", errors);
        let price = fields.required("price", errors);
        let items = fields.required("items", errors);
        Some(Self {
            name: name?,
            description: description?,
            price: price?,
            items: items?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn items_are_required() {
        let err = Offer::validate_at(&json!({"name": "Bundle", "price": 10}), &Loc::body()).unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(err.iter().next().unwrap().loc.to_string(), "body.items");
    }

    #[test]
    fn validation_recurses_into_every_product() {
        let body = json!({
            "name": "Bundle",
            "price": 10,
            "items": [
                {"name": "Foo", "price": 1},
                {"price": "x"},
                {"name": "Baz", "price": 2, "images": [{"url": "ftp://example.com/a.png", "name": "a"}]}
            ]
        });
        let err = Offer::validate_at(&body, &Loc::body()).unwrap_err();
        let locs: Vec<String> = err.iter().map(|e| e.loc.to_string()).collect();
        assert_eq!(
            locs,
            vec![
                "body.items[1].name",
                "body.items[1].price",
                "body.items[2].images[0].url",
            ]
        );
    }
}
