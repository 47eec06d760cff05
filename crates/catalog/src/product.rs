use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::Value;

use fieldcheck_core::{ErrorKind, Fields, HttpUrl, Loc, Validate, ValidationErrors, Violation};

/// Picture attached to a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Image {
    pub url: HttpUrl,
    pub name: String,
}

impl Validate for Image {
    fn validate(value: &Value, loc: &Loc, errors: &mut ValidationErrors) -> Option<Self> {
        let fields = Fields::of(value, loc, errors)?;
        let url = fields.required("url", errors);
        let name = fields.required("name", errors);
        Some(Self {
            url: url?,
            name: name?,
        })
    }
}

/// Full product shape.
///
/// `tags` defaults to empty and behaves as a set; `images` keeps request order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub tax: Option<f64>,
    pub tags: BTreeSet<String>,
    pub images: Option<Vec<Image>>,
}

impl Product {
    /// `price + tax`, or `None` when no tax was given.
    pub fn price_with_tax(&self) -> Option<f64> {
        self.tax.map(|tax| self.price + tax)
    }
}

impl Validate for Product {
    fn validate(value: &Value, loc: &Loc, errors: &mut ValidationErrors) -> Option<Self> {
        let fields = Fields::of(value, loc, errors)?;
        let name = fields.required("name", errors);
        let description = fields.optional("description", errors);
        let price = fields.required("price", errors);
        let tax = fields.optional("tax", errors);
        let tags = fields.or_default("tags", errors);
        let images = fields.optional("images", errors);
        let product = Self {
            name: name?,
            description: description?,
            price: price?,
            tax: tax?,
            tags: tags?,
            images: images?,
        };
        if product.price_with_tax().is_some_and(|total| !total.is_finite()) {
            errors.add(
                loc.key("tax"),
                Violation::new(ErrorKind::FiniteNumber, "Price plus tax should be a finite number"),
            );
            return None;
        }
        Some(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn foo() -> Value {
        json!({
            "name": "Foo",
            "description": "The pretender",
            "price": 42.0,
            "tax": 3.2,
            "tags": ["rock", "metal", "bar"],
            "images": [
                {"url": "http://example.com/baz.jpg", "name": "The Foo live"},
                {"url": "http://example.com/dave.jpg", "name": "The Baz"}
            ]
        })
    }

    #[test]
    fn validates_full_product() {
        let product = Product::validate_at(&foo(), &Loc::body()).unwrap();
        assert_eq!(product.name, "Foo");
        assert_eq!(product.tags.len(), 3);
        let images = product.images.unwrap();
        assert_eq!(images[0].name, "The Foo live");
        assert_eq!(images[1].url.as_str(), "http://example.com/dave.jpg");
    }

    #[test]
    fn minimal_product_takes_defaults() {
        let product = Product::validate_at(&json!({"name": "Foo", "price": 1}), &Loc::body()).unwrap();
        assert_eq!(product.description, None);
        assert_eq!(product.tax, None);
        assert!(product.tags.is_empty());
        assert_eq!(product.images, None);
        assert_eq!(product.price_with_tax(), None);
    }

    #[test]
    fn serializes_absent_optionals_as_null() {
        let product = Product::validate_at(&json!({"name": "Foo", "price": 1.5}), &Loc::body()).unwrap();
        assert_eq!(
            serde_json::to_value(&product).unwrap(),
            json!({
                "name": "Foo",
                "description": null,
                "price": 1.5,
                "tax": null,
                "tags": [],
                "images": null
            })
        );
    }

    #[test]
    fn zero_tax_still_yields_price_with_tax() {
        let product =
            Product::validate_at(&json!({"name": "Foo", "price": 10.0, "tax": 0}), &Loc::body()).unwrap();
        assert_eq!(product.price_with_tax(), Some(10.0));
    }

    #[test]
    fn overflowing_price_with_tax_is_rejected() {
        let err = Product::validate_at(
            &json!({"name": "Foo", "price": 1.0e308, "tax": 1.0e308}),
            &Loc::body(),
        )
        .unwrap_err();
        let found: Vec<(String, ErrorKind)> = err.iter().map(|e| (e.loc.to_string(), e.kind)).collect();
        assert_eq!(found, vec![("body.tax".to_string(), ErrorKind::FiniteNumber)]);
    }

    #[test]
    fn reports_nested_image_errors_with_indexes() {
        let mut body = foo();
        body["images"][1]["url"] = json!("not-a-url");
        body["price"] = json!("cheap");

        let err = Product::validate_at(&body, &Loc::body()).unwrap_err();
        let found: Vec<(String, ErrorKind)> = err.iter().map(|e| (e.loc.to_string(), e.kind)).collect();
        assert_eq!(
            found,
            vec![
                ("body.price".to_string(), ErrorKind::FloatType),
                ("body.images[1].url".to_string(), ErrorKind::UrlParsing),
            ]
        );
    }

    fn image_strategy() -> impl Strategy<Value = Value> {
        ("[a-z]{1,8}", "[A-Za-z ]{0,12}").prop_map(|(path, name)| {
            json!({"url": format!("https://example.com/{path}.jpg"), "name": name})
        })
    }

    fn product_strategy() -> impl Strategy<Value = Value> {
        (
            "[A-Za-z]{1,10}",
            proptest::option::of("[a-z ]{0,20}"),
            0.0f64..1.0e6,
            proptest::option::of(0.0f64..100.0),
            proptest::collection::vec("[a-z]{1,6}", 0..5),
            proptest::option::of(proptest::collection::vec(image_strategy(), 0..4)),
        )
            .prop_map(|(name, description, price, tax, tags, images)| {
                json!({
                    "name": name,
                    "description": description,
                    "price": price,
                    "tax": tax,
                    "tags": tags,
                    "images": images,
                })
            })
    }

    proptest! {
        #[test]
        fn serialized_product_revalidates_identically(body in product_strategy()) {
            let product = Product::validate_at(&body, &Loc::body()).unwrap();
            let wire = serde_json::to_value(&product).unwrap();
            let again = Product::validate_at(&wire, &Loc::body()).unwrap();
            prop_assert_eq!(again, product);
        }
    }
}
