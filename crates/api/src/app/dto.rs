use serde_json::{Map, Value, json};

use fieldcheck_catalog::{Image, Item, ModelName, Offer, Product, User};
use fieldcheck_core::{Length, Range, Validate, ValidationErrors};

use crate::app::errors::ApiError;
use crate::app::extract::{Contract, RequestInputs, UploadedFile};

/// Shown unless a caller asks for the short form.
pub const LONG_DESCRIPTION: &str = "This is an amazing item that has a long description";

/// Canned result set of the search examples.
pub fn search_results() -> Value {
    json!([{"item_id": "Foo"}, {"item_id": "Bar"}])
}

/// Empty strings count as "not given" when deciding whether to echo a value.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

// -------------------------
// Request contracts
// -------------------------

/// Whole JSON body as a single shape.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<T: Validate> Contract for JsonBody<T> {
    fn extract(inputs: &RequestInputs, errors: &mut ValidationErrors) -> Option<Self> {
        inputs.body(errors).map(JsonBody)
    }
}

/// `skip` / `limit` window over the listing; any integer is accepted.
#[derive(Debug)]
pub struct ListItemsQuery {
    pub skip: i64,
    pub limit: i64,
}

impl Contract for ListItemsQuery {
    fn extract(inputs: &RequestInputs, errors: &mut ValidationErrors) -> Option<Self> {
        let skip = inputs.query_or("skip", 0, errors);
        let limit = inputs.query_or("limit", 10, errors);
        Some(Self {
            skip: skip?,
            limit: limit?,
        })
    }
}

#[derive(Debug)]
pub struct NeedyItemQuery {
    pub item_id: String,
    pub needy: String,
    pub skip: i64,
    pub limit: Option<i64>,
}

impl Contract for NeedyItemQuery {
    fn extract(inputs: &RequestInputs, errors: &mut ValidationErrors) -> Option<Self> {
        let item_id = inputs.path("item_id", errors);
        let needy = inputs.query("needy", errors);
        let skip = inputs.query_or("skip", 0, errors);
        let limit = inputs.query_opt("limit", errors);
        Some(Self {
            item_id: item_id?,
            needy: needy?,
            skip: skip?,
            limit: limit?,
        })
    }
}

#[derive(Debug)]
pub struct ModelPath {
    pub model_name: ModelName,
}

impl Contract for ModelPath {
    fn extract(inputs: &RequestInputs, errors: &mut ValidationErrors) -> Option<Self> {
        let model_name = inputs.path("model_name", errors)?;
        Some(Self { model_name })
    }
}

#[derive(Debug)]
pub struct FilePath {
    pub file_path: String,
}

impl Contract for FilePath {
    fn extract(inputs: &RequestInputs, errors: &mut ValidationErrors) -> Option<Self> {
        let file_path = inputs.path("file_path", errors)?;
        Some(Self { file_path })
    }
}

/// Text item id with the optional `q` / `short` query flags.
#[derive(Debug)]
pub struct ShortItemQuery {
    pub item_id: String,
    pub q: Option<String>,
    pub short: bool,
}

impl Contract for ShortItemQuery {
    fn extract(inputs: &RequestInputs, errors: &mut ValidationErrors) -> Option<Self> {
        let item_id = inputs.path("item_id", errors);
        let q = inputs.query_opt("q", errors);
        let short = inputs.query_or("short", false, errors);
        Some(Self {
            item_id: item_id?,
            q: q?,
            short: short?,
        })
    }
}

#[derive(Debug)]
pub struct UserItemQuery {
    pub user_id: i64,
    pub item: ShortItemQuery,
}

impl Contract for UserItemQuery {
    fn extract(inputs: &RequestInputs, errors: &mut ValidationErrors) -> Option<Self> {
        let user_id = inputs.path("user_id", errors);
        let item = ShortItemQuery::extract(inputs, errors);
        Some(Self {
            user_id: user_id?,
            item: item?,
        })
    }
}

/// `item_id` path integer plus a Product body and optional `q`.
#[derive(Debug)]
pub struct ProductUpdate {
    pub item_id: i64,
    pub item: Product,
    pub q: Option<String>,
}

impl Contract for ProductUpdate {
    fn extract(inputs: &RequestInputs, errors: &mut ValidationErrors) -> Option<Self> {
        let item_id = inputs.path("item_id", errors);
        let item = inputs.body(errors);
        let q = inputs.query_opt("q", errors);
        Some(Self {
            item_id: item_id?,
            item: item?,
            q: q?,
        })
    }
}

#[derive(Debug)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl Contract for LoginForm {
    fn extract(inputs: &RequestInputs, errors: &mut ValidationErrors) -> Option<Self> {
        let username = inputs.form("username", errors);
        let password = inputs.form("password", errors);
        Some(Self {
            username: username?,
            password: password?,
        })
    }
}

#[derive(Debug)]
pub struct FileBytes {
    pub size: usize,
}

impl Contract for FileBytes {
    fn extract(inputs: &RequestInputs, errors: &mut ValidationErrors) -> Option<Self> {
        let size = inputs.file_size("file", errors)?;
        Some(Self { size })
    }
}

#[derive(Debug)]
pub struct FileUpload {
    pub file: UploadedFile,
}

impl Contract for FileUpload {
    fn extract(inputs: &RequestInputs, errors: &mut ValidationErrors) -> Option<Self> {
        let file = inputs.file("file", errors)?;
        Some(Self { file })
    }
}

// Variant contracts

#[derive(Debug)]
pub struct EchoItemQuery {
    pub item_id: i64,
    pub q: Option<String>,
}

impl Contract for EchoItemQuery {
    fn extract(inputs: &RequestInputs, errors: &mut ValidationErrors) -> Option<Self> {
        let item_id = inputs.path("item_id", errors);
        let q = inputs.query_opt("q", errors);
        Some(Self {
            item_id: item_id?,
            q: q?,
        })
    }
}

#[derive(Debug)]
pub struct NeedyOnlyQuery {
    pub item_id: String,
    pub needy: String,
}

impl Contract for NeedyOnlyQuery {
    fn extract(inputs: &RequestInputs, errors: &mut ValidationErrors) -> Option<Self> {
        let item_id = inputs.path("item_id", errors);
        let needy = inputs.query("needy", errors);
        Some(Self {
            item_id: item_id?,
            needy: needy?,
        })
    }
}

/// Optional `q` of at most 50 characters.
#[derive(Debug)]
pub struct MaxLengthSearch {
    pub q: Option<String>,
}

impl Contract for MaxLengthSearch {
    fn extract(inputs: &RequestInputs, errors: &mut ValidationErrors) -> Option<Self> {
        let q = inputs.query_opt_with("q", errors, |q: &String| Length::max(50).check(q))?;
        Some(Self { q })
    }
}

/// Optional `q` of 3 to 50 characters.
#[derive(Debug)]
pub struct BoundedLengthSearch {
    pub q: Option<String>,
}

impl Contract for BoundedLengthSearch {
    fn extract(inputs: &RequestInputs, errors: &mut ValidationErrors) -> Option<Self> {
        let q = inputs.query_opt_with("q", errors, |q: &String| Length::between(3, 50).check(q))?;
        Some(Self { q })
    }
}

/// `q` defaulting to `"fixedquery"`, at least 3 characters when given.
#[derive(Debug)]
pub struct FixedDefaultSearch {
    pub q: String,
}

impl Contract for FixedDefaultSearch {
    fn extract(inputs: &RequestInputs, errors: &mut ValidationErrors) -> Option<Self> {
        let q = inputs.query_or_with("q", "fixedquery".to_string(), errors, |q: &String| {
            Length::min(3).check(q)
        })?;
        Some(Self { q })
    }
}

#[derive(Debug)]
pub struct ListSearch {
    pub q: Option<Vec<String>>,
}

impl Contract for ListSearch {
    fn extract(inputs: &RequestInputs, errors: &mut ValidationErrors) -> Option<Self> {
        let q = inputs.query_list("q", errors)?;
        Some(Self { q })
    }
}

#[derive(Debug)]
pub struct ListDefaultSearch {
    pub q: Vec<String>,
}

impl Contract for ListDefaultSearch {
    fn extract(inputs: &RequestInputs, errors: &mut ValidationErrors) -> Option<Self> {
        let q = inputs
            .query_list("q", errors)?
            .unwrap_or_else(|| vec!["foo".to_string(), "bar".to_string()]);
        Some(Self { q })
    }
}

/// Integer `item_id` path parameter plus a whole-body shape.
#[derive(Debug)]
pub struct IdWithBody<T> {
    pub item_id: i64,
    pub item: T,
}

impl<T: Validate> Contract for IdWithBody<T> {
    fn extract(inputs: &RequestInputs, errors: &mut ValidationErrors) -> Option<Self> {
        let item_id = inputs.path("item_id", errors);
        let item = inputs.body(errors);
        Some(Self {
            item_id: item_id?,
            item: item?,
        })
    }
}

/// `0 <= item_id <= 1000`, optional Item body, optional `q`.
#[derive(Debug)]
pub struct BoundedItemUpdate {
    pub item_id: i64,
    pub q: Option<String>,
    pub item: Option<Item>,
}

impl Contract for BoundedItemUpdate {
    fn extract(inputs: &RequestInputs, errors: &mut ValidationErrors) -> Option<Self> {
        let item_id = inputs.path_with("item_id", errors, |id: &i64| Range::between(0, 1000).check(*id));
        let q = inputs.query_opt("q", errors);
        let item = inputs.body_opt(errors);
        Some(Self {
            item_id: item_id?,
            q: q?,
            item: item?,
        })
    }
}

/// Product and User as sibling top-level body keys.
#[derive(Debug)]
pub struct ItemWithUser {
    pub item_id: i64,
    pub item: Product,
    pub user: User,
}

impl Contract for ItemWithUser {
    fn extract(inputs: &RequestInputs, errors: &mut ValidationErrors) -> Option<Self> {
        let item_id = inputs.path("item_id", errors);
        let item = inputs.embedded("item", errors);
        let user = inputs.embedded("user", errors);
        Some(Self {
            item_id: item_id?,
            item: item?,
            user: user?,
        })
    }
}

#[derive(Debug)]
pub struct ItemWithImportance {
    pub base: ItemWithUser,
    pub importance: i64,
}

impl Contract for ItemWithImportance {
    fn extract(inputs: &RequestInputs, errors: &mut ValidationErrors) -> Option<Self> {
        let base = ItemWithUser::extract(inputs, errors);
        let importance = inputs.embedded("importance", errors);
        Some(Self {
            base: base?,
            importance: importance?,
        })
    }
}

/// A single Item sent under the `item` key.
#[derive(Debug)]
pub struct EmbeddedItem {
    pub item_id: i64,
    pub item: Item,
}

impl Contract for EmbeddedItem {
    fn extract(inputs: &RequestInputs, errors: &mut ValidationErrors) -> Option<Self> {
        let item_id = inputs.path("item_id", errors);
        let item = inputs.embedded("item", errors);
        Some(Self {
            item_id: item_id?,
            item: item?,
        })
    }
}

#[derive(Debug)]
pub struct FilesWithToken {
    pub file_size: usize,
    pub fileb: UploadedFile,
    pub token: String,
}

impl Contract for FilesWithToken {
    fn extract(inputs: &RequestInputs, errors: &mut ValidationErrors) -> Option<Self> {
        let file_size = inputs.file_size("file", errors);
        let fileb = inputs.file("fileb", errors);
        let token = inputs.form("token", errors);
        Some(Self {
            file_size: file_size?,
            fileb: fileb?,
            token: token?,
        })
    }
}

// -------------------------
// JSON mapping helpers
// -------------------------

fn into_object(value: Value) -> Result<Map<String, Value>, ApiError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(ApiError::Internal(anyhow::anyhow!(
            "expected a JSON object, serialized {other}"
        ))),
    }
}

/// Product fields, plus `price_with_tax` whenever a tax was given.
pub fn product_with_tax(product: &Product) -> Result<Value, ApiError> {
    let mut map = into_object(serde_json::to_value(product)?)?;
    if let Some(total) = product.price_with_tax() {
        map.insert("price_with_tax".to_string(), json!(total));
    }
    Ok(Value::Object(map))
}

/// `item_id` merged with the product's own fields into one flat object.
pub fn product_with_id(item_id: i64, product: &Product) -> Result<Map<String, Value>, ApiError> {
    let mut map = Map::new();
    map.insert("item_id".to_string(), json!(item_id));
    map.extend(into_object(serde_json::to_value(product)?)?);
    Ok(map)
}

/// Shared shaping of the item lookups: optional `q`, long description unless `short`.
pub fn shape_item(mut item: Map<String, Value>, q: Option<String>, short: bool) -> Value {
    if let Some(q) = non_empty(q) {
        item.insert("q".to_string(), json!(q));
    }
    if !short {
        item.insert("description".to_string(), json!(LONG_DESCRIPTION));
    }
    Value::Object(item)
}

pub fn images_to_json(images: &[Image]) -> Result<Value, ApiError> {
    Ok(serde_json::to_value(images)?)
}

pub fn offer_to_json(offer: &Offer) -> Result<Value, ApiError> {
    Ok(serde_json::to_value(offer)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldcheck_core::Loc;

    fn product(body: Value) -> Product {
        Product::validate_at(&body, &Loc::body()).unwrap()
    }

    #[test]
    fn price_with_tax_follows_tax_presence() {
        let taxed = product_with_tax(&product(json!({"name": "Foo", "price": 10.0, "tax": 2.5}))).unwrap();
        assert_eq!(taxed["price_with_tax"], json!(12.5));

        let zero = product_with_tax(&product(json!({"name": "Foo", "price": 10.0, "tax": 0}))).unwrap();
        assert_eq!(zero["price_with_tax"], json!(10.0));

        let untaxed = product_with_tax(&product(json!({"name": "Foo", "price": 10.0}))).unwrap();
        assert!(untaxed.get("price_with_tax").is_none());
    }

    #[test]
    fn product_with_id_merges_flat() {
        let map = product_with_id(7, &product(json!({"name": "Foo", "price": 1}))).unwrap();
        assert_eq!(map["item_id"], json!(7));
        assert_eq!(map["name"], json!("Foo"));
        assert_eq!(map["tags"], json!([]));
    }

    #[test]
    fn shape_item_skips_empty_q() {
        let mut base = Map::new();
        base.insert("item_id".to_string(), json!("foo"));

        let shaped = shape_item(base.clone(), Some(String::new()), true);
        assert_eq!(shaped, json!({"item_id": "foo"}));

        let shaped = shape_item(base, Some("bar".to_string()), false);
        assert_eq!(
            shaped,
            json!({"item_id": "foo", "q": "bar", "description": LONG_DESCRIPTION})
        );
    }
}
