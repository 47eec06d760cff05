//! Request extraction: buffer every request part once, then let a route's
//! [`Contract`] pull typed, validated values out of it.
//!
//! Extraction never stops at the first bad field. A contract reads all of its
//! parameters, each read records its own violations, and [`Valid`] rejects the
//! request with the complete list before the handler body runs.

use axum::{
    async_trait,
    body::Bytes,
    extract::{
        rejection::RawPathParamsRejection, Form, FromRequest, FromRequestParts, Multipart, Query,
        RawPathParams, Request,
    },
    http::header::CONTENT_TYPE,
};
use serde_json::{Value, json};

use fieldcheck_core::{
    ErrorKind, Fields, FromParam, Loc, Location, Validate, ValidationErrors, Violation,
};

use crate::app::errors::ApiError;

/// A file part of a multipart body. The content is counted, never retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: Option<String>,
    pub size: usize,
}

/// Decoded request body, when it is not form data.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Absent,
    Json(Value),
    Malformed(String),
    Unsupported(String),
}

impl Body {
    /// Bodies without a content type are tried as JSON.
    pub fn from_bytes(content_type: Option<&str>, bytes: &[u8]) -> Self {
        if bytes.is_empty() {
            return Body::Absent;
        }
        match content_type {
            Some(ct) if !is_json(ct) => Body::Unsupported(ct.to_string()),
            _ => match serde_json::from_slice(bytes) {
                Ok(value) => Body::Json(value),
                Err(e) => Body::Malformed(e.to_string()),
            },
        }
    }
}

fn is_json(content_type: &str) -> bool {
    let essence = content_type.split(';').next().unwrap_or(content_type).trim();
    essence.eq_ignore_ascii_case("application/json") || essence.to_ascii_lowercase().ends_with("+json")
}

fn has_essence(content_type: &str, expected: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case(expected))
}

/// Everything a contract may read, gathered from a single request.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestInputs {
    pub path: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub query_error: Option<String>,
    pub body: Body,
    /// Raw bytes of every text form field, urlencoded or multipart.
    pub form: Vec<(String, Bytes)>,
    pub files: Vec<(String, UploadedFile)>,
}

impl Default for RequestInputs {
    fn default() -> Self {
        Self {
            path: Vec::new(),
            query: Vec::new(),
            query_error: None,
            body: Body::Absent,
            form: Vec::new(),
            files: Vec::new(),
        }
    }
}

fn parse<T: FromParam>(
    loc: &Loc,
    raw: &str,
    errors: &mut ValidationErrors,
    check: impl FnOnce(&T) -> Result<(), Violation>,
) -> Option<T> {
    let value = errors.check(loc, T::from_param(raw))?;
    errors.check(loc, check(&value))?;
    Some(value)
}

fn unchecked<T>(_: &T) -> Result<(), Violation> {
    Ok(())
}

impl RequestInputs {
    fn path_value(&self, name: &str) -> Option<&str> {
        self.path
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Repeated scalar query keys resolve to the last occurrence.
    fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .rev()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn form_value(&self, name: &str) -> Option<&[u8]> {
        self.form
            .iter()
            .rev()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_ref())
    }

    fn file_part(&self, name: &str) -> Option<&UploadedFile> {
        self.files
            .iter()
            .rev()
            .find(|(k, _)| k == name)
            .map(|(_, f)| f)
    }

    pub fn path<T: FromParam>(&self, name: &str, errors: &mut ValidationErrors) -> Option<T> {
        self.path_with(name, errors, unchecked)
    }

    pub fn path_with<T: FromParam>(
        &self,
        name: &str,
        errors: &mut ValidationErrors,
        check: impl FnOnce(&T) -> Result<(), Violation>,
    ) -> Option<T> {
        let loc = Loc::path(name);
        match self.path_value(name) {
            Some(raw) => parse(&loc, raw, errors, check),
            None => {
                errors.add(loc, Violation::missing());
                None
            }
        }
    }

    pub fn query<T: FromParam>(&self, name: &str, errors: &mut ValidationErrors) -> Option<T> {
        let loc = Loc::query(name);
        match self.query_value(name) {
            Some(raw) => parse(&loc, raw, errors, unchecked),
            None => {
                errors.add(loc, Violation::missing());
                None
            }
        }
    }

    /// Optional query parameter; the outer `None` means it was present but invalid.
    pub fn query_opt<T: FromParam>(&self, name: &str, errors: &mut ValidationErrors) -> Option<Option<T>> {
        self.query_opt_with(name, errors, unchecked)
    }

    pub fn query_opt_with<T: FromParam>(
        &self,
        name: &str,
        errors: &mut ValidationErrors,
        check: impl FnOnce(&T) -> Result<(), Violation>,
    ) -> Option<Option<T>> {
        match self.query_value(name) {
            Some(raw) => parse(&Loc::query(name), raw, errors, check).map(Some),
            None => Some(None),
        }
    }

    /// Query parameter with a default; only supplied values are checked.
    pub fn query_or<T: FromParam>(&self, name: &str, default: T, errors: &mut ValidationErrors) -> Option<T> {
        self.query_or_with(name, default, errors, unchecked)
    }

    pub fn query_or_with<T: FromParam>(
        &self,
        name: &str,
        default: T,
        errors: &mut ValidationErrors,
        check: impl FnOnce(&T) -> Result<(), Violation>,
    ) -> Option<T> {
        match self.query_value(name) {
            Some(raw) => parse(&Loc::query(name), raw, errors, check),
            None => Some(default),
        }
    }

    /// Every occurrence of a repeatable query key, in order.
    pub fn query_list<T: FromParam>(&self, name: &str, errors: &mut ValidationErrors) -> Option<Option<Vec<T>>> {
        let loc = Loc::query(name);
        let raw: Vec<&str> = self
            .query
            .iter()
            .filter(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
            .collect();
        if raw.is_empty() {
            return Some(None);
        }
        let parsed: Vec<Option<T>> = raw
            .iter()
            .enumerate()
            .map(|(i, value)| parse(&loc.index(i), value, errors, unchecked))
            .collect();
        parsed.into_iter().collect::<Option<Vec<T>>>().map(Some)
    }

    /// Required text field of a urlencoded or multipart form.
    pub fn form<T: FromParam>(&self, name: &str, errors: &mut ValidationErrors) -> Option<T> {
        let loc = Loc::form(name);
        match self.form_value(name).map(std::str::from_utf8) {
            Some(Ok(raw)) => parse(&loc, raw, errors, unchecked),
            Some(Err(_)) => {
                errors.add(
                    loc,
                    Violation::new(ErrorKind::StringType, "Input should be a valid UTF-8 string"),
                );
                None
            }
            None => {
                errors.add(loc, Violation::missing());
                None
            }
        }
    }

    /// Required multipart file part.
    pub fn file(&self, name: &str, errors: &mut ValidationErrors) -> Option<UploadedFile> {
        let loc = Loc::file(name);
        if let Some(file) = self.file_part(name) {
            return Some(file.clone());
        }
        let violation = if self.form_value(name).is_some() {
            Violation::new(ErrorKind::FileType, "Expected an uploaded file, received a text field")
        } else {
            Violation::missing()
        };
        errors.add(loc, violation);
        None
    }

    /// Byte length of a required upload, sent either as a file part or a plain field.
    pub fn file_size(&self, name: &str, errors: &mut ValidationErrors) -> Option<usize> {
        if let Some(file) = self.file_part(name) {
            return Some(file.size);
        }
        if let Some(raw) = self.form_value(name) {
            return Some(raw.len());
        }
        errors.add(Loc::file(name), Violation::missing());
        None
    }

    fn body_violation(&self, errors: &mut ValidationErrors) {
        let violation = match &self.body {
            Body::Malformed(reason) => Violation::new(ErrorKind::JsonInvalid, "JSON decode error")
                .with_ctx(json!({ "error": reason })),
            Body::Unsupported(content_type) => Violation::new(
                ErrorKind::ContentType,
                format!("Expected a JSON body, received '{content_type}'"),
            ),
            Body::Absent | Body::Json(_) => Violation::missing(),
        };
        errors.add(Loc::body(), violation);
    }

    /// The whole JSON body as one shape.
    pub fn body<T: Validate>(&self, errors: &mut ValidationErrors) -> Option<T> {
        match &self.body {
            Body::Json(value) => T::validate(value, &Loc::body(), errors),
            _ => {
                self.body_violation(errors);
                None
            }
        }
    }

    /// Like [`RequestInputs::body`], but an absent or `null` body means `None`.
    pub fn body_opt<T: Validate>(&self, errors: &mut ValidationErrors) -> Option<Option<T>> {
        match &self.body {
            Body::Absent | Body::Json(Value::Null) => Some(None),
            Body::Json(value) => T::validate(value, &Loc::body(), errors).map(Some),
            _ => {
                self.body_violation(errors);
                None
            }
        }
    }

    /// A shape read from a named top-level key of the JSON body.
    pub fn embedded<T: Validate>(&self, key: &str, errors: &mut ValidationErrors) -> Option<T> {
        let loc = Loc::body();
        match &self.body {
            Body::Json(value) => Fields::of(value, &loc, errors)?.required(key, errors),
            Body::Absent => {
                errors.add(loc.key(key), Violation::missing());
                None
            }
            _ => {
                self.body_violation(errors);
                None
            }
        }
    }

    async fn read_multipart<S>(&mut self, req: Request, state: &S) -> Result<(), ApiError>
    where
        S: Send + Sync,
    {
        let mut multipart = Multipart::from_request(req, state).await?;
        while let Some(mut field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match field.file_name().map(str::to_string) {
                Some(filename) => {
                    let content_type = field.content_type().map(str::to_string);
                    let mut size = 0;
                    while let Some(chunk) = field.chunk().await? {
                        size += chunk.len();
                    }
                    self.files.push((
                        name,
                        UploadedFile {
                            filename,
                            content_type,
                            size,
                        },
                    ));
                }
                None => {
                    let raw = field.bytes().await?;
                    self.form.push((name, raw));
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl<S> FromRequest<S> for RequestInputs
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();

        let path = match RawPathParams::from_request_parts(&mut parts, state).await {
            Ok(params) => params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            Err(RawPathParamsRejection::MissingPathParams(_)) => Vec::new(),
            Err(rejection) => return Err(rejection.into()),
        };
        let (query, query_error) = match Query::<Vec<(String, String)>>::try_from_uri(&parts.uri) {
            Ok(Query(pairs)) => (pairs, None),
            Err(rejection) => (Vec::new(), Some(rejection.body_text())),
        };
        let content_type = parts
            .headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let mut inputs = RequestInputs {
            path,
            query,
            query_error,
            ..RequestInputs::default()
        };

        let req = Request::from_parts(parts, body);
        match content_type.as_deref() {
            Some(ct) if has_essence(ct, "multipart/form-data") => {
                inputs.read_multipart(req, state).await?;
            }
            Some(ct) if has_essence(ct, "application/x-www-form-urlencoded") => {
                let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state).await?;
                inputs.form = pairs.into_iter().map(|(k, v)| (k, Bytes::from(v))).collect();
            }
            _ => {
                let bytes = Bytes::from_request(req, state).await?;
                inputs.body = Body::from_bytes(content_type.as_deref(), &bytes);
            }
        }

        Ok(inputs)
    }
}

/// The declared input shape of one route.
pub trait Contract: Sized {
    /// Read every declared parameter, recording all violations.
    fn extract(inputs: &RequestInputs, errors: &mut ValidationErrors) -> Option<Self>;

    fn from_inputs(inputs: &RequestInputs) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(reason) = &inputs.query_error {
            errors.add(
                Loc::at(Location::Query),
                Violation::new(ErrorKind::QueryInvalid, reason.clone()),
            );
        }
        let value = Self::extract(inputs, &mut errors);
        errors.finish(value)
    }
}

/// Extractor yielding a fully validated contract.
#[derive(Debug, Clone)]
pub struct Valid<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Valid<T>
where
    S: Send + Sync,
    T: Contract + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let inputs = RequestInputs::from_request(req, state).await?;
        Ok(Valid(T::from_inputs(&inputs)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldcheck_core::{Length, Range};

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn body_content_type_detection() {
        assert_eq!(Body::from_bytes(Some("application/json"), b""), Body::Absent);
        assert_eq!(
            Body::from_bytes(Some("application/json; charset=utf-8"), b"{\"a\":1}"),
            Body::Json(json!({"a": 1}))
        );
        assert_eq!(
            Body::from_bytes(Some("application/vnd.api+json"), b"[]"),
            Body::Json(json!([]))
        );
        assert_eq!(Body::from_bytes(None, b"true"), Body::Json(json!(true)));
        assert!(matches!(Body::from_bytes(None, b"{"), Body::Malformed(_)));
        assert_eq!(
            Body::from_bytes(Some("text/plain"), b"hi"),
            Body::Unsupported("text/plain".to_string())
        );
    }

    #[test]
    fn query_reads_last_occurrence_and_lists_read_all() {
        let inputs = RequestInputs {
            query: pairs(&[("q", "a"), ("q", "b")]),
            ..RequestInputs::default()
        };
        let mut errors = ValidationErrors::new();
        assert_eq!(inputs.query_opt::<String>("q", &mut errors), Some(Some("b".to_string())));
        assert_eq!(
            inputs.query_list::<String>("q", &mut errors),
            Some(Some(vec!["a".to_string(), "b".to_string()]))
        );
        assert_eq!(inputs.query_list::<String>("missing", &mut errors), Some(None));
        assert!(errors.is_empty());
    }

    #[test]
    fn checks_apply_to_supplied_values_only() {
        let inputs = RequestInputs {
            query: pairs(&[("q", "xy")]),
            path: pairs(&[("item_id", "1001")]),
            ..RequestInputs::default()
        };
        let mut errors = ValidationErrors::new();

        let q = inputs.query_opt_with::<String>("q", &mut errors, |q| Length::between(3, 50).check(q));
        assert_eq!(q, None);

        let fixed = inputs.query_or_with("other", "fixedquery".to_string(), &mut errors, |q| {
            Length::min(3).check(q)
        });
        assert_eq!(fixed.as_deref(), Some("fixedquery"));

        let id = inputs.path_with::<i64>("item_id", &mut errors, |id| Range::between(0, 1000).check(*id));
        assert_eq!(id, None);

        let locs: Vec<String> = errors.iter().map(|e| e.loc.to_string()).collect();
        assert_eq!(locs, vec!["query.q", "path.item_id"]);
    }

    #[test]
    fn list_items_are_located_by_index() {
        let inputs = RequestInputs {
            query: pairs(&[("n", "1"), ("n", "x"), ("n", "3")]),
            ..RequestInputs::default()
        };
        let mut errors = ValidationErrors::new();
        assert_eq!(inputs.query_list::<i64>("n", &mut errors), None);
        assert_eq!(errors.iter().next().unwrap().loc.to_string(), "query.n[1]");
    }

    #[test]
    fn embedded_keys_are_each_reported_when_body_is_absent() {
        let inputs = RequestInputs::default();
        let mut errors = ValidationErrors::new();
        let item: Option<String> = inputs.embedded("item", &mut errors);
        let user: Option<String> = inputs.embedded("user", &mut errors);
        assert!(item.is_none() && user.is_none());

        let locs: Vec<String> = errors.iter().map(|e| e.loc.to_string()).collect();
        assert_eq!(locs, vec!["body.item", "body.user"]);
    }

    #[test]
    fn malformed_body_is_reported_once() {
        let inputs = RequestInputs {
            body: Body::Malformed("EOF while parsing".to_string()),
            ..RequestInputs::default()
        };
        let mut errors = ValidationErrors::new();
        let _: Option<String> = inputs.embedded("item", &mut errors);
        let _: Option<String> = inputs.embedded("user", &mut errors);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.iter().next().unwrap().kind, ErrorKind::JsonInvalid);
    }

    fn form_fields(items: &[(&str, &[u8])]) -> Vec<(String, Bytes)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), Bytes::copy_from_slice(v)))
            .collect()
    }

    #[test]
    fn file_size_accepts_plain_fields() {
        let inputs = RequestInputs {
            form: form_fields(&[("file", &b"hello"[..])]),
            ..RequestInputs::default()
        };
        let mut errors = ValidationErrors::new();
        assert_eq!(inputs.file_size("file", &mut errors), Some(5));
        assert_eq!(inputs.file("file", &mut errors), None);
        assert_eq!(errors.iter().next().unwrap().kind, ErrorKind::FileType);
    }

    #[test]
    fn file_size_counts_raw_bytes() {
        let inputs = RequestInputs {
            form: form_fields(&[("file", &[0xFFu8; 10][..])]),
            ..RequestInputs::default()
        };
        let mut errors = ValidationErrors::new();
        assert_eq!(inputs.file_size("file", &mut errors), Some(10));
        assert!(errors.is_empty());
    }

    #[test]
    fn form_text_must_be_utf8() {
        let inputs = RequestInputs {
            form: form_fields(&[("username", &[0xFFu8, 0xFE][..]), ("password", &b"secret"[..])]),
            ..RequestInputs::default()
        };
        let mut errors = ValidationErrors::new();
        assert_eq!(inputs.form::<String>("username", &mut errors), None);
        assert_eq!(inputs.form::<String>("password", &mut errors).as_deref(), Some("secret"));

        let err = errors.iter().next().unwrap();
        assert_eq!(err.loc.to_string(), "form.username");
        assert_eq!(err.kind, ErrorKind::StringType);
    }
}
