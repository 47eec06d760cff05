//! Absolute HTTP(S) URL value.

use serde::Serialize;
use serde_json::{Value, json};
use url::Url;

use crate::error::{ErrorKind, ValidationErrors, Violation};
use crate::loc::Loc;
use crate::validate::Validate;

/// Longest accepted URL, in characters.
pub const MAX_URL_LENGTH: usize = 2083;

/// An absolute `http`/`https` URL with a host.
///
/// The accepted text is kept verbatim so echoing it back never rewrites it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct HttpUrl(String);

impl HttpUrl {
    pub fn parse(raw: &str) -> Result<Self, Violation> {
        if raw.chars().count() > MAX_URL_LENGTH {
            return Err(Violation::new(
                ErrorKind::UrlTooLong,
                format!("URL should have at most {MAX_URL_LENGTH} characters"),
            )
            .with_ctx(json!({ "max_length": MAX_URL_LENGTH })));
        }

        let url = Url::parse(raw).map_err(|e| {
            Violation::new(ErrorKind::UrlParsing, format!("Input should be a valid URL, {e}"))
                .with_ctx(json!({ "error": e.to_string() }))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Violation::new(
                ErrorKind::UrlScheme,
                "URL scheme should be 'http' or 'https'",
            )
            .with_ctx(json!({ "expected_schemes": "'http' or 'https'" })));
        }

        if url.host_str().is_none_or(str::is_empty) {
            return Err(Violation::new(
                ErrorKind::UrlParsing,
                "Input should be a valid URL, empty host",
            ));
        }

        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for HttpUrl {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Validate for HttpUrl {
    fn validate(value: &Value, loc: &Loc, errors: &mut ValidationErrors) -> Option<Self> {
        let raw = String::validate(value, loc, errors)?;
        errors.check(loc, HttpUrl::parse(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_text_verbatim() {
        let url = HttpUrl::parse("http://example.com").unwrap();
        assert_eq!(url.as_str(), "http://example.com");
    }

    #[test]
    fn rejects_relative_and_non_http() {
        assert_eq!(
            HttpUrl::parse("/baz.jpg").unwrap_err().kind,
            ErrorKind::UrlParsing
        );
        assert_eq!(
            HttpUrl::parse("ftp://example.com/baz.jpg").unwrap_err().kind,
            ErrorKind::UrlScheme
        );
        assert_eq!(
            HttpUrl::parse("not a url").unwrap_err().kind,
            ErrorKind::UrlParsing
        );
    }

    #[test]
    fn rejects_overlong() {
        let long = format!("http://example.com/{}", "a".repeat(MAX_URL_LENGTH));
        assert_eq!(HttpUrl::parse(&long).unwrap_err().kind, ErrorKind::UrlTooLong);
    }
}
