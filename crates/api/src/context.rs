use axum::http::{HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Mints a time-ordered (v7) id for requests that arrive without one.
#[derive(Debug, Copy, Clone, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::now_v7().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Per-request context, inserted as an extension by the request middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    request_id: String,
}

impl RequestContext {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
        }
    }

    /// `None` when the caller's id is not visible ASCII.
    pub fn from_request_id(id: &RequestId) -> Option<Self> {
        id.header_value().to_str().ok().map(Self::new)
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minted_ids_are_v7_uuids() {
        let request = Request::new(());
        let id = MakeRequestUuidV7.make_request_id(&request).unwrap();

        let ctx = RequestContext::from_request_id(&id).unwrap();
        let parsed = Uuid::parse_str(ctx.request_id()).unwrap();
        assert_eq!(parsed.get_version_num(), 7);
    }

    #[test]
    fn caller_ids_are_kept_verbatim() {
        let id = RequestId::new(HeaderValue::from_static("trace-abc-123"));
        let ctx = RequestContext::from_request_id(&id).unwrap();
        assert_eq!(ctx.request_id(), "trace-abc-123");
    }

    #[test]
    fn opaque_header_bytes_have_no_context() {
        let id = RequestId::new(HeaderValue::from_bytes(&[0xFF]).unwrap());
        assert_eq!(RequestContext::from_request_id(&id), None);
    }
}
