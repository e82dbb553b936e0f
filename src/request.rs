use bytes::Bytes;
use http::header::{self, HeaderMap};

/// An upload request as delivered by the transport.
///
/// Headers are held in an [`http::HeaderMap`], so `Content-Type` is looked up
/// case-insensitively whatever casing the transport used.
#[derive(Debug, Clone, Default)]
pub struct RawRequest {
    pub body: Bytes,
    pub is_base64_encoded: bool,
    pub headers: HeaderMap,
}

impl RawRequest {
    pub fn new<B: Into<Bytes>>(body: B, is_base64_encoded: bool, headers: HeaderMap) -> RawRequest {
        RawRequest {
            body: body.into(),
            is_base64_encoded,
            headers,
        }
    }

    /// Adapts a request from an `http` based transport. Whether the body is
    /// base64 encoded is transport knowledge and has to be given explicitly.
    pub fn from_http<B: Into<Bytes>>(req: http::Request<B>, is_base64_encoded: bool) -> RawRequest {
        let (parts, body) = req.into_parts();
        RawRequest::new(body, is_base64_encoded, parts.headers)
    }

    /// The `Content-Type` header value.
    pub fn content_type(&self) -> crate::Result<&str> {
        let value = self
            .headers
            .get(header::CONTENT_TYPE)
            .ok_or(crate::Error::MissingContentType)?;

        value
            .to_str()
            .map_err(|_| crate::Error::MalformedContentType("value is not visible ASCII".to_owned()))
    }

    /// The multipart boundary announced by the `Content-Type` header.
    pub fn boundary(&self) -> crate::Result<String> {
        self.content_type().and_then(crate::parse_boundary)
    }
}
