use crate::content_disposition::ContentDisposition;
use bytes::Bytes;
use http::header::{self, HeaderMap};

/// A single part of a multipart body: its header block and its exact body bytes.
///
/// The body is a zero-copy slice of the decoded request, never reinterpreted
/// through any charset.
#[derive(Debug)]
pub struct Part {
    raw_headers: String,
    headers: HeaderMap,
    body: Bytes,
    meta: PartMeta,
}

#[derive(Debug)]
struct PartMeta {
    name: Option<String>,
    file_name: Option<String>,
    content_type: Option<mime::Mime>,
    idx: usize,
}

impl Part {
    pub(crate) fn new(raw_headers: String, headers: HeaderMap, body: Bytes, idx: usize) -> Self {
        let ContentDisposition { field_name, file_name } = ContentDisposition::parse(&headers);
        let content_type = Self::parse_content_type(&headers);

        Part {
            raw_headers,
            headers,
            body,
            meta: PartMeta {
                name: field_name,
                file_name,
                content_type,
                idx,
            },
        }
    }

    fn parse_content_type(headers: &HeaderMap) -> Option<mime::Mime> {
        headers
            .get(header::CONTENT_TYPE)
            .and_then(|val| val.to_str().ok())
            .and_then(|val| val.parse::<mime::Mime>().ok())
    }

    /// The header block as received, without the blank line ending it.
    pub fn raw_headers(&self) -> &str {
        &self.raw_headers
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The `name` parameter of the part's `Content-Disposition` header.
    pub fn name(&self) -> Option<&str> {
        self.meta.name.as_deref()
    }

    /// The `filename` parameter of the part's `Content-Disposition` header.
    pub fn file_name(&self) -> Option<&str> {
        self.meta.file_name.as_deref()
    }

    pub fn content_type(&self) -> Option<&mime::Mime> {
        self.meta.content_type.as_ref()
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn into_body(self) -> Bytes {
        self.body
    }

    /// Position of this part within the multipart body, starting at zero.
    pub fn index(&self) -> usize {
        self.meta.idx
    }
}
