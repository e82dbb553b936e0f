use std::fmt::{self, Debug, Display, Formatter};

use derive_more::Display;
use http::StatusCode;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A set of errors that can occur while decoding, scanning and storing an
/// upload request.
#[derive(Display)]
#[non_exhaustive]
pub enum Error {
    /// The request body is not flagged as base64 encoded.
    #[display(fmt = "request body is not base64 encoded")]
    NotEncoded,

    /// The request body could not be decoded as standard base64.
    #[display(fmt = "failed to decode request body as base64: {}", _0)]
    DecodeBase64(base64::DecodeError),

    /// The request carries no `Content-Type` header.
    #[display(fmt = "missing Content-Type header")]
    MissingContentType,

    /// The `Content-Type` header has no usable `boundary` parameter.
    #[display(fmt = "malformed Content-Type header: {}", _0)]
    MalformedContentType(String),

    /// No boundary delimiter was found, or the body holds no parts.
    #[display(fmt = "multipart body contains no parts")]
    NoParts,

    /// The multipart body ended before a delimiter or the close delimiter.
    #[display(fmt = "incomplete multipart body")]
    TruncatedMultipart,

    /// A part's header block is unterminated or unparseable.
    #[display(fmt = "failed to read part headers: {}", _0)]
    MalformedPartHeaders(BoxError),

    /// The object store rejected the write.
    #[display(fmt = "failed to store object: {}", _0)]
    Storage(BoxError),

    /// Any other unexpected failure.
    #[display(fmt = "internal error: {}", _0)]
    Internal(BoxError),
}

/// Broad classification of an [`Error`], deciding who is at fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request itself is unacceptable.
    ClientInput,
    /// Storage or some other internal collaborator failed.
    Backend,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotEncoded
            | Error::DecodeBase64(_)
            | Error::MissingContentType
            | Error::MalformedContentType(_)
            | Error::NoParts
            | Error::TruncatedMultipart
            | Error::MalformedPartHeaders(_) => ErrorKind::ClientInput,
            Error::Storage(_) | Error::Internal(_) => ErrorKind::Backend,
        }
    }

    /// The HTTP status this error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::ClientInput => StatusCode::BAD_REQUEST,
            ErrorKind::Backend => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

impl std::error::Error for Error {}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.to_string().eq(&other.to_string())
    }
}

impl Eq for Error {}
