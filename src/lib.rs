//! Accepts a base64 encoded `multipart/form-data` upload, extracts the file it
//! carries and persists it to an object store under a freshly generated key.
//!
//! The pieces can be used on their own: [`decode_body`] undoes the transport
//! encoding, [`parse_boundary`] reads the boundary from a `Content-Type` value,
//! [`Multipart`] scans a buffered body into [`Part`]s and [`build_response`]
//! maps an outcome to a response. [`Uploader`] drives all of them against an
//! [`ObjectStore`].
//!
//! # Examples
//!
//! ```
//! use cover_upload::{parse_boundary, Multipart};
//!
//! let boundary = parse_boundary("multipart/form-data; boundary=XYZ").unwrap();
//! let data = &b"preamble\r\n--XYZ\r\nContent-Disposition: form-data; name=\"file\"\r\n\r\n\x01\x02\x03\r\n--XYZ--"[..];
//!
//! let part = Multipart::new(data, boundary).next_part().unwrap().unwrap();
//! assert_eq!(&part.body()[..], &[0x01, 0x02, 0x03]);
//! ```

pub use config::Config;
pub use decode::decode_body;
pub use error::{BoxError, Error, ErrorKind};
pub use id::{IdGenerator, UuidGenerator};
pub use multipart::Multipart;
pub use part::Part;
pub use request::RawRequest;
pub use response::{build_response, UploadedBody};
pub use storage::{MemoryStore, ObjectStore, PutObject, Receipt, StoredObject};
pub use upload::{UploadResult, Uploader};

mod buffer;
mod config;
mod constants;
mod content_disposition;
mod decode;
mod error;
mod helpers;
mod id;
mod multipart;
mod part;
mod request;
mod response;
mod state;
mod storage;
mod upload;

/// A Result type often returned from methods that can have `cover_upload` errors.
pub type Result<T> = std::result::Result<T, Error>;

/// Parses the `Content-Type` header to extract the boundary value.
///
/// Quoted boundary values are unquoted. The boundary is returned without the
/// leading `--` of the wire format.
///
/// Values which are not a valid media type, such as a bare `boundary=XYZ` or an
/// unquoted boundary holding `=`, `/` or `:`, fall back to a plain search for the
/// `boundary` parameter. Only a missing or empty boundary is rejected.
pub fn parse_boundary<T: AsRef<str>>(content_type: T) -> crate::Result<String> {
    let content_type = content_type.as_ref();

    let boundary = match content_type.parse::<mime::Mime>() {
        Ok(m) => m.get_param(mime::BOUNDARY).map(|name| name.as_str().to_owned()),
        Err(err) => {
            log::debug!("Content-Type is not a valid media type ({}), scanning for boundary", err);
            scan_boundary_param(content_type)
        }
    };

    match boundary {
        Some(boundary) if !boundary.is_empty() => Ok(boundary),
        Some(_) => Err(crate::Error::MalformedContentType("empty boundary".to_owned())),
        None => Err(crate::Error::MalformedContentType("no boundary parameter".to_owned())),
    }
}

fn scan_boundary_param(content_type: &str) -> Option<String> {
    let cap = constants::BOUNDARY_PARAM_RE.captures(content_type.as_bytes())?;

    match (cap.get(1), cap.get(2)) {
        (Some(quoted), _) => Some(String::from_utf8_lossy(quoted.as_bytes()).into_owned()),
        (None, Some(token)) => Some(String::from_utf8_lossy(token.as_bytes()).trim().to_owned()),
        (None, None) => None,
    }
}
