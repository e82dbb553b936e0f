use lazy_static::lazy_static;
use regex::bytes::Regex;

pub(crate) const DEFAULT_BUCKET: &str = "bookstore-images-bucket";
pub(crate) const BUCKET_ENV_VAR: &str = "COVER_UPLOAD_BUCKET";

pub(crate) const MAX_HEADERS: usize = 32;
pub(crate) const MAX_HEADER_BLOCK_SIZE: usize = 10 * 1024;
pub(crate) const BOUNDARY_EXT: &str = "--";
pub(crate) const CRLF: &str = "\r\n";
pub(crate) const CRLF_CRLF: &str = "\r\n\r\n";

lazy_static! {
    pub(crate) static ref CONTENT_DISPOSITION_FIELD_NAME_RE: Regex =
        Regex::new(r#"(?-u)(?:^|[;\s])name="([^"]*)""#).unwrap();
    pub(crate) static ref CONTENT_DISPOSITION_FILE_NAME_RE: Regex =
        Regex::new(r#"(?-u)(?:^|[;\s])filename="([^"]*)""#).unwrap();
    pub(crate) static ref BOUNDARY_PARAM_RE: Regex =
        Regex::new(r#"(?i-u)(?:^|[;\s])boundary\s*=\s*(?:"([^"]*)"|([^;]*))"#).unwrap();
}
