use crate::constants;
use http::header::{self, HeaderMap};
use regex::bytes::Regex;

pub(crate) struct ContentDisposition {
    pub(crate) field_name: Option<String>,
    pub(crate) file_name: Option<String>,
}

impl ContentDisposition {
    pub fn parse(headers: &HeaderMap) -> ContentDisposition {
        let content_disposition = headers.get(header::CONTENT_DISPOSITION).map(|val| val.as_bytes());

        let field_name = content_disposition.and_then(|val| capture(&constants::CONTENT_DISPOSITION_FIELD_NAME_RE, val));
        let file_name = content_disposition.and_then(|val| capture(&constants::CONTENT_DISPOSITION_FILE_NAME_RE, val));

        ContentDisposition { field_name, file_name }
    }
}

fn capture(re: &Regex, val: &[u8]) -> Option<String> {
    re.captures(val)
        .and_then(|cap| cap.get(1))
        .map(|m| String::from_utf8_lossy(m.as_bytes()).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn test_parse_content_disposition() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_DISPOSITION,
            HeaderValue::from_static(r#"form-data; name="file"; filename="cover.png""#),
        );

        let cd = ContentDisposition::parse(&headers);
        assert_eq!(cd.field_name.as_deref(), Some("file"));
        assert_eq!(cd.file_name.as_deref(), Some("cover.png"));
    }

    #[test]
    fn test_parse_missing_content_disposition() {
        let cd = ContentDisposition::parse(&HeaderMap::new());
        assert!(cd.field_name.is_none());
        assert!(cd.file_name.is_none());
    }
}
