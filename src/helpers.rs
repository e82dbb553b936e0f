use http::header::{HeaderMap, HeaderName, HeaderValue};
use httparse::Header;

pub(crate) fn convert_raw_headers_to_header_map(raw_headers: &[Header]) -> crate::Result<HeaderMap> {
    let mut headers = HeaderMap::with_capacity(raw_headers.len());

    for raw_header in raw_headers {
        let name = HeaderName::from_bytes(raw_header.name.as_bytes())
            .map_err(|err| crate::Error::MalformedPartHeaders(err.into()))?;

        let value =
            HeaderValue::from_bytes(raw_header.value).map_err(|err| crate::Error::MalformedPartHeaders(err.into()))?;

        headers.append(name, value);
    }

    Ok(headers)
}
