use crate::buffer::{Buffer, Delimiter};
use crate::constants;
use crate::helpers;
use crate::state::ScanStage;
use crate::Part;
use bytes::Bytes;

/// Scans a fully buffered `multipart/form-data` body into [`Part`]s.
///
/// The scanner walks `Preamble -> PartHeaders -> PartBody -> (PartHeaders | End)`.
/// It never performs I/O and stops at the first error: once an error has been
/// returned, every later call yields `None`.
///
/// The parts can be accessed via the [`Iterator`] implementation or the
/// methods defined in this type.
///
/// # Examples
///
/// ```
/// use cover_upload::Multipart;
///
/// let data = "--X-BOUNDARY\r\nContent-Disposition: form-data; name=\"my_text_field\"\r\n\r\nabcd\r\n--X-BOUNDARY--\r\n";
/// let mut multipart = Multipart::new(data, "X-BOUNDARY");
///
/// while let Some(part) = multipart.next_part().unwrap() {
///     assert_eq!(part.name(), Some("my_text_field"));
///     assert_eq!(&part.body()[..], b"abcd");
/// }
/// ```
#[derive(Debug)]
pub struct Multipart {
    buffer: Buffer,
    boundary: String,
    stage: ScanStage,
    next_part_idx: usize,
}

impl Multipart {
    /// Construct a new `Multipart` instance over the given data and the boundary.
    ///
    /// The boundary is given without the leading `--` of the wire format.
    pub fn new<D, B>(data: D, boundary: B) -> Multipart
    where
        D: Into<Bytes>,
        B: Into<String>,
    {
        Multipart {
            buffer: Buffer::new(data.into()),
            boundary: boundary.into(),
            stage: ScanStage::Preamble,
            next_part_idx: 0,
        }
    }

    /// Yields the next [`Part`] if available.
    pub fn next_part(&mut self) -> crate::Result<Option<Part>> {
        match self.scan() {
            Ok(part) => Ok(part),
            Err(err) => {
                self.stage = ScanStage::End;
                Err(err)
            }
        }
    }

    /// Yields the next [`Part`] with its positioning index as a tuple `(usize, Part)`.
    pub fn next_part_with_idx(&mut self) -> crate::Result<Option<(usize, Part)>> {
        self.next_part().map(|p| p.map(|part| (part.index(), part)))
    }

    fn scan(&mut self) -> crate::Result<Option<Part>> {
        if self.stage == ScanStage::Preamble {
            self.stage = match self.buffer.skip_preamble(&self.boundary)? {
                Delimiter::Part => ScanStage::PartHeaders,
                Delimiter::Close => ScanStage::End,
            };
        }

        if self.stage == ScanStage::End {
            return Ok(None);
        }

        let header_bytes = self
            .buffer
            .read_headers()
            .ok_or_else(|| crate::Error::MalformedPartHeaders("header block is not terminated by a blank line".into()))?;

        let mut headers = [httparse::EMPTY_HEADER; constants::MAX_HEADERS];

        let headers = match httparse::parse_headers(&header_bytes, &mut headers) {
            Ok(httparse::Status::Complete((_, raw_headers))) => helpers::convert_raw_headers_to_header_map(raw_headers)?,
            Ok(httparse::Status::Partial) => {
                return Err(crate::Error::MalformedPartHeaders("incomplete header block".into()));
            }
            Err(err) => return Err(crate::Error::MalformedPartHeaders(err.into())),
        };

        let raw_headers_len = header_bytes.len().saturating_sub(constants::CRLF_CRLF.len());
        let raw_headers = String::from_utf8_lossy(&header_bytes[..raw_headers_len]).into_owned();

        self.stage = ScanStage::PartBody;

        let (body, delimiter) = self.buffer.read_part_body(&self.boundary)?;

        self.stage = match delimiter {
            Delimiter::Part => ScanStage::PartHeaders,
            Delimiter::Close => ScanStage::End,
        };

        let part_idx = self.next_part_idx;
        self.next_part_idx += 1;

        Ok(Some(Part::new(raw_headers, headers, body, part_idx)))
    }
}

impl Iterator for Multipart {
    type Item = crate::Result<Part>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_part().transpose()
    }
}
