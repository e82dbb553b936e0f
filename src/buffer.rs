use crate::constants;
use bytes::Bytes;
use memchr::memmem;

/// What follows a boundary delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Delimiter {
    /// Another part starts after the delimiter line.
    Part,
    /// The close delimiter; nothing after it belongs to the body.
    Close,
}

#[derive(Debug, PartialEq, Eq)]
enum Suffix {
    Part(usize),
    Close,
    Incomplete,
    Invalid,
}

#[derive(Debug, PartialEq, Eq)]
struct Found {
    idx: usize,
    len: usize,
    delimiter: Delimiter,
}

/// The fully received, decoded request body. Reads consume bytes from the
/// front; every returned chunk is a zero-copy slice of the original data.
#[derive(Debug)]
pub(crate) struct Buffer {
    pub(crate) buf: Bytes,
}

impl Buffer {
    pub fn new(buf: Bytes) -> Self {
        Buffer { buf }
    }

    /// Discards the preamble together with the first delimiter line.
    pub fn skip_preamble(&mut self, boundary: &str) -> crate::Result<Delimiter> {
        let dash_boundary = format!("{}{}", constants::BOUNDARY_EXT, boundary);

        let mut found = None;
        if self.buf.starts_with(dash_boundary.as_bytes()) {
            found = match_delimiter(&self.buf, 0, dash_boundary.len())?;
        }
        if found.is_none() {
            let boundary_deriv = format!("{}{}", constants::CRLF, dash_boundary);
            found = find_delimiter(&self.buf, boundary_deriv.as_bytes())?;
        }

        match found {
            Some(found) => Ok(self.consume_delimiter(found)),
            None => Err(crate::Error::NoParts),
        }
    }

    /// Reads a part's header block, including the blank line which ends it.
    pub fn read_headers(&mut self) -> Option<Bytes> {
        if self.buf.starts_with(constants::CRLF.as_bytes()) {
            return Some(self.buf.split_to(constants::CRLF.len()));
        }

        let window_len = std::cmp::min(
            self.buf.len(),
            constants::MAX_HEADER_BLOCK_SIZE + constants::CRLF_CRLF.len(),
        );

        memmem::find(&self.buf[..window_len], constants::CRLF_CRLF.as_bytes())
            .map(|idx| self.buf.split_to(idx + constants::CRLF_CRLF.len()))
    }

    /// Reads a part body up to the next delimiter, which is consumed as well.
    /// The CRLF preceding the delimiter is not part of the body.
    pub fn read_part_body(&mut self, boundary: &str) -> crate::Result<(Bytes, Delimiter)> {
        let boundary_deriv = format!("{}{}{}", constants::CRLF, constants::BOUNDARY_EXT, boundary);

        match find_delimiter(&self.buf, boundary_deriv.as_bytes())? {
            Some(found) => {
                let body = self.buf.split_to(found.idx);
                let delimiter = self.consume_delimiter(Found { idx: 0, ..found });
                Ok((body, delimiter))
            }
            None => Err(crate::Error::TruncatedMultipart),
        }
    }

    fn consume_delimiter(&mut self, found: Found) -> Delimiter {
        match found.delimiter {
            Delimiter::Part => drop(self.buf.split_to(found.idx + found.len)),
            // The epilogue is ignored.
            Delimiter::Close => self.buf.clear(),
        }
        found.delimiter
    }
}

fn find_delimiter(hay: &[u8], pattern: &[u8]) -> crate::Result<Option<Found>> {
    for idx in memmem::find_iter(hay, pattern) {
        if let Some(found) = match_delimiter(hay, idx, pattern.len())? {
            return Ok(Some(found));
        }
    }
    Ok(None)
}

fn match_delimiter(hay: &[u8], idx: usize, pattern_len: usize) -> crate::Result<Option<Found>> {
    let found = |len, delimiter| Found { idx, len, delimiter };

    match match_suffix(&hay[idx + pattern_len..]) {
        Suffix::Part(suffix_len) => Ok(Some(found(pattern_len + suffix_len, Delimiter::Part))),
        Suffix::Close => Ok(Some(found(pattern_len + constants::BOUNDARY_EXT.len(), Delimiter::Close))),
        Suffix::Incomplete => Err(crate::Error::TruncatedMultipart),
        Suffix::Invalid => Ok(None),
    }
}

fn match_suffix(rest: &[u8]) -> Suffix {
    if rest.starts_with(constants::BOUNDARY_EXT.as_bytes()) {
        return Suffix::Close;
    }

    // Transport padding.
    let padding = rest.iter().take_while(|&&b| b == b' ' || b == b'\t').count();
    let line_end = &rest[padding..];

    if line_end.starts_with(constants::CRLF.as_bytes()) {
        Suffix::Part(padding + constants::CRLF.len())
    } else if line_end.is_empty() || line_end == b"\r" || (padding == 0 && line_end == b"-") {
        Suffix::Incomplete
    } else {
        Suffix::Invalid
    }
}
