/// Where the scanner stands within the multipart body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScanStage {
    Preamble,
    PartHeaders,
    PartBody,
    End,
}
