/// Multipart boundary extraction helpers.
pub mod boundary;
/// Suspendable part-body parser.
pub mod body;
/// `Content-Disposition` header parser.
pub mod disposition;
/// Suspendable header-block parser.
pub mod headers;

pub use boundary::extract_multipart_boundary;
pub use body::{parse_multipart_body, BodyContinuation, BodyResult};
pub use disposition::{parse_content_disposition, ContentDisposition};
pub use headers::{parse_multipart_headers, Header, HeadersContinuation, HeadersResult};

pub(crate) const CR: u8 = b'\r';
pub(crate) const LF: u8 = b'\n';
pub(crate) const DASH: u8 = b'-';
pub(crate) const SP: u8 = b' ';
pub(crate) const HTAB: u8 = b'\t';
pub(crate) const COLON: u8 = b':';

/// Precomputed delimiter patterns for one boundary value.
#[derive(Debug, Clone)]
pub(crate) struct BoundaryNeedles {
    /// `--boundary`
    pub(crate) dashed: Vec<u8>,
    /// `\r\n--boundary`
    pub(crate) delimiter: Vec<u8>,
}

impl BoundaryNeedles {
    pub(crate) fn new(boundary: &str) -> Self {
        Self {
            dashed: format!("--{boundary}").into_bytes(),
            delimiter: format!("\r\n--{boundary}").into_bytes(),
        }
    }
}
