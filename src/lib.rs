#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Incremental, suspendable parsing for MIME multipart messages.
//!
//! The core of this crate is a pair of pull parsers over raw byte buffers:
//! [`parse_multipart_headers`] consumes a boundary line and the header block
//! that follows it, and [`parse_multipart_body`] consumes a part body up to
//! the next boundary. Neither performs any I/O; when the supplied bytes run
//! out mid-decision, the result carries a continuation to [`resume`] once
//! more input is available, so the message may arrive in arbitrarily small
//! chunks.
//!
//! [`resume`]: HeadersContinuation::resume
//!
//! ```
//! use bytes::Bytes;
//! use partstream::{parse_multipart_body, parse_multipart_headers, BodyResult, HeadersResult};
//!
//! # fn main() -> Result<(), partstream::ParseError> {
//! let message = Bytes::from_static(b"--X\r\nContent-Type: text/plain\r\n\r\nhello\r\n--X--");
//!
//! let HeadersResult::Complete { headers, remaining } = parse_multipart_headers(message, "X")?
//! else {
//!     unreachable!()
//! };
//! assert_eq!(headers, vec![("content-type".to_owned(), "text/plain".to_owned())]);
//!
//! let BodyResult::Complete { chunk, done, .. } = parse_multipart_body(remaining, "X")? else {
//!     unreachable!()
//! };
//! assert_eq!(&chunk[..], b"hello");
//! assert!(done);
//! # Ok(())
//! # }
//! ```
//!
//! For callers with a `futures` byte stream, [`Multipart`] drives the same
//! parsers and yields fully buffered [`Part`]s.

/// Byte-buffer primitives shared by the parsers.
mod buffer;
/// Error types exposed by this crate.
pub mod error;
/// HTTP method token type.
pub mod method;
/// High-level multipart stream reader.
pub mod multipart;
/// Low-level suspendable parser components.
pub mod parser;
/// Fully buffered multipart part API.
pub mod part;
/// URI scheme token type.
pub mod scheme;

pub use error::{Error, ParseError};
pub use method::Method;
pub use multipart::Multipart;
pub use parser::{
    extract_multipart_boundary, parse_content_disposition, parse_multipart_body,
    parse_multipart_headers, BodyContinuation, BodyResult, ContentDisposition, Header,
    HeadersContinuation, HeadersResult,
};
pub use part::Part;
pub use scheme::Scheme;
