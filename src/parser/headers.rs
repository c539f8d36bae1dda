use bytes::Bytes;

use crate::{
    buffer::{concat, find_subslice, is_partial_prefix},
    error::ParseError,
    parser::{BoundaryNeedles, COLON, CR, DASH, HTAB, LF, SP},
};

/// A single part header: lowercased name and verbatim value.
pub type Header = (String, String);

/// Outcome of a header-block parse.
#[derive(Debug)]
pub enum HeadersResult {
    /// A full header block was consumed.
    ///
    /// `headers` is empty when the recognized boundary was the terminal
    /// `--boundary--`; `remaining` then holds everything after the closing
    /// dashes.
    Complete {
        /// Parsed headers in source order.
        headers: Vec<Header>,
        /// Input immediately after the `CRLF CRLF` header-block terminator.
        remaining: Bytes,
    },
    /// The input ended before a decision could be made.
    MoreRequired(HeadersContinuation),
}

/// Suspended header parse, resumable once more input arrives.
///
/// Resuming consumes the continuation, so a suspended parse can only be
/// continued once.
#[derive(Debug)]
pub struct HeadersContinuation {
    needles: BoundaryNeedles,
    pending: Bytes,
    state: HeadersState,
}

impl HeadersContinuation {
    /// Resumes the parse with additional input.
    ///
    /// `extra` must be non-empty; a caller with no further input has an
    /// incomplete message on its hands.
    pub fn resume(self, extra: impl Into<Bytes>) -> Result<HeadersResult, ParseError> {
        let extra = extra.into();
        if extra.is_empty() {
            return Err(ParseError::new("no further input for a suspended parser"));
        }

        run_headers(self.needles, concat(self.pending, extra), self.state)
    }
}

#[derive(Debug)]
enum HeadersState {
    /// Positioned where a `--boundary` line may begin.
    Delimiter,
    /// Discarding bytes until a `CRLF --boundary` sequence.
    Preamble,
    /// Positioned at the CRLF that introduces the first header line.
    LineStart,
    /// Accumulating a header name up to the colon.
    Name { headers: Vec<Header>, name: Vec<u8> },
    /// Accumulating a header value up to its terminating CRLF.
    Value {
        headers: Vec<Header>,
        name: Vec<u8>,
        value: Vec<u8>,
    },
}

/// Parses the header block of the next multipart part.
///
/// `data` may begin at a `--boundary` line or anywhere inside the preamble;
/// preamble bytes are discarded. On success `remaining` begins immediately
/// after the blank line that terminates the block. When the input runs out
/// mid-block the result carries a [`HeadersContinuation`] to feed with more
/// bytes.
pub fn parse_multipart_headers(
    data: impl Into<Bytes>,
    boundary: &str,
) -> Result<HeadersResult, ParseError> {
    run_headers(
        BoundaryNeedles::new(boundary),
        data.into(),
        HeadersState::Delimiter,
    )
}

fn run_headers(
    needles: BoundaryNeedles,
    mut data: Bytes,
    mut state: HeadersState,
) -> Result<HeadersResult, ParseError> {
    loop {
        state = match state {
            HeadersState::Delimiter => {
                // `--boundary` plus the two bytes that classify what follows.
                if data.len() < needles.dashed.len() + 2 {
                    return Ok(suspend(needles, data, HeadersState::Delimiter));
                }

                if !data.starts_with(&needles.dashed) {
                    HeadersState::Preamble
                } else {
                    let rest = data.slice(needles.dashed.len()..);
                    match (rest[0], rest[1]) {
                        (DASH, DASH) => {
                            return Ok(HeadersResult::Complete {
                                headers: Vec::new(),
                                remaining: rest.slice(2..),
                            });
                        }
                        (CR, LF) => {
                            data = rest;
                            HeadersState::LineStart
                        }
                        _ => return Err(ParseError::new("malformed multipart boundary")),
                    }
                }
            }
            HeadersState::Preamble => match find_subslice(&data, &needles.delimiter) {
                Some(at) => {
                    // Drop the preamble and its trailing CRLF; the boundary
                    // line itself re-enters the delimiter logic.
                    data = data.slice(at + 2..);
                    HeadersState::Delimiter
                }
                None => {
                    // Only the tail can still begin a delimiter.
                    let keep = (needles.delimiter.len() - 1).min(data.len());
                    data = data.slice(data.len() - keep..);
                    return Ok(suspend(needles, data, HeadersState::Preamble));
                }
            },
            HeadersState::LineStart => {
                if data.starts_with(b"\r\n\r\n") {
                    return Ok(HeadersResult::Complete {
                        headers: Vec::new(),
                        remaining: data.slice(4..),
                    });
                }

                if data.starts_with(b"\r\n")
                    && (data.len() >= 4 || data.get(2).is_some_and(|byte| *byte != CR))
                {
                    data = data.slice(2..);
                    HeadersState::Name {
                        headers: Vec::new(),
                        name: Vec::new(),
                    }
                } else if is_partial_prefix(&data, b"\r\n\r\n") {
                    return Ok(suspend(needles, data, HeadersState::LineStart));
                } else {
                    return Err(ParseError::new("malformed part header block"));
                }
            }
            HeadersState::Name { headers, mut name } => {
                // Whitespace ahead of the first name byte is not part of it.
                while name.is_empty() && matches!(data.first(), Some(&SP) | Some(&HTAB)) {
                    data = data.slice(1..);
                }

                match memchr::memchr(COLON, &data) {
                    Some(colon) => {
                        name.extend_from_slice(&data[..colon]);
                        data = data.slice(colon + 1..);
                        HeadersState::Value {
                            headers,
                            name,
                            value: Vec::new(),
                        }
                    }
                    None => {
                        name.extend_from_slice(&data);
                        return Ok(suspend(
                            needles,
                            Bytes::new(),
                            HeadersState::Name { headers, name },
                        ));
                    }
                }
            }
            HeadersState::Value {
                mut headers,
                name,
                mut value,
            } => {
                // Whitespace between the colon and the first value byte is
                // stripped; a later suspension resumes past it the same way.
                while value.is_empty() && matches!(data.first(), Some(&SP) | Some(&HTAB)) {
                    data = data.slice(1..);
                }

                // Termination needs four bytes of lookahead: the block ends
                // with CRLF CRLF, folds with CRLF plus whitespace, and commits
                // on a bare CRLF.
                if data.len() < 4 {
                    return Ok(suspend(
                        needles,
                        data,
                        HeadersState::Value {
                            headers,
                            name,
                            value,
                        },
                    ));
                }

                if data.starts_with(b"\r\n\r\n") {
                    headers.push(commit_header(name, value)?);
                    return Ok(HeadersResult::Complete {
                        headers,
                        remaining: data.slice(4..),
                    });
                }

                if data.starts_with(b"\r\n") {
                    if data[2] == SP || data[2] == HTAB {
                        // Folded continuation line; join with a single space.
                        value.push(SP);
                        data = data.slice(3..);
                        HeadersState::Value {
                            headers,
                            name,
                            value,
                        }
                    } else {
                        headers.push(commit_header(name, value)?);
                        data = data.slice(2..);
                        HeadersState::Name {
                            headers,
                            name: Vec::new(),
                        }
                    }
                } else {
                    // Everything up to the next CR is plain value data.
                    let upto = match memchr::memchr(CR, &data[1..]) {
                        Some(at) => at + 1,
                        None => data.len(),
                    };
                    value.extend_from_slice(&data[..upto]);
                    data = data.slice(upto..);
                    HeadersState::Value {
                        headers,
                        name,
                        value,
                    }
                }
            }
        };
    }
}

fn suspend(needles: BoundaryNeedles, pending: Bytes, state: HeadersState) -> HeadersResult {
    HeadersResult::MoreRequired(HeadersContinuation {
        needles,
        pending,
        state,
    })
}

fn commit_header(name: Vec<u8>, value: Vec<u8>) -> Result<Header, ParseError> {
    let name = String::from_utf8(name)
        .map_err(|_| ParseError::new("part header name is not valid UTF-8"))?;
    let value = String::from_utf8(value)
        .map_err(|_| ParseError::new("part header value is not valid UTF-8"))?;

    Ok((name.to_lowercase(), value))
}
