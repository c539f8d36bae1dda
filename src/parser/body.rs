use bytes::{Bytes, BytesMut};

use crate::{
    buffer::{concat, is_partial_prefix},
    error::ParseError,
    parser::{BoundaryNeedles, CR, DASH, LF},
};

/// Outcome of a part-body parse.
#[derive(Debug)]
pub enum BodyResult {
    /// The end of the part body was recognized.
    Complete {
        /// The final chunk of the body.
        chunk: Bytes,
        /// Whether the terminal `--boundary--` was consumed.
        done: bool,
        /// With `done == false`, the input starting at the next `--boundary`
        /// line; with `done == true`, the message epilogue.
        remaining: Bytes,
    },
    /// The input ended before the next boundary could be recognized.
    MoreRequired {
        /// Bytes safely attributable to the body so far.
        chunk: Bytes,
        /// Resumption handle for the rest of the body.
        continuation: BodyContinuation,
    },
}

/// Suspended body parse, resumable once more input arrives.
///
/// The concatenation of every `chunk` yielded across resumptions, followed by
/// the completing `chunk`, is the full part body.
#[derive(Debug)]
pub struct BodyContinuation {
    needles: BoundaryNeedles,
    pending: Bytes,
    at_start: bool,
}

impl BodyContinuation {
    /// Resumes the parse with additional input.
    ///
    /// `extra` must be non-empty; a caller with no further input has an
    /// incomplete message on its hands.
    pub fn resume(self, extra: impl Into<Bytes>) -> Result<BodyResult, ParseError> {
        let extra = extra.into();
        if extra.is_empty() {
            return Err(ParseError::new("no further input for a suspended parser"));
        }

        run_body(self.needles, concat(self.pending, extra), self.at_start)
    }
}

/// Parses a part body up to the next boundary line.
///
/// `data` must begin at the first body byte, i.e. immediately after the blank
/// line that closed the part's headers. The emitted chunks never include the
/// boundary delimiter nor the CRLF that precedes it. When the input runs out
/// before a delimiter decision the result carries a [`BodyContinuation`].
pub fn parse_multipart_body(
    data: impl Into<Bytes>,
    boundary: &str,
) -> Result<BodyResult, ParseError> {
    run_body(BoundaryNeedles::new(boundary), data.into(), true)
}

fn run_body(needles: BoundaryNeedles, mut data: Bytes, at_start: bool) -> Result<BodyResult, ParseError> {
    if at_start {
        // An empty body: the caller is already positioned at a boundary line.
        if data.starts_with(&needles.dashed) {
            return Ok(BodyResult::Complete {
                chunk: Bytes::new(),
                done: false,
                remaining: data,
            });
        }

        if is_partial_prefix(&data, &needles.dashed) {
            return Ok(suspend(needles, data, Bytes::new(), true));
        }
    }

    let mut chunk = BytesMut::new();
    // The shortest decidable suffix is `CRLF --boundary` plus the two bytes
    // that distinguish a delimiter line from the terminal one.
    let window = needles.delimiter.len() + 2;

    loop {
        if data.len() < window {
            return Ok(suspend(needles, data, chunk.freeze(), false));
        }

        if data.starts_with(&needles.delimiter) {
            let tail = &data[needles.delimiter.len()..];
            match (tail[0], tail[1]) {
                (CR, LF) => {
                    // The delimiter's leading CRLF terminates the body and is
                    // not part of it; the caller re-parses from `--boundary`.
                    return Ok(BodyResult::Complete {
                        chunk: chunk.freeze(),
                        done: false,
                        remaining: data.slice(2..),
                    });
                }
                (DASH, DASH) => {
                    return Ok(BodyResult::Complete {
                        chunk: chunk.freeze(),
                        done: true,
                        remaining: data.slice(needles.delimiter.len() + 2..),
                    });
                }
                _ => {
                    // Boundary-shaped bytes that are not a delimiter line;
                    // the CRLF belongs to the body.
                    chunk.extend_from_slice(b"\r\n");
                    data = data.slice(2..);
                }
            }
        } else {
            // Everything up to the next CR is plain body data.
            let upto = match memchr::memchr(CR, &data[1..]) {
                Some(at) => at + 1,
                None => data.len(),
            };
            chunk.extend_from_slice(&data[..upto]);
            data = data.slice(upto..);
        }
    }
}

fn suspend(needles: BoundaryNeedles, pending: Bytes, chunk: Bytes, at_start: bool) -> BodyResult {
    BodyResult::MoreRequired {
        chunk,
        continuation: BodyContinuation {
            needles,
            pending,
            at_start,
        },
    }
}
