use std::{
    pin::Pin,
    task::{Context, Poll},
};

use bytes::{Bytes, BytesMut};
use futures::Stream;

use crate::{
    error::{Error, ParseError},
    parser::{
        parse_multipart_body, parse_multipart_headers, BodyContinuation, BodyResult, Header,
        HeadersContinuation, HeadersResult,
    },
    part::Part,
};

/// Incremental multipart reader over a chunked byte stream.
///
/// Drives the suspendable parsers in [`parser`](crate::parser) and yields one
/// fully buffered [`Part`] per multipart part. A part with an empty header
/// block marks the closing boundary, so every real part must carry at least
/// one header; `multipart/form-data` always does.
///
/// Empty upstream chunks are skipped. After the stream has ended,
/// [`Multipart::epilogue`] exposes whatever followed the closing boundary.
#[derive(Debug)]
pub struct Multipart<S> {
    stream: S,
    boundary: String,
    pending: Bytes,
    phase: Phase,
}

#[derive(Debug)]
enum Phase {
    Headers,
    HeadersSuspended(HeadersContinuation),
    Body {
        headers: Vec<Header>,
        collected: BytesMut,
    },
    BodySuspended {
        headers: Vec<Header>,
        collected: BytesMut,
        continuation: BodyContinuation,
    },
    Epilogue {
        remaining: Bytes,
    },
    Failed,
}

impl<S> Multipart<S> {
    /// Creates a multipart reader for an already extracted boundary.
    ///
    /// The boundary is the bare attribute value from the `Content-Type`
    /// header; see [`extract_multipart_boundary`](crate::extract_multipart_boundary).
    pub fn new(boundary: impl Into<String>, stream: S) -> Result<Self, ParseError> {
        let boundary = boundary.into();
        if boundary.is_empty() {
            return Err(ParseError::new("multipart boundary cannot be empty"));
        }
        if boundary.contains('\r') || boundary.contains('\n') {
            return Err(ParseError::new("multipart boundary cannot contain CRLF"));
        }

        Ok(Self {
            stream,
            boundary,
            pending: Bytes::new(),
            phase: Phase::Headers,
        })
    }

    /// Returns the message epilogue, once the closing boundary has been seen.
    pub fn epilogue(&self) -> Option<&Bytes> {
        match &self.phase {
            Phase::Epilogue { remaining } => Some(remaining),
            _ => None,
        }
    }

    fn enter_headers_result(&mut self, result: HeadersResult) {
        match result {
            HeadersResult::Complete { headers, remaining } => {
                if headers.is_empty() {
                    #[cfg(feature = "tracing")]
                    tracing::debug!("multipart: reached closing boundary");
                    self.phase = Phase::Epilogue { remaining };
                } else {
                    self.pending = remaining;
                    self.phase = Phase::Body {
                        headers,
                        collected: BytesMut::new(),
                    };
                }
            }
            HeadersResult::MoreRequired(continuation) => {
                self.phase = Phase::HeadersSuspended(continuation);
            }
        }
    }

    /// Advances the body phase; returns a stream item once a part completes.
    fn enter_body_result(
        &mut self,
        headers: Vec<Header>,
        mut collected: BytesMut,
        result: BodyResult,
    ) -> Option<Result<Part, Error>> {
        match result {
            BodyResult::Complete {
                chunk,
                done,
                remaining,
            } => {
                collected.extend_from_slice(&chunk);
                let part = match Part::new(headers, collected.freeze()) {
                    Ok(part) => part,
                    Err(err) => return Some(Err(err.into())),
                };

                #[cfg(feature = "tracing")]
                tracing::debug!(
                    field_name = part.field_name().unwrap_or("<none>"),
                    size = part.body().len(),
                    "multipart: yielding part"
                );

                if done {
                    #[cfg(feature = "tracing")]
                    tracing::debug!("multipart: reached closing boundary");
                    self.phase = Phase::Epilogue { remaining };
                } else {
                    self.pending = remaining;
                    self.phase = Phase::Headers;
                }
                Some(Ok(part))
            }
            BodyResult::MoreRequired {
                chunk,
                continuation,
            } => {
                collected.extend_from_slice(&chunk);
                self.phase = Phase::BodySuspended {
                    headers,
                    collected,
                    continuation,
                };
                None
            }
        }
    }
}

impl<S> Stream for Multipart<S>
where
    S: Stream<Item = Result<Bytes, Error>> + Unpin,
{
    type Item = Result<Part, Error>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;

        loop {
            match std::mem::replace(&mut this.phase, Phase::Failed) {
                Phase::Headers => {
                    let data = std::mem::take(&mut this.pending);
                    match parse_multipart_headers(data, &this.boundary) {
                        Ok(result) => this.enter_headers_result(result),
                        Err(err) => return Poll::Ready(Some(Err(err.into()))),
                    }
                }
                Phase::HeadersSuspended(continuation) => {
                    match Pin::new(&mut this.stream).poll_next(cx) {
                        Poll::Ready(Some(Ok(chunk))) => {
                            if chunk.is_empty() {
                                this.phase = Phase::HeadersSuspended(continuation);
                                continue;
                            }
                            match continuation.resume(chunk) {
                                Ok(result) => this.enter_headers_result(result),
                                Err(err) => return Poll::Ready(Some(Err(err.into()))),
                            }
                        }
                        Poll::Ready(Some(Err(err))) => return Poll::Ready(Some(Err(err))),
                        Poll::Ready(None) => {
                            return Poll::Ready(Some(Err(Error::IncompleteStream)));
                        }
                        Poll::Pending => {
                            this.phase = Phase::HeadersSuspended(continuation);
                            return Poll::Pending;
                        }
                    }
                }
                Phase::Body { headers, collected } => {
                    let data = std::mem::take(&mut this.pending);
                    match parse_multipart_body(data, &this.boundary) {
                        Ok(result) => {
                            if let Some(item) = this.enter_body_result(headers, collected, result) {
                                return Poll::Ready(Some(item));
                            }
                        }
                        Err(err) => return Poll::Ready(Some(Err(err.into()))),
                    }
                }
                Phase::BodySuspended {
                    headers,
                    collected,
                    continuation,
                } => match Pin::new(&mut this.stream).poll_next(cx) {
                    Poll::Ready(Some(Ok(chunk))) => {
                        if chunk.is_empty() {
                            this.phase = Phase::BodySuspended {
                                headers,
                                collected,
                                continuation,
                            };
                            continue;
                        }
                        match continuation.resume(chunk) {
                            Ok(result) => {
                                if let Some(item) =
                                    this.enter_body_result(headers, collected, result)
                                {
                                    return Poll::Ready(Some(item));
                                }
                            }
                            Err(err) => return Poll::Ready(Some(Err(err.into()))),
                        }
                    }
                    Poll::Ready(Some(Err(err))) => return Poll::Ready(Some(Err(err))),
                    Poll::Ready(None) => {
                        #[cfg(feature = "tracing")]
                        tracing::warn!("multipart: stream ended inside a part body");
                        return Poll::Ready(Some(Err(Error::IncompleteStream)));
                    }
                    Poll::Pending => {
                        this.phase = Phase::BodySuspended {
                            headers,
                            collected,
                            continuation,
                        };
                        return Poll::Pending;
                    }
                },
                Phase::Epilogue { remaining } => {
                    this.phase = Phase::Epilogue { remaining };
                    return Poll::Ready(None);
                }
                Phase::Failed => return Poll::Ready(None),
            }
        }
    }
}
