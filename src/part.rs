use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue};

use crate::{
    error::ParseError,
    parser::{parse_content_disposition, ContentDisposition, Header},
};

/// A fully buffered multipart part yielded by [`Multipart`](crate::Multipart).
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    headers: Vec<Header>,
    disposition: Option<ContentDisposition>,
    body: Bytes,
}

impl Part {
    /// Builds a part from parsed headers and a buffered body, eagerly
    /// parsing the `Content-Disposition` header when one is present.
    pub(crate) fn new(headers: Vec<Header>, body: Bytes) -> Result<Self, ParseError> {
        let disposition = headers
            .iter()
            .find(|(name, _)| name == "content-disposition")
            .map(|(_, value)| parse_content_disposition(value))
            .transpose()?;

        Ok(Self {
            headers,
            disposition,
            body,
        })
    }

    /// Returns the part headers in source order, names lowercased.
    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    /// Returns the first header with the given lowercase name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(header, _)| header == name)
            .map(|(_, value)| value.as_str())
    }

    /// Builds an [`http::HeaderMap`] view of the part headers.
    ///
    /// Fails when a header name or value does not satisfy the stricter
    /// `http` crate grammar.
    pub fn header_map(&self) -> Result<HeaderMap, ParseError> {
        let mut map = HeaderMap::new();

        for (name, value) in &self.headers {
            let name = name
                .parse::<HeaderName>()
                .map_err(|_| ParseError::new("invalid part header name"))?;
            let value = HeaderValue::from_str(value)
                .map_err(|_| ParseError::new("invalid part header value"))?;
            map.append(name, value);
        }

        Ok(map)
    }

    /// Returns the parsed `Content-Disposition` header, when present.
    pub fn content_disposition(&self) -> Option<&ContentDisposition> {
        self.disposition.as_ref()
    }

    /// Returns the `name` parameter of the `Content-Disposition` header.
    pub fn field_name(&self) -> Option<&str> {
        self.disposition.as_ref().and_then(|d| d.name())
    }

    /// Returns the `filename` parameter of the `Content-Disposition` header.
    pub fn file_name(&self) -> Option<&str> {
        self.disposition.as_ref().and_then(|d| d.filename())
    }

    /// Returns the raw part body.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Consumes the part, returning the raw body.
    pub fn into_body(self) -> Bytes {
        self.body
    }

    /// Returns the body decoded as UTF-8 text.
    pub fn text(&self) -> Result<&str, ParseError> {
        std::str::from_utf8(&self.body)
            .map_err(|_| ParseError::new("part body is not valid UTF-8"))
    }
}
