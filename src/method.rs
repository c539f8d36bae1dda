use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// HTTP request methods.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Method {
    /// CONNECT: establishes a tunnel
    Connect,
    /// DELETE: removes the target resource
    Delete,
    /// GET: retrieves a representation
    Get,
    /// HEAD: GET without a response body
    Head,
    /// OPTIONS: queries capabilities
    Options,
    /// PATCH: applies a partial modification
    Patch,
    /// POST: submits an entity
    Post,
    /// PUT: replaces the target resource
    Put,
    /// TRACE: performs a message loop-back
    Trace,
    /// A non-standard method token
    Other(String),
}

impl Method {
    /// Returns the lowercase string representation of the method.
    pub fn as_str(&self) -> &str {
        match self {
            Method::Connect => "connect",
            Method::Delete => "delete",
            Method::Get => "get",
            Method::Head => "head",
            Method::Options => "options",
            Method::Patch => "patch",
            Method::Post => "post",
            Method::Put => "put",
            Method::Trace => "trace",
            Method::Other(method) => method,
        }
    }

    /// Returns true if the method is standardized (not [`Method::Other`]).
    pub fn is_standard(&self) -> bool {
        !matches!(self, Method::Other(_))
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = ParseError;

    /// Parses the nine standard verbs case-insensitively. Unrecognized
    /// tokens are rejected rather than passed through as [`Method::Other`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "connect" => Ok(Method::Connect),
            "delete" => Ok(Method::Delete),
            "get" => Ok(Method::Get),
            "head" => Ok(Method::Head),
            "options" => Ok(Method::Options),
            "patch" => Ok(Method::Patch),
            "post" => Ok(Method::Post),
            "put" => Ok(Method::Put),
            "trace" => Ok(Method::Trace),
            _ => Err(ParseError::new("unrecognized HTTP method")),
        }
    }
}
