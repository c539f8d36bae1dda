use std::fmt;

use crate::error::ParseError;

/// Parsed `Content-Disposition` header value.
///
/// The disposition type and parameter names are lowercased; parameter values
/// keep their original casing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDisposition {
    /// Disposition type, typically `form-data`.
    pub disposition: String,
    /// Parameters in source order.
    pub parameters: Vec<(String, String)>,
}

impl ContentDisposition {
    /// Returns the first parameter with the given lowercase name.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|(param, _)| param == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns the `name` parameter, when present.
    pub fn name(&self) -> Option<&str> {
        self.param("name")
    }

    /// Returns the `filename` parameter, when present.
    pub fn filename(&self) -> Option<&str> {
        self.param("filename")
    }
}

impl fmt::Display for ContentDisposition {
    /// Serializes to canonical form: token values are emitted bare, anything
    /// else is quoted with backslash escapes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.disposition)?;

        for (name, value) in &self.parameters {
            if is_token(value) {
                write!(f, "; {name}={value}")?;
            } else {
                write!(f, "; {name}=\"{}\"", escape_quoted(value))?;
            }
        }

        Ok(())
    }
}

/// Parses a `Content-Disposition` header value.
///
/// Tolerates arbitrary characters in values; fails only on a parameter with
/// no `=` or on an unterminated quoted value.
pub fn parse_content_disposition(header: &str) -> Result<ContentDisposition, ParseError> {
    let mut chars = header.chars().peekable();

    let mut disposition = String::new();
    while let Some(&ch) = chars.peek() {
        if matches!(ch, ';' | ' ' | '\t') {
            break;
        }
        disposition.extend(ch.to_lowercase());
        chars.next();
    }

    let mut parameters = Vec::new();
    loop {
        while matches!(chars.peek(), Some(&(';' | ' ' | '\t'))) {
            chars.next();
        }
        if chars.peek().is_none() {
            break;
        }

        let mut name = String::new();
        let mut terminated = false;
        for ch in chars.by_ref() {
            if ch == '=' {
                terminated = true;
                break;
            }
            name.extend(ch.to_lowercase());
        }
        if !terminated {
            return Err(ParseError::new("Content-Disposition parameter without `=`"));
        }

        let value = if chars.peek() == Some(&'"') {
            chars.next();
            let mut value = String::new();
            loop {
                match chars.next() {
                    Some('"') => break,
                    Some('\\') => match chars.next() {
                        Some(escaped) => value.push(escaped),
                        None => {
                            return Err(ParseError::new(
                                "unterminated quoted Content-Disposition value",
                            ))
                        }
                    },
                    Some(ch) => value.push(ch),
                    None => {
                        return Err(ParseError::new(
                            "unterminated quoted Content-Disposition value",
                        ))
                    }
                }
            }
            value
        } else {
            let mut value = String::new();
            while let Some(&ch) = chars.peek() {
                if matches!(ch, ';' | ' ' | '\t') {
                    break;
                }
                value.push(ch);
                chars.next();
            }
            value
        };

        parameters.push((name, value));
    }

    Ok(ContentDisposition {
        disposition,
        parameters,
    })
}

fn is_token(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|ch| !matches!(ch, ';' | ' ' | '\t' | '"' | '\\'))
}

fn escape_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '"' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}
