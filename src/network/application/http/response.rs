//! Response parsing.
//!
//! The client reads until the peer closes, so the whole response is already in
//! one buffer when parsing starts. Parsing borrows from that buffer; only
//! [`ParsedResponse::into_response`] copies the body out.

use super::Error;
use core::fmt;
use heapless::String;

/// Capacity of the receive buffer and of a response body, in bytes.
pub const MAX_RESPONSE_LEN: usize = 16 * 1024;

const HEADER_END: &[u8] = b"\r\n\r\n";

/// Ways a received buffer fails to be a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseError {
    /// No blank line separates the headers from the body.
    MissingDelimiter,
    /// The response is not valid UTF-8.
    InvalidUtf8,
    /// The status line has no status code.
    MissingStatusLine,
    /// The status code is not an integer that fits in a `u16`.
    InvalidStatusCode,
}

impl fmt::Display for ResponseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseError::MissingDelimiter => f.write_str("no blank line after the headers"),
            ResponseError::InvalidUtf8 => f.write_str("response is not valid UTF-8"),
            ResponseError::MissingStatusLine => f.write_str("status line has no status code"),
            ResponseError::InvalidStatusCode => f.write_str("status code is not an integer"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ResponseError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            ResponseError::MissingDelimiter => defmt::write!(f, "MissingDelimiter"),
            ResponseError::InvalidUtf8 => defmt::write!(f, "InvalidUtf8"),
            ResponseError::MissingStatusLine => defmt::write!(f, "MissingStatusLine"),
            ResponseError::InvalidStatusCode => defmt::write!(f, "InvalidStatusCode"),
        }
    }
}

/// The final result of an exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status_code: u16,
    pub body: String<MAX_RESPONSE_LEN>,
}

/// A response split into its parts, borrowing from the receive buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedResponse<'a> {
    pub version: &'a str,
    pub status_code: u16,
    /// Reason phrase. Not carried into [`Response`].
    pub reason: &'a str,
    /// Header lines after the status line, without the trailing blank line.
    pub headers: &'a str,
    pub body: &'a str,
}

impl<'a> ParsedResponse<'a> {
    /// Value of the first header named `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&'a str> {
        self.header_lines()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }

    /// `(name, value)` pairs in order. Lines without `:` are skipped.
    pub fn header_lines(self) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.headers.split("\r\n").filter_map(|line| {
            let (name, value) = line.split_once(':')?;
            Some((name.trim(), value.trim()))
        })
    }

    /// Copies the status code and body into an owned [`Response`].
    ///
    /// Fails with [`Error::BufferOverflow`] when the body is longer than
    /// [`MAX_RESPONSE_LEN`].
    pub fn into_response(self) -> Result<Response, Error> {
        let body = String::try_from(self.body).map_err(|_| Error::BufferOverflow)?;
        Ok(Response {
            status_code: self.status_code,
            body,
        })
    }
}

/// Splits a complete response into status line, headers and body.
///
/// ```rust
/// use rawhttp::network::application::http::response;
///
/// let parsed = response::parse(b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\n\r\nhi").unwrap();
/// assert_eq!(parsed.status_code, 200);
/// assert_eq!(parsed.reason, "OK");
/// assert_eq!(parsed.body, "hi");
/// ```
pub fn parse(raw: &[u8]) -> Result<ParsedResponse<'_>, ResponseError> {
    let split = find_slice(raw, HEADER_END).ok_or(ResponseError::MissingDelimiter)?;
    let text = core::str::from_utf8(raw).map_err(|_| ResponseError::InvalidUtf8)?;
    let head = &text[..split];
    let body = &text[split + HEADER_END.len()..];

    let (status_line, headers) = head.split_once("\r\n").unwrap_or((head, ""));
    let mut parts = status_line.splitn(3, ' ');
    let version = parts.next().unwrap_or_default();
    let status_code = parts
        .next()
        .filter(|code| !code.is_empty())
        .ok_or(ResponseError::MissingStatusLine)?
        .parse::<u16>()
        .map_err(|_| ResponseError::InvalidStatusCode)?;
    let reason = parts.next().unwrap_or_default().trim();

    Ok(ParsedResponse {
        version,
        status_code,
        reason,
        headers,
        body,
    })
}

/// Finds the first occurrence of a slice in another slice and returns its starting position.
fn find_slice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
