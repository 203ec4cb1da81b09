//! Request serialization.
//!
//! Requests are written straight into a fixed buffer in their final wire
//! form. There is no intermediate request object to mutate.

use super::Error;
use super::url::ParsedUrl;
use core::fmt::Write;
use heapless::String;

/// Capacity of a serialized request, in bytes.
pub const MAX_REQUEST_LEN: usize = 4096;

/// A serialized request, ready to be written to a connection.
pub type RequestBuf = String<MAX_REQUEST_LEN>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }

    /// `"POST"` selects [`Method::Post`]; every other name falls back to GET.
    pub fn from_command(name: &str) -> Self {
        if name == "POST" {
            Method::Post
        } else {
            Method::Get
        }
    }
}

/// Builds a GET request for `url`.
///
/// ```rust
/// use rawhttp::network::application::http::{request, url::ParsedUrl};
///
/// let url = ParsedUrl::parse("http://localhost:8080/status").unwrap();
/// let req = request::build_get(&url, "rawhttp/0.1").unwrap();
/// assert_eq!(
///     req.as_str(),
///     "GET /status HTTP/1.1\r\nHost: localhost:8080\r\nUser-Agent: rawhttp/0.1\r\nAccept: */*\r\nConnection: close\r\n\r\n"
/// );
/// ```
pub fn build_get(url: &ParsedUrl<'_>, user_agent: &str) -> Result<RequestBuf, Error> {
    let mut buf = RequestBuf::new();
    write!(
        buf,
        "{} {} HTTP/1.1\r\nHost: {}\r\nUser-Agent: {}\r\nAccept: */*\r\nConnection: close\r\n\r\n",
        Method::Get.as_str(),
        url.path,
        url.authority,
        user_agent
    )
    .map_err(|_| Error::BufferOverflow)?;
    Ok(buf)
}

/// Builds a form POST request for `url` carrying `body`.
///
/// `Content-Length` counts the UTF-8 bytes of `body`. A non-empty body is
/// followed by an extra blank line, which is not counted.
pub fn build_post(url: &ParsedUrl<'_>, body: &str) -> Result<RequestBuf, Error> {
    let mut buf = RequestBuf::new();
    write!(
        buf,
        "{} {} HTTP/1.1\r\nHost: {}\r\nAccept: */*\r\nContent-Length: {}\r\nContent-Type: application/x-www-form-urlencoded\r\nConnection: close\r\n\r\n",
        Method::Post.as_str(),
        url.path,
        url.authority,
        body.len()
    )
    .map_err(|_| Error::BufferOverflow)?;

    if !body.is_empty() {
        buf.push_str(body).map_err(|_| Error::BufferOverflow)?;
        buf.push_str("\r\n\r\n").map_err(|_| Error::BufferOverflow)?;
    }
    Ok(buf)
}
