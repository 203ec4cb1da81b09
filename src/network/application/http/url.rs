//! URL decomposition.
//!
//! Splits `scheme://host[:port]/path` into its parts without allocating. Every
//! string in a [`ParsedUrl`] borrows from the input.

use core::fmt;

/// URL scheme. Anything without an explicit scheme is treated as `http`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    /// Port used when the authority has none.
    pub fn default_port(&self) -> u16 {
        match self {
            Scheme::Http => 80,
            Scheme::Https => 443,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

/// Reasons a URL cannot be decomposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlError {
    /// The port after `:` is not an integer in `0..=65535`.
    InvalidPort,
    /// The authority holds more than one `:` (IPv6 literals included).
    UnsupportedAuthority,
    /// Nothing precedes the port or path.
    EmptyHost,
}

impl fmt::Display for UrlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UrlError::InvalidPort => f.write_str("port is not a valid integer"),
            UrlError::UnsupportedAuthority => {
                f.write_str("authority with more than one ':' is not supported")
            }
            UrlError::EmptyHost => f.write_str("host is empty"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for UrlError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            UrlError::InvalidPort => defmt::write!(f, "InvalidPort"),
            UrlError::UnsupportedAuthority => defmt::write!(f, "UnsupportedAuthority"),
            UrlError::EmptyHost => defmt::write!(f, "EmptyHost"),
        }
    }
}

/// A URL split into the parts the request builder and the client need.
///
/// # Examples
///
/// ```rust
/// use rawhttp::network::application::http::url::{ParsedUrl, Scheme};
///
/// let url = ParsedUrl::parse("http://127.0.0.1:8080/a/b").unwrap();
/// assert_eq!(url.scheme, Scheme::Http);
/// assert_eq!(url.host, "127.0.0.1");
/// assert_eq!(url.port, 8080);
/// assert!(url.is_numeric_address);
/// assert_eq!(url.authority, "127.0.0.1:8080");
/// assert_eq!(url.path, "/a/b");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedUrl<'a> {
    pub scheme: Scheme,
    pub host: &'a str,
    pub port: u16,
    /// True only when the authority spelled out `host:port`. The client skips
    /// name resolution in that case; it is not IP-literal detection.
    pub is_numeric_address: bool,
    /// The authority exactly as written, sent verbatim as the `Host` header.
    pub authority: &'a str,
    /// Always starts with `/`.
    pub path: &'a str,
}

impl<'a> ParsedUrl<'a> {
    pub fn parse(url: &'a str) -> Result<Self, UrlError> {
        let (scheme, rest) = split_protocol(url);
        let (host, port, is_numeric_address) = split_host_port(rest, scheme)?;
        Ok(Self {
            scheme,
            host,
            port,
            is_numeric_address,
            authority: authority(rest),
            path: extract_path(rest),
        })
    }
}

/// Strips a leading `https://` or `http://`. Input without either is returned
/// unchanged with [`Scheme::Http`].
pub fn split_protocol(url: &str) -> (Scheme, &str) {
    if let Some(rest) = url.strip_prefix("https://") {
        (Scheme::Https, rest)
    } else if let Some(rest) = url.strip_prefix("http://") {
        (Scheme::Http, rest)
    } else {
        (Scheme::Http, url)
    }
}

/// The part of a scheme-less URL before the first `/`.
pub fn authority(rest: &str) -> &str {
    match rest.find('/') {
        Some(idx) => &rest[..idx],
        None => rest,
    }
}

/// Splits the authority into host and port.
///
/// Returns `(host, port, is_numeric)` where `is_numeric` records whether the
/// port was explicit.
pub fn split_host_port(rest: &str, scheme: Scheme) -> Result<(&str, u16, bool), UrlError> {
    let combined = authority(rest);
    let mut parts = combined.split(':');
    let host = parts.next().unwrap_or_default();
    let port = parts.next();
    if parts.next().is_some() {
        return Err(UrlError::UnsupportedAuthority);
    }
    if host.is_empty() {
        return Err(UrlError::EmptyHost);
    }

    match port {
        None => Ok((host, scheme.default_port(), false)),
        Some(port) => {
            let port = port.parse::<u16>().map_err(|_| UrlError::InvalidPort)?;
            Ok((host, port, true))
        }
    }
}

/// Everything from the first `/` on, or `/` when there is no path.
pub fn extract_path(rest: &str) -> &str {
    match rest.find('/') {
        Some(idx) => &rest[idx..],
        None => "/",
    }
}
