//! HTTP/1.1 client written directly against a byte stream.
//!
//! This module builds requests and parses responses by hand instead of going
//! through an HTTP library, so every byte that crosses the connection is
//! visible in the code. It targets `no_std` environments and uses fixed-size
//! buffers throughout.
//!
//! # Features
//!
//! - GET and form-encoded POST
//! - One request per connection (`Connection: close`), read until the peer closes
//! - Works with any [`Connect`](crate::network::Connect) implementation
//! - Fixed-size buffers for predictable memory usage
//!
//! # Pieces
//!
//! | Module       | Role                                               |
//! |--------------|----------------------------------------------------|
//! | [`url`]      | scheme, host, port, authority and path of a URL     |
//! | [`form`]     | `application/x-www-form-urlencoded` bodies          |
//! | [`request`]  | request line and headers in wire form              |
//! | [`response`] | status code, headers and body of a received buffer |
//! | [`client`]   | the GET/POST exchange over a connection            |
//!
//! # Usage
//!
//! ```rust,no_run
//! use rawhttp::network::application::http::Client;
//! # use rawhttp::network::{Close, Connect, Connection, Error, Read, Resolve, Shutdown, Write};
//! # use core::net::{IpAddr, Ipv4Addr};
//! # struct MockConnection;
//! # impl Read for MockConnection {
//! #     type Error = Error;
//! #     fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Self::Error> { Ok(0) }
//! # }
//! # impl Write for MockConnection {
//! #     type Error = Error;
//! #     fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> { Ok(buf.len()) }
//! #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl Shutdown for MockConnection {
//! #     type Error = Error;
//! #     fn shutdown_write(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl Close for MockConnection {
//! #     type Error = Error;
//! #     fn close(self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl Connection for MockConnection {}
//! # struct MockNetwork;
//! # impl Connect for MockNetwork {
//! #     type Connection = MockConnection;
//! #     fn connect(&mut self, _host: &str, _port: u16) -> Result<MockConnection, Error> { Ok(MockConnection) }
//! # }
//! # struct MockResolver;
//! # impl Resolve for MockResolver {
//! #     fn resolve(&mut self, _host: &str) -> Result<IpAddr, Error> { Ok(IpAddr::V4(Ipv4Addr::LOCALHOST)) }
//! # }
//!
//! let mut client = Client::new(MockNetwork, MockResolver);
//! let response = client.get("http://example.com/status")?;
//! println!("{} {}", response.status_code, response.body);
//!
//! let response = client.post("http://example.com/form", &[("name", "Abram")])?;
//! # Ok::<(), rawhttp::network::application::http::Error>(())
//! ```

use crate::network::error::Error as NetError;
use core::fmt;

/// The GET/POST client facade.
pub mod client;

/// Form body encoding.
pub mod form;

/// Request construction.
pub mod request;

/// Response parsing.
pub mod response;

/// URL decomposition.
pub mod url;

pub use client::{Client, ClientOptions, State, USER_AGENT};
pub use request::Method;
pub use response::{ParsedResponse, Response, ResponseError};
pub use url::{ParsedUrl, Scheme, UrlError};

/// Errors that end an HTTP exchange.
///
/// Nothing is retried. Every variant is reported to the caller of
/// [`Client::get`] or [`Client::post`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The URL could not be decomposed.
    MalformedUrl(UrlError),
    /// The host name could not be resolved.
    ResolutionFailure,
    /// Opening the connection failed.
    ConnectionFailure(NetError),
    /// Sending or receiving failed on an open connection.
    Transport(NetError),
    /// The received bytes are not a well-formed response.
    MalformedResponse(ResponseError),
    /// A request, form body or response did not fit its buffer.
    BufferOverflow,
}

impl From<UrlError> for Error {
    fn from(e: UrlError) -> Self {
        Error::MalformedUrl(e)
    }
}

impl From<ResponseError> for Error {
    fn from(e: ResponseError) -> Self {
        Error::MalformedResponse(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MalformedUrl(e) => write!(f, "malformed URL: {e}"),
            Error::ResolutionFailure => f.write_str("hostname could not be resolved"),
            Error::ConnectionFailure(e) => write!(f, "connection failed: {e}"),
            Error::Transport(e) => write!(f, "transport error: {e}"),
            Error::MalformedResponse(e) => write!(f, "malformed response: {e}"),
            Error::BufferOverflow => f.write_str("message does not fit its buffer"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ConnectionFailure(e) | Error::Transport(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::MalformedUrl(e) => defmt::write!(f, "MalformedUrl({})", e),
            Error::ResolutionFailure => defmt::write!(f, "ResolutionFailure"),
            Error::ConnectionFailure(e) => defmt::write!(f, "ConnectionFailure({})", e),
            Error::Transport(e) => defmt::write!(f, "Transport({})", e),
            Error::MalformedResponse(e) => defmt::write!(f, "MalformedResponse({})", e),
            Error::BufferOverflow => defmt::write!(f, "BufferOverflow"),
        }
    }
}
