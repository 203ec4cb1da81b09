//! # rawhttp - HTTP/1.1 over a raw byte stream
//!
//! A minimal HTTP/1.1 client that writes requests and reads responses by hand
//! over a plain stream socket, without an HTTP library in between. It exists
//! to show what actually goes over the wire: the request line, the headers,
//! the blank line, the body, and how a status code and body are cut back out
//! of whatever bytes the server sends.
//!
//! ## Features
//!
//! - **URL decomposition**: scheme, host, port, authority and path
//! - **Form encoding**: `application/x-www-form-urlencoded` bodies for POST
//! - **Request building**: GET and POST requests in wire form
//! - **Response parsing**: status line, headers and body
//! - **Client**: one `Connection: close` exchange per request, read until the
//!   peer closes
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! rawhttp = "0.1.0"
//! ```
//!
//! ### Fetching a page
//!
//! ```rust,no_run
//! # #[cfg(feature = "std")]
//! # fn main() -> Result<(), rawhttp::network::application::http::Error> {
//! use rawhttp::network::application::http::Client;
//! use rawhttp::network::transport::{SystemResolver, TcpConnector};
//!
//! let mut client = Client::new(TcpConnector::new(), SystemResolver);
//! let response = client.get("http://example.com/")?;
//! println!("{}\n{}", response.status_code, response.body);
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "std"))]
//! # fn main() {}
//! ```
//!
//! ### Bringing your own transport
//!
//! Anything implementing [`network::Connect`] and [`network::Resolve`] can
//! carry the exchange, which is how the crate runs on embedded TCP stacks and
//! in tests.
//!
//! ## Optional Features
//!
//! - `std`: TCP transport and system resolver on top of `std::net` (default)
//! - `cli`: the `rawhttp` command-line tool (default)
//! - `defmt`: `defmt::Format` implementations for every error type

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![deny(missing_docs)]
#![warn(missing_debug_implementations)]

/// Network abstraction layer and the HTTP client built on it.
///
/// Holds the transport traits, the transport error type, the HTTP
/// application protocol and, with `std`, a TCP transport.
pub mod network;
