//! # Application Layer Network Protocols
//!
//! Application layer (OSI Layer 7) protocols built on the core network traits.
//!
//! ## Available Protocols
//!
//! - **[`http`]**: HTTP/1.1 GET/POST client that writes the request and reads
//!   the response by hand over any [`Connection`](crate::network::Connection)
//!
//! ## Design Principles
//!
//! - **Connection Agnostic**: Work with any type implementing [`Connect`](crate::network::Connect)
//! - **No-std Compatible**: Fixed-size buffers, no heap allocation
//! - **Explicit Resources**: Connections are values passed through the exchange and
//!   closed on every exit path

/// HTTP client implementation.
///
/// Provides a minimal HTTP/1.1 client: URL decomposition, form encoding,
/// request construction and response parsing, driven by a blocking client facade.
pub mod http;
