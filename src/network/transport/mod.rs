//! Standard library transports.
//!
//! [`tcp::TcpConnector`] opens blocking `std::net::TcpStream` connections and
//! [`tcp::SystemResolver`] resolves names through the operating system.

/// Blocking TCP connector, connection and resolver.
pub mod tcp;

pub use tcp::{SystemResolver, TcpConnection, TcpConnector};
