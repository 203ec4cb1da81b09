//! A byte-stream transport abstraction for the HTTP client
//!
//! The client never touches a socket directly. It talks to the traits in this
//! module, so the same request/response code runs over `std::net::TcpStream`
//! (see [`transport`]), an embedded TCP stack, or an in-memory mock.
//!

#![allow(missing_docs)]
#![deny(unsafe_code)]

use core::net::IpAddr;

/// Common error types for network operations
pub mod error;

/// Application layer protocols built on the transport traits
pub mod application;

/// Transports backed by the standard library
#[cfg(feature = "std")]
pub mod transport;

pub use error::Error;

/// Re-exports of common traits
pub mod prelude {
    pub use super::{Close, Connect, Connection, Read, Resolve, Shutdown, Write};
}

pub trait Read {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Read data from the connection. `Ok(0)` means the peer closed its side.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

pub trait Write {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Write data to the connection
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error>;
    /// Flush the write buffer
    fn flush(&mut self) -> Result<(), Self::Error>;

    /// Write the whole buffer, retrying on short writes.
    fn write_all(&mut self, mut buf: &[u8]) -> Result<(), Self::Error>
    where
        Self::Error: From<Error>,
    {
        while !buf.is_empty() {
            match self.write(buf)? {
                0 => return Err(Error::WriteError.into()),
                n => buf = &buf[n..],
            }
        }
        Ok(())
    }
}

/// Half-close: stop sending while still being able to receive.
pub trait Shutdown {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Shut down the outbound direction of the connection
    fn shutdown_write(&mut self) -> Result<(), Self::Error>;
}

pub trait Close {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Close the connection
    fn close(self) -> Result<(), Self::Error>;
}

/// A synchronous connection reporting every failure as a network [`Error`]
pub trait Connection:
    Read<Error = Error> + Write<Error = Error> + Shutdown<Error = Error> + Close<Error = Error>
{
}

/// A synchronous connector (client)
pub trait Connect {
    /// Associated connection type
    type Connection: Connection;
    /// Open a connection to `host` (a name or an address literal) on `port`
    fn connect(&mut self, host: &str, port: u16) -> Result<Self::Connection, Error>;
}

/// Host name to address lookup
pub trait Resolve {
    /// Resolve `host` to a single address, [`Error::HostNotFound`] when it has none
    fn resolve(&mut self, host: &str) -> Result<IpAddr, Error>;
}
