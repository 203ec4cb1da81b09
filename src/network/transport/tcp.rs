use crate::network::error::Error;
use crate::network::{Close, Connect, Connection, Read, Resolve, Shutdown, Write};
use std::io::{self, Read as StdRead, Write as StdWrite};
use std::net::{IpAddr, Shutdown as NetShutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

/// Timeouts applied to every connection opened by a [`TcpConnector`].
///
/// `None` blocks indefinitely, which is the default for all three. A zero
/// duration is treated like `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timeouts {
    pub connect: Option<Duration>,
    pub read: Option<Duration>,
    pub write: Option<Duration>,
}

/// Opens blocking TCP connections.
#[derive(Debug, Clone, Default)]
pub struct TcpConnector {
    timeouts: Timeouts,
}

impl TcpConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeouts(timeouts: Timeouts) -> Self {
        Self { timeouts }
    }

    pub fn timeouts(&self) -> Timeouts {
        self.timeouts
    }

    fn open(&self, addr: SocketAddr) -> io::Result<TcpStream> {
        match nonzero(self.timeouts.connect) {
            Some(timeout) => TcpStream::connect_timeout(&addr, timeout),
            None => TcpStream::connect(addr),
        }
    }
}

impl Connect for TcpConnector {
    type Connection = TcpConnection;

    fn connect(&mut self, host: &str, port: u16) -> Result<Self::Connection, Error> {
        tracing::info!(host, port, "attempting to connect");
        let addrs = (host, port).to_socket_addrs().map_err(|e| {
            tracing::debug!(error = %e, "address lookup failed");
            Error::InvalidAddress
        })?;

        let mut last_error = Error::InvalidAddress;
        for addr in addrs {
            match self.open(addr) {
                Ok(stream) => {
                    stream
                        .set_read_timeout(nonzero(self.timeouts.read))
                        .and_then(|()| stream.set_write_timeout(nonzero(self.timeouts.write)))
                        .map_err(|e| {
                            tracing::warn!(%addr, error = %e, "setting socket timeouts failed");
                            Error::NotOpen
                        })?;
                    tracing::info!(%addr, "connected");
                    return Ok(TcpConnection { stream });
                }
                Err(e) => {
                    tracing::debug!(%addr, error = %e, "connect attempt failed");
                    last_error = connect_error(&e);
                }
            }
        }
        Err(last_error)
    }
}

/// An open TCP stream.
#[derive(Debug)]
pub struct TcpConnection {
    stream: TcpStream,
}

impl TcpConnection {
    pub fn peer_addr(&self) -> Result<SocketAddr, Error> {
        self.stream.peer_addr().map_err(|_| Error::NotOpen)
    }
}

impl Read for TcpConnection {
    type Error = Error;
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.stream.read(buf).map_err(|e| match e.kind() {
            io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => Error::Timeout,
            io::ErrorKind::NotConnected => Error::NotOpen,
            _ => Error::ReadError,
        })
    }
}

impl Write for TcpConnection {
    type Error = Error;
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.stream.write(buf).map_err(|e| match e.kind() {
            io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => Error::Timeout,
            io::ErrorKind::NotConnected => Error::NotOpen,
            _ => Error::WriteError,
        })
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.stream.flush().map_err(|_| Error::WriteError)
    }
}

impl Shutdown for TcpConnection {
    type Error = Error;
    fn shutdown_write(&mut self) -> Result<(), Self::Error> {
        self.stream
            .shutdown(NetShutdown::Write)
            .map_err(|_| Error::NotOpen)
    }
}

impl Close for TcpConnection {
    type Error = Error;
    fn close(self) -> Result<(), Self::Error> {
        // The peer may already have torn the stream down.
        match self.stream.shutdown(NetShutdown::Both) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotConnected => Ok(()),
            Err(_) => Err(Error::ConnectionClosed),
        }
    }
}

impl Connection for TcpConnection {}

/// Resolves host names through the operating system, IPv4 first.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

impl Resolve for SystemResolver {
    fn resolve(&mut self, host: &str) -> Result<IpAddr, Error> {
        let addrs: Vec<SocketAddr> = (host, 0)
            .to_socket_addrs()
            .map_err(|e| {
                tracing::debug!(host, error = %e, "lookup failed");
                Error::HostNotFound
            })?
            .collect();

        addrs
            .iter()
            .find(|addr| addr.is_ipv4())
            .or_else(|| addrs.first())
            .map(SocketAddr::ip)
            .ok_or(Error::HostNotFound)
    }
}

/// std rejects `Duration::ZERO` as a socket timeout.
fn nonzero(timeout: Option<Duration>) -> Option<Duration> {
    timeout.filter(|t| !t.is_zero())
}

fn connect_error(e: &io::Error) -> Error {
    match e.kind() {
        io::ErrorKind::ConnectionRefused => Error::ConnectionRefused,
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => Error::Timeout,
        io::ErrorKind::AddrNotAvailable | io::ErrorKind::InvalidInput => Error::InvalidAddress,
        _ => Error::ConnectionClosed,
    }
}
