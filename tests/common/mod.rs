#![allow(dead_code)]

use rawhttp::network::error::Error;
use rawhttp::network::*;
use std::cell::RefCell;
use std::net::{IpAddr, Ipv4Addr};
use std::rc::Rc;

/// What the client did to the connections handed out by a [`MockNetwork`].
#[derive(Debug, Default)]
pub struct Wire {
    pub connects: Vec<(String, u16)>,
    pub written: Vec<u8>,
    pub half_closes: usize,
    pub closes: usize,
}

impl Wire {
    pub fn written_str(&self) -> &str {
        std::str::from_utf8(&self.written).unwrap()
    }
}

#[derive(Debug)]
pub struct MockConnection {
    read_buffer: Vec<u8>,
    read_pos: usize,
    read_chunk: usize,
    read_error: Option<Error>,
    write_limit: usize,
    write_shutdown: bool,
    shutdown_error: Option<Error>,
    wire: Rc<RefCell<Wire>>,
    pub is_open: bool,
}

impl MockConnection {
    pub fn new(wire: Rc<RefCell<Wire>>) -> Self {
        Self {
            read_buffer: Vec::new(),
            read_pos: 0,
            read_chunk: usize::MAX,
            read_error: None,
            write_limit: usize::MAX,
            write_shutdown: false,
            shutdown_error: None,
            wire,
            is_open: true,
        }
    }

    /// Helper for tests to inject data into the connection's read buffer
    pub fn set_read_data(&mut self, data: &[u8]) {
        self.read_buffer = data.to_vec();
        self.read_pos = 0;
    }
}

impl Read for MockConnection {
    type Error = Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if !self.is_open {
            return Err(Error::NotOpen);
        }
        let remaining = &self.read_buffer[self.read_pos..];
        if remaining.is_empty() {
            if let Some(e) = self.read_error {
                return Err(e);
            }
        }
        let len = buf.len().min(remaining.len()).min(self.read_chunk);
        buf[..len].copy_from_slice(&remaining[..len]);
        self.read_pos += len;
        Ok(len)
    }
}

impl Write for MockConnection {
    type Error = Error;

    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        if !self.is_open {
            return Err(Error::NotOpen);
        }
        if self.write_shutdown {
            return Err(Error::WriteError);
        }
        let len = buf.len().min(self.write_limit);
        self.wire.borrow_mut().written.extend_from_slice(&buf[..len]);
        Ok(len)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        if !self.is_open {
            return Err(Error::NotOpen);
        }
        Ok(())
    }
}

impl Shutdown for MockConnection {
    type Error = Error;

    fn shutdown_write(&mut self) -> Result<(), Self::Error> {
        if !self.is_open {
            return Err(Error::NotOpen);
        }
        if let Some(e) = self.shutdown_error {
            return Err(e);
        }
        self.write_shutdown = true;
        self.wire.borrow_mut().half_closes += 1;
        Ok(())
    }
}

impl Close for MockConnection {
    type Error = Error;

    fn close(mut self) -> Result<(), Self::Error> {
        self.is_open = false;
        self.wire.borrow_mut().closes += 1;
        Ok(())
    }
}

impl Connection for MockConnection {}

/// Hands out connections that replay `response` and record everything else.
#[derive(Debug, Default)]
pub struct MockNetwork {
    pub response: Vec<u8>,
    pub wire: Rc<RefCell<Wire>>,
    pub refuse: bool,
    pub read_chunk: Option<usize>,
    pub read_error: Option<Error>,
    pub write_limit: Option<usize>,
    pub shutdown_error: Option<Error>,
}

impl MockNetwork {
    pub fn replying(response: &[u8]) -> Self {
        Self {
            response: response.to_vec(),
            ..Self::default()
        }
    }
}

impl Connect for MockNetwork {
    type Connection = MockConnection;

    fn connect(&mut self, host: &str, port: u16) -> Result<Self::Connection, Error> {
        self.wire.borrow_mut().connects.push((host.to_string(), port));
        if self.refuse {
            return Err(Error::ConnectionRefused);
        }
        let mut conn = MockConnection::new(Rc::clone(&self.wire));
        conn.set_read_data(&self.response);
        if let Some(chunk) = self.read_chunk {
            conn.read_chunk = chunk;
        }
        if let Some(limit) = self.write_limit {
            conn.write_limit = limit;
        }
        conn.read_error = self.read_error;
        conn.shutdown_error = self.shutdown_error;
        Ok(conn)
    }
}

/// Resolves every name to `ip`, or to nothing when `fail` is set.
#[derive(Debug)]
pub struct MockResolver {
    pub ip: IpAddr,
    pub fail: bool,
    pub lookups: Vec<String>,
}

impl Default for MockResolver {
    fn default() -> Self {
        Self {
            ip: IpAddr::V4(Ipv4Addr::new(93, 184, 216, 34)),
            fail: false,
            lookups: Vec::new(),
        }
    }
}

impl Resolve for MockResolver {
    fn resolve(&mut self, host: &str) -> Result<IpAddr, Error> {
        self.lookups.push(host.to_string());
        if self.fail {
            Err(Error::HostNotFound)
        } else {
            Ok(self.ip)
        }
    }
}
