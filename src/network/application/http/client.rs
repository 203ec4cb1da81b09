use super::Error;
use super::form;
use super::request::{self, Method};
use super::response::{self, MAX_RESPONSE_LEN, Response};
use super::url::ParsedUrl;
use crate::network::error::Error as NetError;
use crate::network::{Close, Connect, Connection, Read, Resolve, Shutdown, Write};
use core::fmt::Write as _;
use core::net::IpAddr;
use heapless::{String, Vec};

/// Default `User-Agent` sent with GET requests.
pub const USER_AGENT: &str = concat!("rawhttp/", env!("CARGO_PKG_VERSION"));

/// Size of a single read from the connection.
const RECV_CHUNK: usize = 1024;

/// Bytes accumulated from the connection during one exchange.
pub type RecvBuf = Vec<u8, MAX_RESPONSE_LEN>;

/// Where an exchange is. Every exchange starts at `Idle` and, once a
/// connection was opened, ends at `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Idle,
    Connecting,
    Sending,
    Receiving,
    Parsed,
    Closed,
}

/// Client configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientOptions<'a> {
    /// Value of the `User-Agent` header on GET requests.
    pub user_agent: &'a str,
}

impl Default for ClientOptions<'_> {
    fn default() -> Self {
        Self {
            user_agent: USER_AGENT,
        }
    }
}

/// A blocking HTTP/1.1 client that opens one connection per request.
///
/// Connections come from a [`Connect`] implementation and host names are
/// looked up through a [`Resolve`] implementation, so the same client runs
/// over TCP sockets or in-memory mocks.
#[derive(Debug)]
pub struct Client<'a, N: Connect, R: Resolve> {
    connector: N,
    resolver: R,
    options: ClientOptions<'a>,
    state: State,
}

impl<'a, N: Connect, R: Resolve> Client<'a, N, R> {
    pub fn new(connector: N, resolver: R) -> Self {
        Self::with_options(connector, resolver, ClientOptions::default())
    }

    pub fn with_options(connector: N, resolver: R, options: ClientOptions<'a>) -> Self {
        Self {
            connector,
            resolver,
            options,
            state: State::Idle,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn connector(&self) -> &N {
        &self.connector
    }

    pub fn resolver_mut(&mut self) -> &mut R {
        &mut self.resolver
    }

    /// Fetches `url`.
    ///
    /// The write side of the connection is shut down right after the request
    /// is sent; the response is whatever arrives before the peer closes.
    pub fn get(&mut self, url: &str) -> Result<Response, Error> {
        self.transition(State::Idle);
        let url = ParsedUrl::parse(url)?;
        let ip = self.resolve(&url)?;
        let request = request::build_get(&url, self.options.user_agent)?;
        self.exchange(&url, ip, &request, true)
    }

    /// Submits `form` to `url` as `application/x-www-form-urlencoded`.
    pub fn post(&mut self, url: &str, form: &[(&str, &str)]) -> Result<Response, Error> {
        self.transition(State::Idle);
        let url = ParsedUrl::parse(url)?;
        let ip = self.resolve(&url)?;
        let body = form::encode(form)?;
        let request = request::build_post(&url, &body)?;
        self.exchange(&url, ip, &request, false)
    }

    /// Dispatches on `method`: `"POST"` posts `args` (an empty form when
    /// `None`), anything else is a GET.
    pub fn command(
        &mut self,
        url: &str,
        method: &str,
        args: Option<&[(&str, &str)]>,
    ) -> Result<Response, Error> {
        match Method::from_command(method) {
            Method::Post => self.post(url, args.unwrap_or(&[])),
            Method::Get => self.get(url),
        }
    }

    /// Looks up the host unless the URL named an explicit `host:port`.
    fn resolve(&mut self, url: &ParsedUrl<'_>) -> Result<Option<IpAddr>, Error> {
        if url.is_numeric_address {
            return Ok(None);
        }
        tracing::info!(host = url.host, "getting IP");
        let ip = self.resolver.resolve(url.host).map_err(|e| {
            tracing::warn!(host = url.host, error = %e, "hostname could not be resolved");
            Error::ResolutionFailure
        })?;
        tracing::info!(host = url.host, %ip, "resolved");
        Ok(Some(ip))
    }

    /// Runs one request over a fresh connection, closing it on every path.
    fn exchange(
        &mut self,
        url: &ParsedUrl<'_>,
        ip: Option<IpAddr>,
        request: &str,
        half_close: bool,
    ) -> Result<Response, Error> {
        let mut connection = self.open(url, ip)?;
        let mut buffer = RecvBuf::new();

        let result = self
            .transfer(&mut connection, request.as_bytes(), half_close, &mut buffer)
            .and_then(|()| {
                let parsed = response::parse(&buffer)?;
                tracing::debug!(
                    status = parsed.status_code,
                    reason = parsed.reason,
                    body_len = parsed.body.len(),
                    "response parsed"
                );
                parsed.into_response()
            });
        if result.is_ok() {
            self.transition(State::Parsed);
        }

        if let Err(e) = connection.close() {
            tracing::warn!(error = %e, "closing connection failed");
        }
        self.transition(State::Closed);
        result
    }

    fn open(&mut self, url: &ParsedUrl<'_>, ip: Option<IpAddr>) -> Result<N::Connection, Error> {
        self.transition(State::Connecting);
        let connected = match ip {
            Some(ip) => {
                let mut address: String<64> = String::new();
                write!(address, "{ip}").map_err(|_| Error::BufferOverflow)?;
                self.connector.connect(&address, url.port)
            }
            None => self.connector.connect(url.host, url.port),
        };
        connected.map_err(|e| {
            tracing::warn!(host = url.host, port = url.port, error = %e, "connect failed");
            Error::ConnectionFailure(e)
        })
    }

    fn transfer<C: Connection>(
        &mut self,
        connection: &mut C,
        request: &[u8],
        half_close: bool,
        buffer: &mut RecvBuf,
    ) -> Result<(), Error> {
        self.transition(State::Sending);
        tracing::trace!(
            request = core::str::from_utf8(request).unwrap_or_default(),
            "sending request"
        );
        connection.write_all(request).map_err(Error::Transport)?;
        connection.flush().map_err(Error::Transport)?;
        if half_close {
            connection.shutdown_write().map_err(Error::Transport)?;
        }

        self.transition(State::Receiving);
        receive_until_closed(connection, buffer)
    }

    fn transition(&mut self, next: State) {
        tracing::debug!(from = ?self.state, to = ?next, "state");
        self.state = next;
    }
}

/// Reads from `connection` until the peer closes, appending to `buffer`.
///
/// Fails with [`Error::BufferOverflow`] once the peer sends more than the
/// buffer holds.
pub fn receive_until_closed<C>(connection: &mut C, buffer: &mut RecvBuf) -> Result<(), Error>
where
    C: Read<Error = NetError>,
{
    let mut chunk = [0u8; RECV_CHUNK];
    loop {
        match connection.read(&mut chunk) {
            Ok(0) => return Ok(()),
            Ok(n) => buffer
                .extend_from_slice(&chunk[..n])
                .map_err(|_| Error::BufferOverflow)?,
            Err(e) => return Err(Error::Transport(e)),
        }
    }
}
