use criterion::{Criterion, Throughput};
use rawhttp::network::application::http::{Client, ParsedUrl, USER_AGENT, form, request, response};
use rawhttp::network::error::Error;
use rawhttp::network::{Close, Connect, Connection, Read, Resolve, Shutdown, Write};
use std::hint::black_box;
use std::net::{IpAddr, Ipv4Addr};

/// Replays a canned response and discards whatever is written.
struct ReplayConnection {
    response: &'static [u8],
    pos: usize,
}

impl Read for ReplayConnection {
    type Error = Error;
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let remaining = &self.response[self.pos..];
        let len = buf.len().min(remaining.len());
        buf[..len].copy_from_slice(&remaining[..len]);
        self.pos += len;
        Ok(len)
    }
}

impl Write for ReplayConnection {
    type Error = Error;
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl Shutdown for ReplayConnection {
    type Error = Error;
    fn shutdown_write(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl Close for ReplayConnection {
    type Error = Error;
    fn close(self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl Connection for ReplayConnection {}

struct ReplayNetwork(&'static [u8]);

impl Connect for ReplayNetwork {
    type Connection = ReplayConnection;
    fn connect(&mut self, _host: &str, _port: u16) -> Result<Self::Connection, Error> {
        Ok(ReplayConnection {
            response: self.0,
            pos: 0,
        })
    }
}

struct LoopbackResolver;

impl Resolve for LoopbackResolver {
    fn resolve(&mut self, _host: &str) -> Result<IpAddr, Error> {
        Ok(IpAddr::V4(Ipv4Addr::LOCALHOST))
    }
}

const RESPONSE: &[u8] = b"HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: 48\r\nConnection: close\r\n\r\n<html><body><p>hello from bench</p></body></html>";

pub fn bench_build_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_get");
    let url = "http://example.com:8080/api/v1/status?verbose=1";
    group.throughput(Throughput::Bytes(url.len() as u64));
    group.bench_function("build_get", |b| {
        b.iter(|| {
            let parsed = ParsedUrl::parse(black_box(url)).expect("Failed to parse URL");
            request::build_get(&parsed, USER_AGENT).expect("Failed to build request")
        })
    });
    group.finish();
}

pub fn bench_encode_and_build_post(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_and_build_post");
    let pairs = [
        ("name", "Abram"),
        ("course", "cmput404"),
        ("0101", "1100"),
        ("note", "a%20b%21c"),
    ];
    group.bench_function("encode_and_build_post", |b| {
        b.iter(|| {
            let parsed = ParsedUrl::parse("example.com/submit").expect("Failed to parse URL");
            let body = form::encode(black_box(&pairs)).expect("Failed to encode form");
            request::build_post(&parsed, &body).expect("Failed to build request")
        })
    });
    group.finish();
}

pub fn bench_parse_response(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_response");
    group.throughput(Throughput::Bytes(RESPONSE.len() as u64));
    group.bench_function("parse_response", |b| {
        b.iter(|| {
            let parsed = response::parse(black_box(RESPONSE)).expect("Failed to parse");
            black_box(parsed.header("content-length"));
            parsed.into_response().expect("Failed to copy response")
        })
    });
    group.finish();
}

pub fn bench_get_exchange(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_exchange");
    group.throughput(Throughput::Bytes(RESPONSE.len() as u64));
    group.bench_function("get_exchange", |b| {
        b.iter_batched_ref(
            || Client::new(ReplayNetwork(RESPONSE), LoopbackResolver),
            |client| {
                client
                    .get("http://example.com/index.html")
                    .expect("Failed to get")
            },
            criterion::BatchSize::SmallInput,
        )
    });
    group.finish();
}
