use std::io::{Read, Write};
use std::net::TcpListener;
use std::process::{Command, Output};
use std::thread;

fn rawhttp(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rawhttp"))
        .args(args)
        .env_remove("RAWHTTP_USER_AGENT")
        .env_remove("RAWHTTP_CONNECT_TIMEOUT_MS")
        .env_remove("RAWHTTP_READ_TIMEOUT_MS")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

/// Answers one connection once the request ends with `tail`, returning the request.
fn serve_once(tail: &'static str, response: &'static [u8]) -> (u16, thread::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut received = Vec::new();
        let mut buf = [0u8; 512];
        while !received.ends_with(tail.as_bytes()) {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            received.extend_from_slice(&buf[..n]);
        }
        stream.write_all(response).unwrap();
        String::from_utf8(received).unwrap()
    });
    (port, handle)
}

#[test]
fn no_arguments_prints_usage_and_fails() {
    let output = rawhttp(&[]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage: rawhttp [OPTIONS] [METHOD] <URL>"));
}

#[test]
fn lone_url_is_fetched_with_get() {
    let (port, server) = serve_once("\r\n\r\n", b"HTTP/1.1 200 OK\r\n\r\nhello");
    let output = rawhttp(&[&format!("http://127.0.0.1:{port}/greeting")]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "200\n\nhello\n");
    let request = server.join().unwrap();
    assert!(request.starts_with("GET /greeting HTTP/1.1\r\n"));
    assert!(request.contains("\r\nUser-Agent: rawhttp/"));
}

#[test]
fn method_then_url_posts_form_data() {
    let (port, server) = serve_once("name=Abram\r\n\r\n", b"HTTP/1.1 201 Created\r\n\r\n");
    let url = format!("http://127.0.0.1:{port}/submit");
    let output = rawhttp(&["POST", &url, "-d", "name=Abram"]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "201\n\n\n");
    let request = server.join().unwrap();
    assert!(request.starts_with("POST /submit HTTP/1.1\r\n"));
    assert!(request.contains("\r\nContent-Length: 10\r\n"));
}

#[test]
fn unresolvable_host_exits_with_message() {
    let output = rawhttp(&["http://no-such-host.invalid/"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Hostname could not be resolved. Exiting"));
}
