//! Shared helpers for `evacroute-data` integration tests.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;

/// Canned HTTP reply served for every request.
#[derive(Debug, Clone)]
pub struct CannedReply {
    /// HTTP status code.
    pub status: u16,
    /// Value of the `Content-Type` header.
    pub content_type: &'static str,
    /// Response body.
    pub body: String,
}

impl CannedReply {
    /// JSON reply with the given status.
    pub fn json(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: body.into(),
        }
    }

    /// Plain-text reply with the given status.
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: "text/plain",
            body: body.into(),
        }
    }
}

/// Directions response for a two-vertex walking route.
pub const WALKING_ROUTE: &str = r#"{
    "type": "FeatureCollection",
    "features": [{
        "type": "Feature",
        "properties": { "summary": { "distance": 812.4, "duration": 584.9 } },
        "geometry": {
            "type": "LineString",
            "coordinates": [[-78.445, -0.314, 2510.0], [-78.44, -0.31, 2502.0]]
        }
    }]
}"#;

/// Serve `reply` to every connection on a loopback port.
///
/// Returns the base URL. The server thread lives until the test process exits.
pub fn serve(reply: CannedReply) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback listener");
    let addr = listener.local_addr().expect("listener address");
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let canned = reply.clone();
            thread::spawn(move || respond(stream, &canned));
        }
    });
    format!("http://{addr}")
}

/// Base URL of a port with nothing listening.
pub fn unused_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback listener");
    let addr = listener.local_addr().expect("listener address");
    drop(listener);
    format!("http://{addr}")
}

fn respond(stream: TcpStream, reply: &CannedReply) {
    let mut reader = BufReader::new(stream);
    let mut content_length = 0_usize;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).unwrap_or(0) == 0 {
            return;
        }
        let header = line.trim_end();
        if header.is_empty() {
            break;
        }
        if let Some((name, value)) = header.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap_or(0);
            }
        }
    }
    let mut body = vec![0_u8; content_length];
    if reader.read_exact(&mut body).is_err() {
        return;
    }

    let response = format!(
        "HTTP/1.1 {} Canned\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        reply.status,
        reply.content_type,
        reply.body.len(),
        reply.body
    );
    let mut stream = reader.into_inner();
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}
