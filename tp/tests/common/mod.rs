//! Stub planner backend for integration tests
//!
//! Serves exactly one canned HTTP response on a random local port and
//! hands back the request body it received.

#![allow(dead_code)]

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use travemle::config::BackendConfig;

/// Canned reply from the stub
pub enum StubReply {
    /// Status line (e.g. "200 OK") and body
    Respond(&'static str, String),
    /// Accept the connection, never answer
    Hang,
}

/// A running one-shot stub server
pub struct StubServer {
    pub base_url: String,
    /// Resolves to the raw request body once one has been read
    pub request: JoinHandle<String>,
}

impl StubServer {
    pub async fn start(reply: StubReply) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub listener");
        let addr = listener.local_addr().expect("stub address");

        let request = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.expect("accept");
            let body = read_request_body(&mut socket).await;

            match reply {
                StubReply::Respond(status, payload) => {
                    let response = format!(
                        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        status,
                        payload.len(),
                        payload
                    );
                    socket.write_all(response.as_bytes()).await.expect("write response");
                    let _ = socket.shutdown().await;
                }
                StubReply::Hang => {
                    tokio::time::sleep(Duration::from_secs(10)).await;
                }
            }
            body
        });

        Self {
            base_url: format!("http://{}", addr),
            request,
        }
    }

    pub fn backend(&self, timeout_ms: u64) -> BackendConfig {
        BackendConfig {
            base_url: self.base_url.clone(),
            plan_path: "/api/plan-trip/".to_string(),
            timeout_ms: Some(timeout_ms),
        }
    }
}

/// Read headers, then exactly Content-Length bytes of body
async fn read_request_body(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.expect("read request");
        if n == 0 {
            return String::new();
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
    let content_length = headers
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.expect("read body");
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    String::from_utf8_lossy(&buf[header_end..]).to_string()
}

/// Port nothing is listening on
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("address");
    drop(listener);
    format!("http://{}", addr)
}

/// A realistic backend response
pub fn sample_response() -> String {
    serde_json::json!({
        "plan": {
            "title": "Kandy Heritage Escape",
            "duration": "3 days",
            "activities": [
                {"time": "09:00", "location_name": "Temple of the Tooth", "description": "Morning puja", "day": 1},
                {"time": "15:00", "location_name": "Kandy Lake", "description": "Lakeside walk", "day": "Day 1"}
            ],
            "budget_breakdown": {"transport": 3000, "lodging": 10000, "food": 5000, "total": 18000}
        },
        "weather": "Clouds, 28°C",
        "map_url": "https://www.google.com/maps/dir/Colombo/Kandy"
    })
    .to_string()
}
