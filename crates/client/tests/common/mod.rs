//! Common test utilities for integration tests.
//!
//! This module provides shared helpers and re-exports commonly used types for
//! testing the etcd client against a wiremock gateway.
//!
//! # What this does NOT handle
//! - Mock server setup (use wiremock directly in tests)
//! - Test-specific assertions or test logic

use std::net::{SocketAddr, TcpListener};
use std::time::Duration;

#[allow(unused_imports)]
pub use wrangler_client::testing::{
    created_frame, empty_range_body, event_frame, range_body, watch_stream_body,
};

#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};
#[allow(unused_imports)]
pub use wrangler_client::{ClientError, EtcdClient, RetryPolicy};

/// Retry policy with a delay short enough for real-time tests.
#[allow(dead_code)]
pub fn fast_retry() -> RetryPolicy {
    RetryPolicy::new().with_delay(Duration::from_millis(20))
}

/// Client pointed at a mock server.
#[allow(dead_code)]
pub fn client_for(server: &MockServer) -> EtcdClient {
    EtcdClient::builder()
        .endpoint(server.uri())
        .retry_policy(fast_retry())
        .build()
        .expect("client should build")
}

/// An address nothing is listening on. Connecting to it is refused until
/// something binds it again.
#[allow(dead_code)]
pub fn unused_local_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    listener.local_addr().expect("local addr")
}

/// Requests seen by [`spawn_gateway`]: arrival time and body, in order.
#[allow(dead_code)]
pub type Received = std::sync::Arc<std::sync::Mutex<Vec<(tokio::time::Instant, Vec<u8>)>>>;

/// `200 OK` response carrying `body`, after which the connection closes.
#[allow(dead_code)]
pub fn http_ok(body: &str) -> String {
    format!(
        "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
        body.len(),
        body
    )
}

/// Gateway on a raw socket, for tests that need exact control over the
/// connection. The first `dropped` connections are closed as soon as their
/// request has been read; later ones are answered with `reply`.
///
/// Timestamps come from tokio's clock, so they are exact under
/// `start_paused`.
#[allow(dead_code)]
pub fn spawn_gateway(listener: tokio::net::TcpListener, dropped: usize, reply: String) -> Received {
    use tokio::io::AsyncWriteExt;

    let received = Received::default();
    let log = received.clone();
    tokio::spawn(async move {
        let mut connections = 0;
        while let Ok((mut socket, _)) = listener.accept().await {
            connections += 1;
            let Ok(body) = read_request(&mut socket).await else {
                continue;
            };
            log.lock()
                .expect("gateway log poisoned")
                .push((tokio::time::Instant::now(), body));
            if connections <= dropped {
                continue;
            }
            let _ = socket.write_all(reply.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });
    received
}

/// Read one HTTP request and return its body.
#[allow(dead_code)]
async fn read_request(socket: &mut tokio::net::TcpStream) -> std::io::Result<Vec<u8>> {
    use tokio::io::AsyncReadExt;

    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            return Err(std::io::ErrorKind::UnexpectedEof.into());
        }
        buf.extend_from_slice(&chunk[..n]);

        let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
            continue;
        };
        let head = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
        let length = head
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|value| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        let start = end + 4;
        if buf.len() >= start + length {
            return Ok(buf[start..start + length].to_vec());
        }
    }
}
