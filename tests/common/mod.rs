//! Shared utilities for integration testing.

use std::net::SocketAddr;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Start a mock config backend that answers every request with the given
/// status and body. Returns the bound address.
pub async fn start_mock_backend(status: u16, body: String) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let body = body.clone();
                    tokio::spawn(async move {
                        // Drain the request head before answering.
                        let mut buf = [0u8; 4096];
                        let _ = socket.read(&mut buf).await;

                        let reason = match status {
                            200 => "OK",
                            404 => "Not Found",
                            500 => "Internal Server Error",
                            _ => "Status",
                        };
                        let response = format!(
                            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status,
                            reason,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// A well-formed document with the full required set, some optional hosts,
/// and a handful of overrides.
pub fn sample_document() -> String {
    serde_json::json!({
        "api-urls": {
            "main-api": "https://api.example.com/",
            "main-binary-api": "binary.example.com"
        },
        "templates-urls": {
            "files-parsing": "files.example.com",
            "stickerpack-sharing": "stickers.example.com",
            "profile": "profile.example.com",
            "di": "design.example.com",
            "vcs-room": "a.example.com;b.example.com"
        },
        "threads-enabled": true,
        "smart-reply-stickers-enabled": true,
        "smart-reply-text-enabled": true,
        "status-banner-emoji": "☕;🌙"
    })
    .to_string()
}
