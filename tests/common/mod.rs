//! Shared utilities for integration testing.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use validator_health::config::{EndpointConfig, ProbeConfig};
use validator_health::lifecycle::build_evaluator;
use validator_health::{HttpServer, Shutdown};

/// Start a mock node answering `getEpochInfo` with the current value of `height`.
pub async fn start_mock_node(height: Arc<AtomicU64>) -> SocketAddr {
    start_programmable_node(move || {
        let height = height.clone();
        async move {
            let body = format!(
                r#"{{"jsonrpc":"2.0","id":1,"result":{{"absoluteSlot":{},"blockHeight":{},"epoch":1,"slotIndex":0,"slotsInEpoch":432000}}}}"#,
                height.load(Ordering::SeqCst),
                height.load(Ordering::SeqCst),
            );
            (200, body)
        }
    })
    .await
}

/// Start a mock node with a fixed height.
pub async fn start_fixed_node(height: u64) -> SocketAddr {
    start_mock_node(Arc::new(AtomicU64::new(height))).await
}

/// An address nothing listens on.
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Start a programmable mock node with async support.
pub async fn start_programmable_node<F, Fut>(f: F) -> SocketAddr
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        read_request(&mut socket).await;
                        let (status, body) = f().await;
                        let status_text = match status {
                            200 => "200 OK",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Drain one HTTP request (headers plus Content-Length body).
async fn read_request(socket: &mut TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => n,
        };
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                return;
            }
        }
    }
}

/// Probe config with `local` plus the given trusted nodes.
pub fn probe_config(local: SocketAddr, trusted: &[(&str, SocketAddr)]) -> ProbeConfig {
    let mut config = ProbeConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.rpc.timeout_ms = 500;
    config.endpoints = vec![EndpointConfig::local("local", &format!("http://{}", local))];
    for (name, addr) in trusted {
        config
            .endpoints
            .push(EndpointConfig::trusted(name, &format!("http://{}", addr)));
    }
    config
}

/// Start the probe; returns its address and the shutdown handle.
pub async fn start_probe(config: ProbeConfig) -> (SocketAddr, Shutdown) {
    let evaluator = Arc::new(build_evaluator(&config).unwrap());
    let server = HttpServer::new(evaluator, &config.listener);
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    (addr, shutdown)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
