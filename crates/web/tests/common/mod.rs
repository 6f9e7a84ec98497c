//! Shared helpers for the `check_web` integration tests.

#![allow(dead_code)]

use std::io;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use probekit_web::transport::{HttpConnection, HttpTransport, RawResponse, RequestHead};

/// Step at which a [`FakeTransport`] stops making progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stall {
    Connect,
    Send,
    Receive,
}

/// In-memory transport with scripted latency and failures.
#[derive(Debug, Clone)]
pub struct FakeTransport {
    pub response: RawResponse,
    /// Time spent inside `receive` before the response is returned.
    pub latency: Duration,
    pub stall: Option<Stall>,
    pub refuse_connection: bool,
}

impl FakeTransport {
    pub fn responding(status: u16, body: &str) -> Self {
        Self {
            response: RawResponse {
                status,
                headers: vec![("Content-Type".into(), "text/html".into())],
                body: body.as_bytes().to_vec(),
            },
            latency: Duration::ZERO,
            stall: None,
            refuse_connection: false,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn stalling_at(mut self, stall: Stall) -> Self {
        self.stall = Some(stall);
        self
    }

    pub fn refusing(mut self) -> Self {
        self.refuse_connection = true;
        self
    }
}

pub struct FakeConnection {
    transport: FakeTransport,
}

impl HttpTransport for FakeTransport {
    type Connection = FakeConnection;

    async fn connect(&self, _host: &str, _port: u16) -> io::Result<FakeConnection> {
        if self.stall == Some(Stall::Connect) {
            return std::future::pending().await;
        }
        if self.refuse_connection {
            return Err(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "connection refused",
            ));
        }
        Ok(FakeConnection {
            transport: self.clone(),
        })
    }
}

impl HttpConnection for FakeConnection {
    async fn send(&mut self, _request: &RequestHead) -> io::Result<()> {
        if self.transport.stall == Some(Stall::Send) {
            return std::future::pending().await;
        }
        Ok(())
    }

    async fn receive(&mut self) -> io::Result<RawResponse> {
        if self.transport.stall == Some(Stall::Receive) {
            return std::future::pending().await;
        }
        tokio::time::sleep(self.transport.latency).await;
        Ok(self.transport.response.clone())
    }
}

/// Serve `response` verbatim to the first client on an ephemeral port.
///
/// Returns the bound port and a receiver yielding the raw request head.
pub async fn serve_once(response: &'static [u8]) -> (u16, oneshot::Receiver<String>) {
    serve_once_at("127.0.0.1:0", response).await.unwrap()
}

/// Like [`serve_once`], bound to `addr`. Fails when the address family is
/// unavailable on this host.
pub async fn serve_once_at(
    addr: &str,
    response: &'static [u8],
) -> io::Result<(u16, oneshot::Receiver<String>)> {
    let listener = TcpListener::bind(addr).await?;
    let port = listener.local_addr()?.port();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        let _ = tx.send(String::from_utf8_lossy(&request).into_owned());

        // The client may hang up first once it rejects the response.
        let _ = socket.write_all(response).await;
        let _ = socket.shutdown().await;
    });

    Ok((port, rx))
}
