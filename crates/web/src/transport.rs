//! HTTP/1.1 transport on top of `hyper`'s client connection API.
//!
//! The check drives the three steps (connect, send, receive) separately so
//! each one can be attributed when it fails or runs out of time. Redirects
//! are never followed and the connection is closed after one exchange.

use std::future::Future;
use std::io;
use std::pin::Pin;

use http_body_util::{BodyExt, Empty, Limited};
use hyper::body::{Bytes, Incoming};
use hyper::client::conn::http1;
use hyper::header::{ACCEPT, CONNECTION, CONTENT_LENGTH, HOST, USER_AGENT};
use hyper::{Method, Request, Response};
use hyper_util::rt::TokioIo;
use tokio::net::TcpStream;

use crate::config::HttpMethod;

/// `User-Agent` sent with every request.
const AGENT: &str = concat!("probekit/", env!("CARGO_PKG_VERSION"));

/// Largest body buffered before giving up.
pub const MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

/// Request line and headers of the single request a check sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHead {
    pub method: HttpMethod,
    /// Origin-form target, e.g. `/index.html?a=1`.
    pub target: String,
    /// `Host` header value.
    pub host: String,
}

impl RequestHead {
    /// Build the bodiless request sent over the wire.
    pub fn to_request(&self) -> Result<Request<Empty<Bytes>>, hyper::http::Error> {
        let method = match self.method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Head => Method::HEAD,
        };

        let mut builder = Request::builder()
            .method(method)
            .uri(self.target.as_str())
            .header(HOST, self.host.as_str())
            .header(USER_AGENT, AGENT)
            .header(ACCEPT, "*/*")
            .header(CONNECTION, "close");
        if self.method == HttpMethod::Post {
            builder = builder.header(CONTENT_LENGTH, "0");
        }
        builder.body(Empty::new())
    }
}

/// Status, headers and decoded body of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    /// Header fields in the order received.
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RawResponse {
    /// First header value named `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Opens connections to an HTTP server.
pub trait HttpTransport: Send + Sync {
    type Connection: HttpConnection;

    fn connect(
        &self,
        host: &str,
        port: u16,
    ) -> impl Future<Output = io::Result<Self::Connection>> + Send;
}

/// One open connection carrying a single request/response exchange.
pub trait HttpConnection: Send {
    fn send(&mut self, request: &RequestHead) -> impl Future<Output = io::Result<()>> + Send;

    fn receive(&mut self) -> impl Future<Output = io::Result<RawResponse>> + Send;
}

type PendingResponse = Pin<Box<dyn Future<Output = hyper::Result<Response<Incoming>>> + Send>>;

/// [`HttpTransport`] over a `tokio::net::TcpStream` with an HTTP/1.1
/// `hyper` client connection on top.
#[derive(Debug, Default, Clone, Copy)]
pub struct TcpTransport;

impl HttpTransport for TcpTransport {
    type Connection = TcpConnection;

    async fn connect(&self, host: &str, port: u16) -> io::Result<TcpConnection> {
        let stream = TcpStream::connect((host, port)).await?;
        stream.set_nodelay(true)?;

        let mut builder = http1::Builder::new();
        builder.title_case_headers(true);
        let (sender, connection) = builder
            .handshake::<_, Empty<Bytes>>(TokioIo::new(stream))
            .await
            .map_err(io::Error::other)?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::debug!(error = %e, "HTTP connection closed with error");
            }
        });

        Ok(TcpConnection {
            sender,
            pending: None,
        })
    }
}

pub struct TcpConnection {
    sender: http1::SendRequest<Empty<Bytes>>,
    pending: Option<PendingResponse>,
}

impl HttpConnection for TcpConnection {
    /// Hand the request to the connection task. Write errors surface on
    /// [`HttpConnection::receive`].
    async fn send(&mut self, request: &RequestHead) -> io::Result<()> {
        let request = request
            .to_request()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        self.sender.ready().await.map_err(io::Error::other)?;
        self.pending = Some(Box::pin(self.sender.send_request(request)));
        Ok(())
    }

    async fn receive(&mut self) -> io::Result<RawResponse> {
        let pending = self
            .pending
            .take()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "no request in flight"))?;
        let response = pending.await.map_err(io::Error::other)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        let body = Limited::new(response.into_body(), MAX_BODY_BYTES)
            .collect()
            .await
            .map_err(io::Error::other)?
            .to_bytes()
            .to_vec();

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
