//! One timed HTTP request/response cycle.
//!
//! A single deadline, taken before the connection is opened, bounds all
//! three steps. Whatever step is in flight when it expires is dropped and
//! reported; nothing is retried.

use std::fmt;
use std::future::Future;
use std::io;

use probekit_core::rounding;
use probekit_core::Verdict;
use tokio::time::Instant;

use crate::config::WebCheckConfig;
use crate::transport::{HttpConnection, HttpTransport, RequestHead};

/// Step of the request cycle, used to attribute failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Connect,
    Send,
    Receive,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Connect => "opening connection",
            Phase::Send => "sending request",
            Phase::Receive => "waiting for response",
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The shared deadline expired during this step.
    #[error("timed out while {0}")]
    Timeout(Phase),

    #[error("failed while {phase}: {source}")]
    Failure {
        phase: Phase,
        #[source]
        source: io::Error,
    },
}

impl TransportError {
    pub fn phase(&self) -> Phase {
        match self {
            TransportError::Timeout(phase) => *phase,
            TransportError::Failure { phase, .. } => *phase,
        }
    }

    /// An unobservable target is always CRITICAL.
    pub fn verdict(&self) -> Verdict {
        Verdict::Critical
    }
}

/// Result of a completed request cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
    /// Wall-clock time from connect to end of body, rounded to 3 decimals.
    pub elapsed_ms: f64,
}

pub struct HttpObservation<T> {
    transport: T,
}

impl<T: HttpTransport> HttpObservation<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Connect, send the configured request and read the full response.
    pub async fn run(&self, config: &WebCheckConfig) -> Result<HttpResponse, TransportError> {
        let request = RequestHead {
            method: config.method,
            target: config.request_target(),
            host: config.effective_host_header().to_string(),
        };
        let host = config.connect_host();

        let started = Instant::now();
        let deadline = started + config.timeout;

        tracing::debug!(%host, port = config.port, timeout = ?config.timeout, "Opening connection");
        let mut connection = within(
            deadline,
            Phase::Connect,
            self.transport.connect(&host, config.port),
        )
        .await?;

        tracing::debug!(
            method = %request.method,
            target = %request.target,
            host_header = %request.host,
            "Sending request",
        );
        within(deadline, Phase::Send, connection.send(&request)).await?;

        let raw = within(deadline, Phase::Receive, connection.receive()).await?;
        let elapsed_ms = rounding::round(started.elapsed().as_secs_f64() * 1000.0);

        tracing::debug!(
            status = raw.status,
            elapsed_ms,
            body_bytes = raw.body.len(),
            headers = ?raw.headers,
            "Response received",
        );

        Ok(HttpResponse {
            status: raw.status,
            headers: raw.headers,
            body: raw.body,
            elapsed_ms,
        })
    }
}

/// Await `step` until `deadline`, attributing any failure to `phase`.
async fn within<F, V>(deadline: Instant, phase: Phase, step: F) -> Result<V, TransportError>
where
    F: Future<Output = io::Result<V>>,
{
    match tokio::time::timeout_at(deadline, step).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) if e.kind() == io::ErrorKind::TimedOut => Err(TransportError::Timeout(phase)),
        Ok(Err(source)) => Err(TransportError::Failure { phase, source }),
        Err(_) => Err(TransportError::Timeout(phase)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_messages_name_the_step() {
        assert_eq!(
            TransportError::Timeout(Phase::Connect).to_string(),
            "timed out while opening connection"
        );
        assert_eq!(
            TransportError::Timeout(Phase::Send).to_string(),
            "timed out while sending request"
        );
        assert_eq!(
            TransportError::Timeout(Phase::Receive).to_string(),
            "timed out while waiting for response"
        );
    }

    #[test]
    fn failure_message_includes_cause() {
        let err = TransportError::Failure {
            phase: Phase::Connect,
            source: io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused"),
        };
        assert_eq!(
            err.to_string(),
            "failed while opening connection: connection refused"
        );
        assert_eq!(err.phase(), Phase::Connect);
        assert_eq!(err.verdict(), Verdict::Critical);
    }

    #[tokio::test(start_paused = true)]
    async fn os_timeout_is_reported_as_timeout() {
        let deadline = Instant::now() + std::time::Duration::from_secs(5);
        let result: Result<(), _> = within(deadline, Phase::Connect, async {
            Err(io::Error::new(io::ErrorKind::TimedOut, "connect timed out"))
        })
        .await;
        assert!(matches!(result, Err(TransportError::Timeout(Phase::Connect))));
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_is_shared_across_steps() {
        let deadline = Instant::now() + std::time::Duration::from_millis(100);

        within(deadline, Phase::Connect, async {
            tokio::time::sleep(std::time::Duration::from_millis(80)).await;
            Ok::<_, io::Error>(())
        })
        .await
        .unwrap();

        // 80ms already spent, so a 50ms send overruns the shared budget.
        let result = within(deadline, Phase::Send, async {
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            Ok::<_, io::Error>(())
        })
        .await;
        assert!(matches!(result, Err(TransportError::Timeout(Phase::Send))));
    }
}
