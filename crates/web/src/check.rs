//! `check_web` orchestration.
//!
//! Order of evaluation, first failure wins:
//!
//! 1. transport (connect / send / receive)
//! 2. expected status code, when configured
//! 3. body match, when configured
//! 4. latency against the warning/critical thresholds

use probekit_core::metric_names::{METRIC_SIZE, METRIC_TIME};
use probekit_core::{Outcome, PerfDataEntry, Polarity, Reporter, Verdict};

use crate::config::WebCheckConfig;
use crate::observation::{HttpObservation, HttpResponse, TransportError};
use crate::transport::HttpTransport;

#[derive(Debug, thiserror::Error)]
pub enum WebCheckError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("expected HTTP status {expected} but got {actual}")]
    StatusMismatch { expected: u16, actual: u16 },

    #[error("pattern '{pattern}' not found in response body")]
    ContentMismatch { pattern: String },
}

impl WebCheckError {
    /// Transport failures and mismatches are never downgraded.
    pub fn verdict(&self) -> Verdict {
        Verdict::Critical
    }
}

impl From<WebCheckError> for Outcome {
    fn from(err: WebCheckError) -> Self {
        Outcome::new(err.verdict(), err.to_string())
    }
}

/// Run the full check and return its terminal outcome.
///
/// Perfdata is recorded on `reporter` once a response has been read.
pub async fn run<T: HttpTransport>(
    config: &WebCheckConfig,
    observation: &HttpObservation<T>,
    reporter: &mut Reporter,
) -> Outcome {
    let response = match observation.run(config).await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(url = %config.url, error = %e, "HTTP observation failed");
            return WebCheckError::from(e).into();
        }
    };

    record_perf_data(config, &response, reporter);

    if let Err(e) = check_predicates(config, &response) {
        tracing::warn!(url = %config.url, error = %e, "Response predicate failed");
        return e.into();
    }

    classify_latency(config, &response)
}

/// Status then content predicate. Unconfigured predicates are skipped.
pub fn check_predicates(
    config: &WebCheckConfig,
    response: &HttpResponse,
) -> Result<(), WebCheckError> {
    if let Some(expected) = config.expected_status {
        if response.status != expected {
            return Err(WebCheckError::StatusMismatch {
                expected,
                actual: response.status,
            });
        }
    }

    if let Some(pattern) = &config.pattern {
        if !pattern.is_match(&response.body) {
            return Err(WebCheckError::ContentMismatch {
                pattern: pattern.as_str().to_string(),
            });
        }
    }

    Ok(())
}

/// Classify the response time; larger is worse.
pub fn classify_latency(config: &WebCheckConfig, response: &HttpResponse) -> Outcome {
    let verdict = config
        .thresholds
        .evaluate_with(response.elapsed_ms, Polarity::Ascending);

    Outcome::new(
        verdict,
        format!(
            "HTTP {} in {} ms, {} bytes",
            response.status,
            response.elapsed_ms,
            response.body.len()
        ),
    )
}

fn record_perf_data(config: &WebCheckConfig, response: &HttpResponse, reporter: &mut Reporter) {
    reporter.add_perf_data(
        PerfDataEntry::new(METRIC_TIME, response.elapsed_ms, "ms")
            .with_thresholds(config.thresholds.warning, config.thresholds.critical)
            .with_min(0.0),
    );
    reporter.add_perf_data(
        PerfDataEntry::new(METRIC_SIZE, response.body.len() as f64, "B").with_min(0.0),
    );
}
