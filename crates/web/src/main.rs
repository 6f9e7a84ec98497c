//! `check_web` -- HTTP availability and response time probe.
//!
//! Fetches one page, checks the status code and body, and classifies the
//! response time. Prints a single status line and exits with the verdict's
//! exit code:
//!
//! | Exit | Verdict  |
//! |------|----------|
//! | 0    | OK       |
//! | 1    | WARNING  |
//! | 2    | CRITICAL |
//! | 3    | UNKNOWN  |
//!
//! Logs go to stderr. `RUST_LOG` overrides the level chosen by `--debug`.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use probekit_core::metric_names::CHECK_WEB;
use probekit_core::{ConfigError, Outcome, Reporter};
use probekit_web::check;
use probekit_web::cli::WebArgs;
use probekit_web::config::WebCheckConfig;
use probekit_web::observation::HttpObservation;
use probekit_web::transport::TcpTransport;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenvy::dotenv().ok();

    let mut reporter = Reporter::new(CHECK_WEB);

    let args = match WebArgs::try_parse() {
        Ok(args) => args,
        // --help and --version
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let err = ConfigError::arguments(&e.to_string());
            reporter.exit(Outcome::new(err.verdict(), err.to_string()))
        }
    };

    let default_level = if args.debug { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match WebCheckConfig::try_from(args) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            reporter.exit(Outcome::new(e.verdict(), e.to_string()))
        }
    };

    tracing::debug!(url = %config.url, method = %config.method, "Starting check_web");

    let observation = HttpObservation::new(TcpTransport);
    let outcome = check::run(&config, &observation, &mut reporter).await;
    reporter.exit(outcome)
}
