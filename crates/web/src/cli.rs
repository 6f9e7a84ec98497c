//! Command-line surface of `check_web`.

use clap::Parser;

use crate::config::HttpMethod;

/// Fetch a page over HTTP and classify the response time.
#[derive(Debug, Parser)]
#[command(name = "check_web", version)]
pub struct WebArgs {
    /// URL of the page to check, with leading `http://`.
    #[arg(short, long)]
    pub url: String,

    /// Value of the `Host` header (defaults to the URL host).
    #[arg(short = 'H', long = "host-header")]
    pub host_header: Option<String>,

    #[arg(short = 'M', long, value_enum, ignore_case = true, default_value_t = HttpMethod::Get)]
    pub method: HttpMethod,

    /// Expected HTTP status code. Any other code is CRITICAL.
    #[arg(short = 'e', long = "expect-status")]
    pub expect_status: Option<u16>,

    /// Regular expression that must occur in the response body.
    #[arg(short = 'm', long = "match")]
    pub match_pattern: Option<String>,

    /// Treat `--match` as a plain substring.
    #[arg(long, requires = "match_pattern")]
    pub literal: bool,

    /// TCP port (defaults to the URL port, else 80).
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Warning threshold in milliseconds.
    #[arg(short, long)]
    pub warning: f64,

    /// Critical threshold in milliseconds.
    #[arg(short, long)]
    pub critical: f64,

    /// Budget for the whole request, in seconds.
    ///
    /// Shared by connect, send and receive rather than applied per socket
    /// operation. Keep it above the critical threshold.
    #[arg(short, long, default_value_t = 10.0)]
    pub timeout: f64,

    /// Log each step to stderr.
    #[arg(short, long)]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use probekit_core::ConfigError;

    use super::*;

    #[test]
    fn parses_full_command_line() {
        let args = WebArgs::try_parse_from([
            "check_web",
            "--url=http://origin-www.example.com",
            "--host-header=www.example.com",
            "-M",
            "head",
            "-m",
            "un mot",
            "-e",
            "200",
            "-w",
            "2500",
            "-c",
            "4000",
            "--debug",
        ])
        .unwrap();

        assert_eq!(args.url, "http://origin-www.example.com");
        assert_eq!(args.host_header.as_deref(), Some("www.example.com"));
        assert_eq!(args.method, HttpMethod::Head);
        assert_eq!(args.match_pattern.as_deref(), Some("un mot"));
        assert_eq!(args.expect_status, Some(200));
        assert_eq!(args.warning, 2500.0);
        assert_eq!(args.critical, 4000.0);
        assert_eq!(args.timeout, 10.0);
        assert!(args.debug);
        assert!(!args.literal);
    }

    #[test]
    fn method_defaults_to_get() {
        let args =
            WebArgs::try_parse_from(["check_web", "-u", "http://a", "-w", "1", "-c", "2"]).unwrap();
        assert_eq!(args.method, HttpMethod::Get);
        assert!(args.port.is_none());
    }

    #[test]
    fn missing_thresholds_are_rejected() {
        let err = WebArgs::try_parse_from(["check_web", "-u", "http://a"]).unwrap_err();
        let summary = ConfigError::arguments(&err.to_string()).to_string();
        assert!(summary.contains("--warning"), "{summary}");
        assert!(!summary.contains("Usage"), "{summary}");
    }

    #[test]
    fn timeout_help_describes_shared_budget() {
        let command = WebArgs::command();
        let timeout = command
            .get_arguments()
            .find(|arg| arg.get_id().as_str() == "timeout")
            .unwrap();
        let help = timeout.get_long_help().unwrap().to_string();
        assert!(help.contains("rather than applied per socket"), "{help}");
        assert_eq!(timeout.get_default_values()[0].to_str(), Some("10"));
    }

    #[test]
    fn literal_requires_match() {
        assert!(WebArgs::try_parse_from([
            "check_web", "-u", "http://a", "-w", "1", "-c", "2", "--literal"
        ])
        .is_err());
    }
}
