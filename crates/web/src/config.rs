//! Immutable configuration for one HTTP check run.
//!
//! Built once from the parsed command line before any network activity.
//! Only semantic validation happens here; syntax is the CLI's job.

use std::fmt;
use std::time::Duration;

use probekit_core::{ConfigError, ThresholdPair};
use regex::bytes::Regex;
use url::{Host, Url};

use crate::cli::WebArgs;

/// Port used when neither `--port` nor the URL names one.
pub const DEFAULT_HTTP_PORT: u16 = 80;

/// Network budget for the whole request/response cycle.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum HttpMethod {
    #[value(name = "GET")]
    Get,
    #[value(name = "POST")]
    Post,
    #[value(name = "HEAD")]
    Head,
}

impl HttpMethod {
    pub const fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Head => "HEAD",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-sensitive body matcher.
#[derive(Debug, Clone)]
pub struct MatchPattern {
    source: String,
    regex: Regex,
}

impl MatchPattern {
    /// Compile `pattern` as a regular expression.
    pub fn regex(pattern: &str) -> Result<Self, ConfigError> {
        Self::compile(pattern, pattern.to_string())
    }

    /// Match `pattern` as a plain substring.
    pub fn literal(pattern: &str) -> Result<Self, ConfigError> {
        Self::compile(pattern, regex::escape(pattern))
    }

    fn compile(source: &str, expr: String) -> Result<Self, ConfigError> {
        if source.is_empty() {
            return Err(ConfigError::invalid("match", "must not be empty"));
        }
        let regex = Regex::new(&expr).map_err(|e| ConfigError::invalid("match", e.to_string()))?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    /// The pattern as the user wrote it.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, body: &[u8]) -> bool {
        self.regex.is_match(body)
    }
}

/// Everything the web check needs, validated.
#[derive(Debug, Clone)]
pub struct WebCheckConfig {
    pub url: Url,
    pub port: u16,
    pub method: HttpMethod,
    /// Explicit `Host` header; falls back to the URL host when `None`.
    pub host_header: Option<String>,
    pub expected_status: Option<u16>,
    pub pattern: Option<MatchPattern>,
    /// Latency thresholds in milliseconds.
    pub thresholds: ThresholdPair,
    pub timeout: Duration,
}

impl WebCheckConfig {
    /// Validate `url` and `thresholds` and fill everything else with defaults.
    pub fn new(url: &str, thresholds: ThresholdPair) -> Result<Self, ConfigError> {
        let url = parse_url(url)?;
        let thresholds = ThresholdPair::checked(thresholds.warning, thresholds.critical)?;
        let port = url.port().unwrap_or(DEFAULT_HTTP_PORT);

        Ok(Self {
            url,
            port,
            method: HttpMethod::Get,
            host_header: None,
            expected_status: None,
            pattern: None,
            thresholds,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_port(mut self, port: u16) -> Result<Self, ConfigError> {
        if port == 0 {
            return Err(ConfigError::invalid("port", "must be between 1 and 65535"));
        }
        self.port = port;
        Ok(self)
    }

    pub fn with_host_header(mut self, host: &str) -> Result<Self, ConfigError> {
        let host = host.trim();
        if host.is_empty() {
            return Err(ConfigError::invalid("host-header", "must not be empty"));
        }
        if host.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(ConfigError::invalid(
                "host-header",
                "must not contain whitespace or control characters",
            ));
        }
        self.host_header = Some(host.to_string());
        Ok(self)
    }

    pub fn with_expected_status(mut self, status: u16) -> Result<Self, ConfigError> {
        if !(100..=999).contains(&status) {
            return Err(ConfigError::invalid(
                "expect-status",
                format!("{status} is not a valid HTTP status code"),
            ));
        }
        self.expected_status = Some(status);
        Ok(self)
    }

    pub fn with_pattern(mut self, pattern: MatchPattern) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, ConfigError> {
        if timeout.is_zero() {
            return Err(ConfigError::invalid("timeout", "must be greater than zero"));
        }
        self.timeout = timeout;
        Ok(self)
    }

    /// Host to open the TCP connection to. IPv6 literals lose their brackets.
    pub fn connect_host(&self) -> String {
        match self.url.host() {
            Some(Host::Ipv6(addr)) => addr.to_string(),
            Some(host) => host.to_string(),
            // `parse_url` rejects URLs without a host.
            None => String::new(),
        }
    }

    /// `Host` header value: the explicit override, else the URL's host as
    /// written (IPv6 literals keep their brackets).
    pub fn effective_host_header(&self) -> &str {
        self.host_header
            .as_deref()
            .or_else(|| self.url.host_str())
            .unwrap_or_default()
    }

    /// Origin-form request target (`path[?query]`).
    pub fn request_target(&self) -> String {
        match self.url.query() {
            Some(query) => format!("{}?{}", self.url.path(), query),
            None => self.url.path().to_string(),
        }
    }
}

impl TryFrom<WebArgs> for WebCheckConfig {
    type Error = ConfigError;

    fn try_from(args: WebArgs) -> Result<Self, Self::Error> {
        let timeout = Duration::try_from_secs_f64(args.timeout)
            .map_err(|_| ConfigError::invalid("timeout", "must be a positive number of seconds"))?;

        let mut config = WebCheckConfig::new(
            &args.url,
            ThresholdPair::new(args.warning, args.critical),
        )?
        .with_method(args.method)
        .with_timeout(timeout)?;

        if let Some(port) = args.port {
            config = config.with_port(port)?;
        }
        if let Some(host) = args.host_header.as_deref() {
            config = config.with_host_header(host)?;
        }
        if let Some(status) = args.expect_status {
            config = config.with_expected_status(status)?;
        }
        if let Some(pattern) = args.match_pattern.as_deref() {
            let pattern = if args.literal {
                MatchPattern::literal(pattern)?
            } else {
                MatchPattern::regex(pattern)?
            };
            config = config.with_pattern(pattern);
        }

        Ok(config)
    }
}

fn parse_url(raw: &str) -> Result<Url, ConfigError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ConfigError::Missing("url"));
    }
    let url = Url::parse(raw).map_err(|e| ConfigError::invalid("url", e.to_string()))?;
    if url.scheme() != "http" {
        return Err(ConfigError::invalid(
            "url",
            format!("scheme '{}' is not supported, use http://", url.scheme()),
        ));
    }
    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(ConfigError::invalid("url", "must include a host")),
    }
}
