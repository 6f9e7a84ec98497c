use crate::verdict::Verdict;

/// Configuration or precondition failure, detected before any observation
/// runs. Always reported as [`Verdict::Unknown`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },

    #[error("Invalid arguments: {0}")]
    Arguments(String),
}

impl ConfigError {
    /// Convenience constructor for [`ConfigError::Invalid`].
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            name,
            reason: reason.into(),
        }
    }

    /// Build an [`ConfigError::Arguments`] from a rendered argument-parser
    /// error, keeping the first paragraph and dropping the usage block.
    pub fn arguments(rendered: &str) -> Self {
        let summary = rendered
            .lines()
            .map(str::trim)
            .take_while(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        let summary = summary.strip_prefix("error: ").unwrap_or(&summary);
        Self::Arguments(summary.to_string())
    }

    pub fn verdict(&self) -> Verdict {
        Verdict::Unknown
    }
}
