//! Miette diagnostics for CLI error presentation.
//!
//! Settings parse failures are rendered with the offending TOML snippet;
//! everything else gets a message plus a hint where one helps.

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::error::{ConfigError, Error, ProviderError};

/// Settings file error with source location context.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(gkecc::config))]
pub struct ConfigDiagnostic {
    /// Headline shown above the snippet.
    pub message: String,

    /// Full settings file text.
    #[source_code]
    pub src: String,

    /// Byte range of the offending TOML.
    #[label("here")]
    pub span: SourceSpan,

    #[help]
    pub help: Option<String>,
}

impl ConfigDiagnostic {
    /// Diagnostic pointing `len` bytes at `offset` into `src`.
    #[must_use]
    pub fn new(
        message: impl Into<String>,
        src: impl Into<String>,
        offset: usize,
        len: usize,
    ) -> Self {
        Self {
            message: message.into(),
            src: src.into(),
            span: (offset, len).into(),
            help: None,
        }
    }

    /// Attach a help line.
    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Build a diagnostic from a settings parse failure, if it has a span.
    #[must_use]
    pub fn from_config_error(err: &ConfigError) -> Option<Self> {
        let ConfigError::Parse { path, src, source } = err else {
            return None;
        };
        let span = source.span()?;
        Some(
            Self::new(
                format!("failed to parse {}: {}", path.display(), source.message()),
                src.clone(),
                span.start,
                span.end.saturating_sub(span.start).max(1),
            )
            .with_help("see the [provider], [compute], [cache], [catalog] and [logging] sections"),
        )
    }
}

/// A one-line suggestion for how to recover from `err`.
#[must_use]
pub fn hint_for(err: &Error) -> Option<&'static str> {
    match err {
        Error::Provider(ProviderError::Authentication(_)) => {
            Some("set GCP_BILLING_API_KEY or GCP_ACCESS_TOKEN (see `gkecc --help`)")
        }
        Error::Provider(ProviderError::Timeout { .. }) => {
            Some("raise --timeout or [provider] timeout_secs")
        }
        Error::Provider(err) if err.is_retryable() => Some("retry shortly"),
        Error::NoEligibleInstances { .. } => {
            Some("raise --max-cost, widen --category, or try another --arch")
        }
        _ => None,
    }
}

/// Print `err` to stderr, using miette rendering where it adds context.
pub fn report(err: &Error) {
    if let Error::Config(config) = err {
        if let Some(diagnostic) = ConfigDiagnostic::from_config_error(config) {
            eprintln!("{:?}", miette::Report::new(diagnostic));
            return;
        }
    }

    super::output::error(&err.to_string());
    if let Some(hint) = hint_for(err) {
        super::output::hint(hint);
    }
}
