//! Diagnostics collector.
//!
//! [`Messages`] accumulates diagnostics in the order they are reported.
//! Reporting never fails; once the configured error limit is reached further
//! diagnostics are counted and dropped.

use fort_source::ProvenanceRange;
use tracing::debug;

use crate::{Diagnostic, ErrorCode};

/// Configuration for diagnostic collection.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct MessagesConfig {
    /// Maximum number of errors to keep (0 = unlimited).
    pub error_limit: usize,
}

impl MessagesConfig {
    /// Keep at most `error_limit` errors.
    pub fn with_error_limit(error_limit: usize) -> Self {
        MessagesConfig { error_limit }
    }
}

/// Ordered collection of reported diagnostics.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Messages {
    diagnostics: Vec<Diagnostic>,
    /// Diagnostics dropped because the error limit was reached.
    suppressed: usize,
    config: MessagesConfig,
}

impl Messages {
    /// Create an empty collector with no error limit.
    pub fn new() -> Self {
        Self::with_config(MessagesConfig::default())
    }

    /// Create an empty collector with custom configuration.
    pub fn with_config(config: MessagesConfig) -> Self {
        Messages {
            diagnostics: Vec::new(),
            suppressed: 0,
            config,
        }
    }

    /// Add a diagnostic.
    ///
    /// Returns `true` if it was kept, `false` if the error limit dropped it.
    pub fn say(&mut self, diagnostic: Diagnostic) -> bool {
        if self.config.error_limit > 0 && self.diagnostics.len() >= self.config.error_limit {
            self.suppressed += 1;
            return false;
        }
        debug!(
            code = %diagnostic.code,
            range = %diagnostic.range,
            message = %diagnostic.message,
            "diagnostic reported"
        );
        self.diagnostics.push(diagnostic);
        true
    }

    /// Report an error with `code` and `message` at `range`.
    pub fn report(&mut self, code: ErrorCode, message: impl Into<String>, range: ProvenanceRange) {
        self.say(Diagnostic::error(code).with_message(message).at(range));
    }

    /// Number of diagnostics kept.
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Check if nothing has been reported.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Number of diagnostics dropped by the error limit.
    pub fn suppressed(&self) -> usize {
        self.suppressed
    }

    /// The kept diagnostics, in report order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Iterate over the kept diagnostics.
    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.diagnostics.iter()
    }

    /// Order diagnostics by where they occur in the original source.
    ///
    /// Stable, so diagnostics at the same location keep their report order.
    pub fn sort_by_location(&mut self) {
        self.diagnostics.sort_by_key(|d| d.range.start());
    }

    /// Take ownership of the kept diagnostics.
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Forget everything reported so far. The configuration is kept.
    pub fn clear(&mut self) {
        self.diagnostics.clear();
        self.suppressed = 0;
    }
}

impl<'a> IntoIterator for &'a Messages {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
