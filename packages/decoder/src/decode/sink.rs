//! Destinations for diagnostics emitted while decoding.

use serde::Serialize;

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Warning,
    Error,
}

impl Level {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// A single emitted line (possibly multi-line for causal traces).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
}

/// Receiver of leveled diagnostic text.
///
/// Passed explicitly through the decode context, so independent decodes never
/// share a channel.
pub trait DiagnosticSink {
    fn emit(&mut self, level: Level, message: &str);
}

/// Forwards diagnostics to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&mut self, level: Level, message: &str) {
        match level {
            Level::Warning => tracing::warn!("{message}"),
            Level::Error => tracing::error!("{message}"),
        }
    }
}

/// Records diagnostics in memory.
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    diagnostics: Vec<Diagnostic>,
}

impl CollectingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.level == Level::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.level == Level::Warning)
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    #[must_use]
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl DiagnosticSink for CollectingSink {
    fn emit(&mut self, level: Level, message: &str) {
        tracing::debug!(level = level.as_str(), "{message}");
        self.diagnostics.push(Diagnostic {
            level,
            message: message.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_sink_separates_levels() {
        let mut sink = CollectingSink::new();
        sink.emit(Level::Warning, "first");
        sink.emit(Level::Error, "second");
        sink.emit(Level::Error, "third");

        assert_eq!(sink.diagnostics().len(), 3);
        assert_eq!(sink.warnings().count(), 1);
        assert_eq!(sink.errors().count(), 2);
        assert!(sink.has_errors());
        assert_eq!(sink.into_diagnostics()[0].message, "first");
    }

    #[test]
    fn test_level_serializes_lowercase() {
        let json = serde_json::to_string(&Level::Warning).unwrap();
        assert_eq!(json, "\"warning\"");
    }
}
