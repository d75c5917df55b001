//! Per-decode state threaded through every constructor.

use super::sink::{DiagnosticSink, Level};

/// Strictness flag and diagnostic sink of one decode run.
pub struct DecodeContext<'s> {
    strict: bool,
    sink: &'s mut dyn DiagnosticSink,
}

impl<'s> DecodeContext<'s> {
    pub fn new(strict: bool, sink: &'s mut dyn DiagnosticSink) -> Self {
        Self { strict, sink }
    }

    #[must_use]
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn warn(&mut self, message: impl AsRef<str>) {
        self.sink.emit(Level::Warning, message.as_ref());
    }

    pub fn error(&mut self, message: impl AsRef<str>) {
        self.sink.emit(Level::Error, message.as_ref());
    }

    /// Run `f` in strict mode, restoring the previous mode afterwards.
    pub fn strictly<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let previous = std::mem::replace(&mut self.strict, true);
        let result = f(self);
        self.strict = previous;
        result
    }
}
