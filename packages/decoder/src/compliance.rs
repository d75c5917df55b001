//! Deserialization compliance check.
//!
//! Runs a file through the lenient decoder and records each step with its
//! status and the diagnostics it produced.

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::config::DecoderConfig;
use crate::decode::{CollectingSink, Decoder, Diagnostic, Level};
use crate::model::ObjectStore;

pub const STEP_OPEN: &str = "Open file";
pub const STEP_DESERIALIZE: &str = "Read file and check if it is deserializable";

/// Outcome of a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Success,
    Failed,
    NotExecuted,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Success => "SUCCESS",
            Self::Failed => "FAILED",
            Self::NotExecuted => "NOT_EXECUTED",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    pub name: String,
    pub status: Status,
    pub diagnostics: Vec<Diagnostic>,
}

/// Ordered steps of a compliance check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComplianceReport {
    steps: Vec<Step>,
}

impl ComplianceReport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, name: &str, status: Status, diagnostics: Vec<Diagnostic>) {
        self.steps.push(Step {
            name: name.to_string(),
            status,
            diagnostics,
        });
    }

    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// True if no step failed or was skipped.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.steps.iter().all(|step| step.status == Status::Success)
    }
}

fn error(message: impl Into<String>) -> Diagnostic {
    Diagnostic {
        level: Level::Error,
        message: message.into(),
    }
}

/// Check that the XML file at `path` can be opened and deserialized.
///
/// The deserialization step fails if decoding aborts or if any error was
/// logged while decoding; warnings alone do not fail it. Steps after a failed
/// step are reported as not executed.
///
/// # Returns
/// The report and, if the file was readable and parsable, the decoded store.
pub fn check_deserialization(path: &Path) -> (ComplianceReport, Option<ObjectStore>) {
    let mut report = ComplianceReport::new();

    let xml = match std::fs::read_to_string(path) {
        Ok(xml) => {
            report.push(STEP_OPEN, Status::Success, Vec::new());
            xml
        }
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "cannot open file");
            report.push(STEP_OPEN, Status::Failed, vec![error(err.to_string())]);
            report.push(STEP_DESERIALIZE, Status::NotExecuted, Vec::new());
            return (report, None);
        }
    };

    let mut sink = CollectingSink::new();
    let decoded = Decoder::new(DecoderConfig::lenient()).decode_str(&xml, &mut sink);
    let failed = decoded.is_err() || sink.has_errors();
    let mut diagnostics = sink.into_diagnostics();

    let store = match decoded {
        Ok(store) => Some(store),
        Err(err) => {
            diagnostics.push(error(err.render_trace()));
            None
        }
    };
    let status = if failed { Status::Failed } else { Status::Success };
    report.push(STEP_DESERIALIZE, status, diagnostics);
    (report, store)
}
