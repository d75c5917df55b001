//! Serializable summary of a decode run.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::decode::{Diagnostic, Level};
use crate::error::Result;
use crate::model::ObjectStore;

/// Counts, identifiers and diagnostics of one decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodeSummary {
    pub strict: bool,
    pub total: usize,
    pub counts: BTreeMap<&'static str, usize>,
    pub identifiers: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl DecodeSummary {
    #[must_use]
    pub fn new(store: &ObjectStore, strict: bool, diagnostics: Vec<Diagnostic>) -> Self {
        let mut counts = BTreeMap::new();
        for identifiable in store {
            *counts.entry(identifiable.type_name()).or_insert(0) += 1;
        }
        Self {
            strict,
            total: store.len(),
            counts,
            identifiers: store.identifiers().map(ToString::to_string).collect(),
            diagnostics,
        }
    }

    #[must_use]
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.level == Level::Error)
            .count()
    }

    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.level == Level::Warning)
            .count()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }
}
