//! The decoding engine.
//!
//! Construction is top-down: the driver finds each root-level list group,
//! every constructor looks up its mandatory and optional children by
//! qualified tag, and nested typed objects are built through the failsafe
//! wrapper in [`failsafe`].

mod amend;
mod constraints;
mod context;
mod dispatch;
mod driver;
mod elements;
mod extract;
mod failsafe;
mod identifiables;
mod references;
mod sink;

use std::path::Path;

use roxmltree::{Document, Node};

use crate::config::DecoderConfig;
use crate::error::Result;
use crate::model::ObjectStore;

pub use context::DecodeContext;
pub use dispatch::{ConstraintKind, IdentifiableKind, SubmodelElementKind};
pub use driver::decode_document;
pub use extract::{
    attr_mandatory, attr_mandatory_mapped, child, child_mandatory, text_mandatory,
    text_mandatory_mapped, text_or_none,
};
pub use failsafe::{
    construct_mandatory, construct_multiple, failsafe_construct, BuildFn, Constructor,
};
pub use sink::{CollectingSink, Diagnostic, DiagnosticSink, Level, TracingSink};

/// Decode a parsed document tree.
///
/// In lenient mode this always returns a (possibly partial) store, and every
/// dropped subtree is explained in `sink`. In strict mode the first error is
/// returned with its full causal trace.
pub fn decode(root: Node<'_, '_>, strict: bool, sink: &mut dyn DiagnosticSink) -> Result<ObjectStore> {
    let mut ctx = DecodeContext::new(strict, sink);
    decode_document(root, &mut ctx)
}

/// Parses and decodes documents according to a [`DecoderConfig`].
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    config: DecoderConfig,
}

impl Decoder {
    #[must_use]
    pub fn new(config: DecoderConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode an XML document held in memory.
    ///
    /// # Errors
    /// `DocumentTooLarge` or `Xml` before decoding starts, then whatever
    /// [`decode`] returns.
    pub fn decode_str(&self, xml: &str, sink: &mut dyn DiagnosticSink) -> Result<ObjectStore> {
        self.config.check_document_size(xml.len() as u64)?;
        let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);
        let doc = Document::parse_with_options(xml, self.config.parsing_options())?;
        tracing::debug!(strict = self.config.strict, "decoding document");
        decode(doc.root_element(), self.config.strict, sink)
    }

    /// Read and decode an XML file.
    ///
    /// # Errors
    /// `Io` if the file cannot be read, otherwise as [`Decoder::decode_str`].
    pub fn decode_file(&self, path: &Path, sink: &mut dyn DiagnosticSink) -> Result<ObjectStore> {
        let size = std::fs::metadata(path)?.len();
        self.config.check_document_size(size)?;
        let xml = std::fs::read_to_string(path)?;
        self.decode_str(&xml, sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;

    #[test]
    fn test_decode_str_strips_bom() {
        let xml = "\u{feff}<aas:aasenv xmlns:aas=\"http://www.admin-shell.io/aas/2/0\"/>";
        let mut sink = CollectingSink::new();
        let store = Decoder::default().decode_str(xml, &mut sink).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_decode_str_rejects_malformed_xml() {
        let mut sink = CollectingSink::new();
        let err = Decoder::default().decode_str("<aas:aasenv", &mut sink).unwrap_err();
        assert!(matches!(err, DecodeError::Xml(_)));
    }

    #[test]
    fn test_decode_str_size_limit() {
        let decoder = Decoder::new(DecoderConfig::strict().with_max_document_size(8));
        let mut sink = CollectingSink::new();
        let err = decoder.decode_str("<aasenv></aasenv>", &mut sink).unwrap_err();
        assert!(matches!(err, DecodeError::DocumentTooLarge { .. }));
    }

    #[test]
    fn test_decode_file_missing() {
        let mut sink = CollectingSink::new();
        let err = Decoder::default()
            .decode_file(Path::new("/nonexistent/aas.xml"), &mut sink)
            .unwrap_err();
        assert!(matches!(err, DecodeError::Io(_)));
    }
}
