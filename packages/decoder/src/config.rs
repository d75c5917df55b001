//! Configuration constants and decoder options.

use roxmltree::ParsingOptions;

use crate::error::{DecodeError, Result};

/// XML namespace of the Asset Administration Shell metamodel, version 2.0.
pub const NS_AAS: &str = "http://www.admin-shell.io/aas/2/0";

/// XML namespace of the IEC 61360 data specification (language strings).
pub const NS_IEC: &str = "http://www.admin-shell.io/IEC61360/2/0";

/// XML namespace of the attribute based access control (security) part.
pub const NS_ABAC: &str = "http://www.admin-shell.io/aas/abac/2/0";

/// Marker that turns an identifiable tag into its root-level list tag
/// (`submodel` -> `submodels`).
pub const LIST_SUFFIX: char = 's';

/// Default maximum document size in bytes (100 MB).
///
/// AASX exports with embedded binaries rarely exceed a few megabytes; the
/// limit keeps a malformed or hostile input from exhausting memory.
pub const DEFAULT_MAX_DOCUMENT_SIZE: u64 = 100 * 1024 * 1024;

/// Default maximum number of XML nodes accepted by the tree parser.
pub const DEFAULT_NODES_LIMIT: u32 = 10_000_000;

/// Options controlling a decode run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Abort on the first structural or value error instead of skipping the
    /// offending subtree.
    pub strict: bool,

    /// Maximum accepted input size in bytes.
    pub max_document_size: u64,

    /// Maximum number of XML nodes.
    pub nodes_limit: u32,
}

impl DecoderConfig {
    /// Failsafe configuration: errors are logged and defective objects skipped.
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            strict: false,
            max_document_size: DEFAULT_MAX_DOCUMENT_SIZE,
            nodes_limit: DEFAULT_NODES_LIMIT,
        }
    }

    /// Strict configuration: the first error aborts the whole decode.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::lenient()
        }
    }

    /// Set the maximum document size.
    #[must_use]
    pub fn with_max_document_size(mut self, bytes: u64) -> Self {
        self.max_document_size = bytes;
        self
    }

    /// Set the maximum number of XML nodes.
    #[must_use]
    pub fn with_nodes_limit(mut self, limit: u32) -> Self {
        self.nodes_limit = limit;
        self
    }

    /// Tree parser options derived from this configuration.
    ///
    /// DTDs are always rejected.
    #[must_use]
    pub fn parsing_options<'input>(&self) -> ParsingOptions<'input> {
        let mut options = ParsingOptions::default();
        options.allow_dtd = false;
        options.nodes_limit = self.nodes_limit;
        options
    }

    /// Validate an input size against the configured limit.
    ///
    /// # Examples
    /// ```
    /// use aas_xml_decoder::config::DecoderConfig;
    ///
    /// let config = DecoderConfig::lenient().with_max_document_size(10);
    /// assert!(config.check_document_size(10).is_ok());
    /// assert!(config.check_document_size(11).is_err());
    /// ```
    pub fn check_document_size(&self, size: u64) -> Result<()> {
        if size > self.max_document_size {
            return Err(DecodeError::DocumentTooLarge {
                size,
                limit: self.max_document_size,
            });
        }
        Ok(())
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self::lenient()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_lenient() {
        let config = DecoderConfig::default();
        assert!(!config.strict);
        assert_eq!(config.max_document_size, DEFAULT_MAX_DOCUMENT_SIZE);
    }

    #[test]
    fn test_strict_keeps_limits() {
        let config = DecoderConfig::lenient().with_nodes_limit(42);
        let strict = DecoderConfig {
            strict: true,
            ..config
        };
        assert_eq!(strict.nodes_limit, 42);
        assert!(DecoderConfig::strict().strict);
    }

    #[test]
    fn test_parsing_options() {
        let options = DecoderConfig::lenient().with_nodes_limit(7).parsing_options();
        assert!(!options.allow_dtd);
        assert_eq!(options.nodes_limit, 7);
    }

    #[test]
    fn test_document_too_large() {
        let config = DecoderConfig::lenient().with_max_document_size(100);
        let err = config.check_document_size(101).unwrap_err();
        assert!(err.to_string().contains("101 bytes"));
    }
}
