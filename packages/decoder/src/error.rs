//! Error types for the decoder.
//!
//! Structural and value errors raised while constructing the object graph
//! carry an optional cause. Every failsafe boundary such an error passes in
//! strict mode wraps it in a [`DecodeError::Conversion`] frame, so the error
//! that reaches the caller reads as a causal trace from the offending element
//! up to the document root.

use thiserror::Error;

/// Main error type for the decoder library.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// A mandatory child element is absent.
    #[error("XML element {parent} has no child {child}!")]
    MissingChild { parent: String, child: String },

    /// A mandatory attribute is absent.
    #[error("XML element {element} has no attribute with name {attribute}!")]
    MissingAttribute { element: String, attribute: String },

    /// An element that must carry text has none.
    #[error("XML element {element} has no text!")]
    EmptyElement { element: String },

    /// A value is present but cannot be mapped or parsed.
    #[error("Invalid {field} of XML element {element}: {value}")]
    InvalidValue {
        element: String,
        field: String,
        value: String,
    },

    /// No constructor is registered for the element's tag.
    #[error("XML element {element} is not a valid {expected}!")]
    UnknownVariant {
        element: String,
        expected: &'static str,
    },

    /// A root-level list group does not match any identifiable kind.
    #[error("Unexpected top-level list {tag}!")]
    UnexpectedListTag { tag: String },

    /// Two identifiables share the same identifier.
    #[error("Identifiable with identifier {identifier} is already present in the object store")]
    DuplicateIdentifier { identifier: String },

    /// Two referables share the same id-short within one namespace.
    #[error("Referable with id_short {id_short} is already present in {container}")]
    DuplicateIdShort { id_short: String, container: String },

    /// Causal frame added by the failsafe construction wrapper.
    #[error("while converting XML element with tag {element} to type {type_name}")]
    Conversion {
        element: String,
        type_name: &'static str,
        #[source]
        source: Box<DecodeError>,
    },

    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    Xml(#[from] roxmltree::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Input exceeds the configured size limit.
    #[error("Document of {size} bytes exceeds the limit of {limit} bytes")]
    DocumentTooLarge { size: u64, limit: u64 },

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization error.
    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// Namespace given to an identifier generator is not a usable IRI prefix.
    #[error("Invalid IRI namespace: '{0}'. It must start with a scheme and end with #, / or =")]
    InvalidNamespace(String),

    /// Broken internal invariant of the decoder itself.
    #[error("Internal decoder error: {0}")]
    Internal(String),
}

impl DecodeError {
    /// Whether the failsafe wrapper may intercept this error.
    ///
    /// Only structural and value errors qualify. IO, XML syntax and internal
    /// errors always propagate, regardless of the decoding mode.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::MissingChild { .. }
            | Self::MissingAttribute { .. }
            | Self::EmptyElement { .. }
            | Self::InvalidValue { .. }
            | Self::UnknownVariant { .. }
            | Self::UnexpectedListTag { .. }
            | Self::DuplicateIdentifier { .. }
            | Self::DuplicateIdShort { .. } => true,
            Self::Conversion { source, .. } => source.is_recoverable(),
            _ => false,
        }
    }

    /// Wrap this error in a conversion frame for `element` and `type_name`.
    #[must_use]
    pub fn within(self, element: impl Into<String>, type_name: &'static str) -> Self {
        Self::Conversion {
            element: element.into(),
            type_name,
            source: Box::new(self),
        }
    }

    /// The innermost error of the causal chain.
    #[must_use]
    pub fn root_cause(&self) -> &DecodeError {
        let mut current = self;
        while let Self::Conversion { source, .. } = current {
            current = &**source;
        }
        current
    }

    /// Conversion frames from the outermost to the innermost one.
    pub fn frames(&self) -> impl Iterator<Item = (&str, &'static str)> {
        let mut current = Some(self);
        std::iter::from_fn(move || match current? {
            Self::Conversion {
                element,
                type_name,
                source,
            } => {
                current = Some(&**source);
                Some((element.as_str(), *type_name))
            }
            _ => None,
        })
    }

    /// Short name of the error kind, used as the trace prefix.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::MissingChild { .. } => "MissingChild",
            Self::MissingAttribute { .. } => "MissingAttribute",
            Self::EmptyElement { .. } => "EmptyElement",
            Self::InvalidValue { .. } => "InvalidValue",
            Self::UnknownVariant { .. } => "UnknownVariant",
            Self::UnexpectedListTag { .. } => "UnexpectedListTag",
            Self::DuplicateIdentifier { .. } => "DuplicateIdentifier",
            Self::DuplicateIdShort { .. } => "DuplicateIdShort",
            Self::Conversion { source, .. } => source.kind_name(),
            Self::Xml(_) => "Xml",
            Self::Io(_) => "Io",
            Self::DocumentTooLarge { .. } => "DocumentTooLarge",
            Self::Json(_) => "Json",
            Self::Yaml(_) => "Yaml",
            Self::InvalidNamespace(_) => "InvalidNamespace",
            Self::Internal(_) => "Internal",
        }
    }

    /// Render the causal trace, innermost cause first.
    ///
    /// ```text
    /// MissingAttribute: XML element {ns}identification has no attribute with name idType!
    ///  -> while converting XML element with tag {ns}identification to type Identifier
    ///  -> while converting XML element with tag {ns}asset to type Asset
    /// ```
    #[must_use]
    pub fn render_trace(&self) -> String {
        let root = self.root_cause();
        let mut lines = vec![format!("{}: {root}", root.kind_name())];
        let frames: Vec<_> = self.frames().collect();
        for (element, type_name) in frames.into_iter().rev() {
            lines.push(format!(
                " -> while converting XML element with tag {element} to type {type_name}"
            ));
        }
        lines.join("\n")
    }
}

/// Result type alias for decoder operations.
pub type Result<T> = std::result::Result<T, DecodeError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn missing_id_type() -> DecodeError {
        DecodeError::MissingAttribute {
            element: "{urn:aas}identification".to_string(),
            attribute: "idType".to_string(),
        }
    }

    #[test]
    fn test_error_display() {
        let err = missing_id_type();
        assert_eq!(
            err.to_string(),
            "XML element {urn:aas}identification has no attribute with name idType!"
        );
    }

    #[test]
    fn test_conversion_display_is_single_frame() {
        let err = missing_id_type().within("{urn:aas}identification", "Identifier");
        assert_eq!(
            err.to_string(),
            "while converting XML element with tag {urn:aas}identification to type Identifier"
        );
    }

    #[test]
    fn test_root_cause_and_kind() {
        let err = missing_id_type()
            .within("{urn:aas}identification", "Identifier")
            .within("{urn:aas}asset", "Asset");

        assert!(matches!(
            err.root_cause(),
            DecodeError::MissingAttribute { .. }
        ));
        assert_eq!(err.kind_name(), "MissingAttribute");
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_frames_outermost_first() {
        let err = missing_id_type()
            .within("{urn:aas}identification", "Identifier")
            .within("{urn:aas}asset", "Asset");

        let types: Vec<_> = err.frames().map(|(_, t)| t).collect();
        assert_eq!(types, vec!["Asset", "Identifier"]);
    }

    #[test]
    fn test_render_trace_innermost_first() {
        let err = missing_id_type()
            .within("{urn:aas}identification", "Identifier")
            .within("{urn:aas}asset", "Asset");

        assert_eq!(
            err.render_trace(),
            "MissingAttribute: XML element {urn:aas}identification has no attribute with name idType!\n \
             -> while converting XML element with tag {urn:aas}identification to type Identifier\n \
             -> while converting XML element with tag {urn:aas}asset to type Asset"
        );
    }

    #[test]
    fn test_internal_is_not_recoverable() {
        let err = DecodeError::Internal("broken".to_string()).within("{urn:aas}x", "X");
        assert!(!err.is_recoverable());
    }
}
