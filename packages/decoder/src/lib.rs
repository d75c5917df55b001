//! AAS XML Decoder - Decode Asset Administration Shell XML documents.
//!
//! This crate turns an Asset Administration Shell document in the XML
//! format (metamodel version 2.0) into a typed, identifier-keyed object
//! store. Decoding runs in one of two modes: strict, where the first
//! structural or value error aborts with its full causal trace, and lenient,
//! where defective objects are logged and skipped.
//!
//! # Example
//!
//! ```
//! use aas_xml_decoder::{CollectingSink, Decoder, DecoderConfig};
//!
//! let xml = r#"<aas:aasenv xmlns:aas="http://www.admin-shell.io/aas/2/0">
//!   <aas:assets>
//!     <aas:asset>
//!       <aas:identification idType="IRI">urn:example:asset:1</aas:identification>
//!       <aas:kind>Instance</aas:kind>
//!     </aas:asset>
//!   </aas:assets>
//! </aas:aasenv>"#;
//!
//! let mut sink = CollectingSink::new();
//! let store = Decoder::new(DecoderConfig::strict()).decode_str(xml, &mut sink).unwrap();
//! assert_eq!(store.len(), 1);
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Namespaces, limits and decoder options
//! - [`error`]: Error types, causal traces and Result alias
//! - [`xml`]: Namespace-qualified tree navigation
//! - [`model`]: The decoded object graph and the object store
//! - [`decode`]: Field extraction, failsafe construction, dispatch and driver
//! - [`identification`]: Identifier generators
//! - [`compliance`]: Deserialization compliance check
//! - [`report`]: Serializable decode summaries
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod compliance;
pub mod config;
pub mod decode;
pub mod error;
pub mod identification;
pub mod model;
pub mod report;
pub mod xml;

// Re-export commonly used items
pub use config::DecoderConfig;
pub use decode::{decode, CollectingSink, Decoder, Diagnostic, DiagnosticSink, Level, TracingSink};
pub use error::{DecodeError, Result};
pub use model::{Identifiable, Identifier, ObjectStore, SubmodelElement};
