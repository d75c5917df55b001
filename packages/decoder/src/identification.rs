//! Identifier generation for new identifiables.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{DecodeError, Result};
use crate::model::{Identifier, IdentifierType, ObjectStore};

/// Pattern for a usable IRI namespace: a scheme, and a final `#`, `/` or `=`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static NAMESPACE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z][a-zA-Z0-9+\-.]*:.*[#/=]$").expect("valid regex")
});

/// Generates identifiers from an optional proposal.
///
/// Implementations may ignore the proposal or alter it to keep the result
/// unique.
pub trait IdentifierGenerator {
    fn generate_id(&mut self, proposal: Option<&str>) -> Identifier;
}

/// Generates `urn:uuid:` IRIs from random (version 4) UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdentifierGenerator for UuidGenerator {
    fn generate_id(&mut self, _proposal: Option<&str>) -> Identifier {
        Identifier::new(format!("urn:uuid:{}", uuid::Uuid::new_v4()), IdentifierType::Iri)
    }
}

/// Generates IRIs inside a namespace, unique with respect to an object store.
///
/// The proposal is appended to the namespace. If the resulting identifier is
/// taken (or there is no proposal) a `_NNNN` counter is appended and
/// incremented until a free identifier is found.
#[derive(Debug)]
pub struct NamespaceIriGenerator<'s> {
    namespace: String,
    store: &'s ObjectStore,
    counters: HashMap<String, u32>,
}

impl<'s> NamespaceIriGenerator<'s> {
    /// Create a generator for `namespace`.
    ///
    /// # Errors
    /// `InvalidNamespace` unless the namespace starts with a scheme and ends
    /// with `#`, `/` or `=`.
    pub fn new(namespace: impl Into<String>, store: &'s ObjectStore) -> Result<Self> {
        let namespace = namespace.into();
        if !NAMESPACE_PATTERN.is_match(&namespace) {
            return Err(DecodeError::InvalidNamespace(namespace));
        }
        Ok(Self {
            namespace,
            store,
            counters: HashMap::new(),
        })
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }
}

impl IdentifierGenerator for NamespaceIriGenerator<'_> {
    fn generate_id(&mut self, proposal: Option<&str>) -> Identifier {
        let proposal = quote_iri_segment(proposal.unwrap_or_default());
        let mut counter = self.counters.get(&proposal).copied().unwrap_or(0);
        loop {
            let iri = if counter > 0 || proposal.is_empty() {
                let separator = if proposal.is_empty() { "" } else { "_" };
                format!("{}{proposal}{separator}{counter:04}", self.namespace)
            } else {
                format!("{}{proposal}", self.namespace)
            };
            let identifier = Identifier::new(iri, IdentifierType::Iri);
            if !self.store.contains(&identifier) {
                self.counters.insert(proposal, counter);
                return identifier;
            }
            counter += 1;
        }
    }
}

/// Percent-encode characters that may not appear in an IRI path segment and
/// drop ASCII control characters. `/ ? = & #` are kept.
#[must_use]
pub fn quote_iri_segment(segment: &str) -> String {
    let mut quoted = String::with_capacity(segment.len());
    for c in segment.chars() {
        match c {
            ':' | '[' | ']' | '@' | '!' | '$' | '\'' | '(' | ')' | '*' | '+' | ',' | ';' | ' '
            | '"' | '<' | '>' | '\\' | '^' | '`' | '{' | '|' | '}' => {
                quoted.push_str(&format!("%{:02X}", c as u32));
            }
            c if c.is_ascii_control() => {}
            c => quoted.push(c),
        }
    }
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Asset, AssetKind, Identifiable};

    fn asset(id: &str) -> Identifiable {
        Identifiable::Asset(Asset {
            identification: Identifier::new(id, IdentifierType::Iri),
            kind: AssetKind::Type,
            asset_identification_model: None,
            bill_of_material: None,
            referable: Default::default(),
            identifiable: Default::default(),
        })
    }

    #[test]
    fn test_uuid_generator() {
        let mut generator = UuidGenerator;
        let first = generator.generate_id(None);
        let second = generator.generate_id(Some("ignored"));

        assert!(first.id.starts_with("urn:uuid:"));
        assert_eq!(first.id.len(), "urn:uuid:".len() + 36);
        assert_eq!(first.id_type, IdentifierType::Iri);
        assert_ne!(first, second);
    }

    #[test]
    fn test_namespace_validation() {
        let store = ObjectStore::new();
        assert!(NamespaceIriGenerator::new("http://acplt.org/AAS/", &store).is_ok());
        assert!(NamespaceIriGenerator::new("urn:example:ns#", &store).is_ok());

        let err = NamespaceIriGenerator::new("http://acplt.org/AAS", &store).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidNamespace(_)));
        assert!(NamespaceIriGenerator::new("not a namespace/", &store).is_err());
    }

    #[test]
    fn test_namespace_generator_avoids_existing_ids() {
        let mut store = ObjectStore::new();
        store.add(asset("http://acplt.org/AAS/Motor")).unwrap();
        store.add(asset("http://acplt.org/AAS/Motor_0001")).unwrap();

        let mut generator = NamespaceIriGenerator::new("http://acplt.org/AAS/", &store).unwrap();
        assert_eq!(generator.generate_id(Some("Motor")).id, "http://acplt.org/AAS/Motor_0002");
        assert_eq!(generator.generate_id(Some("Pump")).id, "http://acplt.org/AAS/Pump");
        assert_eq!(generator.generate_id(None).id, "http://acplt.org/AAS/0000");
    }

    #[test]
    fn test_quote_iri_segment() {
        assert_eq!(quote_iri_segment("a b:c"), "a%20b%3Ac");
        assert_eq!(quote_iri_segment("x/y?z=1&w#f"), "x/y?z=1&w#f");
        assert_eq!(quote_iri_segment("tab\there"), "tabhere");
        assert_eq!(quote_iri_segment("Grüße"), "Grüße");
    }
}
