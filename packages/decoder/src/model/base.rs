//! Identifiers, references and the small value types shared by all entities.

use std::collections::BTreeMap;
use std::fmt;

use super::datatypes::{DataTypeDef, XsdValue};

/// A closed enumeration with a fixed textual representation in the XML format.
///
/// `TABLE` is the mapping used by the field extractor: a raw attribute value
/// or element text is looked up in it, and a miss is an invalid value.
pub trait XmlEnum: Sized + Copy + PartialEq + 'static {
    /// Mapping from serialized text to variant.
    const TABLE: &'static [(&'static str, Self)];

    /// Map a serialized value to its variant.
    fn from_xml(text: &str) -> Option<Self> {
        Self::TABLE
            .iter()
            .find(|(name, _)| *name == text)
            .map(|(_, value)| *value)
    }

    /// The serialized form of this variant.
    fn as_xml_str(self) -> &'static str {
        Self::TABLE
            .iter()
            .find(|(_, value)| *value == self)
            .map(|(name, _)| *name)
            .unwrap_or_default()
    }
}

/// Kind of a global identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IdentifierType {
    Irdi,
    Iri,
    Custom,
}

impl XmlEnum for IdentifierType {
    const TABLE: &'static [(&'static str, Self)] = &[
        ("IRDI", Self::Irdi),
        ("IRI", Self::Iri),
        ("Custom", Self::Custom),
    ];
}

/// Global identity of an identifiable entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier {
    pub id: String,
    pub id_type: IdentifierType,
}

impl Identifier {
    #[must_use]
    pub fn new(id: impl Into<String>, id_type: IdentifierType) -> Self {
        Self {
            id: id.into(),
            id_type,
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.id_type.as_xml_str(), self.id)
    }
}

/// Kind of the value of a reference key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    Custom,
    Irdi,
    Iri,
    IdShort,
    FragmentId,
}

impl KeyType {
    /// The identifier type this key value addresses, if it is a global id.
    #[must_use]
    pub fn identifier_type(self) -> Option<IdentifierType> {
        match self {
            Self::Custom => Some(IdentifierType::Custom),
            Self::Irdi => Some(IdentifierType::Irdi),
            Self::Iri => Some(IdentifierType::Iri),
            Self::IdShort | Self::FragmentId => None,
        }
    }
}

impl XmlEnum for KeyType {
    const TABLE: &'static [(&'static str, Self)] = &[
        ("Custom", Self::Custom),
        ("IRDI", Self::Irdi),
        ("IRI", Self::Iri),
        ("IdShort", Self::IdShort),
        ("FragmentId", Self::FragmentId),
    ];
}

/// Element kind addressed by a reference key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyElements {
    Asset,
    AssetAdministrationShell,
    ConceptDescription,
    Submodel,
    AccessPermissionRule,
    AnnotatedRelationshipElement,
    BasicEvent,
    Blob,
    Capability,
    ConceptDictionary,
    DataElement,
    File,
    Entity,
    Event,
    MultiLanguageProperty,
    Operation,
    Property,
    Range,
    ReferenceElement,
    RelationshipElement,
    SubmodelElement,
    SubmodelElementCollection,
    View,
    GlobalReference,
    FragmentReference,
}

impl XmlEnum for KeyElements {
    const TABLE: &'static [(&'static str, Self)] = &[
        ("Asset", Self::Asset),
        ("AssetAdministrationShell", Self::AssetAdministrationShell),
        ("ConceptDescription", Self::ConceptDescription),
        ("Submodel", Self::Submodel),
        ("AccessPermissionRule", Self::AccessPermissionRule),
        ("AnnotatedRelationshipElement", Self::AnnotatedRelationshipElement),
        ("BasicEvent", Self::BasicEvent),
        ("Blob", Self::Blob),
        ("Capability", Self::Capability),
        ("ConceptDictionary", Self::ConceptDictionary),
        ("DataElement", Self::DataElement),
        ("File", Self::File),
        ("Entity", Self::Entity),
        ("Event", Self::Event),
        ("MultiLanguageProperty", Self::MultiLanguageProperty),
        ("Operation", Self::Operation),
        ("Property", Self::Property),
        ("Range", Self::Range),
        ("ReferenceElement", Self::ReferenceElement),
        ("RelationshipElement", Self::RelationshipElement),
        ("SubmodelElement", Self::SubmodelElement),
        ("SubmodelElementCollection", Self::SubmodelElementCollection),
        ("View", Self::View),
        ("GlobalReference", Self::GlobalReference),
        ("FragmentReference", Self::FragmentReference),
    ];
}

impl KeyElements {
    /// Whether an element of this kind is a valid target for a reference
    /// expecting `target`.
    ///
    /// Global and fragment references point outside the model and never
    /// satisfy a typed target.
    #[must_use]
    pub fn refers_to(self, target: ReferenceTarget) -> bool {
        match target {
            ReferenceTarget::Referable => {
                !matches!(self, Self::GlobalReference | Self::FragmentReference)
            }
            ReferenceTarget::AssetAdministrationShell => self == Self::AssetAdministrationShell,
            ReferenceTarget::Asset => self == Self::Asset,
            ReferenceTarget::Submodel => self == Self::Submodel,
            ReferenceTarget::ConceptDescription => self == Self::ConceptDescription,
            ReferenceTarget::DataElement => matches!(
                self,
                Self::DataElement
                    | Self::Property
                    | Self::Range
                    | Self::Blob
                    | Self::File
                    | Self::MultiLanguageProperty
                    | Self::ReferenceElement
            ),
        }
    }
}

/// One segment of a reference path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key {
    pub key_type: KeyElements,
    pub local: bool,
    pub value: String,
    pub id_type: KeyType,
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.id_type.as_xml_str(), self.value)
    }
}

/// Ordered key path from a root identifiable to a target.
///
/// This is a value-type path description, not a live link. Resolution is a
/// lookup against an [`ObjectStore`](super::ObjectStore) done by callers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Reference {
    pub keys: Vec<Key>,
}

impl Reference {
    #[must_use]
    pub fn new(keys: Vec<Key>) -> Self {
        Self { keys }
    }

    #[must_use]
    pub fn last_key(&self) -> Option<&Key> {
        self.keys.last()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<String> = self.keys.iter().map(ToString::to_string).collect();
        f.write_str(&keys.join(" / "))
    }
}

/// Expected category of the entity a typed reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceTarget {
    Referable,
    AssetAdministrationShell,
    Asset,
    Submodel,
    ConceptDescription,
    DataElement,
}

impl ReferenceTarget {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Referable => "Referable",
            Self::AssetAdministrationShell => "AssetAdministrationShell",
            Self::Asset => "Asset",
            Self::Submodel => "Submodel",
            Self::ConceptDescription => "ConceptDescription",
            Self::DataElement => "DataElement",
        }
    }
}

/// A reference tagged with the category of its expected target.
///
/// The tag is checked softly at construction: a mismatching last key only
/// produces a warning.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AasReference {
    pub reference: Reference,
    pub target: ReferenceTarget,
}

impl AasReference {
    #[must_use]
    pub fn new(keys: Vec<Key>, target: ReferenceTarget) -> Self {
        Self {
            reference: Reference::new(keys),
            target,
        }
    }

    #[must_use]
    pub fn keys(&self) -> &[Key] {
        &self.reference.keys
    }
}

/// Version and revision of an identifiable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AdministrativeInformation {
    pub version: Option<String>,
    pub revision: Option<String>,
}

/// Localized text keyed by language tag.
pub type LangStringSet = BTreeMap<String, String>;

/// Whether an element describes a template or a concrete instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ModelingKind {
    Template,
    #[default]
    Instance,
}

impl XmlEnum for ModelingKind {
    const TABLE: &'static [(&'static str, Self)] =
        &[("Template", Self::Template), ("Instance", Self::Instance)];
}

/// Whether an asset is a type or an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Type,
    Instance,
}

impl XmlEnum for AssetKind {
    const TABLE: &'static [(&'static str, Self)] =
        &[("Type", Self::Type), ("Instance", Self::Instance)];
}

/// Management mode of an entity element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityType {
    CoManagedEntity,
    SelfManagedEntity,
}

impl XmlEnum for EntityType {
    const TABLE: &'static [(&'static str, Self)] = &[
        ("CoManagedEntity", Self::CoManagedEntity),
        ("SelfManagedEntity", Self::SelfManagedEntity),
    ];
}

/// A typed qualifier constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct Qualifier {
    pub qualifier_type: String,
    pub value_type: DataTypeDef,
    pub value: Option<XsdValue>,
    pub value_id: Option<Reference>,
    pub semantic_id: Option<Reference>,
}

/// A formula constraint depending on other elements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Formula {
    pub depends_on: Vec<Reference>,
}

/// Constraint attached to a qualifiable element.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    Qualifier(Qualifier),
    Formula(Formula),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key_type: KeyElements, value: &str) -> Key {
        Key {
            key_type,
            local: true,
            value: value.to_string(),
            id_type: KeyType::Iri,
        }
    }

    #[test]
    fn test_xml_enum_round_trip_names() {
        assert_eq!(KeyElements::from_xml("Property"), Some(KeyElements::Property));
        assert_eq!(KeyElements::Property.as_xml_str(), "Property");
        assert_eq!(IdentifierType::from_xml("IRI"), Some(IdentifierType::Iri));
        assert_eq!(IdentifierType::from_xml("iri"), None);
        assert_eq!(ModelingKind::default(), ModelingKind::Instance);
    }

    #[test]
    fn test_refers_to() {
        assert!(KeyElements::Submodel.refers_to(ReferenceTarget::Submodel));
        assert!(KeyElements::Submodel.refers_to(ReferenceTarget::Referable));
        assert!(!KeyElements::Asset.refers_to(ReferenceTarget::Submodel));
        assert!(KeyElements::Range.refers_to(ReferenceTarget::DataElement));
        assert!(!KeyElements::Operation.refers_to(ReferenceTarget::DataElement));
        assert!(!KeyElements::GlobalReference.refers_to(ReferenceTarget::Referable));
    }

    #[test]
    fn test_key_type_identifier_type() {
        assert_eq!(KeyType::Iri.identifier_type(), Some(IdentifierType::Iri));
        assert_eq!(KeyType::IdShort.identifier_type(), None);
    }

    #[test]
    fn test_reference_display() {
        let reference = Reference::new(vec![
            key(KeyElements::Submodel, "urn:sm"),
            key(KeyElements::Property, "Temperature"),
        ]);
        assert_eq!(reference.to_string(), "IRI=urn:sm / IRI=Temperature");
        assert_eq!(reference.last_key().map(|k| k.value.as_str()), Some("Temperature"));
    }

    #[test]
    fn test_identifier_display() {
        let id = Identifier::new("urn:example:asset:1", IdentifierType::Iri);
        assert_eq!(id.to_string(), "IRI=urn:example:asset:1");
    }
}
