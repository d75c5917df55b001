//! In-memory object graph of an Asset Administration Shell document.

mod aas;
mod base;
mod capability;
mod datatypes;
mod store;
mod submodel;

pub use aas::{
    Asset, AssetAdministrationShell, ConceptDescription, ConceptDictionary, Identifiable, Security,
    Submodel, View,
};
pub use base::{
    AasReference, AdministrativeInformation, AssetKind, Constraint, EntityType, Formula,
    Identifier, IdentifierType, Key, KeyElements, KeyType, LangStringSet, ModelingKind, Qualifier,
    Reference, ReferenceTarget, XmlEnum,
};
pub use capability::{Capabilities, ElementAttributes, IdentifiableAttributes, ReferableAttributes};
pub use datatypes::{DataTypeDef, XsdValue};
pub use store::{ObjectStore, Resolved};
pub use submodel::{
    find_by_id_short, insert_unique, AnnotatedRelationshipElement, BasicEvent, Blob, Capability,
    Entity, File, MultiLanguageProperty, Operation, OperationVariable, Property, Range,
    ReferenceElement, RelationshipElement, SubmodelElement, SubmodelElementCollection,
};
