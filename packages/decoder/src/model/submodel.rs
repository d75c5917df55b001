//! Submodel elements: the closed set of typed data elements a submodel,
//! collection or entity can contain.

use super::base::{AasReference, EntityType, LangStringSet, Reference};
use super::capability::{Capabilities, ElementAttributes, ReferableAttributes};
use super::datatypes::{DataTypeDef, XsdValue};
use crate::error::{DecodeError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub attributes: ElementAttributes,
    pub value_type: DataTypeDef,
    pub value: Option<XsdValue>,
    pub value_id: Option<Reference>,
}

/// A closed interval of values of one XSD type. Either bound may be absent.
#[derive(Debug, Clone, PartialEq)]
pub struct Range {
    pub attributes: ElementAttributes,
    pub value_type: DataTypeDef,
    pub min: Option<XsdValue>,
    pub max: Option<XsdValue>,
}

/// Inline binary content.
#[derive(Debug, Clone, PartialEq)]
pub struct Blob {
    pub attributes: ElementAttributes,
    pub mime_type: String,
    pub value: Option<Vec<u8>>,
}

/// Reference to a file by path or URI.
#[derive(Debug, Clone, PartialEq)]
pub struct File {
    pub attributes: ElementAttributes,
    pub mime_type: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MultiLanguageProperty {
    pub attributes: ElementAttributes,
    pub value: Option<LangStringSet>,
    pub value_id: Option<Reference>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceElement {
    pub attributes: ElementAttributes,
    pub value: Option<AasReference>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RelationshipElement {
    pub attributes: ElementAttributes,
    pub first: AasReference,
    pub second: AasReference,
}

/// Relationship with references to data elements annotating it.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedRelationshipElement {
    pub attributes: ElementAttributes,
    pub first: AasReference,
    pub second: AasReference,
    pub annotations: Vec<AasReference>,
}

/// Wrapper of exactly one submodel element used as an operation argument.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationVariable {
    pub value: Box<SubmodelElement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub attributes: ElementAttributes,
    pub input_variables: Vec<OperationVariable>,
    pub output_variables: Vec<OperationVariable>,
    pub in_output_variables: Vec<OperationVariable>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Capability {
    pub attributes: ElementAttributes,
}

/// An entity with its own statements, optionally bound to an asset.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub attributes: ElementAttributes,
    pub entity_type: EntityType,
    pub asset: Option<AasReference>,
    pub statements: Vec<SubmodelElement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BasicEvent {
    pub attributes: ElementAttributes,
    pub observed: AasReference,
}

/// A named group of submodel elements.
///
/// When `ordered` is false the order of `value` carries no meaning and two
/// collections compare equal if they hold the same elements by id-short.
#[derive(Debug, Clone)]
pub struct SubmodelElementCollection {
    pub attributes: ElementAttributes,
    pub ordered: bool,
    pub value: Vec<SubmodelElement>,
}

impl PartialEq for SubmodelElementCollection {
    fn eq(&self, other: &Self) -> bool {
        if self.attributes != other.attributes
            || self.ordered != other.ordered
            || self.value.len() != other.value.len()
        {
            return false;
        }
        if self.ordered {
            return self.value == other.value;
        }
        self.value.iter().all(|element| {
            find_by_id_short(&other.value, element.id_short()).is_some_and(|o| o == element)
        })
    }
}

macro_rules! element_capabilities {
    ($($ty:ident),+ $(,)?) => {
        $(
            impl Capabilities for $ty {
                fn referable_mut(&mut self) -> Option<&mut ReferableAttributes> {
                    self.attributes.referable_mut()
                }

                fn semantic_id_mut(&mut self) -> Option<&mut Option<Reference>> {
                    self.attributes.semantic_id_mut()
                }

                fn qualifiers_mut(&mut self) -> Option<&mut Vec<super::base::Constraint>> {
                    self.attributes.qualifiers_mut()
                }
            }
        )+
    };
}

element_capabilities!(
    Property,
    Range,
    Blob,
    File,
    MultiLanguageProperty,
    ReferenceElement,
    RelationshipElement,
    AnnotatedRelationshipElement,
    Operation,
    Capability,
    Entity,
    BasicEvent,
    SubmodelElementCollection,
);

/// Any of the concrete submodel element kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmodelElement {
    Property(Property),
    Range(Range),
    Blob(Blob),
    File(File),
    MultiLanguageProperty(MultiLanguageProperty),
    ReferenceElement(ReferenceElement),
    RelationshipElement(RelationshipElement),
    AnnotatedRelationshipElement(AnnotatedRelationshipElement),
    Operation(Operation),
    Capability(Capability),
    Entity(Entity),
    BasicEvent(BasicEvent),
    SubmodelElementCollection(SubmodelElementCollection),
}

impl SubmodelElement {
    /// Attributes common to every element kind.
    #[must_use]
    pub fn attributes(&self) -> &ElementAttributes {
        match self {
            Self::Property(e) => &e.attributes,
            Self::Range(e) => &e.attributes,
            Self::Blob(e) => &e.attributes,
            Self::File(e) => &e.attributes,
            Self::MultiLanguageProperty(e) => &e.attributes,
            Self::ReferenceElement(e) => &e.attributes,
            Self::RelationshipElement(e) => &e.attributes,
            Self::AnnotatedRelationshipElement(e) => &e.attributes,
            Self::Operation(e) => &e.attributes,
            Self::Capability(e) => &e.attributes,
            Self::Entity(e) => &e.attributes,
            Self::BasicEvent(e) => &e.attributes,
            Self::SubmodelElementCollection(e) => &e.attributes,
        }
    }

    #[must_use]
    pub fn id_short(&self) -> &str {
        &self.attributes().id_short
    }

    /// Name of the concrete element kind, as used in conversion traces.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Property(_) => "Property",
            Self::Range(_) => "Range",
            Self::Blob(_) => "Blob",
            Self::File(_) => "File",
            Self::MultiLanguageProperty(_) => "MultiLanguageProperty",
            Self::ReferenceElement(_) => "ReferenceElement",
            Self::RelationshipElement(_) => "RelationshipElement",
            Self::AnnotatedRelationshipElement(_) => "AnnotatedRelationshipElement",
            Self::Operation(_) => "Operation",
            Self::Capability(_) => "Capability",
            Self::Entity(_) => "Entity",
            Self::BasicEvent(_) => "BasicEvent",
            Self::SubmodelElementCollection(_) => "SubmodelElementCollection",
        }
    }

    /// Child elements this element is a namespace for.
    #[must_use]
    pub fn children(&self) -> &[SubmodelElement] {
        match self {
            Self::SubmodelElementCollection(collection) => &collection.value,
            Self::Entity(entity) => &entity.statements,
            _ => &[],
        }
    }
}

/// Find an element by id-short.
#[must_use]
pub fn find_by_id_short<'a>(
    elements: &'a [SubmodelElement],
    id_short: &str,
) -> Option<&'a SubmodelElement> {
    elements.iter().find(|e| e.id_short() == id_short)
}

/// Append `element` to a namespace, rejecting a second element with the same
/// id-short.
///
/// # Errors
/// Returns `DuplicateIdShort` naming `container` if the id-short is taken.
pub fn insert_unique(
    elements: &mut Vec<SubmodelElement>,
    element: SubmodelElement,
    container: &str,
) -> Result<()> {
    if find_by_id_short(elements, element.id_short()).is_some() {
        return Err(DecodeError::DuplicateIdShort {
            id_short: element.id_short().to_string(),
            container: container.to_string(),
        });
    }
    elements.push(element);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelingKind;

    fn capability(id_short: &str) -> SubmodelElement {
        SubmodelElement::Capability(Capability {
            attributes: ElementAttributes::new(id_short, ModelingKind::Instance),
        })
    }

    fn collection(ordered: bool, ids: &[&str]) -> SubmodelElementCollection {
        SubmodelElementCollection {
            attributes: ElementAttributes::new("Group", ModelingKind::Instance),
            ordered,
            value: ids.iter().map(|id| capability(id)).collect(),
        }
    }

    #[test]
    fn test_insert_unique_rejects_duplicate() {
        let mut elements = Vec::new();
        insert_unique(&mut elements, capability("A"), "Submodel").unwrap();
        insert_unique(&mut elements, capability("B"), "Submodel").unwrap();

        let err = insert_unique(&mut elements, capability("A"), "Submodel").unwrap_err();
        assert!(matches!(err, DecodeError::DuplicateIdShort { ref id_short, .. } if id_short == "A"));
        assert_eq!(elements.len(), 2);
    }

    #[test]
    fn test_unordered_collection_ignores_order() {
        assert_eq!(collection(false, &["A", "B"]), collection(false, &["B", "A"]));
        assert_ne!(collection(false, &["A", "B"]), collection(false, &["A", "C"]));
    }

    #[test]
    fn test_ordered_collection_respects_order() {
        assert_ne!(collection(true, &["A", "B"]), collection(true, &["B", "A"]));
        assert_eq!(collection(true, &["A", "B"]), collection(true, &["A", "B"]));
    }

    #[test]
    fn test_children_and_type_name() {
        let element = SubmodelElement::SubmodelElementCollection(collection(true, &["A"]));
        assert_eq!(element.type_name(), "SubmodelElementCollection");
        assert_eq!(element.children().len(), 1);
        assert!(capability("A").children().is_empty());
    }
}
