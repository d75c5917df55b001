//! Tag-to-constructor dispatch for the three polymorphic positions of the
//! format: submodel elements, constraints and top-level identifiables.
//!
//! Each table is a closed enum; adding a variant without a tag, type name or
//! constructor fails to compile.

use roxmltree::Node;

use super::constraints::{construct_formula, construct_qualifier};
use super::context::DecodeContext;
use super::elements::{
    construct_annotated_relationship_element, construct_basic_event, construct_blob,
    construct_capability, construct_entity, construct_file, construct_multi_language_property,
    construct_operation, construct_property, construct_range, construct_reference_element,
    construct_relationship_element, construct_submodel_element_collection,
};
use super::failsafe::Constructor;
use super::identifiables::{
    construct_asset, construct_asset_administration_shell, construct_concept_description,
    construct_submodel,
};
use crate::config::{LIST_SUFFIX, NS_AAS};
use crate::error::{DecodeError, Result};
use crate::model::{Constraint, Identifiable, SubmodelElement};
use crate::xml::{aas, qualified_tag, QName};

pub static SUBMODEL_ELEMENT: Constructor<SubmodelElement> = Constructor::dispatching(
    "SubmodelElement",
    construct_submodel_element,
    SubmodelElementKind::resolve_type_name,
);

pub static CONSTRAINT: Constructor<Constraint> = Constructor::dispatching(
    "Constraint",
    construct_constraint,
    ConstraintKind::resolve_type_name,
);

pub static IDENTIFIABLE: Constructor<Identifiable> = Constructor::dispatching(
    "Identifiable",
    construct_identifiable,
    IdentifiableKind::resolve_type_name,
);

/// Local name of an element in the AAS namespace.
fn aas_local_name<'a>(node: Node<'a, '_>) -> Option<&'a str> {
    let tag = node.tag_name();
    (node.is_element() && tag.namespace() == Some(NS_AAS)).then(|| tag.name())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmodelElementKind {
    AnnotatedRelationshipElement,
    BasicEvent,
    Blob,
    Capability,
    Entity,
    File,
    MultiLanguageProperty,
    Operation,
    Property,
    Range,
    ReferenceElement,
    RelationshipElement,
    SubmodelElementCollection,
}

impl SubmodelElementKind {
    pub const ALL: [Self; 13] = [
        Self::AnnotatedRelationshipElement,
        Self::BasicEvent,
        Self::Blob,
        Self::Capability,
        Self::Entity,
        Self::File,
        Self::MultiLanguageProperty,
        Self::Operation,
        Self::Property,
        Self::Range,
        Self::ReferenceElement,
        Self::RelationshipElement,
        Self::SubmodelElementCollection,
    ];

    #[must_use]
    pub fn tag(self) -> QName {
        aas(match self {
            Self::AnnotatedRelationshipElement => "annotatedRelationshipElement",
            Self::BasicEvent => "basicEvent",
            Self::Blob => "blob",
            Self::Capability => "capability",
            Self::Entity => "entity",
            Self::File => "file",
            Self::MultiLanguageProperty => "multiLanguageProperty",
            Self::Operation => "operation",
            Self::Property => "property",
            Self::Range => "range",
            Self::ReferenceElement => "referenceElement",
            Self::RelationshipElement => "relationshipElement",
            Self::SubmodelElementCollection => "submodelElementCollection",
        })
    }

    #[must_use]
    pub fn type_name(self) -> &'static str {
        match self {
            Self::AnnotatedRelationshipElement => "AnnotatedRelationshipElement",
            Self::BasicEvent => "BasicEvent",
            Self::Blob => "Blob",
            Self::Capability => "Capability",
            Self::Entity => "Entity",
            Self::File => "File",
            Self::MultiLanguageProperty => "MultiLanguageProperty",
            Self::Operation => "Operation",
            Self::Property => "Property",
            Self::Range => "Range",
            Self::ReferenceElement => "ReferenceElement",
            Self::RelationshipElement => "RelationshipElement",
            Self::SubmodelElementCollection => "SubmodelElementCollection",
        }
    }

    #[must_use]
    pub fn from_node(node: Node<'_, '_>) -> Option<Self> {
        let local = aas_local_name(node)?;
        Self::ALL.into_iter().find(|kind| kind.tag().local == local)
    }

    fn resolve_type_name(node: Node<'_, '_>) -> Option<&'static str> {
        Self::from_node(node).map(Self::type_name)
    }

    fn construct(self, node: Node<'_, '_>, ctx: &mut DecodeContext<'_>) -> Result<SubmodelElement> {
        use SubmodelElement as E;

        match self {
            Self::AnnotatedRelationshipElement => {
                construct_annotated_relationship_element(node, ctx).map(E::AnnotatedRelationshipElement)
            }
            Self::BasicEvent => construct_basic_event(node, ctx).map(E::BasicEvent),
            Self::Blob => construct_blob(node, ctx).map(E::Blob),
            Self::Capability => construct_capability(node, ctx).map(E::Capability),
            Self::Entity => construct_entity(node, ctx).map(E::Entity),
            Self::File => construct_file(node, ctx).map(E::File),
            Self::MultiLanguageProperty => {
                construct_multi_language_property(node, ctx).map(E::MultiLanguageProperty)
            }
            Self::Operation => construct_operation(node, ctx).map(E::Operation),
            Self::Property => construct_property(node, ctx).map(E::Property),
            Self::Range => construct_range(node, ctx).map(E::Range),
            Self::ReferenceElement => construct_reference_element(node, ctx).map(E::ReferenceElement),
            Self::RelationshipElement => {
                construct_relationship_element(node, ctx).map(E::RelationshipElement)
            }
            Self::SubmodelElementCollection => {
                construct_submodel_element_collection(node, ctx).map(E::SubmodelElementCollection)
            }
        }
    }
}

fn construct_submodel_element(
    node: Node<'_, '_>,
    ctx: &mut DecodeContext<'_>,
) -> Result<SubmodelElement> {
    let kind = SubmodelElementKind::from_node(node).ok_or_else(|| DecodeError::UnknownVariant {
        element: qualified_tag(node),
        expected: "submodel element",
    })?;
    kind.construct(node, ctx)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    Formula,
    Qualifier,
}

impl ConstraintKind {
    #[must_use]
    pub fn from_node(node: Node<'_, '_>) -> Option<Self> {
        match aas_local_name(node)? {
            "formula" => Some(Self::Formula),
            "qualifier" => Some(Self::Qualifier),
            _ => None,
        }
    }

    #[must_use]
    pub fn type_name(self) -> &'static str {
        match self {
            Self::Formula => "Formula",
            Self::Qualifier => "Qualifier",
        }
    }

    fn resolve_type_name(node: Node<'_, '_>) -> Option<&'static str> {
        Self::from_node(node).map(Self::type_name)
    }
}

fn construct_constraint(node: Node<'_, '_>, ctx: &mut DecodeContext<'_>) -> Result<Constraint> {
    match ConstraintKind::from_node(node) {
        Some(ConstraintKind::Formula) => construct_formula(node, ctx).map(Constraint::Formula),
        Some(ConstraintKind::Qualifier) => construct_qualifier(node, ctx).map(Constraint::Qualifier),
        None => Err(DecodeError::UnknownVariant {
            element: qualified_tag(node),
            expected: "constraint",
        }),
    }
}

/// Kind of a top-level entity and of the root-level list holding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifiableKind {
    AssetAdministrationShell,
    Asset,
    Submodel,
    ConceptDescription,
}

impl IdentifiableKind {
    pub const ALL: [Self; 4] = [
        Self::AssetAdministrationShell,
        Self::Asset,
        Self::Submodel,
        Self::ConceptDescription,
    ];

    #[must_use]
    pub fn tag(self) -> QName {
        aas(match self {
            Self::AssetAdministrationShell => "assetAdministrationShell",
            Self::Asset => "asset",
            Self::Submodel => "submodel",
            Self::ConceptDescription => "conceptDescription",
        })
    }

    #[must_use]
    pub fn type_name(self) -> &'static str {
        match self {
            Self::AssetAdministrationShell => "AssetAdministrationShell",
            Self::Asset => "Asset",
            Self::Submodel => "Submodel",
            Self::ConceptDescription => "ConceptDescription",
        }
    }

    fn from_local(local: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag().local == local)
    }

    #[must_use]
    pub fn from_node(node: Node<'_, '_>) -> Option<Self> {
        Self::from_local(aas_local_name(node)?)
    }

    /// The kind whose plural tag names `list`, e.g. `submodels`.
    #[must_use]
    pub fn from_list_node(list: Node<'_, '_>) -> Option<Self> {
        let singular = aas_local_name(list)?.strip_suffix(LIST_SUFFIX)?;
        Self::from_local(singular)
    }

    fn resolve_type_name(node: Node<'_, '_>) -> Option<&'static str> {
        Self::from_node(node).map(Self::type_name)
    }
}

fn construct_identifiable(node: Node<'_, '_>, ctx: &mut DecodeContext<'_>) -> Result<Identifiable> {
    match IdentifiableKind::from_node(node) {
        Some(IdentifiableKind::AssetAdministrationShell) => {
            construct_asset_administration_shell(node, ctx).map(Identifiable::AssetAdministrationShell)
        }
        Some(IdentifiableKind::Asset) => construct_asset(node, ctx).map(Identifiable::Asset),
        Some(IdentifiableKind::Submodel) => construct_submodel(node, ctx).map(Identifiable::Submodel),
        Some(IdentifiableKind::ConceptDescription) => {
            construct_concept_description(node, ctx).map(Identifiable::ConceptDescription)
        }
        None => Err(DecodeError::UnknownVariant {
            element: qualified_tag(node),
            expected: "identifiable",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::failsafe::failsafe_construct;
    use crate::decode::sink::CollectingSink;
    use roxmltree::Document;

    #[test]
    fn test_every_element_kind_resolves_from_its_tag() {
        for kind in SubmodelElementKind::ALL {
            let xml = format!(
                r#"<aas:{} xmlns:aas="http://www.admin-shell.io/aas/2/0"/>"#,
                kind.tag().local
            );
            let doc = Document::parse(&xml).unwrap();
            assert_eq!(SubmodelElementKind::from_node(doc.root_element()), Some(kind));
        }
    }

    #[test]
    fn test_wrong_namespace_is_unknown() {
        let doc = Document::parse(r#"<x:property xmlns:x="urn:other"/>"#).unwrap();
        assert_eq!(SubmodelElementKind::from_node(doc.root_element()), None);

        let mut sink = CollectingSink::new();
        let mut ctx = DecodeContext::new(true, &mut sink);
        let err = failsafe_construct(Some(doc.root_element()), &SUBMODEL_ELEMENT, &mut ctx).unwrap_err();
        assert_eq!(
            err.render_trace(),
            "UnknownVariant: XML element {urn:other}property is not a valid submodel element!\n \
             -> while converting XML element with tag {urn:other}property to type SubmodelElement"
        );
    }

    #[test]
    fn test_frame_names_concrete_variant() {
        let xml = r#"<aas:property xmlns:aas="http://www.admin-shell.io/aas/2/0"><aas:idShort>T</aas:idShort><aas:valueType>notAType</aas:valueType></aas:property>"#;
        let doc = Document::parse(xml).unwrap();

        let mut sink = CollectingSink::new();
        let mut ctx = DecodeContext::new(true, &mut sink);
        let err = failsafe_construct(Some(doc.root_element()), &SUBMODEL_ELEMENT, &mut ctx).unwrap_err();
        assert_eq!(err.frames().next().map(|(_, t)| t), Some("Property"));
        assert_eq!(err.kind_name(), "InvalidValue");
    }

    #[test]
    fn test_constraint_dispatch() {
        let xml = r#"<aas:qualifiers xmlns:aas="http://www.admin-shell.io/aas/2/0"><aas:formula/><aas:other/></aas:qualifiers>"#;
        let doc = Document::parse(xml).unwrap();
        let children: Vec<_> = doc.root_element().children().filter(|n| n.is_element()).collect();

        assert_eq!(ConstraintKind::from_node(children[0]), Some(ConstraintKind::Formula));
        let mut sink = CollectingSink::new();
        let mut ctx = DecodeContext::new(true, &mut sink);
        assert!(matches!(
            construct_constraint(children[1], &mut ctx),
            Err(DecodeError::UnknownVariant { expected: "constraint", .. })
        ));
    }

    #[test]
    fn test_list_tags() {
        let xml = r#"<aas:aasenv xmlns:aas="http://www.admin-shell.io/aas/2/0"><aas:submodels/><aas:assets/><aas:submodel/><aas:views/></aas:aasenv>"#;
        let doc = Document::parse(xml).unwrap();
        let lists: Vec<_> = doc.root_element().children().filter(|n| n.is_element()).collect();

        assert_eq!(IdentifiableKind::from_list_node(lists[0]), Some(IdentifiableKind::Submodel));
        assert_eq!(IdentifiableKind::from_list_node(lists[1]), Some(IdentifiableKind::Asset));
        assert_eq!(IdentifiableKind::from_list_node(lists[2]), None);
        assert_eq!(IdentifiableKind::from_list_node(lists[3]), None);
    }
}
