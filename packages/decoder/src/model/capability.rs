//! Cross-cutting attribute bundles and the capability accessors used by the
//! amendment step.
//!
//! An entity does not inherit from a fixed base type. Instead it embeds the
//! attribute bundles it supports and exposes them through [`Capabilities`];
//! every accessor defaults to `None`, so a type only declares what it carries.

use super::base::{
    AdministrativeInformation, Constraint, Formula, LangStringSet, ModelingKind, Qualifier,
    Reference,
};

/// Optional attributes of a referable entity.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReferableAttributes {
    pub category: Option<String>,
    pub description: Option<LangStringSet>,
}

/// Optional attributes of an identifiable entity.
///
/// The global identifier itself is mandatory and stored on the entity.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IdentifiableAttributes {
    pub id_short: Option<String>,
    pub administration: Option<AdministrativeInformation>,
}

/// Capability accessors queried independently by the amendment step.
pub trait Capabilities {
    /// Category and description.
    fn referable_mut(&mut self) -> Option<&mut ReferableAttributes> {
        None
    }

    /// Id-short and administrative information.
    fn identifiable_mut(&mut self) -> Option<&mut IdentifiableAttributes> {
        None
    }

    /// Semantic id slot.
    fn semantic_id_mut(&mut self) -> Option<&mut Option<Reference>> {
        None
    }

    /// Qualifier and formula constraints.
    fn qualifiers_mut(&mut self) -> Option<&mut Vec<Constraint>> {
        None
    }
}

/// Attributes shared by every submodel element.
///
/// Submodel elements are referable, have semantics, are qualifiable and carry
/// a modeling kind. Unlike identifiables, their id-short is mandatory.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementAttributes {
    pub id_short: String,
    pub kind: ModelingKind,
    pub referable: ReferableAttributes,
    pub semantic_id: Option<Reference>,
    pub qualifiers: Vec<Constraint>,
}

impl ElementAttributes {
    #[must_use]
    pub fn new(id_short: impl Into<String>, kind: ModelingKind) -> Self {
        Self {
            id_short: id_short.into(),
            kind,
            referable: ReferableAttributes::default(),
            semantic_id: None,
            qualifiers: Vec::new(),
        }
    }
}

impl Capabilities for ElementAttributes {
    fn referable_mut(&mut self) -> Option<&mut ReferableAttributes> {
        Some(&mut self.referable)
    }

    fn semantic_id_mut(&mut self) -> Option<&mut Option<Reference>> {
        Some(&mut self.semantic_id)
    }

    fn qualifiers_mut(&mut self) -> Option<&mut Vec<Constraint>> {
        Some(&mut self.qualifiers)
    }
}

impl Capabilities for Qualifier {
    fn semantic_id_mut(&mut self) -> Option<&mut Option<Reference>> {
        Some(&mut self.semantic_id)
    }
}

impl Capabilities for Formula {}

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain;
    impl Capabilities for Plain {}

    #[test]
    fn test_defaults_declare_nothing() {
        let mut plain = Plain;
        assert!(plain.referable_mut().is_none());
        assert!(plain.identifiable_mut().is_none());
        assert!(plain.semantic_id_mut().is_none());
        assert!(plain.qualifiers_mut().is_none());
    }

    #[test]
    fn test_element_attributes_capabilities() {
        let mut attributes = ElementAttributes::new("Temperature", ModelingKind::Instance);
        assert!(attributes.identifiable_mut().is_none());

        if let Some(referable) = attributes.referable_mut() {
            referable.category = Some("PARAMETER".to_string());
        }
        assert_eq!(attributes.referable.category.as_deref(), Some("PARAMETER"));
        assert!(attributes.qualifiers_mut().is_some());
    }
}
