//! Identifier-keyed collection of decoded top-level entities.

use std::collections::BTreeMap;

use super::aas::{Asset, AssetAdministrationShell, ConceptDescription, Identifiable, Submodel};
use super::base::{Identifier, KeyType, Reference};
use super::submodel::{find_by_id_short, SubmodelElement};
use crate::error::{DecodeError, Result};

/// Collection of identifiables, unique by [`Identifier`].
///
/// Iteration order is the ordering of identifiers, which keeps reports and
/// comparisons deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectStore {
    objects: BTreeMap<Identifier, Identifiable>,
}

/// Target of a resolved reference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolved<'a> {
    Identifiable(&'a Identifiable),
    Element(&'a SubmodelElement),
}

impl ObjectStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an identifiable.
    ///
    /// # Errors
    /// Returns `DuplicateIdentifier` if an entity with the same identifier is
    /// already present. The stored entity is left untouched.
    pub fn add(&mut self, identifiable: Identifiable) -> Result<()> {
        let identifier = identifiable.identification().clone();
        if self.objects.contains_key(&identifier) {
            return Err(DecodeError::DuplicateIdentifier {
                identifier: identifier.to_string(),
            });
        }
        self.objects.insert(identifier, identifiable);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, identifier: &Identifier) -> Option<&Identifiable> {
        self.objects.get(identifier)
    }

    #[must_use]
    pub fn contains(&self, identifier: &Identifier) -> bool {
        self.objects.contains_key(identifier)
    }

    pub fn remove(&mut self, identifier: &Identifier) -> Option<Identifiable> {
        self.objects.remove(identifier)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Identifiable> {
        self.objects.values()
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &Identifier> {
        self.objects.keys()
    }

    pub fn shells(&self) -> impl Iterator<Item = &AssetAdministrationShell> {
        self.iter().filter_map(|object| match object {
            Identifiable::AssetAdministrationShell(shell) => Some(shell),
            _ => None,
        })
    }

    pub fn assets(&self) -> impl Iterator<Item = &Asset> {
        self.iter().filter_map(|object| match object {
            Identifiable::Asset(asset) => Some(asset),
            _ => None,
        })
    }

    pub fn submodels(&self) -> impl Iterator<Item = &Submodel> {
        self.iter().filter_map(|object| match object {
            Identifiable::Submodel(submodel) => Some(submodel),
            _ => None,
        })
    }

    pub fn concept_descriptions(&self) -> impl Iterator<Item = &ConceptDescription> {
        self.iter().filter_map(|object| match object {
            Identifiable::ConceptDescription(cd) => Some(cd),
            _ => None,
        })
    }

    /// Follow a reference to the entity it points at.
    ///
    /// The first key must address a stored identifiable by its global id.
    /// Every further key descends by id-short into submodel elements,
    /// collection values or entity statements.
    ///
    /// # Returns
    /// `None` if the reference is empty, the first key is not a global id, or
    /// any step has no match.
    #[must_use]
    pub fn resolve(&self, reference: &Reference) -> Option<Resolved<'_>> {
        let (first, rest) = reference.keys.split_first()?;
        let id_type = first.id_type.identifier_type()?;
        let root = self.get(&Identifier::new(first.value.clone(), id_type))?;

        let mut current = Resolved::Identifiable(root);
        for key in rest {
            if !matches!(key.id_type, KeyType::IdShort) {
                return None;
            }
            let children = match current {
                Resolved::Identifiable(identifiable) => identifiable.submodel_elements(),
                Resolved::Element(element) => element.children(),
            };
            current = Resolved::Element(find_by_id_short(children, &key.value)?);
        }
        Some(current)
    }
}

impl<'a> IntoIterator for &'a ObjectStore {
    type Item = &'a Identifiable;
    type IntoIter = std::collections::btree_map::Values<'a, Identifier, Identifiable>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        AssetKind, Capability, ElementAttributes, IdentifierType, Key, KeyElements, ModelingKind,
    };

    fn asset(id: &str) -> Identifiable {
        Identifiable::Asset(Asset {
            identification: Identifier::new(id, IdentifierType::Iri),
            kind: AssetKind::Instance,
            asset_identification_model: None,
            bill_of_material: None,
            referable: Default::default(),
            identifiable: Default::default(),
        })
    }

    fn submodel(id: &str, element: &str) -> Identifiable {
        Identifiable::Submodel(Submodel {
            identification: Identifier::new(id, IdentifierType::Iri),
            kind: ModelingKind::Instance,
            submodel_elements: vec![SubmodelElement::Capability(Capability {
                attributes: ElementAttributes::new(element, ModelingKind::Instance),
            })],
            referable: Default::default(),
            identifiable: Default::default(),
            semantic_id: None,
            qualifiers: Vec::new(),
        })
    }

    fn key(key_type: KeyElements, id_type: KeyType, value: &str) -> Key {
        Key {
            key_type,
            local: true,
            value: value.to_string(),
            id_type,
        }
    }

    #[test]
    fn test_add_rejects_duplicate_and_keeps_first() {
        let mut store = ObjectStore::new();
        store.add(asset("urn:a")).unwrap();
        store.add(submodel("urn:b", "X")).unwrap();

        let err = store.add(submodel("urn:a", "Y")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Identifiable with identifier IRI=urn:a is already present in the object store"
        );
        assert_eq!(store.len(), 2);
        let first = store.get(&Identifier::new("urn:a", IdentifierType::Iri)).unwrap();
        assert_eq!(first.type_name(), "Asset");
    }

    #[test]
    fn test_typed_iterators() {
        let mut store = ObjectStore::new();
        store.add(asset("urn:a")).unwrap();
        store.add(submodel("urn:b", "X")).unwrap();

        assert_eq!(store.assets().count(), 1);
        assert_eq!(store.submodels().count(), 1);
        assert_eq!(store.shells().count(), 0);
        assert_eq!((&store).into_iter().count(), 2);
    }

    #[test]
    fn test_resolve_descends_by_id_short() {
        let mut store = ObjectStore::new();
        store.add(submodel("urn:sm", "Temperature")).unwrap();

        let reference = Reference::new(vec![
            key(KeyElements::Submodel, KeyType::Iri, "urn:sm"),
            key(KeyElements::Capability, KeyType::IdShort, "Temperature"),
        ]);
        let Some(Resolved::Element(element)) = store.resolve(&reference) else {
            panic!("reference should resolve to an element");
        };
        assert_eq!(element.id_short(), "Temperature");

        let missing = Reference::new(vec![
            key(KeyElements::Submodel, KeyType::Iri, "urn:sm"),
            key(KeyElements::Capability, KeyType::IdShort, "Pressure"),
        ]);
        assert!(store.resolve(&missing).is_none());
        assert!(store.resolve(&Reference::default()).is_none());
    }

    #[test]
    fn test_resolve_identifiable() {
        let mut store = ObjectStore::new();
        store.add(asset("urn:a")).unwrap();

        let reference = Reference::new(vec![key(KeyElements::Asset, KeyType::Iri, "urn:a")]);
        assert!(matches!(
            store.resolve(&reference),
            Some(Resolved::Identifiable(Identifiable::Asset(_)))
        ));
    }
}
