//! Top-level identifiable entities and the views and dictionaries nested in a
//! shell.

use super::base::{AasReference, AssetKind, Constraint, Identifier, ModelingKind, Reference};
use super::capability::{Capabilities, IdentifiableAttributes, ReferableAttributes};
use super::submodel::SubmodelElement;

/// Access control part of a shell. Its content is not decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Security;

/// A view selecting a subset of the shell's referables.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub id_short: String,
    pub contained_elements: Vec<AasReference>,
    pub referable: ReferableAttributes,
    pub semantic_id: Option<Reference>,
}

impl Capabilities for View {
    fn referable_mut(&mut self) -> Option<&mut ReferableAttributes> {
        Some(&mut self.referable)
    }

    fn semantic_id_mut(&mut self) -> Option<&mut Option<Reference>> {
        Some(&mut self.semantic_id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConceptDictionary {
    pub id_short: String,
    pub concept_descriptions: Vec<AasReference>,
    pub referable: ReferableAttributes,
}

impl Capabilities for ConceptDictionary {
    fn referable_mut(&mut self) -> Option<&mut ReferableAttributes> {
        Some(&mut self.referable)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssetAdministrationShell {
    pub identification: Identifier,
    pub asset: AasReference,
    pub security: Option<Security>,
    pub submodels: Vec<AasReference>,
    pub views: Vec<View>,
    pub concept_dictionaries: Vec<ConceptDictionary>,
    pub derived_from: Option<AasReference>,
    pub referable: ReferableAttributes,
    pub identifiable: IdentifiableAttributes,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Asset {
    pub identification: Identifier,
    pub kind: AssetKind,
    pub asset_identification_model: Option<AasReference>,
    pub bill_of_material: Option<AasReference>,
    pub referable: ReferableAttributes,
    pub identifiable: IdentifiableAttributes,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Submodel {
    pub identification: Identifier,
    pub kind: ModelingKind,
    pub submodel_elements: Vec<SubmodelElement>,
    pub referable: ReferableAttributes,
    pub identifiable: IdentifiableAttributes,
    pub semantic_id: Option<Reference>,
    pub qualifiers: Vec<Constraint>,
}

impl Capabilities for Submodel {
    fn referable_mut(&mut self) -> Option<&mut ReferableAttributes> {
        Some(&mut self.referable)
    }

    fn identifiable_mut(&mut self) -> Option<&mut IdentifiableAttributes> {
        Some(&mut self.identifiable)
    }

    fn semantic_id_mut(&mut self) -> Option<&mut Option<Reference>> {
        Some(&mut self.semantic_id)
    }

    fn qualifiers_mut(&mut self) -> Option<&mut Vec<Constraint>> {
        Some(&mut self.qualifiers)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConceptDescription {
    pub identification: Identifier,
    pub is_case_of: Vec<Reference>,
    pub referable: ReferableAttributes,
    pub identifiable: IdentifiableAttributes,
}

macro_rules! referable_identifiable {
    ($($ty:ident),+) => {
        $(
            impl Capabilities for $ty {
                fn referable_mut(&mut self) -> Option<&mut ReferableAttributes> {
                    Some(&mut self.referable)
                }

                fn identifiable_mut(&mut self) -> Option<&mut IdentifiableAttributes> {
                    Some(&mut self.identifiable)
                }
            }
        )+
    };
}

referable_identifiable!(AssetAdministrationShell, Asset, ConceptDescription);

/// A top-level entity with a global identifier.
#[derive(Debug, Clone, PartialEq)]
pub enum Identifiable {
    AssetAdministrationShell(AssetAdministrationShell),
    Asset(Asset),
    Submodel(Submodel),
    ConceptDescription(ConceptDescription),
}

impl Identifiable {
    #[must_use]
    pub fn identification(&self) -> &Identifier {
        match self {
            Self::AssetAdministrationShell(e) => &e.identification,
            Self::Asset(e) => &e.identification,
            Self::Submodel(e) => &e.identification,
            Self::ConceptDescription(e) => &e.identification,
        }
    }

    #[must_use]
    pub fn id_short(&self) -> Option<&str> {
        let identifiable = match self {
            Self::AssetAdministrationShell(e) => &e.identifiable,
            Self::Asset(e) => &e.identifiable,
            Self::Submodel(e) => &e.identifiable,
            Self::ConceptDescription(e) => &e.identifiable,
        };
        identifiable.id_short.as_deref()
    }

    /// Name of the concrete kind.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::AssetAdministrationShell(_) => "AssetAdministrationShell",
            Self::Asset(_) => "Asset",
            Self::Submodel(_) => "Submodel",
            Self::ConceptDescription(_) => "ConceptDescription",
        }
    }

    /// Elements of a submodel; empty for every other kind.
    #[must_use]
    pub fn submodel_elements(&self) -> &[SubmodelElement] {
        match self {
            Self::Submodel(submodel) => &submodel.submodel_elements,
            _ => &[],
        }
    }
}
