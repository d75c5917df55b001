//! Constructors for the top-level identifiables and the views and concept
//! dictionaries nested in a shell.

use roxmltree::Node;

use super::amend::amend_capabilities;
use super::context::DecodeContext;
use super::elements::{construct_namespace, modeling_kind};
use super::extract::{child, child_mandatory, child_text_mandatory, child_text_mandatory_mapped};
use super::failsafe::{child_construct_mandatory, construct_multiple, failsafe_construct, Constructor};
use super::references::{
    ASSET_ADMINISTRATION_SHELL_REFERENCE, ASSET_REFERENCE, CONCEPT_DESCRIPTION_REFERENCE,
    IDENTIFIER, REFERABLE_REFERENCE, REFERENCE, SUBMODEL_REFERENCE,
};
use crate::error::Result;
use crate::model::{
    Asset, AssetAdministrationShell, ConceptDescription, ConceptDictionary, Security, Submodel,
    View,
};
use crate::xml::{aas, abac, find_children, QName};

pub static SECURITY: Constructor<Security> = Constructor::new("Security", construct_security);
pub static VIEW: Constructor<View> = Constructor::new("View", construct_view);
pub static CONCEPT_DICTIONARY: Constructor<ConceptDictionary> =
    Constructor::new("ConceptDictionary", construct_concept_dictionary);

/// Construct the `item` children of the optional `list` child of `node`.
fn optional_list<T>(
    node: Node<'_, '_>,
    list: QName,
    item: QName,
    constructor: &Constructor<T>,
    ctx: &mut DecodeContext<'_>,
) -> Result<Vec<T>> {
    match child(node, list) {
        Some(list) => construct_multiple(find_children(list, item), constructor, ctx),
        None => Ok(Vec::new()),
    }
}

/// Security content is not decoded.
fn construct_security(_node: Node<'_, '_>, _ctx: &mut DecodeContext<'_>) -> Result<Security> {
    Ok(Security)
}

fn construct_view(node: Node<'_, '_>, ctx: &mut DecodeContext<'_>) -> Result<View> {
    let mut view = View {
        id_short: child_text_mandatory(node, aas("idShort"))?.to_string(),
        contained_elements: optional_list(
            node,
            aas("containedElements"),
            aas("containedElementRef"),
            &REFERABLE_REFERENCE,
            ctx,
        )?,
        referable: Default::default(),
        semantic_id: None,
    };
    amend_capabilities(&mut view, node, ctx)?;
    Ok(view)
}

fn construct_concept_dictionary(
    node: Node<'_, '_>,
    ctx: &mut DecodeContext<'_>,
) -> Result<ConceptDictionary> {
    let mut dictionary = ConceptDictionary {
        id_short: child_text_mandatory(node, aas("idShort"))?.to_string(),
        concept_descriptions: optional_list(
            node,
            aas("conceptDescriptionRefs"),
            aas("conceptDescriptionRef"),
            &CONCEPT_DESCRIPTION_REFERENCE,
            ctx,
        )?,
        referable: Default::default(),
    };
    amend_capabilities(&mut dictionary, node, ctx)?;
    Ok(dictionary)
}

pub(super) fn construct_asset_administration_shell(
    node: Node<'_, '_>,
    ctx: &mut DecodeContext<'_>,
) -> Result<AssetAdministrationShell> {
    let asset = child_construct_mandatory(node, aas("assetRef"), &ASSET_REFERENCE, ctx)?;
    let identification = child_construct_mandatory(node, aas("identification"), &IDENTIFIER, ctx)?;
    let mut shell = AssetAdministrationShell {
        identification,
        asset,
        security: failsafe_construct(child(node, abac("security")), &SECURITY, ctx)?,
        submodels: optional_list(
            node,
            aas("submodelRefs"),
            aas("submodelRef"),
            &SUBMODEL_REFERENCE,
            ctx,
        )?,
        views: optional_list(node, aas("views"), aas("view"), &VIEW, ctx)?,
        concept_dictionaries: optional_list(
            node,
            aas("conceptDictionaries"),
            aas("conceptDictionary"),
            &CONCEPT_DICTIONARY,
            ctx,
        )?,
        derived_from: failsafe_construct(
            child(node, aas("derivedFrom")),
            &ASSET_ADMINISTRATION_SHELL_REFERENCE,
            ctx,
        )?,
        referable: Default::default(),
        identifiable: Default::default(),
    };
    amend_capabilities(&mut shell, node, ctx)?;
    Ok(shell)
}

pub(super) fn construct_asset(node: Node<'_, '_>, ctx: &mut DecodeContext<'_>) -> Result<Asset> {
    let kind = child_text_mandatory_mapped(node, aas("kind"))?;
    let identification = child_construct_mandatory(node, aas("identification"), &IDENTIFIER, ctx)?;
    let mut asset = Asset {
        identification,
        kind,
        asset_identification_model: failsafe_construct(
            child(node, aas("assetIdentificationModelRef")),
            &SUBMODEL_REFERENCE,
            ctx,
        )?,
        bill_of_material: failsafe_construct(
            child(node, aas("billOfMaterialRef")),
            &SUBMODEL_REFERENCE,
            ctx,
        )?,
        referable: Default::default(),
        identifiable: Default::default(),
    };
    amend_capabilities(&mut asset, node, ctx)?;
    Ok(asset)
}

pub(super) fn construct_submodel(
    node: Node<'_, '_>,
    ctx: &mut DecodeContext<'_>,
) -> Result<Submodel> {
    let identification = child_construct_mandatory(node, aas("identification"), &IDENTIFIER, ctx)?;
    let kind = modeling_kind(node)?;
    let container = format!("Submodel {identification}");
    let submodel_elements =
        construct_namespace(child_mandatory(node, aas("submodelElements"))?, &container, ctx)?;
    let mut submodel = Submodel {
        identification,
        kind,
        submodel_elements,
        referable: Default::default(),
        identifiable: Default::default(),
        semantic_id: None,
        qualifiers: Vec::new(),
    };
    amend_capabilities(&mut submodel, node, ctx)?;
    Ok(submodel)
}

pub(super) fn construct_concept_description(
    node: Node<'_, '_>,
    ctx: &mut DecodeContext<'_>,
) -> Result<ConceptDescription> {
    let identification = child_construct_mandatory(node, aas("identification"), &IDENTIFIER, ctx)?;
    let mut description = ConceptDescription {
        identification,
        is_case_of: construct_multiple(find_children(node, aas("isCaseOf")), &REFERENCE, ctx)?,
        referable: Default::default(),
        identifiable: Default::default(),
    };
    amend_capabilities(&mut description, node, ctx)?;
    Ok(description)
}
