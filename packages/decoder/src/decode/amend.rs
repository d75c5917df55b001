//! The capability amendment step.

use roxmltree::Node;

use super::context::DecodeContext;
use super::dispatch::CONSTRAINT;
use super::extract::{child, child_text};
use super::failsafe::{construct_multiple, failsafe_construct};
use super::references::{ADMINISTRATIVE_INFORMATION, LANG_STRING_SET, REFERENCE};
use crate::error::Result;
use crate::model::Capabilities;
use crate::xml::{aas, element_children};

/// Apply the optional cross-cutting fields for every capability `target`
/// declares.
///
/// Runs after the variant-specific fields have been extracted. Each nested
/// object goes through its own failsafe boundary, so in lenient mode a broken
/// description does not affect the semantic id.
pub fn amend_capabilities<T: Capabilities>(
    target: &mut T,
    node: Node<'_, '_>,
    ctx: &mut DecodeContext<'_>,
) -> Result<()> {
    if let Some(referable) = target.referable_mut() {
        if let Some(category) = child_text(node, aas("category")) {
            referable.category = Some(category.to_string());
        }
        if let Some(description) =
            failsafe_construct(child(node, aas("description")), &LANG_STRING_SET, ctx)?
        {
            referable.description = Some(description);
        }
    }

    if let Some(identifiable) = target.identifiable_mut() {
        if let Some(id_short) = child_text(node, aas("idShort")) {
            identifiable.id_short = Some(id_short.to_string());
        }
        if let Some(administration) = failsafe_construct(
            child(node, aas("administration")),
            &ADMINISTRATIVE_INFORMATION,
            ctx,
        )? {
            identifiable.administration = Some(administration);
        }
    }

    if let Some(semantic_id) = target.semantic_id_mut() {
        if let Some(reference) = failsafe_construct(child(node, aas("semanticId")), &REFERENCE, ctx)? {
            *semantic_id = Some(reference);
        }
    }

    if let Some(qualifiers) = target.qualifiers_mut() {
        if let Some(list) = child(node, aas("qualifiers")) {
            qualifiers.extend(construct_multiple(element_children(list), &CONSTRAINT, ctx)?);
        }
    }

    Ok(())
}
