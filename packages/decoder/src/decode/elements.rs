//! Constructors for the concrete submodel element kinds.

use roxmltree::Node;

use super::amend::amend_capabilities;
use super::context::DecodeContext;
use super::dispatch::SUBMODEL_ELEMENT;
use super::extract::{
    child, child_mandatory, child_text_mandatory, child_text_mandatory_mapped, child_typed_value,
    parse_bool, text_mandatory, text_mandatory_mapped,
};
use super::failsafe::{
    child_construct_mandatory, construct_mandatory, construct_multiple, failsafe_construct,
    Constructor,
};
use super::references::{
    ASSET_REFERENCE, DATA_ELEMENT_REFERENCE, LANG_STRING_SET, REFERABLE_REFERENCE, REFERENCE,
};
use crate::error::{DecodeError, Result};
use crate::model::{
    insert_unique, AnnotatedRelationshipElement, BasicEvent, Blob, Capability, DataTypeDef,
    ElementAttributes, Entity, File, ModelingKind, MultiLanguageProperty, Operation,
    OperationVariable, Property, Range, ReferenceElement, RelationshipElement, SubmodelElement,
    SubmodelElementCollection, XsdValue,
};
use crate::xml::{aas, element_children, find_children, qualified_tag};

pub static OPERATION_VARIABLE: Constructor<OperationVariable> =
    Constructor::new("OperationVariable", construct_operation_variable);

/// Optional `kind` child, defaulting to `Instance`.
pub(super) fn modeling_kind(node: Node<'_, '_>) -> Result<ModelingKind> {
    match child(node, aas("kind")) {
        Some(kind) => text_mandatory_mapped(kind),
        None => Ok(ModelingKind::default()),
    }
}

fn element_attributes(node: Node<'_, '_>) -> Result<ElementAttributes> {
    let id_short = child_text_mandatory(node, aas("idShort"))?;
    Ok(ElementAttributes::new(id_short, modeling_kind(node)?))
}

/// Construct every element child of `list` and add it to a namespace.
pub(super) fn construct_namespace(
    list: Node<'_, '_>,
    container: &str,
    ctx: &mut DecodeContext<'_>,
) -> Result<Vec<SubmodelElement>> {
    let mut elements = Vec::new();
    for element in construct_multiple(element_children(list), &SUBMODEL_ELEMENT, ctx)? {
        insert_unique(&mut elements, element, container)?;
    }
    Ok(elements)
}

pub(super) fn construct_property(node: Node<'_, '_>, ctx: &mut DecodeContext<'_>) -> Result<Property> {
    let attributes = element_attributes(node)?;
    let value_type: DataTypeDef = child_text_mandatory_mapped(node, aas("valueType"))?;
    let mut property = Property {
        attributes,
        value_type,
        value: child_typed_value(node, aas("value"), value_type)?,
        value_id: failsafe_construct(child(node, aas("valueId")), &REFERENCE, ctx)?,
    };
    amend_capabilities(&mut property, node, ctx)?;
    Ok(property)
}

pub(super) fn construct_range(node: Node<'_, '_>, ctx: &mut DecodeContext<'_>) -> Result<Range> {
    let attributes = element_attributes(node)?;
    let value_type: DataTypeDef = child_text_mandatory_mapped(node, aas("valueType"))?;
    let mut range = Range {
        attributes,
        value_type,
        min: child_typed_value(node, aas("min"), value_type)?,
        max: child_typed_value(node, aas("max"), value_type)?,
    };
    amend_capabilities(&mut range, node, ctx)?;
    Ok(range)
}

pub(super) fn construct_blob(node: Node<'_, '_>, ctx: &mut DecodeContext<'_>) -> Result<Blob> {
    let attributes = element_attributes(node)?;
    let mime_type = child_text_mandatory(node, aas("mimeType"))?.to_string();
    let value = match child(node, aas("value")) {
        Some(value) => {
            let text = text_mandatory(value)?;
            match XsdValue::parse(text, DataTypeDef::Base64Binary) {
                Some(XsdValue::Binary(bytes)) => Some(bytes),
                _ => {
                    return Err(DecodeError::InvalidValue {
                        element: qualified_tag(value),
                        field: "base64 content".to_string(),
                        value: text.to_string(),
                    })
                }
            }
        }
        None => None,
    };
    let mut blob = Blob {
        attributes,
        mime_type,
        value,
    };
    amend_capabilities(&mut blob, node, ctx)?;
    Ok(blob)
}

pub(super) fn construct_file(node: Node<'_, '_>, ctx: &mut DecodeContext<'_>) -> Result<File> {
    let attributes = element_attributes(node)?;
    let mime_type = child_text_mandatory(node, aas("mimeType"))?.to_string();
    let value = match child(node, aas("value")) {
        Some(value) => Some(text_mandatory(value)?.to_string()),
        None => None,
    };
    let mut file = File {
        attributes,
        mime_type,
        value,
    };
    amend_capabilities(&mut file, node, ctx)?;
    Ok(file)
}

pub(super) fn construct_multi_language_property(
    node: Node<'_, '_>,
    ctx: &mut DecodeContext<'_>,
) -> Result<MultiLanguageProperty> {
    let mut property = MultiLanguageProperty {
        attributes: element_attributes(node)?,
        value: failsafe_construct(child(node, aas("value")), &LANG_STRING_SET, ctx)?,
        value_id: failsafe_construct(child(node, aas("valueId")), &REFERENCE, ctx)?,
    };
    amend_capabilities(&mut property, node, ctx)?;
    Ok(property)
}

pub(super) fn construct_reference_element(
    node: Node<'_, '_>,
    ctx: &mut DecodeContext<'_>,
) -> Result<ReferenceElement> {
    let mut element = ReferenceElement {
        attributes: element_attributes(node)?,
        value: failsafe_construct(child(node, aas("value")), &REFERABLE_REFERENCE, ctx)?,
    };
    amend_capabilities(&mut element, node, ctx)?;
    Ok(element)
}

pub(super) fn construct_relationship_element(
    node: Node<'_, '_>,
    ctx: &mut DecodeContext<'_>,
) -> Result<RelationshipElement> {
    let mut element = RelationshipElement {
        attributes: element_attributes(node)?,
        first: child_construct_mandatory(node, aas("first"), &REFERABLE_REFERENCE, ctx)?,
        second: child_construct_mandatory(node, aas("second"), &REFERABLE_REFERENCE, ctx)?,
    };
    amend_capabilities(&mut element, node, ctx)?;
    Ok(element)
}

pub(super) fn construct_annotated_relationship_element(
    node: Node<'_, '_>,
    ctx: &mut DecodeContext<'_>,
) -> Result<AnnotatedRelationshipElement> {
    let attributes = element_attributes(node)?;
    let first = child_construct_mandatory(node, aas("first"), &REFERABLE_REFERENCE, ctx)?;
    let second = child_construct_mandatory(node, aas("second"), &REFERABLE_REFERENCE, ctx)?;
    let annotations = child_mandatory(node, aas("annotations"))?;
    let mut element = AnnotatedRelationshipElement {
        attributes,
        first,
        second,
        annotations: construct_multiple(
            find_children(annotations, aas("reference")),
            &DATA_ELEMENT_REFERENCE,
            ctx,
        )?,
    };
    amend_capabilities(&mut element, node, ctx)?;
    Ok(element)
}

/// Exactly one wrapped element is expected. None is an error; for more than
/// one, the first wins and a warning is emitted.
fn construct_operation_variable(
    node: Node<'_, '_>,
    ctx: &mut DecodeContext<'_>,
) -> Result<OperationVariable> {
    let value = child_mandatory(node, aas("value"))?;
    let mut wrapped = element_children(value);
    let first = wrapped.next().ok_or_else(|| DecodeError::MissingChild {
        parent: qualified_tag(value),
        child: "submodel element".to_string(),
    })?;
    if wrapped.next().is_some() {
        ctx.warn("Value of operation variable has more than one submodel element, using the first one...");
    }
    Ok(OperationVariable {
        value: Box::new(construct_mandatory(first, &SUBMODEL_ELEMENT, ctx)?),
    })
}

fn operation_variables(
    node: Node<'_, '_>,
    local: &'static str,
    ctx: &mut DecodeContext<'_>,
) -> Result<Vec<OperationVariable>> {
    match child(node, aas(local)) {
        Some(list) => construct_multiple(
            find_children(list, aas("operationVariable")),
            &OPERATION_VARIABLE,
            ctx,
        ),
        None => Ok(Vec::new()),
    }
}

pub(super) fn construct_operation(
    node: Node<'_, '_>,
    ctx: &mut DecodeContext<'_>,
) -> Result<Operation> {
    let attributes = element_attributes(node)?;
    let in_output_variables = operation_variables(node, "inoutputVariable", ctx)?;
    let input_variables = operation_variables(node, "inputVariable", ctx)?;
    let output_variables = operation_variables(node, "outputVariable", ctx)?;
    let mut operation = Operation {
        attributes,
        input_variables,
        output_variables,
        in_output_variables,
    };
    amend_capabilities(&mut operation, node, ctx)?;
    Ok(operation)
}

pub(super) fn construct_capability(
    node: Node<'_, '_>,
    ctx: &mut DecodeContext<'_>,
) -> Result<Capability> {
    let mut capability = Capability {
        attributes: element_attributes(node)?,
    };
    amend_capabilities(&mut capability, node, ctx)?;
    Ok(capability)
}

pub(super) fn construct_entity(node: Node<'_, '_>, ctx: &mut DecodeContext<'_>) -> Result<Entity> {
    let attributes = element_attributes(node)?;
    let entity_type = child_text_mandatory_mapped(node, aas("entityType"))?;
    let asset = failsafe_construct(child(node, aas("assetRef")), &ASSET_REFERENCE, ctx)?;
    let container = format!("Entity {}", attributes.id_short);
    let statements = construct_namespace(child_mandatory(node, aas("statements"))?, &container, ctx)?;
    let mut entity = Entity {
        attributes,
        entity_type,
        asset,
        statements,
    };
    amend_capabilities(&mut entity, node, ctx)?;
    Ok(entity)
}

pub(super) fn construct_basic_event(
    node: Node<'_, '_>,
    ctx: &mut DecodeContext<'_>,
) -> Result<BasicEvent> {
    let mut event = BasicEvent {
        attributes: element_attributes(node)?,
        observed: child_construct_mandatory(node, aas("observed"), &REFERABLE_REFERENCE, ctx)?,
    };
    amend_capabilities(&mut event, node, ctx)?;
    Ok(event)
}

pub(super) fn construct_submodel_element_collection(
    node: Node<'_, '_>,
    ctx: &mut DecodeContext<'_>,
) -> Result<SubmodelElementCollection> {
    let ordered = parse_bool(child_text_mandatory(node, aas("ordered"))?);
    let attributes = element_attributes(node)?;
    let container = format!("SubmodelElementCollection {}", attributes.id_short);
    let value = construct_namespace(child_mandatory(node, aas("value"))?, &container, ctx)?;
    let mut collection = SubmodelElementCollection {
        attributes,
        ordered,
        value,
    };
    amend_capabilities(&mut collection, node, ctx)?;
    Ok(collection)
}
