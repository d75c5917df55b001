//! Field extraction primitives.
//!
//! Each function has one failure contract: the `*_mandatory` variants fail
//! with a structural error when the field is absent, the `*_mapped` variants
//! additionally fail with `InvalidValue` when the raw text is not a member of
//! the target enumeration. The optional variants never fail.

use roxmltree::Node;

use crate::error::{DecodeError, Result};
use crate::model::{DataTypeDef, XmlEnum, XsdValue};
use crate::xml::{find_child, qualified_tag, QName};

/// Optional child by qualified tag.
pub fn child<'a, 'input>(parent: Node<'a, 'input>, tag: QName) -> Option<Node<'a, 'input>> {
    find_child(parent, tag)
}

/// Mandatory child by qualified tag.
///
/// # Errors
/// `MissingChild` if `parent` has no such child.
pub fn child_mandatory<'a, 'input>(
    parent: Node<'a, 'input>,
    tag: QName,
) -> Result<Node<'a, 'input>> {
    find_child(parent, tag).ok_or_else(|| DecodeError::MissingChild {
        parent: qualified_tag(parent),
        child: tag.to_string(),
    })
}

/// Mandatory attribute value.
///
/// # Errors
/// `MissingAttribute` if the attribute is absent.
pub fn attr_mandatory<'a>(node: Node<'a, '_>, name: &str) -> Result<&'a str> {
    node.attribute(name)
        .ok_or_else(|| DecodeError::MissingAttribute {
            element: qualified_tag(node),
            attribute: name.to_string(),
        })
}

/// Mandatory attribute mapped to an enumeration.
///
/// # Errors
/// `MissingAttribute` if absent, `InvalidValue` if not a member of `T`.
pub fn attr_mandatory_mapped<T: XmlEnum>(node: Node<'_, '_>, name: &str) -> Result<T> {
    let raw = attr_mandatory(node, name)?;
    T::from_xml(raw).ok_or_else(|| DecodeError::InvalidValue {
        element: qualified_tag(node),
        field: format!("attribute {name}"),
        value: raw.to_string(),
    })
}

/// Text of an optional node. Absent if the node is absent or has no text.
pub fn text_or_none<'a>(node: Option<Node<'a, '_>>) -> Option<&'a str> {
    node.and_then(|n| n.text())
}

/// Mandatory text of a node.
///
/// # Errors
/// `EmptyElement` if the node has no text.
pub fn text_mandatory<'a>(node: Node<'a, '_>) -> Result<&'a str> {
    node.text().ok_or_else(|| DecodeError::EmptyElement {
        element: qualified_tag(node),
    })
}

/// Mandatory text mapped to an enumeration.
///
/// # Errors
/// `EmptyElement` if there is no text, `InvalidValue` if not a member of `T`.
pub fn text_mandatory_mapped<T: XmlEnum>(node: Node<'_, '_>) -> Result<T> {
    let raw = text_mandatory(node)?;
    T::from_xml(raw).ok_or_else(|| DecodeError::InvalidValue {
        element: qualified_tag(node),
        field: "text".to_string(),
        value: raw.to_string(),
    })
}

/// Text of an optional child.
pub fn child_text<'a>(parent: Node<'a, '_>, tag: QName) -> Option<&'a str> {
    text_or_none(find_child(parent, tag))
}

/// Mandatory text of a mandatory child.
pub fn child_text_mandatory<'a>(parent: Node<'a, '_>, tag: QName) -> Result<&'a str> {
    text_mandatory(child_mandatory(parent, tag)?)
}

/// Mandatory text of a mandatory child, mapped to an enumeration.
pub fn child_text_mandatory_mapped<T: XmlEnum>(parent: Node<'_, '_>, tag: QName) -> Result<T> {
    text_mandatory_mapped(child_mandatory(parent, tag)?)
}

/// Interpret a boolean flag: `true` in any letter case is true, anything else
/// is false.
#[must_use]
pub fn parse_bool(text: &str) -> bool {
    text.trim().eq_ignore_ascii_case("true")
}

/// Parse the text of an optional child as a value of `value_type`.
///
/// # Errors
/// `InvalidValue` if the text is present but not a valid literal.
pub fn child_typed_value(
    parent: Node<'_, '_>,
    tag: QName,
    value_type: DataTypeDef,
) -> Result<Option<XsdValue>> {
    let Some(node) = find_child(parent, tag) else {
        return Ok(None);
    };
    let Some(text) = node.text() else {
        return Ok(None);
    };
    XsdValue::parse(text, value_type)
        .map(Some)
        .ok_or_else(|| DecodeError::InvalidValue {
            element: qualified_tag(node),
            field: format!("{} value", value_type.as_xml_str()),
            value: text.to_string(),
        })
}
