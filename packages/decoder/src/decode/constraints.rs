//! Qualifier and formula constructors.

use roxmltree::Node;

use super::amend::amend_capabilities;
use super::context::DecodeContext;
use super::extract::{child, child_text_mandatory, child_text_mandatory_mapped, child_typed_value};
use super::failsafe::{construct_multiple, failsafe_construct};
use super::references::REFERENCE;
use crate::error::Result;
use crate::model::{DataTypeDef, Formula, Qualifier};
use crate::xml::{aas, find_children};

pub(super) fn construct_qualifier(
    node: Node<'_, '_>,
    ctx: &mut DecodeContext<'_>,
) -> Result<Qualifier> {
    let qualifier_type = child_text_mandatory(node, aas("type"))?.to_string();
    let value_type: DataTypeDef = child_text_mandatory_mapped(node, aas("valueType"))?;
    let mut qualifier = Qualifier {
        qualifier_type,
        value_type,
        value: child_typed_value(node, aas("value"), value_type)?,
        value_id: failsafe_construct(child(node, aas("valueId")), &REFERENCE, ctx)?,
        semantic_id: None,
    };
    amend_capabilities(&mut qualifier, node, ctx)?;
    Ok(qualifier)
}

pub(super) fn construct_formula(node: Node<'_, '_>, ctx: &mut DecodeContext<'_>) -> Result<Formula> {
    let depends_on = match child(node, aas("dependsOnRefs")) {
        Some(refs) => construct_multiple(find_children(refs, aas("reference")), &REFERENCE, ctx)?,
        None => Vec::new(),
    };
    Ok(Formula { depends_on })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::sink::CollectingSink;
    use crate::error::DecodeError;
    use crate::model::XsdValue;
    use roxmltree::Document;

    const NS: &str = r#"xmlns:aas="http://www.admin-shell.io/aas/2/0""#;

    #[test]
    fn test_qualifier() {
        let xml = format!(
            r#"<aas:qualifier {NS}>
                <aas:type>ExpressionSemantic</aas:type>
                <aas:valueType>int</aas:valueType>
                <aas:value>42</aas:value>
                <aas:semanticId><aas:keys><aas:key type="GlobalReference" local="false" idType="IRI">urn:q</aas:key></aas:keys></aas:semanticId>
            </aas:qualifier>"#
        );
        let doc = Document::parse(&xml).unwrap();

        let mut sink = CollectingSink::new();
        let mut ctx = DecodeContext::new(true, &mut sink);
        let qualifier = construct_qualifier(doc.root_element(), &mut ctx).unwrap();

        assert_eq!(qualifier.qualifier_type, "ExpressionSemantic");
        assert_eq!(qualifier.value_type, DataTypeDef::Int);
        assert_eq!(qualifier.value, Some(XsdValue::Integer(42)));
        assert!(qualifier.value_id.is_none());
        assert!(qualifier.semantic_id.is_some());
    }

    #[test]
    fn test_qualifier_value_out_of_range() {
        let xml = format!(
            r#"<aas:qualifier {NS}><aas:type>t</aas:type><aas:valueType>xs:byte</aas:valueType><aas:value>1000</aas:value></aas:qualifier>"#
        );
        let doc = Document::parse(&xml).unwrap();

        let mut sink = CollectingSink::new();
        let mut ctx = DecodeContext::new(false, &mut sink);
        let err = construct_qualifier(doc.root_element(), &mut ctx).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidValue { .. }));
    }

    #[test]
    fn test_formula_depends_on() {
        let xml = format!(
            r#"<aas:formula {NS}><aas:dependsOnRefs>
                <aas:reference><aas:keys><aas:key type="Property" local="true" idType="IdShort">A</aas:key></aas:keys></aas:reference>
                <aas:reference><aas:keys/></aas:reference>
            </aas:dependsOnRefs></aas:formula>"#
        );
        let doc = Document::parse(&xml).unwrap();

        let mut sink = CollectingSink::new();
        let mut ctx = DecodeContext::new(true, &mut sink);
        let formula = construct_formula(doc.root_element(), &mut ctx).unwrap();
        assert_eq!(formula.depends_on.len(), 2);
    }
}
