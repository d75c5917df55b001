//! Walk the root-level list groups and assemble the object store.

use roxmltree::Node;

use super::context::DecodeContext;
use super::dispatch::{IdentifiableKind, IDENTIFIABLE};
use super::failsafe::construct_multiple;
use crate::error::{DecodeError, Result};
use crate::model::ObjectStore;
use crate::xml::{element_children, qualified_tag};

/// Decode every list group below `root`.
///
/// A list group whose tag is not the plural of a top-level kind is skipped
/// with a warning in lenient mode. Elements inside a group that are not of the
/// group's kind are skipped the same way. A duplicate identifier is logged as
/// an error and the first entity is kept.
///
/// # Errors
/// In strict mode, the first structural error with its causal trace. In
/// lenient mode only non-recoverable errors (internal faults) surface.
pub fn decode_document(root: Node<'_, '_>, ctx: &mut DecodeContext<'_>) -> Result<ObjectStore> {
    let mut store = ObjectStore::new();

    for list in element_children(root) {
        let Some(kind) = IdentifiableKind::from_list_node(list) else {
            report(
                DecodeError::UnexpectedListTag {
                    tag: qualified_tag(list),
                },
                ctx,
            )?;
            continue;
        };
        tracing::debug!(list = %qualified_tag(list), "decoding list group");

        let mut members = Vec::new();
        for node in element_children(list) {
            if kind.tag().matches(node) {
                members.push(node);
            } else {
                report(
                    DecodeError::UnknownVariant {
                        element: qualified_tag(node),
                        expected: kind.type_name(),
                    },
                    ctx,
                )?;
            }
        }

        for identifiable in construct_multiple(members, &IDENTIFIABLE, ctx)? {
            if let Err(err) = store.add(identifiable) {
                if ctx.is_strict() {
                    return Err(err);
                }
                ctx.error(err.to_string());
            }
        }
    }

    Ok(store)
}

/// Fail in strict mode, warn and continue in lenient mode.
fn report(err: DecodeError, ctx: &mut DecodeContext<'_>) -> Result<()> {
    if ctx.is_strict() {
        return Err(err);
    }
    ctx.warn(err.to_string());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::sink::CollectingSink;
    use roxmltree::Document;

    const ASSET: &str = r#"<aas:asset><aas:identification idType="IRI">urn:asset</aas:identification><aas:kind>Type</aas:kind></aas:asset>"#;

    fn document(body: &str) -> String {
        format!(r#"<aas:aasenv xmlns:aas="http://www.admin-shell.io/aas/2/0">{body}</aas:aasenv>"#)
    }

    #[test]
    fn test_unexpected_list_tag() {
        let xml = document(&format!("<aas:things/><aas:assets>{ASSET}</aas:assets>"));
        let doc = Document::parse(&xml).unwrap();

        let mut sink = CollectingSink::new();
        let mut ctx = DecodeContext::new(false, &mut sink);
        let store = decode_document(doc.root_element(), &mut ctx).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(
            sink.warnings().next().map(|d| d.message.as_str()),
            Some("Unexpected top-level list {http://www.admin-shell.io/aas/2/0}things!")
        );

        let mut sink = CollectingSink::new();
        let mut ctx = DecodeContext::new(true, &mut sink);
        let err = decode_document(doc.root_element(), &mut ctx).unwrap_err();
        assert!(matches!(err, DecodeError::UnexpectedListTag { .. }));
    }

    #[test]
    fn test_foreign_member_in_list() {
        let xml = document(&format!("<aas:assets><aas:submodel/>{ASSET}</aas:assets>"));
        let doc = Document::parse(&xml).unwrap();

        let mut sink = CollectingSink::new();
        let mut ctx = DecodeContext::new(false, &mut sink);
        let store = decode_document(doc.root_element(), &mut ctx).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(sink.warnings().count(), 1);
    }

    #[test]
    fn test_duplicate_identifier_keeps_first() {
        let xml = document(&format!("<aas:assets>{ASSET}{ASSET}</aas:assets>"));
        let doc = Document::parse(&xml).unwrap();

        let mut sink = CollectingSink::new();
        let mut ctx = DecodeContext::new(false, &mut sink);
        let store = decode_document(doc.root_element(), &mut ctx).unwrap();
        assert_eq!(store.len(), 1);
        let errors: Vec<_> = sink.errors().collect();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("IRI=urn:asset"));
    }

    #[test]
    fn test_empty_document() {
        let xml = document("");
        let doc = Document::parse(&xml).unwrap();

        let mut sink = CollectingSink::new();
        let mut ctx = DecodeContext::new(true, &mut sink);
        assert!(decode_document(doc.root_element(), &mut ctx).unwrap().is_empty());
    }
}
