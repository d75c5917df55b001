//! Constructors for keys, references, identifiers and the small value types.

use roxmltree::Node;

use super::context::DecodeContext;
use super::extract::{
    attr_mandatory, attr_mandatory_mapped, child, child_mandatory, parse_bool, text_mandatory,
    text_or_none,
};
use super::failsafe::{construct_multiple, Constructor};
use crate::error::Result;
use crate::model::{
    AasReference, AdministrativeInformation, Identifier, Key, LangStringSet, Reference,
    ReferenceTarget, XmlEnum,
};
use crate::xml::{aas, find_children, iec};

pub static KEY: Constructor<Key> = Constructor::new("Key", construct_key);
pub static REFERENCE: Constructor<Reference> = Constructor::new("Reference", construct_reference);
pub static IDENTIFIER: Constructor<Identifier> = Constructor::new("Identifier", construct_identifier);
pub static LANG_STRING_SET: Constructor<LangStringSet> =
    Constructor::new("LangStringSet", construct_lang_string_set);
pub static ADMINISTRATIVE_INFORMATION: Constructor<AdministrativeInformation> =
    Constructor::new("AdministrativeInformation", construct_administrative_information);

pub static SUBMODEL_REFERENCE: Constructor<AasReference> =
    Constructor::new("SubmodelReference", construct_submodel_reference);
pub static ASSET_REFERENCE: Constructor<AasReference> =
    Constructor::new("AssetReference", construct_asset_reference);
pub static ASSET_ADMINISTRATION_SHELL_REFERENCE: Constructor<AasReference> = Constructor::new(
    "AssetAdministrationShellReference",
    construct_asset_administration_shell_reference,
);
pub static REFERABLE_REFERENCE: Constructor<AasReference> =
    Constructor::new("ReferableReference", construct_referable_reference);
pub static CONCEPT_DESCRIPTION_REFERENCE: Constructor<AasReference> = Constructor::new(
    "ConceptDescriptionReference",
    construct_concept_description_reference,
);
pub static DATA_ELEMENT_REFERENCE: Constructor<AasReference> =
    Constructor::new("DataElementReference", construct_data_element_reference);

fn construct_key(node: Node<'_, '_>, _ctx: &mut DecodeContext<'_>) -> Result<Key> {
    Ok(Key {
        key_type: attr_mandatory_mapped(node, "type")?,
        local: parse_bool(attr_mandatory(node, "local")?),
        value: text_mandatory(node)?.to_string(),
        id_type: attr_mandatory_mapped(node, "idType")?,
    })
}

/// Keys of the mandatory `keys` child. An empty key list is valid.
fn construct_keys(node: Node<'_, '_>, ctx: &mut DecodeContext<'_>) -> Result<Vec<Key>> {
    let keys = child_mandatory(node, aas("keys"))?;
    construct_multiple(find_children(keys, aas("key")), &KEY, ctx)
}

fn construct_reference(node: Node<'_, '_>, ctx: &mut DecodeContext<'_>) -> Result<Reference> {
    Ok(Reference::new(construct_keys(node, ctx)?))
}

/// Build a reference tagged with `target`, warning if the last key names a
/// kind that cannot be such a target.
fn construct_aas_reference(
    node: Node<'_, '_>,
    ctx: &mut DecodeContext<'_>,
    target: ReferenceTarget,
) -> Result<AasReference> {
    let reference = AasReference::new(construct_keys(node, ctx)?, target);
    if let Some(last) = reference.reference.last_key() {
        if !last.key_type.refers_to(target) {
            ctx.warn(format!(
                "Type {} of last key of reference to {} does not match reference type {}",
                last.key_type.as_xml_str(),
                reference.reference,
                target.as_str()
            ));
        }
    }
    Ok(reference)
}

fn construct_submodel_reference(
    node: Node<'_, '_>,
    ctx: &mut DecodeContext<'_>,
) -> Result<AasReference> {
    construct_aas_reference(node, ctx, ReferenceTarget::Submodel)
}

fn construct_asset_reference(
    node: Node<'_, '_>,
    ctx: &mut DecodeContext<'_>,
) -> Result<AasReference> {
    construct_aas_reference(node, ctx, ReferenceTarget::Asset)
}

fn construct_asset_administration_shell_reference(
    node: Node<'_, '_>,
    ctx: &mut DecodeContext<'_>,
) -> Result<AasReference> {
    construct_aas_reference(node, ctx, ReferenceTarget::AssetAdministrationShell)
}

fn construct_referable_reference(
    node: Node<'_, '_>,
    ctx: &mut DecodeContext<'_>,
) -> Result<AasReference> {
    construct_aas_reference(node, ctx, ReferenceTarget::Referable)
}

fn construct_concept_description_reference(
    node: Node<'_, '_>,
    ctx: &mut DecodeContext<'_>,
) -> Result<AasReference> {
    construct_aas_reference(node, ctx, ReferenceTarget::ConceptDescription)
}

fn construct_data_element_reference(
    node: Node<'_, '_>,
    ctx: &mut DecodeContext<'_>,
) -> Result<AasReference> {
    construct_aas_reference(node, ctx, ReferenceTarget::DataElement)
}

fn construct_identifier(node: Node<'_, '_>, _ctx: &mut DecodeContext<'_>) -> Result<Identifier> {
    Ok(Identifier::new(
        text_mandatory(node)?,
        attr_mandatory_mapped(node, "idType")?,
    ))
}

/// Language strings keyed by `lang`; a repeated language overwrites the
/// earlier text.
fn construct_lang_string_set(
    node: Node<'_, '_>,
    _ctx: &mut DecodeContext<'_>,
) -> Result<LangStringSet> {
    let mut set = LangStringSet::new();
    for lang_string in find_children(node, iec("langString")) {
        let lang = attr_mandatory(lang_string, "lang")?;
        set.insert(lang.to_string(), text_mandatory(lang_string)?.to_string());
    }
    Ok(set)
}

fn construct_administrative_information(
    node: Node<'_, '_>,
    _ctx: &mut DecodeContext<'_>,
) -> Result<AdministrativeInformation> {
    Ok(AdministrativeInformation {
        version: text_or_none(child(node, aas("version"))).map(str::to_string),
        revision: text_or_none(child(node, aas("revision"))).map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::failsafe::failsafe_construct;
    use crate::decode::sink::CollectingSink;
    use crate::error::DecodeError;
    use crate::model::{IdentifierType, KeyElements, KeyType};
    use roxmltree::Document;

    const NS: &str = r#"xmlns:aas="http://www.admin-shell.io/aas/2/0" xmlns:IEC="http://www.admin-shell.io/IEC61360/2/0""#;

    fn reference_xml(keys: &str) -> String {
        format!(r#"<aas:assetRef {NS}><aas:keys>{keys}</aas:keys></aas:assetRef>"#)
    }

    #[test]
    fn test_key_fields() {
        let xml = reference_xml(
            r#"<aas:key type="Asset" local="True" idType="IRI">urn:example:asset:1</aas:key>"#,
        );
        let doc = Document::parse(&xml).unwrap();

        let mut sink = CollectingSink::new();
        let mut ctx = DecodeContext::new(true, &mut sink);
        let reference = REFERENCE.build(doc.root_element(), &mut ctx).unwrap();

        assert_eq!(
            reference.keys,
            vec![Key {
                key_type: KeyElements::Asset,
                local: true,
                value: "urn:example:asset:1".to_string(),
                id_type: KeyType::Iri,
            }]
        );
    }

    #[test]
    fn test_reference_requires_keys_child() {
        let xml = format!(r#"<aas:semanticId {NS}/>"#);
        let doc = Document::parse(&xml).unwrap();

        let mut sink = CollectingSink::new();
        let mut ctx = DecodeContext::new(false, &mut sink);
        let err = REFERENCE.build(doc.root_element(), &mut ctx).unwrap_err();
        assert!(matches!(err, DecodeError::MissingChild { .. }));
    }

    #[test]
    fn test_lenient_reference_drops_broken_key() {
        let xml = reference_xml(
            r#"<aas:key type="Asset" local="false" idType="IRI">urn:a</aas:key>
               <aas:key type="Nonsense" local="false" idType="IRI">urn:b</aas:key>"#,
        );
        let doc = Document::parse(&xml).unwrap();

        let mut sink = CollectingSink::new();
        let mut ctx = DecodeContext::new(false, &mut sink);
        let reference = REFERENCE.build(doc.root_element(), &mut ctx).unwrap();
        assert_eq!(reference.keys.len(), 1);
        assert_eq!(sink.errors().count(), 2);
    }

    #[test]
    fn test_typed_reference_mismatch_only_warns() {
        let xml = reference_xml(
            r#"<aas:key type="Submodel" local="true" idType="IRI">urn:sm</aas:key>"#,
        );
        let doc = Document::parse(&xml).unwrap();

        let mut sink = CollectingSink::new();
        let mut ctx = DecodeContext::new(true, &mut sink);
        let reference = ASSET_REFERENCE.build(doc.root_element(), &mut ctx).unwrap();
        assert_eq!(reference.target, ReferenceTarget::Asset);

        let warnings: Vec<_> = sink.warnings().collect();
        assert_eq!(warnings.len(), 1);
        assert_eq!(
            warnings[0].message,
            "Type Submodel of last key of reference to IRI=urn:sm does not match reference type Asset"
        );
    }

    #[test]
    fn test_empty_typed_reference_is_silent() {
        let xml = reference_xml("");
        let doc = Document::parse(&xml).unwrap();

        let mut sink = CollectingSink::new();
        let mut ctx = DecodeContext::new(true, &mut sink);
        let reference = SUBMODEL_REFERENCE.build(doc.root_element(), &mut ctx).unwrap();
        assert!(reference.keys().is_empty());
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn test_identifier() {
        let xml = format!(r#"<aas:identification {NS} idType="IRDI">0173-1#01-AAA#001</aas:identification>"#);
        let doc = Document::parse(&xml).unwrap();

        let mut sink = CollectingSink::new();
        let mut ctx = DecodeContext::new(true, &mut sink);
        let id = IDENTIFIER.build(doc.root_element(), &mut ctx).unwrap();
        assert_eq!(id, Identifier::new("0173-1#01-AAA#001", IdentifierType::Irdi));
    }

    #[test]
    fn test_identifier_missing_id_type_trace() {
        let xml = format!(r#"<aas:identification {NS}>urn:x</aas:identification>"#);
        let doc = Document::parse(&xml).unwrap();

        let mut sink = CollectingSink::new();
        let mut ctx = DecodeContext::new(true, &mut sink);
        let err = failsafe_construct(Some(doc.root_element()), &IDENTIFIER, &mut ctx).unwrap_err();
        assert_eq!(
            err.render_trace(),
            "MissingAttribute: XML element {http://www.admin-shell.io/aas/2/0}identification has no attribute with name idType!\n \
             -> while converting XML element with tag {http://www.admin-shell.io/aas/2/0}identification to type Identifier"
        );
    }

    #[test]
    fn test_lang_string_set_last_wins() {
        let xml = format!(
            r#"<aas:description {NS}><IEC:langString lang="en">one</IEC:langString><IEC:langString lang="de">eins</IEC:langString><IEC:langString lang="en">two</IEC:langString></aas:description>"#
        );
        let doc = Document::parse(&xml).unwrap();

        let mut sink = CollectingSink::new();
        let mut ctx = DecodeContext::new(true, &mut sink);
        let set = LANG_STRING_SET.build(doc.root_element(), &mut ctx).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set["en"], "two");
    }

    #[test]
    fn test_administrative_information_optional_fields() {
        let xml = format!(r#"<aas:administration {NS}><aas:version>0.9</aas:version></aas:administration>"#);
        let doc = Document::parse(&xml).unwrap();

        let mut sink = CollectingSink::new();
        let mut ctx = DecodeContext::new(true, &mut sink);
        let info = ADMINISTRATIVE_INFORMATION.build(doc.root_element(), &mut ctx).unwrap();
        assert_eq!(info.version.as_deref(), Some("0.9"));
        assert_eq!(info.revision, None);
    }
}
