//! XML utility functions for navigating and extracting data from DOM trees.

use std::fmt;

use roxmltree::Node;

use crate::config::{NS_AAS, NS_ABAC, NS_IEC};

/// A namespace-qualified tag name.
///
/// Displays in the `{namespace}local` notation used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QName {
    /// Namespace URI.
    pub namespace: &'static str,
    /// Local name.
    pub local: &'static str,
}

impl QName {
    /// Create a qualified name.
    #[must_use]
    pub const fn new(namespace: &'static str, local: &'static str) -> Self {
        Self { namespace, local }
    }

    /// Check whether `node` is an element with this name.
    #[must_use]
    pub fn matches(&self, node: Node<'_, '_>) -> bool {
        let tag = node.tag_name();
        node.is_element() && tag.name() == self.local && tag.namespace() == Some(self.namespace)
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}{}", self.namespace, self.local)
    }
}

/// Tag in the AAS namespace.
#[must_use]
pub const fn aas(local: &'static str) -> QName {
    QName::new(NS_AAS, local)
}

/// Tag in the IEC 61360 namespace.
#[must_use]
pub const fn iec(local: &'static str) -> QName {
    QName::new(NS_IEC, local)
}

/// Tag in the ABAC (security) namespace.
#[must_use]
pub const fn abac(local: &'static str) -> QName {
    QName::new(NS_ABAC, local)
}

/// Get the tag name without namespace prefix.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use aas_xml_decoder::xml::get_tag_name;
///
/// let xml = r#"<aas:submodel xmlns:aas="http://www.admin-shell.io/aas/2/0"/>"#;
/// let doc = Document::parse(xml).unwrap();
/// assert_eq!(get_tag_name(doc.root_element()), "submodel");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Render the tag of a node as `{namespace}local`, or just `local` when the
/// element is not namespaced.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use aas_xml_decoder::xml::qualified_tag;
///
/// let xml = r#"<aas:asset xmlns:aas="http://www.admin-shell.io/aas/2/0"/>"#;
/// let doc = Document::parse(xml).unwrap();
/// assert_eq!(
///     qualified_tag(doc.root_element()),
///     "{http://www.admin-shell.io/aas/2/0}asset"
/// );
/// ```
pub fn qualified_tag(node: Node<'_, '_>) -> String {
    let tag = node.tag_name();
    match tag.namespace() {
        Some(namespace) => format!("{{{namespace}}}{}", tag.name()),
        None => tag.name().to_string(),
    }
}

/// Find the first child element with the given qualified name.
pub fn find_child<'a, 'input>(node: Node<'a, 'input>, tag: QName) -> Option<Node<'a, 'input>> {
    node.children().find(|child| tag.matches(*child))
}

/// Find all child elements with the given qualified name, in document order.
pub fn find_children<'a, 'input>(
    node: Node<'a, 'input>,
    tag: QName,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(move |child| tag.matches(*child))
}

/// Check if a node has a specific qualified name.
pub fn has_tag(node: Node<'_, '_>, tag: QName) -> bool {
    tag.matches(node)
}

/// Get all element children of a node.
///
/// Excludes text nodes, comments and processing instructions.
pub fn element_children<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|child| child.is_element())
}
