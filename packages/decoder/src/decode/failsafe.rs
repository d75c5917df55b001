//! The failsafe construction wrapper.
//!
//! This is the only place where construction errors are intercepted. A
//! recoverable error passing a wrapper boundary gains one conversion frame;
//! in strict mode it then keeps propagating, in lenient mode the full causal
//! trace is written to the sink and the subtree is dropped.

use roxmltree::Node;

use super::context::DecodeContext;
use super::extract::child_mandatory;
use crate::error::{DecodeError, Result};
use crate::xml::{qualified_tag, QName};

/// Signature shared by every node constructor.
pub type BuildFn<T> = fn(Node<'_, '_>, &mut DecodeContext<'_>) -> Result<T>;

/// A named node constructor.
///
/// `type_name` is used in conversion frames and in the lenient-mode summary
/// line. Dispatching constructors may resolve a more specific name from the
/// node itself.
pub struct Constructor<T> {
    type_name: &'static str,
    build: BuildFn<T>,
    resolve: Option<fn(Node<'_, '_>) -> Option<&'static str>>,
}

impl<T> Constructor<T> {
    pub const fn new(type_name: &'static str, build: BuildFn<T>) -> Self {
        Self {
            type_name,
            build,
            resolve: None,
        }
    }

    /// A constructor whose frames name the concrete variant selected by
    /// `resolve`, falling back to `type_name` for unknown tags.
    pub const fn dispatching(
        type_name: &'static str,
        build: BuildFn<T>,
        resolve: fn(Node<'_, '_>) -> Option<&'static str>,
    ) -> Self {
        Self {
            type_name,
            build,
            resolve: Some(resolve),
        }
    }

    /// Type name reported for `node`.
    #[must_use]
    pub fn type_name_for(&self, node: Node<'_, '_>) -> &'static str {
        self.resolve
            .and_then(|resolve| resolve(node))
            .unwrap_or(self.type_name)
    }

    /// Invoke the constructor without any error interception.
    pub fn build(&self, node: Node<'_, '_>, ctx: &mut DecodeContext<'_>) -> Result<T> {
        (self.build)(node, ctx)
    }
}

/// Construct an optional node.
///
/// An absent node yields `Ok(None)` without invoking the constructor. A
/// recoverable failure is re-raised with an added frame in strict mode, or
/// logged as a causal trace plus `Failed to construct <Type>!` in lenient
/// mode, yielding `Ok(None)`. Non-recoverable errors always propagate.
pub fn failsafe_construct<T>(
    node: Option<Node<'_, '_>>,
    constructor: &Constructor<T>,
    ctx: &mut DecodeContext<'_>,
) -> Result<Option<T>> {
    let Some(node) = node else {
        return Ok(None);
    };
    match constructor.build(node, ctx) {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_recoverable() => {
            let type_name = constructor.type_name_for(node);
            let err = err.within(qualified_tag(node), type_name);
            if ctx.is_strict() {
                return Err(err);
            }
            ctx.error(err.render_trace());
            ctx.error(format!("Failed to construct {type_name}!"));
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

/// Construct a structurally required node, always in strict mode.
///
/// # Errors
/// Any construction failure, with its frame. An absent result is an
/// `Internal` error.
pub fn construct_mandatory<T>(
    node: Node<'_, '_>,
    constructor: &Constructor<T>,
    ctx: &mut DecodeContext<'_>,
) -> Result<T> {
    ctx.strictly(|ctx| failsafe_construct(Some(node), constructor, ctx))?
        .ok_or_else(|| {
            DecodeError::Internal(format!(
                "strict construction of {} returned no value",
                constructor.type_name_for(node)
            ))
        })
}

/// Construct every node in order, skipping lenient-mode failures.
///
/// Survivors keep their relative input order. In strict mode the first
/// failure aborts the whole sequence.
pub fn construct_multiple<'a, 'input, T>(
    nodes: impl IntoIterator<Item = Node<'a, 'input>>,
    constructor: &Constructor<T>,
    ctx: &mut DecodeContext<'_>,
) -> Result<Vec<T>>
where
    'input: 'a,
{
    let mut constructed = Vec::new();
    for node in nodes {
        if let Some(value) = failsafe_construct(Some(node), constructor, ctx)? {
            constructed.push(value);
        }
    }
    Ok(constructed)
}

/// Construct the mandatory child `tag` of `parent`.
pub fn child_construct_mandatory<T>(
    parent: Node<'_, '_>,
    tag: QName,
    constructor: &Constructor<T>,
    ctx: &mut DecodeContext<'_>,
) -> Result<T> {
    construct_mandatory(child_mandatory(parent, tag)?, constructor, ctx)
}
