//! XML utilities for namespace-qualified navigation of `roxmltree` trees.

mod utils;

pub use utils::{
    aas, abac, element_children, find_child, find_children, get_tag_name, has_tag, iec,
    qualified_tag, QName,
};
