//! Hierarchy resolution along extends links

use crate::domain::descriptor::TagTypeId;
use crate::domain::registry::TagRegistry;
use crate::error::{Result, TagCastError};
use indexmap::IndexSet;

/// Walk the extends links of a tag type, producing its ordered ancestor chain
/// (the type itself first, then each parent in turn).
///
/// Fails with `CircularHierarchy` the instant a type is revisited, naming that
/// type. The walk ends at a type with no extends link.
pub fn ancestor_chain(registry: &TagRegistry, start: &TagTypeId) -> Result<IndexSet<TagTypeId>> {
    let mut chain = IndexSet::new();
    let mut current = Some(start.clone());
    while let Some(id) = current {
        if !chain.insert(id.clone()) {
            return Err(TagCastError::CircularHierarchy(id));
        }
        current = registry.get(&id)?.extends_link().cloned();
    }
    Ok(chain)
}
