//! View synthesis
//!
//! A `TagView` projects a tag instance onto a target tag type from its
//! ancestor chain, answering the target's accessors through a fixed search
//! order: the instance's own accessors, its alias declarations, meta-tags
//! attached along the ancestor chain, and finally the target's declared
//! defaults. Each accessor resolves once per view and is memoized.

use crate::domain::alias;
use crate::domain::descriptor::TagTypeId;
use crate::domain::hierarchy::ancestor_chain;
use crate::domain::instance::{AsTagInstance, RawTag, TagInstance};
use crate::domain::registry::TagRegistry;
use crate::domain::value::AttrValue;
use crate::error::{Result, TagCastError};
use indexmap::IndexSet;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Project an instance onto a target type.
///
/// Returns `None` when the instance's ancestor chain does not contain the
/// target. That is the normal "does not apply" outcome, never an error.
pub fn synthesize(
    registry: &Arc<TagRegistry>,
    instance: &TagInstance,
    target: &TagTypeId,
) -> Result<Option<Arc<TagView>>> {
    let chain = ancestor_chain(registry, instance.type_id())?;
    if !chain.contains(target) {
        return Ok(None);
    }
    Ok(Some(Arc::new(TagView {
        target: target.clone(),
        instance: instance.clone(),
        chain,
        registry: registry.clone(),
        memo: RwLock::new(HashMap::new()),
    })))
}

/// A synthesized, lazily resolved projection of a tag instance onto a target
/// tag type. Equality and hash delegate to the underlying instance, so views
/// over the same instance compare equal across target types and to the raw
/// instance itself.
#[derive(Debug)]
pub struct TagView {
    target: TagTypeId,
    instance: TagInstance,
    chain: IndexSet<TagTypeId>,
    registry: Arc<TagRegistry>,
    memo: RwLock<HashMap<String, AttrValue>>,
}

impl TagView {
    /// The target type this view answers for.
    pub fn target(&self) -> &TagTypeId {
        &self.target
    }

    /// The underlying instance's own type.
    pub fn type_id(&self) -> &TagTypeId {
        self.instance.type_id()
    }

    /// The underlying instance.
    pub fn instance(&self) -> &TagInstance {
        &self.instance
    }

    /// The underlying instance's ancestor chain.
    pub fn ancestor_chain(&self) -> &IndexSet<TagTypeId> {
        &self.chain
    }

    /// Resolve an accessor of the target type's contract.
    pub fn get(&self, accessor: &str) -> Result<AttrValue> {
        if let Some(value) = self.memo.read().get(accessor) {
            return Ok(value.clone());
        }
        let value = self.resolve(accessor)?;
        self.memo
            .write()
            .insert(accessor.to_string(), value.clone());
        Ok(value)
    }

    fn resolve(&self, accessor: &str) -> Result<AttrValue> {
        let registry = &self.registry;
        let own_ty = registry.get(self.instance.type_id())?;

        // 1. The instance's own type declares the accessor.
        if own_ty.accessor_named(accessor).is_some() {
            return self.instance.invoke(registry, accessor);
        }

        // 2. An alias on the instance's type supplies it for this target.
        if let Some(routed) = alias::view_alias(own_ty, &self.target, accessor) {
            return self.instance.invoke(registry, routed.name());
        }

        // 3. Walk the chain: an ancestor carrying an attached instance of
        // another chain member may supply the accessor. Within one ancestor
        // only the first chain-typed meta-tag is a candidate.
        for ancestor in &self.chain {
            let ancestor_ty = registry.get(ancestor)?;
            for attached in ancestor_ty.attached_tags() {
                if !self.chain.contains(attached.type_id()) {
                    continue;
                }
                let attached_ty = registry.get(attached.type_id())?;
                if attached_ty.accessor_named(accessor).is_some() {
                    return attached.invoke(registry, accessor);
                }
                break;
            }
        }

        // 4. The target type's own declared default.
        let target_ty = registry.get(&self.target)?;
        if let Some(default) = target_ty
            .accessor_named(accessor)
            .and_then(|declared| declared.default_value())
        {
            return Ok(default.clone());
        }

        Err(TagCastError::AttributeNotFound {
            accessor: accessor.to_string(),
            on: self.instance.type_id().clone(),
            target: self.target.clone(),
        })
    }
}

impl fmt::Display for TagView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.instance)
    }
}

impl PartialEq for TagView {
    fn eq(&self, other: &Self) -> bool {
        self.instance == other.instance
    }
}

impl Eq for TagView {}

impl PartialEq<RawTag> for TagView {
    fn eq(&self, other: &RawTag) -> bool {
        matches!(&self.instance, TagInstance::Raw(raw) if raw.as_ref() == other)
    }
}

impl Hash for TagView {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Hash the underlying tag directly, not the enum wrapper, so a view
        // hashes identically to the raw instance it projects.
        match &self.instance {
            TagInstance::Raw(raw) => raw.hash(state),
            TagInstance::Member(member) => member.hash(state),
        }
    }
}

impl AsTagInstance for TagView {
    fn as_instance(&self) -> TagInstance {
        self.instance.clone()
    }
}

impl AsTagInstance for Arc<TagView> {
    fn as_instance(&self) -> TagInstance {
        self.instance.clone()
    }
}
