//! Raw and synthesized tag instances
//!
//! A `RawTag` is a tag as physically attached to a declaration. A
//! `CompositeMember` is synthesized by the composite expander: one per member
//! type of a composite tag, resolving its accessors against the originating
//! composite instance. `TagInstance` is the sum of the two and is what the
//! expander produces and the view synthesizer consumes.

use crate::domain::alias;
use crate::domain::descriptor::{AliasTarget, TagType, TagTypeId};
use crate::domain::registry::TagRegistry;
use crate::domain::value::AttrValue;
use crate::error::{Result, TagCastError};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A raw tag instance: a tag type attached with explicitly supplied values.
///
/// Only the supplied values are stored; everything else resolves through the
/// type's declared defaults at invocation time. Equality and hash cover the
/// type and the supplied values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RawTag {
    type_id: TagTypeId,
    values: Vec<(String, AttrValue)>,
}

impl RawTag {
    pub fn new(type_id: impl Into<TagTypeId>) -> Self {
        RawTag {
            type_id: type_id.into(),
            values: Vec::new(),
        }
    }

    /// Supply an explicit value for an accessor.
    pub fn with(mut self, accessor: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.values.push((accessor.into(), value.into()));
        self
    }

    pub fn type_id(&self) -> &TagTypeId {
        &self.type_id
    }

    /// The explicitly supplied value for an accessor, if any.
    pub fn supplied(&self, accessor: &str) -> Option<&AttrValue> {
        self.values
            .iter()
            .find(|(name, _)| name == accessor)
            .map(|(_, value)| value)
    }

    /// Invoke an accessor on this instance.
    ///
    /// Resolution order: the explicitly supplied value, then the value reached
    /// through the accessor's unqualified alias declaration (followed
    /// transitively, with revisit protection), then the accessor's own
    /// declared default. Qualified aliases never reroute raw invocation; they
    /// only participate in composite member resolution.
    pub fn invoke(&self, registry: &TagRegistry, accessor: &str) -> Result<AttrValue> {
        let ty = registry.get(&self.type_id)?;
        let mut visited: Vec<&str> = Vec::new();
        self.invoke_inner(ty, accessor, &mut visited)
    }

    fn invoke_inner<'a>(
        &'a self,
        ty: &'a TagType,
        accessor: &'a str,
        visited: &mut Vec<&'a str>,
    ) -> Result<AttrValue> {
        if let Some(value) = self.supplied(accessor) {
            return Ok(value.clone());
        }
        let declared = ty.accessor_named(accessor).ok_or_else(|| {
            TagCastError::AttributeNotFound {
                accessor: accessor.to_string(),
                on: self.type_id.clone(),
                target: self.type_id.clone(),
            }
        })?;
        if let Some(decl) = declared.alias() {
            if decl.target == AliasTarget::Unqualified && !visited.contains(&accessor) {
                visited.push(accessor);
                if let Ok(value) = self.invoke_inner(ty, &decl.alias_of, visited) {
                    return Ok(value);
                }
            }
        }
        declared
            .default_value()
            .cloned()
            .ok_or_else(|| TagCastError::AttributeNotFound {
                accessor: accessor.to_string(),
                on: self.type_id.clone(),
                target: self.type_id.clone(),
            })
    }
}

impl fmt::Display for RawTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}(", self.type_id)?;
        for (i, (name, value)) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} = {}", name, value)?;
        }
        write!(f, ")")
    }
}

/// A synthesized per-member instance of a composite tag.
///
/// Accessors resolve against the originating composite instance through its
/// alias declarations, falling back to the member type's own defaults; each
/// resolution is memoized for the member's lifetime. Failure to resolve is a
/// hard `CompositionResolution` error.
#[derive(Debug)]
pub struct CompositeMember {
    member_type: TagTypeId,
    source: Arc<RawTag>,
    resolved: RwLock<HashMap<String, AttrValue>>,
}

impl CompositeMember {
    pub(crate) fn new(member_type: TagTypeId, source: Arc<RawTag>) -> Self {
        CompositeMember {
            member_type,
            source,
            resolved: RwLock::new(HashMap::new()),
        }
    }

    /// The member type this instance was synthesized as.
    pub fn member_type(&self) -> &TagTypeId {
        &self.member_type
    }

    /// The composite instance this member was synthesized from.
    pub fn source(&self) -> &Arc<RawTag> {
        &self.source
    }

    /// Invoke an accessor of the member type on this instance.
    pub fn invoke(&self, registry: &TagRegistry, accessor: &str) -> Result<AttrValue> {
        if let Some(value) = self.resolved.read().get(accessor) {
            return Ok(value.clone());
        }
        let value = self.resolve(registry, accessor)?;
        self.resolved
            .write()
            .insert(accessor.to_string(), value.clone());
        Ok(value)
    }

    fn resolve(&self, registry: &TagRegistry, accessor: &str) -> Result<AttrValue> {
        let composite_ty = registry.get(self.source.type_id())?;
        let member_ty = registry.get(&self.member_type)?;

        if let Some(routed) = alias::direct_alias(composite_ty, &self.member_type, accessor)
            .or_else(|| alias::indirect_alias(composite_ty, member_ty, accessor))
        {
            return self.source.invoke(registry, routed.name());
        }

        if let Some(declared) = member_ty.accessor_named(accessor) {
            if let Some(default) = declared.default_value() {
                return Ok(default.clone());
            }
        }

        Err(TagCastError::CompositionResolution {
            accessor: accessor.to_string(),
            member: self.member_type.clone(),
            composite: self.source.to_string(),
        })
    }
}

impl fmt::Display for CompositeMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.member_type)
    }
}

impl PartialEq for CompositeMember {
    fn eq(&self, other: &Self) -> bool {
        self.member_type == other.member_type && self.source == other.source
    }
}

impl Eq for CompositeMember {}

impl Hash for CompositeMember {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.member_type.hash(state);
        self.source.hash(state);
    }
}

/// A tag as it participates in resolution: physically attached, or synthesized
/// from a composite member.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TagInstance {
    Raw(Arc<RawTag>),
    Member(Arc<CompositeMember>),
}

impl TagInstance {
    pub fn type_id(&self) -> &TagTypeId {
        match self {
            TagInstance::Raw(raw) => raw.type_id(),
            TagInstance::Member(member) => member.member_type(),
        }
    }

    /// Invoke an accessor with the semantics of the instance kind.
    pub fn invoke(&self, registry: &TagRegistry, accessor: &str) -> Result<AttrValue> {
        match self {
            TagInstance::Raw(raw) => raw.invoke(registry, accessor),
            TagInstance::Member(member) => member.invoke(registry, accessor),
        }
    }
}

impl fmt::Display for TagInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagInstance::Raw(raw) => write!(f, "{}", raw),
            TagInstance::Member(member) => write!(f, "{}", member),
        }
    }
}

impl From<Arc<RawTag>> for TagInstance {
    fn from(raw: Arc<RawTag>) -> Self {
        TagInstance::Raw(raw)
    }
}

impl From<RawTag> for TagInstance {
    fn from(raw: RawTag) -> Self {
        TagInstance::Raw(Arc::new(raw))
    }
}

/// Anything the query engine accepts where the platform would accept "a tag":
/// a `TagInstance`, a shared raw tag, or a synthesized view (unwrapped to its
/// underlying instance).
pub trait AsTagInstance {
    fn as_instance(&self) -> TagInstance;
}

impl AsTagInstance for TagInstance {
    fn as_instance(&self) -> TagInstance {
        self.clone()
    }
}

impl AsTagInstance for Arc<RawTag> {
    fn as_instance(&self) -> TagInstance {
        TagInstance::Raw(self.clone())
    }
}
