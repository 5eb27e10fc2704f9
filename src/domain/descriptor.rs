//! Tag type descriptors
//!
//! A `TagType` is the declared shape of a tag type: its accessors with their
//! defaults and alias declarations, an optional single-parent extends link, an
//! optional composed-of member list, and any meta-tags attached to the tag
//! type declaration itself. Descriptors are built fluently and are immutable
//! once registered.

use crate::domain::instance::RawTag;
use crate::domain::value::AttrValue;
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Identity of a declared tag type. Cheap to clone; equality is exact on the
/// declared name, which the registry keeps unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TagTypeId(Arc<str>);

impl TagTypeId {
    pub fn new(name: impl AsRef<str>) -> Self {
        TagTypeId(Arc::from(name.as_ref()))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TagTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TagTypeId {
    fn from(name: &str) -> Self {
        TagTypeId::new(name)
    }
}

impl From<&TagTypeId> for TagTypeId {
    fn from(id: &TagTypeId) -> Self {
        id.clone()
    }
}

/// Where an alias declaration points
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AliasTarget {
    /// Unqualified alias, resolved by search order on the owning instance
    Unqualified,
    /// Alias into a specific tag type (a composite member or an ancestor)
    Type(TagTypeId),
}

/// A named redirection of one accessor to another
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasDecl {
    pub target: AliasTarget,
    pub alias_of: String,
}

/// One accessor of a tag type: a name, an optional declared default, and an
/// optional alias declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accessor {
    name: String,
    default: Option<AttrValue>,
    alias: Option<AliasDecl>,
}

impl Accessor {
    pub fn new(name: impl Into<String>) -> Self {
        Accessor {
            name: name.into(),
            default: None,
            alias: None,
        }
    }

    /// Declare a default value for this accessor.
    pub fn with_default(mut self, value: impl Into<AttrValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Declare this accessor as an unqualified alias of another accessor name.
    pub fn aliased_to(mut self, alias_of: impl Into<String>) -> Self {
        self.alias = Some(AliasDecl {
            target: AliasTarget::Unqualified,
            alias_of: alias_of.into(),
        });
        self
    }

    /// Declare this accessor as an alias into a specific tag type's accessor.
    pub fn aliased_to_member(
        mut self,
        member: impl Into<TagTypeId>,
        alias_of: impl Into<String>,
    ) -> Self {
        self.alias = Some(AliasDecl {
            target: AliasTarget::Type(member.into()),
            alias_of: alias_of.into(),
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default_value(&self) -> Option<&AttrValue> {
        self.default.as_ref()
    }

    pub fn alias(&self) -> Option<&AliasDecl> {
        self.alias.as_ref()
    }
}

/// The declared shape of a tag type
#[derive(Debug, Clone)]
pub struct TagType {
    id: TagTypeId,
    accessors: IndexMap<String, Accessor>,
    extends: Option<TagTypeId>,
    composed_of: Option<Vec<TagTypeId>>,
    extends_declared_first: bool,
    attached: Vec<Arc<RawTag>>,
}

impl TagType {
    /// Start declaring a tag type with the given name.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagcast::domain::descriptor::{Accessor, TagType};
    /// use tagcast::domain::value::AttrValue;
    ///
    /// let route = TagType::named("Route")
    ///     .accessor(Accessor::new("method").with_default(AttrValue::symbol("GET")))
    ///     .accessor(Accessor::new("path").with_default(""));
    /// assert_eq!(route.id().name(), "Route");
    /// assert!(route.accessor_named("path").is_some());
    /// ```
    pub fn named(name: impl AsRef<str>) -> Self {
        TagType {
            id: TagTypeId::new(name),
            accessors: IndexMap::new(),
            extends: None,
            composed_of: None,
            extends_declared_first: false,
            attached: Vec::new(),
        }
    }

    /// Declare an accessor. Declaration order is preserved.
    pub fn accessor(mut self, accessor: Accessor) -> Self {
        self.accessors.insert(accessor.name.clone(), accessor);
        self
    }

    /// Declare the single-parent extends link.
    pub fn extends(mut self, parent: impl Into<TagTypeId>) -> Self {
        if self.composed_of.is_none() {
            self.extends_declared_first = true;
        }
        self.extends = Some(parent.into());
        self
    }

    /// Declare this type as composed of the given member types, in order.
    pub fn composed_of<I, T>(mut self, members: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TagTypeId>,
    {
        if self.extends.is_none() {
            self.extends_declared_first = false;
        }
        self.composed_of = Some(members.into_iter().map(Into::into).collect());
        self
    }

    /// Attach a meta-tag to this tag type declaration itself.
    pub fn attach(mut self, raw: RawTag) -> Self {
        self.attached.push(Arc::new(raw));
        self
    }

    pub fn id(&self) -> &TagTypeId {
        &self.id
    }

    pub fn extends_link(&self) -> Option<&TagTypeId> {
        self.extends.as_ref()
    }

    pub fn composition_members(&self) -> Option<&[TagTypeId]> {
        self.composed_of.as_deref()
    }

    /// Whether the extends link was declared before the composed-of list.
    /// Only meaningful when both relationships are present; drives the
    /// placement of the original instance during composite expansion.
    pub fn extends_declared_first(&self) -> bool {
        self.extends_declared_first
    }

    /// Meta-tags attached to this tag type declaration, in declaration order.
    pub fn attached_tags(&self) -> &[Arc<RawTag>] {
        &self.attached
    }

    /// Accessors in declaration order.
    pub fn accessors(&self) -> impl Iterator<Item = &Accessor> {
        self.accessors.values()
    }

    pub fn accessor_named(&self, name: &str) -> Option<&Accessor> {
        self.accessors.get(name)
    }
}
