//! Alias resolution
//!
//! Pure lookups over a descriptor's accessor table. Matching is exact-string
//! on accessor names and exact-identity on target types; there is no partial
//! or case-folded matching.

use crate::domain::descriptor::{Accessor, AliasTarget, TagType, TagTypeId};

/// Find an accessor on `composite` whose alias declaration directly targets
/// `member`'s accessor named `accessor`.
pub fn direct_alias<'a>(
    composite: &'a TagType,
    member: &TagTypeId,
    accessor: &str,
) -> Option<&'a Accessor> {
    composite.accessors().find(|candidate| {
        candidate.alias().is_some_and(|decl| {
            decl.target == AliasTarget::Type(member.clone()) && decl.alias_of == accessor
        })
    })
}

/// Find an accessor on `composite` that indirectly supplies `member`'s
/// accessor named `accessor`: the member accessor itself declares an
/// unqualified alias of some name, and a composite accessor targets that name
/// on the member type.
pub fn indirect_alias<'a>(
    composite: &'a TagType,
    member: &TagType,
    accessor: &str,
) -> Option<&'a Accessor> {
    let redirect = member.accessor_named(accessor)?.alias()?;
    if redirect.target != AliasTarget::Unqualified {
        return None;
    }
    composite.accessors().find(|candidate| {
        candidate.alias().is_some_and(|decl| {
            decl.target == AliasTarget::Type(member.id().clone())
                && decl.alias_of == redirect.alias_of
        })
    })
}

/// Find an accessor on `owner` whose alias declaration supplies `accessor`
/// for a view at `target`: the alias is unqualified or targets exactly the
/// requested type, and its declared name equals the requested accessor name.
pub fn view_alias<'a>(
    owner: &'a TagType,
    target: &TagTypeId,
    accessor: &str,
) -> Option<&'a Accessor> {
    owner.accessors().find(|candidate| {
        candidate.alias().is_some_and(|decl| {
            (decl.target == AliasTarget::Unqualified
                || decl.target == AliasTarget::Type(target.clone()))
                && decl.alias_of == accessor
        })
    })
}
