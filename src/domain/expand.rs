//! Composite tag expansion

use crate::domain::instance::{CompositeMember, RawTag, TagInstance};
use crate::domain::registry::TagRegistry;
use crate::error::Result;
use log::debug;
use std::sync::Arc;

/// Expand a raw tag instance into the instances that take part in resolution.
///
/// A non-composite tag expands to itself. A composite tag expands to one
/// synthesized member instance per declared member type, in declaration order.
/// If the composite type also carries an extends link, the untouched original
/// instance joins the result: before the member block when extends was
/// declared first, after it otherwise.
pub fn expand(registry: &TagRegistry, raw: &Arc<RawTag>) -> Result<Vec<TagInstance>> {
    let ty = registry.get(raw.type_id())?;
    let Some(members) = ty.composition_members() else {
        return Ok(vec![TagInstance::Raw(raw.clone())]);
    };

    debug!("expanding composite {} into {} members", raw, members.len());
    let mut expanded: Vec<TagInstance> = members
        .iter()
        .map(|member| {
            TagInstance::Member(Arc::new(CompositeMember::new(member.clone(), raw.clone())))
        })
        .collect();

    if ty.extends_link().is_some() {
        let original = TagInstance::Raw(raw.clone());
        if ty.extends_declared_first() {
            expanded.insert(0, original);
        } else {
            expanded.push(original);
        }
    }

    Ok(expanded)
}
