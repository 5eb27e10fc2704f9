//! Tag query engine
//!
//! `TagResolver` is the public facade: it orchestrates raw-tag retrieval,
//! composite expansion, hierarchy filtering and view synthesis, memoizing
//! every externally observable operation behind a pluggable cache.

use crate::domain::descriptor::TagTypeId;
use crate::domain::expand::expand;
use crate::domain::hierarchy::ancestor_chain;
use crate::domain::instance::{AsTagInstance, RawTag};
use crate::domain::registry::TagRegistry;
use crate::domain::view::{synthesize, TagView};
use crate::error::{Result, TagCastError};
use crate::infrastructure::cache::{CacheKey, CacheValue, InstanceKey, ResolutionCache, SharedCache};
use crate::infrastructure::provider::{DeclarationId, TagProvider};
use indexmap::IndexSet;
use log::trace;
use std::sync::Arc;

/// Resolves tag queries against a registry and a raw tag provider.
///
/// Construction is explicit; there is no process-wide default instance. All
/// operations are pure functions of (declaration, target type, cache
/// contents) and are safe to call from multiple threads sharing one resolver.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use tagcast::application::TagResolver;
/// use tagcast::domain::{Accessor, AttrValue, RawTag, TagRegistry, TagType, TagTypeId};
/// use tagcast::infrastructure::InMemoryProvider;
///
/// let mut registry = TagRegistry::new();
/// registry
///     .register(TagType::named("Route").accessor(Accessor::new("path").with_default("")))
///     .unwrap();
/// registry
///     .register(
///         TagType::named("Gett")
///             .extends("Route")
///             .accessor(Accessor::new("path").with_default("")),
///     )
///     .unwrap();
///
/// let mut provider = InMemoryProvider::new();
/// provider.attach("Handler", RawTag::new("Gett").with("path", "get"));
///
/// let resolver = TagResolver::new(Arc::new(registry), provider);
/// let route = resolver
///     .one_or_none(&"Handler".into(), &TagTypeId::new("Route"))
///     .unwrap()
///     .unwrap();
/// assert_eq!(route.get("path").unwrap(), AttrValue::from("get"));
/// ```
pub struct TagResolver<P: TagProvider> {
    registry: Arc<TagRegistry>,
    provider: P,
    cache: Arc<dyn ResolutionCache>,
}

impl<P: TagProvider> TagResolver<P> {
    /// Create a resolver with the default unbounded cache.
    pub fn new(registry: Arc<TagRegistry>, provider: P) -> Self {
        Self::with_cache(registry, provider, Arc::new(SharedCache::new()))
    }

    /// Create a resolver with a caller-supplied cache.
    pub fn with_cache(
        registry: Arc<TagRegistry>,
        provider: P,
        cache: Arc<dyn ResolutionCache>,
    ) -> Self {
        TagResolver {
            registry,
            provider,
            cache,
        }
    }

    pub fn registry(&self) -> &Arc<TagRegistry> {
        &self.registry
    }

    /// All views of `target` reachable from the tags on a declaration, in
    /// attachment and expansion order.
    pub fn all(&self, decl: &DeclarationId, target: &TagTypeId) -> Result<Vec<Arc<TagView>>> {
        let key = CacheKey::DeclarationTags {
            decl: decl.clone(),
            target: target.clone(),
        };
        if let Some(CacheValue::Views(views)) = self.cache.get(&key) {
            return Ok(views);
        }
        trace!("resolving {} on {}", target, decl);
        let views = self.collect(self.provider.raw_tags(decl), target)?;
        self.cache.put(key, CacheValue::Views(views.clone()));
        Ok(views)
    }

    /// The single view of `target` on a declaration, or `None`. More than one
    /// match is a `MultipleMatches` error listing every match.
    pub fn one_or_none(
        &self,
        decl: &DeclarationId,
        target: &TagTypeId,
    ) -> Result<Option<Arc<TagView>>> {
        assert_zero_or_one(self.all(decl, target)?, decl.name())
    }

    /// Whether any view of `target` exists on a declaration.
    pub fn is_present(&self, decl: &DeclarationId, target: &TagTypeId) -> Result<bool> {
        Ok(!self.all(decl, target)?.is_empty())
    }

    /// All views of `target` on the `index`th parameter of a method.
    pub fn all_on_parameter(
        &self,
        method: &DeclarationId,
        index: usize,
        target: &TagTypeId,
    ) -> Result<Vec<Arc<TagView>>> {
        let key = CacheKey::ParameterTags {
            method: method.clone(),
            index,
            target: target.clone(),
        };
        if let Some(CacheValue::Views(views)) = self.cache.get(&key) {
            return Ok(views);
        }
        let views = self.collect(self.provider.raw_parameter_tags(method, index), target)?;
        self.cache.put(key, CacheValue::Views(views.clone()));
        Ok(views)
    }

    /// The single view of `target` on a method parameter, or `None`.
    pub fn one_on_parameter(
        &self,
        method: &DeclarationId,
        index: usize,
        target: &TagTypeId,
    ) -> Result<Option<Arc<TagView>>> {
        assert_zero_or_one(
            self.all_on_parameter(method, index, target)?,
            &format!("parameter {} of {}", index, method),
        )
    }

    /// Whether an instance's type hierarchy contains `target`. Accepts raw
    /// tags and views; a view is judged by its underlying instance.
    pub fn instance_of(&self, instance: &impl AsTagInstance, target: &TagTypeId) -> Result<bool> {
        let instance = instance.as_instance();
        Ok(self.hierarchy_of(instance.type_id())?.contains(target))
    }

    /// Project an instance onto `target`, failing with `InvalidCast` when its
    /// hierarchy does not contain the target. Prefer `instance_of` to probe.
    pub fn cast(&self, instance: &impl AsTagInstance, target: &TagTypeId) -> Result<Arc<TagView>> {
        let instance = instance.as_instance();
        let key = CacheKey::Cast {
            instance: InstanceKey::from(&instance),
            target: target.clone(),
        };
        let view = match self.cache.get(&key) {
            Some(CacheValue::View(view)) => view,
            _ => {
                let computed = synthesize(&self.registry, &instance, target)?;
                self.cache
                    .put(key, CacheValue::View(computed.clone()));
                computed
            }
        };
        view.ok_or_else(|| TagCastError::InvalidCast {
            instance: instance.to_string(),
            target: target.clone(),
        })
    }

    fn collect(&self, raws: Vec<Arc<RawTag>>, target: &TagTypeId) -> Result<Vec<Arc<TagView>>> {
        let mut views = Vec::new();
        for raw in &raws {
            for instance in expand(&self.registry, raw)? {
                if let Some(view) = synthesize(&self.registry, &instance, target)? {
                    views.push(view);
                }
            }
        }
        Ok(views)
    }

    fn hierarchy_of(&self, ty: &TagTypeId) -> Result<Arc<IndexSet<TagTypeId>>> {
        let key = CacheKey::Hierarchy { ty: ty.clone() };
        if let Some(CacheValue::Chain(chain)) = self.cache.get(&key) {
            return Ok(chain);
        }
        let chain = Arc::new(ancestor_chain(&self.registry, ty)?);
        self.cache.put(key, CacheValue::Chain(chain.clone()));
        Ok(chain)
    }
}

fn assert_zero_or_one(views: Vec<Arc<TagView>>, on: &str) -> Result<Option<Arc<TagView>>> {
    if views.len() > 1 {
        let listing = views
            .iter()
            .map(|view| view.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        return Err(TagCastError::MultipleMatches {
            target: on.to_string(),
            listing,
        });
    }
    Ok(views.into_iter().next())
}
