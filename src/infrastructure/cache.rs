//! Pluggable query result cache
//!
//! Every externally observable engine operation is memoized behind a
//! key → value cache. The engine only requires get/put semantics; eviction
//! policy belongs to the implementation. `SharedCache` (unbounded, concurrent)
//! is the default; `BoundedCache` adds LRU eviction for callers that do not
//! want results to live forever.

use crate::domain::descriptor::TagTypeId;
use crate::domain::instance::{RawTag, TagInstance};
use crate::domain::view::TagView;
use crate::infrastructure::provider::DeclarationId;
use indexmap::IndexSet;
use lru::LruCache;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Key of one cached operation: the operation discriminator plus its argument
/// tuple.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// `all` / `one_or_none` / `is_present` on a declaration
    DeclarationTags {
        decl: DeclarationId,
        target: TagTypeId,
    },
    /// `all_on_parameter` / `one_on_parameter`
    ParameterTags {
        method: DeclarationId,
        index: usize,
        target: TagTypeId,
    },
    /// `instance_of` hierarchy lookups
    Hierarchy { ty: TagTypeId },
    /// `cast` of one instance to one target
    Cast {
        instance: InstanceKey,
        target: TagTypeId,
    },
}

/// Value-identity snapshot of a tag instance, usable as a hash key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InstanceKey {
    Raw(RawTag),
    Member { member: TagTypeId, source: RawTag },
}

impl From<&TagInstance> for InstanceKey {
    fn from(instance: &TagInstance) -> Self {
        match instance {
            TagInstance::Raw(raw) => InstanceKey::Raw(raw.as_ref().clone()),
            TagInstance::Member(member) => InstanceKey::Member {
                member: member.member_type().clone(),
                source: member.source().as_ref().clone(),
            },
        }
    }
}

/// A cached result. An empty list or a `None` view is a legitimate cacheable
/// value, distinct from "not yet computed".
#[derive(Debug, Clone)]
pub enum CacheValue {
    Views(Vec<Arc<TagView>>),
    View(Option<Arc<TagView>>),
    Chain(Arc<IndexSet<TagTypeId>>),
}

/// Cache contract the engine requires. Implementations decide lifetime and
/// eviction; the engine never caches errors.
pub trait ResolutionCache: std::fmt::Debug + Send + Sync {
    fn get(&self, key: &CacheKey) -> Option<CacheValue>;
    fn put(&self, key: CacheKey, value: CacheValue);
}

/// Default cache: unbounded, safe for concurrent get/put
#[derive(Debug, Default)]
pub struct SharedCache {
    entries: RwLock<HashMap<CacheKey, CacheValue>>,
}

impl SharedCache {
    pub fn new() -> Self {
        SharedCache::default()
    }
}

impl ResolutionCache for SharedCache {
    fn get(&self, key: &CacheKey) -> Option<CacheValue> {
        self.entries.read().get(key).cloned()
    }

    fn put(&self, key: CacheKey, value: CacheValue) {
        self.entries.write().insert(key, value);
    }
}

/// Size-bounded cache with least-recently-used eviction
#[derive(Debug)]
pub struct BoundedCache {
    entries: Mutex<LruCache<CacheKey, CacheValue>>,
}

impl BoundedCache {
    pub fn new(capacity: NonZeroUsize) -> Self {
        BoundedCache {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }
}

impl ResolutionCache for BoundedCache {
    fn get(&self, key: &CacheKey) -> Option<CacheValue> {
        self.entries.lock().get(key).cloned()
    }

    fn put(&self, key: CacheKey, value: CacheValue) {
        self.entries.lock().put(key, value);
    }
}
