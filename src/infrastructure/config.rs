//! Resolver configuration

use crate::error::{Result, TagCastError};
use crate::infrastructure::cache::{BoundedCache, ResolutionCache, SharedCache};
use serde::{Deserialize, Serialize};
use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;
use std::sync::Arc;

/// Configuration for a tag resolver. The only knob is the cache policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolverConfig {
    #[serde(default)]
    pub cache: CachePolicy,
}

/// Which result cache to construct
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "lowercase")]
pub enum CachePolicy {
    /// Unbounded concurrent cache (the default)
    Unbounded,
    /// LRU cache bounded to `capacity` entries
    Bounded { capacity: usize },
}

impl Default for CachePolicy {
    fn default() -> Self {
        CachePolicy::Unbounded
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfig {
            cache: CachePolicy::default(),
        }
    }
}

impl ResolverConfig {
    /// Parse a config from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a config from a TOML file.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Build the configured cache.
    pub fn build_cache(&self) -> Result<Arc<dyn ResolutionCache>> {
        match &self.cache {
            CachePolicy::Unbounded => Ok(Arc::new(SharedCache::new())),
            CachePolicy::Bounded { capacity } => {
                let capacity = NonZeroUsize::new(*capacity).ok_or_else(|| {
                    TagCastError::Config("bounded cache capacity must be at least 1".to_string())
                })?;
                Ok(Arc::new(BoundedCache::new(capacity)))
            }
        }
    }
}
