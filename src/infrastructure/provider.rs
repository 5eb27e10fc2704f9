//! Raw tag provider boundary
//!
//! The provider is the external facility that knows which raw tags are
//! physically attached to a declaration. The engine only requires the two
//! listing operations; `InMemoryProvider` is the shipped implementation, an
//! explicit attachment table populated by the caller.

use crate::domain::instance::RawTag;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Identity of a program declaration (a type, a method) that tags attach to.
/// Opaque to the engine; the provider decides what the name means.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeclarationId(Arc<str>);

impl DeclarationId {
    pub fn new(name: impl AsRef<str>) -> Self {
        DeclarationId(Arc::from(name.as_ref()))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeclarationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for DeclarationId {
    fn from(name: &str) -> Self {
        DeclarationId::new(name)
    }
}

/// Source of physically attached raw tags
pub trait TagProvider: Send + Sync {
    /// Raw tags on a declaration, in physical declaration order. Stable for a
    /// given declaration.
    fn raw_tags(&self, decl: &DeclarationId) -> Vec<Arc<RawTag>>;

    /// Raw tags on the `index`th parameter of a method declaration.
    fn raw_parameter_tags(&self, method: &DeclarationId, index: usize) -> Vec<Arc<RawTag>>;
}

/// In-memory provider: an explicit attachment table
#[derive(Debug, Default)]
pub struct InMemoryProvider {
    declarations: HashMap<DeclarationId, Vec<Arc<RawTag>>>,
    parameters: HashMap<(DeclarationId, usize), Vec<Arc<RawTag>>>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        InMemoryProvider::default()
    }

    /// Attach a raw tag to a declaration. Returns the shared instance, useful
    /// for later `instance_of`/`cast` calls on the same attachment.
    pub fn attach(&mut self, decl: impl Into<DeclarationId>, raw: RawTag) -> Arc<RawTag> {
        let raw = Arc::new(raw);
        self.declarations
            .entry(decl.into())
            .or_default()
            .push(raw.clone());
        raw
    }

    /// Attach a raw tag to a method parameter.
    pub fn attach_parameter(
        &mut self,
        method: impl Into<DeclarationId>,
        index: usize,
        raw: RawTag,
    ) -> Arc<RawTag> {
        let raw = Arc::new(raw);
        self.parameters
            .entry((method.into(), index))
            .or_default()
            .push(raw.clone());
        raw
    }
}

impl TagProvider for InMemoryProvider {
    fn raw_tags(&self, decl: &DeclarationId) -> Vec<Arc<RawTag>> {
        self.declarations.get(decl).cloned().unwrap_or_default()
    }

    fn raw_parameter_tags(&self, method: &DeclarationId, index: usize) -> Vec<Arc<RawTag>> {
        self.parameters
            .get(&(method.clone(), index))
            .cloned()
            .unwrap_or_default()
    }
}
