//! Tag type registry
//!
//! The registry is the name → descriptor table the resolution algorithms
//! consult. It stands in for the platform's reflective type universe: every
//! tag type taking part in resolution must be registered exactly once.
//! References between types (extends links, composition members, alias
//! targets) are not checked at registration time: cyclic hierarchies must be
//! declarable so the hierarchy resolver can report them, and dangling
//! references surface as `UnknownTagType` during resolution.

use crate::domain::descriptor::{TagType, TagTypeId};
use crate::error::{Result, TagCastError};
use regex::Regex;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Regex for valid tag type and accessor names
fn ident_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").unwrap())
}

/// Registry of declared tag types
#[derive(Debug, Default)]
pub struct TagRegistry {
    types: HashMap<TagTypeId, Arc<TagType>>,
}

impl TagRegistry {
    pub fn new() -> Self {
        TagRegistry::default()
    }

    /// Register a tag type declaration.
    ///
    /// Validates local shape only: the type name and every accessor name must
    /// be identifiers, and the type name must not already be registered.
    pub fn register(&mut self, ty: TagType) -> Result<()> {
        if !ident_regex().is_match(ty.id().name()) {
            return Err(TagCastError::Declaration(format!(
                "invalid tag type name: '{}'",
                ty.id()
            )));
        }
        for accessor in ty.accessors() {
            if !ident_regex().is_match(accessor.name()) {
                return Err(TagCastError::Declaration(format!(
                    "invalid accessor name '{}' on tag type {}",
                    accessor.name(),
                    ty.id()
                )));
            }
        }
        if self.types.contains_key(ty.id()) {
            return Err(TagCastError::Declaration(format!(
                "tag type {} is already registered",
                ty.id()
            )));
        }
        self.types.insert(ty.id().clone(), Arc::new(ty));
        Ok(())
    }

    /// Look up a descriptor, failing with `UnknownTagType` if absent.
    pub fn get(&self, id: &TagTypeId) -> Result<&Arc<TagType>> {
        self.types
            .get(id)
            .ok_or_else(|| TagCastError::UnknownTagType(id.clone()))
    }

    /// Look up a descriptor without turning absence into an error.
    pub fn lookup(&self, id: &TagTypeId) -> Option<&Arc<TagType>> {
        self.types.get(id)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
