//! tagcast - Metadata tag resolution engine
//!
//! Resolves metadata tags attached to program declarations when tag types
//! take part in inheritance ("extends" links) and composition ("composed-of"
//! member lists with attribute aliasing). Queries expand composite tags into
//! per-member instances, walk tag type hierarchies, and synthesize cached
//! views that answer a target type's accessors.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::TagCastError;
