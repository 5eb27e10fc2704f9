//! Error types for tagcast

use crate::domain::descriptor::TagTypeId;
use thiserror::Error;

/// Main error type for tag resolution
#[derive(Debug, Error)]
pub enum TagCastError {
    #[error("circular tag hierarchy detected: {0}")]
    CircularHierarchy(TagTypeId),

    #[error("unknown tag type: {0}")]
    UnknownTagType(TagTypeId),

    #[error("found more than one tag on {target}:\n{listing}")]
    MultipleMatches { target: String, listing: String },

    #[error("cannot resolve accessor '{accessor}' of member {member} on composite tag {composite}")]
    CompositionResolution {
        accessor: String,
        member: TagTypeId,
        composite: String,
    },

    #[error("no accessor '{accessor}' reachable on {on} for target type {target}")]
    AttributeNotFound {
        accessor: String,
        on: TagTypeId,
        target: TagTypeId,
    },

    #[error("cannot cast {instance} to tag type {target}")]
    InvalidCast { instance: String, target: TagTypeId },

    #[error("invalid tag type declaration: {0}")]
    Declaration(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),
}

/// Result type using TagCastError
pub type Result<T> = std::result::Result<T, TagCastError>;
