//! Error types shared by the stores and the controller.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers distinguish "the
//! entity does not exist" from "the input was rejected". Both are
//! recoverable; neither is ever fatal to the controller.

use std::fmt;

use thiserror::Error;

/// Which collection an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Task,
    Category,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Task => f.write_str("Task"),
            Entity::Category => f.write_str("Category"),
        }
    }
}

/// Errors returned by store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No entity with the requested id. `id` is `None` when the supplied
    /// value could not be read as an id at all.
    #[error("{entity} not found")]
    NotFound { entity: Entity, id: Option<u64> },

    /// The payload was rejected before touching the collection.
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },
}

impl StoreError {
    pub fn not_found(entity: Entity, id: Option<u64>) -> Self {
        StoreError::NotFound { entity, id }
    }

    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        StoreError::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}
