//! Shared error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` where they
//! need to surface one of these cases.

use thiserror::Error;

use crate::{ActorId, GroupId, TableId};

/// Errors produced by `bistro-core` and reused by the crates above it.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("actor {0} not found")]
    ActorNotFound(ActorId),

    #[error("group {0} not found")]
    GroupNotFound(GroupId),

    #[error("table {0} not found")]
    TableNotFound(TableId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `bistro-core`.
pub type CoreResult<T> = Result<T, CoreError>;
