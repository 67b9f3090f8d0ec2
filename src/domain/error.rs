//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::node::NodeId;

/// Domain errors represent violations of the tree model or its parameters.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("malformed tree: duplicate node id: {0}")]
    DuplicateId(NodeId),

    #[error("percentile must be within 0..=100, got {0}")]
    PercentileOutOfRange(u8),
}

pub type DomainResult<T> = Result<T, DomainError>;
