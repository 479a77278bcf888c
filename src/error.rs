//! Error types for table construction and operations.

/// Rejected table configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("capacity ladder is empty")]
    EmptyLadder,

    #[error("capacity ladder must start above zero")]
    ZeroCapacity,

    #[error("capacity ladder is not strictly ascending at index {index} ({previous} >= {next})")]
    NotAscending {
        index: usize,
        previous: usize,
        next: usize,
    },

    #[error("growth threshold {0} is outside (0, 1]")]
    ThresholdOutOfRange(f32),
}

/// Errors surfaced by `FrequencyTable` operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TableError {
    #[error("invalid table configuration: {0}")]
    Config(#[from] ConfigError),

    /// An absent payload was passed where one is required.
    #[error("{operation} called without a payload")]
    InvalidArgument { operation: &'static str },

    /// Backing storage could not be reserved. The table is unchanged.
    #[error("failed to allocate {requested} {what}")]
    AllocationFailure {
        requested: usize,
        what: &'static str,
    },
}

impl TableError {
    pub(crate) fn allocation(requested: usize, what: &'static str) -> Self {
        log::warn!("allocation failure: {} {}", requested, what);
        TableError::AllocationFailure { requested, what }
    }
}
