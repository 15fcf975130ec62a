//! Error type returned by partitioning operations.

/// Errors that can occur while building or enumerating partitionings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum PartitionError {
    /// More blocks were requested than there are elements to fill them.
    #[error("cannot partition {elements} elements into {parts} non-empty parts")]
    TooManyParts {
        /// Number of blocks requested
        parts: usize,
        /// Number of elements available
        elements: usize,
    },

    /// The enumerator was asked to fill more empty blocks than it has elements left.
    ///
    /// The public entry points never reach this; seeing it means the enumeration state is inconsistent.
    #[error("{empty_parts} empty parts cannot be filled by {remaining} remaining elements")]
    UnfillableParts {
        /// Blocks still to be opened
        empty_parts: usize,
        /// Elements not yet placed
        remaining: usize,
    },

    /// A block index past the end of the partitioning.
    #[error("part index {index} is out of range for a partitioning with {parts} parts")]
    PartOutOfRange {
        /// The offending index
        index: usize,
        /// Number of blocks in the partitioning
        parts: usize,
    },

    /// An explicitly supplied block had no elements.
    #[error("part {index} is empty")]
    EmptyPart {
        /// Position of the empty block
        index: usize,
    },
}
