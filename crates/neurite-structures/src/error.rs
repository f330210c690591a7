use thiserror::Error;

/// Result type for data-structure operations.
pub type NeuriteDataResult<T> = Result<T, NeuriteDataError>;

/// Common error type for morphology data operations.
///
/// # Examples
/// ```
/// use neurite_structures::{NeuriteDataError, NeuriteKind};
///
/// let err = NeuriteKind::from_tag(42).unwrap_err();
/// assert!(matches!(err, NeuriteDataError::UnknownTypeTag { tag: 42 }));
/// ```
#[derive(Debug, Error)]
pub enum NeuriteDataError {
    /// A point table row does not have the expected column layout
    #[error("point table must have {expected} columns, got {actual}")]
    BadColumnCount { expected: usize, actual: usize },

    /// Two rows carry the same on-disk identifier
    #[error("duplicate point id {id} in rows {first_row} and {second_row}")]
    DuplicatePointId {
        id: i64,
        first_row: usize,
        second_row: usize,
    },

    /// A parent id is neither the no-parent sentinel nor a known point id
    #[error("point {id} references unknown parent id {parent_id}")]
    MalformedParentReference { id: i64, parent_id: i64 },

    /// A raw structure type tag has no entry in the recognized type table
    #[error("unrecognized structure type tag {tag}")]
    UnknownTypeTag { tag: u32 },

    /// Invalid parameters provided to a function
    #[error("bad parameters: {0}")]
    BadParameters(String),

    /// Internal error indicating a bug (please report)
    #[error("internal error, please raise an issue: {0}")]
    Internal(String),
}
