use chrono::NaiveDateTime;
use thiserror::Error;

use crate::calendar::Field;

pub type Result<T> = std::result::Result<T, CoreError>;

/// Crate-wide error taxonomy.
///
/// `InvalidFieldValue` is recoverable inside the field-value generator (the
/// offending cycle is skipped); every other variant is fatal to the single
/// evaluation that raised it. Errors are `Clone + PartialEq` so memoized
/// evaluation results can be shared and tests can match on variants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("unsupported operation: {0}")]
    Unsupported(String),

    #[error("invalid value {value} for {field} on {point}")]
    InvalidFieldValue {
        field: Field,
        value: i64,
        point: NaiveDateTime,
    },

    #[error("expected exactly one interval, found {found}")]
    NotSingular { found: usize },

    #[error("occurrence ending {end} exceeds the bounding interval end {bound}")]
    OccurrenceOutOfBounds {
        end: NaiveDateTime,
        bound: NaiveDateTime,
    },

    #[error("timeline arithmetic out of range: {0}")]
    OutOfRange(String),
}

impl CoreError {
    pub fn unsupported(operation: impl Into<String>) -> Self {
        Self::Unsupported(operation.into())
    }

    pub fn out_of_range(context: impl Into<String>) -> Self {
        Self::OutOfRange(context.into())
    }
}
