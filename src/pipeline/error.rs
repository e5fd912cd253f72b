//! Error types for the passenger cleaning pipeline.
//!
//! Stage functions return `anyhow::Result` and raise these variants for
//! the domain failures a caller may want to match on via `downcast_ref`.

use thiserror::Error;

/// Errors raised by the cleaning stages.
#[derive(Debug, Error, PartialEq)]
pub enum PrepError {
    /// A column the pipeline reads is absent from one of the tables.
    #[error("column '{column}' not found in {table} table")]
    MissingColumn {
        /// Which table was checked ("train", "test" or "combined")
        table: String,
        /// Name of the absent column
        column: String,
    },

    /// A fill statistic was requested for a column with only nulls.
    #[error("cannot compute {statistic} of '{column}': column has no observed values")]
    NoObservedValues {
        column: String,
        statistic: &'static str,
    },

    /// Training rows without an outcome cannot be cast to integer labels.
    #[error("training table has {rows} row(s) with a missing outcome")]
    NullOutcome { rows: usize },

    /// A column holds a dtype the stage cannot work with.
    #[error("column '{column}' has type {found}, expected {expected}")]
    UnexpectedType {
        column: String,
        expected: &'static str,
        found: String,
    },
}
