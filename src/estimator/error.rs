//! Reasons an edit leaves the table unchanged.
//!
//! The engine functions return these as `Err`; [`crate::Estimator`] turns
//! them into [`EditOutcome::Ignored`] so a bad edit is a logged no-op rather
//! than a failure the caller must handle.

use thiserror::Error;

use crate::dates::DateParseError;
use crate::models::{MonthKey, MonthKeyError};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditError {
    #[error("no row with id {0}")]
    UnknownRow(u32),

    #[error("{field}: {raw:?} is not a finite number")]
    NotANumber { field: &'static str, raw: String },

    #[error("batch: {0:?} is not an integer")]
    NotAnInteger(String),

    #[error("date: {0}")]
    Date(#[from] DateParseError),

    #[error(transparent)]
    Month(#[from] MonthKeyError),

    #[error("{0} has no bottles to redistribute")]
    EmptyMonth(MonthKey),

    #[error("target {target} over {total} bottles is not a finite ratio")]
    NonFiniteRatio { target: f64, total: f64 },
}

/// Result of a mutation against an [`crate::Estimator`].
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    Applied,
    Ignored(EditError),
}

impl EditOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, EditOutcome::Applied)
    }
}
