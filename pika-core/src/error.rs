//! Data-validation errors raised at the edges of the core.
//!
//! The planner itself never fails; these surface when untyped input (date
//! strings, scores typed on the command line) is turned into core types.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A due date that is not a real `YYYY-MM-DD` calendar date.
    #[error("invalid date '{input}': {reason}")]
    InvalidDate { input: String, reason: String },

    /// Scores are percentages.
    #[error("score {0} is outside 0-100")]
    InvalidScore(f64),

    #[error("assignment name must not be empty")]
    InvalidName,
}

pub type Result<T> = std::result::Result<T, Error>;
