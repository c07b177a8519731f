//! Error types for load-balancing runs.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors surfaced by the evolutionary scheduler.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    /// The best fitness of a generation was not strictly positive.
    ///
    /// Fatal: the run aborts and no partial result is returned.
    #[error(
        "invalid population: non-positive best fitness {best_fitness} in generation {generation}"
    )]
    InvalidPopulationFitness {
        /// Generation (1-based) in which the check failed.
        generation: usize,
        /// Best fitness observed in that generation.
        best_fitness: u64,
    },

    /// Inputs or configuration were rejected before the run started.
    #[error("invalid input: {}", summarize(.0))]
    InvalidInput(Vec<ValidationError>),

    /// Fitness-proportional sampling could not be set up.
    #[error("selection failed: {0}")]
    Selection(String),
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<Vec<ValidationError>> for ScheduleError {
    fn from(errors: Vec<ValidationError>) -> Self {
        ScheduleError::InvalidInput(errors)
    }
}
