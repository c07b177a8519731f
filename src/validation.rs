//! Input validation for load-balancing runs.
//!
//! Checks structural integrity of the task list, processor count, and GA
//! configuration before a run starts. Detects:
//! - Empty task lists
//! - Zero processors
//! - Duration sums that overflow
//! - Population sizes that cannot be filled pairwise
//!
//! The mutation rate is deliberately not checked; values outside `[0, 1]`
//! behave as "never" or "always".

use crate::ga::{Chromosome, GaConfig};
use crate::models::TaskSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// No tasks to assign.
    EmptyTaskList,
    /// Processor count is zero.
    NoProcessors,
    /// Sum of task durations does not fit in `u64`.
    DurationOverflow,
    /// Population has fewer than two members.
    PopulationTooSmall,
    /// Population size is odd; offspring are produced in pairs.
    OddPopulationSize,
    /// A chromosome's length or genes do not fit the problem.
    InvalidChromosome,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the task list and processor count.
///
/// Checks:
/// 1. At least one task
/// 2. At least one processor
/// 3. Total duration fits in `u64`
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_problem(tasks: &TaskSet, processors: usize) -> ValidationResult {
    let mut errors = Vec::new();

    if tasks.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyTaskList,
            "Task list is empty",
        ));
    }

    if processors == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoProcessors,
            "Processor count is zero",
        ));
    }

    if tasks.checked_total().is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::DurationOverflow,
            format!("Sum of {} task durations overflows u64", tasks.len()),
        ));
    }

    finish(errors)
}

/// Validates a GA configuration.
///
/// Checks:
/// 1. Population size is at least 2
/// 2. Population size is even
pub fn validate_config(config: &GaConfig) -> ValidationResult {
    let mut errors = Vec::new();

    if config.population_size < 2 {
        errors.push(ValidationError::new(
            ValidationErrorKind::PopulationTooSmall,
            format!(
                "Population size {} is below the minimum of 2",
                config.population_size
            ),
        ));
    }

    if config.population_size % 2 != 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::OddPopulationSize,
            format!("Population size {} is odd", config.population_size),
        ));
    }

    finish(errors)
}

/// Validates problem inputs and configuration together.
pub fn validate_input(tasks: &TaskSet, processors: usize, config: &GaConfig) -> ValidationResult {
    let mut errors = validate_problem(tasks, processors).err().unwrap_or_default();
    errors.extend(validate_config(config).err().unwrap_or_default());
    finish(errors)
}

/// Validates a chromosome against `task_count` tasks and `processors` processors.
///
/// Checks:
/// 1. One gene per task
/// 2. Every gene is a processor index below `processors`
pub fn validate_chromosome(
    chromosome: &Chromosome,
    task_count: usize,
    processors: usize,
) -> ValidationResult {
    let mut errors = Vec::new();

    if chromosome.len() != task_count {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidChromosome,
            format!(
                "Chromosome has {} genes but there are {} tasks",
                chromosome.len(),
                task_count
            ),
        ));
    }

    for (task, &processor) in chromosome.genes().iter().enumerate() {
        if processor >= processors {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidChromosome,
                format!(
                    "Task {} is assigned to processor {} but only {} exist",
                    task + 1,
                    processor,
                    processors
                ),
            ));
        }
    }

    finish(errors)
}

fn finish(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
