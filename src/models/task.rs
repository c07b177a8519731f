//! Task model.
//!
//! A task is an indivisible unit of work with a fixed duration. Tasks are
//! assigned whole to one of several identical processors.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 5 (P||C_max)

use serde::{Deserialize, Serialize};

/// A task to be placed on a processor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier.
    pub id: String,
    /// Processing duration (time units chosen by the caller).
    pub duration: u64,
}

impl Task {
    /// Creates a task with the given ID and duration.
    pub fn new(id: impl Into<String>, duration: u64) -> Self {
        Self {
            id: id.into(),
            duration,
        }
    }
}

/// Ordered, immutable list of tasks for one run.
///
/// Position `i` in the set is the task that gene `i` of a chromosome assigns.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaskSet {
    tasks: Vec<Task>,
}

impl TaskSet {
    /// Creates a task set from explicit tasks.
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Creates a task set from bare durations; IDs are `T1`, `T2`, ...
    pub fn from_durations(durations: &[u64]) -> Self {
        let tasks = durations
            .iter()
            .enumerate()
            .map(|(i, &d)| Task::new(format!("T{}", i + 1), d))
            .collect();
        Self { tasks }
    }

    /// Tasks in assignment order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Durations in assignment order.
    pub fn durations(&self) -> Vec<u64> {
        self.tasks.iter().map(|t| t.duration).collect()
    }

    /// Number of tasks (`T`).
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the set holds no tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Sum of all durations, or `None` on overflow.
    ///
    /// This is the fitness baseline: the load of a processor holding every task.
    pub fn checked_total(&self) -> Option<u64> {
        self.tasks
            .iter()
            .try_fold(0u64, |acc, t| acc.checked_add(t.duration))
    }

    /// Longest single duration (0 for an empty set).
    pub fn longest(&self) -> u64 {
        self.tasks.iter().map(|t| t.duration).max().unwrap_or(0)
    }
}

impl From<Vec<u64>> for TaskSet {
    fn from(durations: Vec<u64>) -> Self {
        Self::from_durations(&durations)
    }
}

impl From<&[u64]> for TaskSet {
    fn from(durations: &[u64]) -> Self {
        Self::from_durations(durations)
    }
}
