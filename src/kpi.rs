//! Load-balance quality metrics (KPIs).
//!
//! Computes load indicators for a finished task-to-processor assignment.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Max Load (C_max) | Largest processor load |
//! | Min Load | Smallest processor load |
//! | Mean Load | Σ durations / P |
//! | Imbalance | Max load − min load |
//! | Lower Bound | max(⌈Σ durations / P⌉, longest task) |
//! | Gap | Max load − lower bound |
//! | Utilization | load / max load, per processor |
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 5.1: The Makespan without Preemptions

use serde::{Deserialize, Serialize};

use crate::ga::{Chromosome, LoadBalancingProblem};

/// Load indicators of one assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadKpi {
    /// Largest processor load.
    pub max_load: u64,
    /// Smallest processor load.
    pub min_load: u64,
    /// Average load per processor.
    pub mean_load: f64,
    /// `max_load - min_load`.
    pub imbalance: u64,
    /// No assignment can beat this makespan.
    pub lower_bound: u64,
    /// `max_load - lower_bound`; 0 proves optimality.
    pub gap: u64,
    /// Load per processor index.
    pub load_by_processor: Vec<u64>,
    /// Per-processor utilization relative to the makespan (0.0..1.0).
    pub utilization_by_processor: Vec<f64>,
}

impl LoadKpi {
    /// Computes KPIs for `chromosome` under `problem`.
    ///
    /// # Panics
    /// As [`LoadBalancingProblem::processor_loads`]; check untrusted input with
    /// [`validate_chromosome`](crate::validation::validate_chromosome) first.
    pub fn calculate(problem: &LoadBalancingProblem, chromosome: &Chromosome) -> Self {
        let load_by_processor = problem.processor_loads(chromosome);
        let max_load = load_by_processor.iter().copied().max().unwrap_or(0);
        let min_load = load_by_processor.iter().copied().min().unwrap_or(0);
        let processors = load_by_processor.len().max(1) as u64;
        let mean_load = problem.baseline() as f64 / processors as f64;

        let lower_bound = problem
            .baseline()
            .div_ceil(processors)
            .max(problem.tasks().longest());

        let utilization_by_processor = load_by_processor
            .iter()
            .map(|&load| {
                if max_load == 0 {
                    0.0
                } else {
                    load as f64 / max_load as f64
                }
            })
            .collect();

        Self {
            max_load,
            min_load,
            mean_load,
            imbalance: max_load - min_load,
            lower_bound,
            gap: max_load.saturating_sub(lower_bound),
            load_by_processor,
            utilization_by_processor,
        }
    }

    /// Whether the makespan provably equals the optimum.
    pub fn is_optimal(&self) -> bool {
        self.gap == 0
    }

    /// Average utilization across processors.
    pub fn avg_utilization(&self) -> f64 {
        if self.utilization_by_processor.is_empty() {
            return 0.0;
        }
        self.utilization_by_processor.iter().sum::<f64>()
            / self.utilization_by_processor.len() as f64
    }
}
