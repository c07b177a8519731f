//! Load-balancing GA problem definition.
//!
//! Bridges the task model to the generational GA: decodes chromosomes into
//! processor loads and scores them.
//!
//! # Fitness
//!
//! ```text
//! fitness = baseline - max_load,   baseline = Σ durations
//! ```
//!
//! The shift turns makespan minimization into a non-negative maximization
//! objective in `[0, baseline]`, usable directly as a sampling weight.
//!
//! # Reference
//! Graham (1969), "Bounds on multiprocessing timing anomalies"

use rand::Rng;

use super::chromosome::{Chromosome, point_mutation, single_point_crossover};
use crate::error::ScheduleError;
use crate::models::TaskSet;
use crate::validation::{validate_chromosome, validate_problem};

/// GA problem: assign `T` tasks to `P` identical processors.
///
/// # Example
/// ```
/// use u_loadbalance::ga::{Chromosome, LoadBalancingProblem};
///
/// let problem = LoadBalancingProblem::from_durations(&[4, 4, 4, 4], 2).unwrap();
/// let balanced = Chromosome::new(vec![0, 1, 0, 1]);
/// assert_eq!(problem.max_load(&balanced), 8);
/// assert_eq!(problem.evaluate(&balanced), 8);
/// ```
#[derive(Debug, Clone)]
pub struct LoadBalancingProblem {
    tasks: TaskSet,
    durations: Vec<u64>,
    processors: usize,
    baseline: u64,
}

impl LoadBalancingProblem {
    /// Creates a problem, rejecting empty task lists, zero processors and
    /// duration sums that overflow.
    pub fn new(tasks: TaskSet, processors: usize) -> Result<Self, ScheduleError> {
        validate_problem(&tasks, processors)?;
        let durations = tasks.durations();
        let baseline = durations.iter().sum();
        Ok(Self {
            tasks,
            durations,
            processors,
            baseline,
        })
    }

    /// Creates a problem from bare durations.
    pub fn from_durations(durations: &[u64], processors: usize) -> Result<Self, ScheduleError> {
        Self::new(TaskSet::from_durations(durations), processors)
    }

    /// The task set.
    pub fn tasks(&self) -> &TaskSet {
        &self.tasks
    }

    /// Number of tasks (`T`).
    pub fn task_count(&self) -> usize {
        self.durations.len()
    }

    /// Number of processors (`P`).
    pub fn processors(&self) -> usize {
        self.processors
    }

    /// Sum of all durations.
    pub fn baseline(&self) -> u64 {
        self.baseline
    }

    /// Summed duration per processor index.
    ///
    /// # Panics
    /// If a gene is not below `P`. Debug builds also panic on a length
    /// mismatch; use [`try_evaluate`](Self::try_evaluate) for untrusted input.
    pub fn processor_loads(&self, chromosome: &Chromosome) -> Vec<u64> {
        debug_assert!(
            chromosome.is_valid(self.task_count(), self.processors),
            "chromosome does not match {} tasks on {} processors",
            self.task_count(),
            self.processors
        );
        let mut loads = vec![0u64; self.processors];
        for (&processor, &duration) in chromosome.genes().iter().zip(&self.durations) {
            loads[processor] += duration;
        }
        loads
    }

    /// Largest processor load (makespan).
    pub fn max_load(&self, chromosome: &Chromosome) -> u64 {
        self.processor_loads(chromosome)
            .into_iter()
            .max()
            .unwrap_or(0)
    }

    /// Fitness: `baseline - max_load`. Higher is better.
    pub fn evaluate(&self, chromosome: &Chromosome) -> u64 {
        self.baseline - self.max_load(chromosome)
    }

    /// Fitness of a chromosome from outside the GA loop.
    ///
    /// Rejects wrong lengths and out-of-range genes instead of panicking.
    pub fn try_evaluate(&self, chromosome: &Chromosome) -> Result<u64, ScheduleError> {
        validate_chromosome(chromosome, self.task_count(), self.processors)?;
        Ok(self.evaluate(chromosome))
    }

    /// Fitness of every member, in population order.
    pub fn evaluate_all(&self, population: &[Chromosome]) -> Vec<u64> {
        population.iter().map(|c| self.evaluate(c)).collect()
    }

    /// Creates one random individual.
    pub fn create_individual<R: Rng>(&self, rng: &mut R) -> Chromosome {
        Chromosome::random(self.task_count(), self.processors, rng)
    }

    /// Creates `size` random individuals.
    pub fn generate_population<R: Rng>(&self, size: usize, rng: &mut R) -> Vec<Chromosome> {
        (0..size).map(|_| self.create_individual(rng)).collect()
    }

    /// Single-point crossover producing two offspring.
    pub fn crossover<R: Rng>(
        &self,
        parent1: &Chromosome,
        parent2: &Chromosome,
        rng: &mut R,
    ) -> (Chromosome, Chromosome) {
        single_point_crossover(parent1, parent2, rng)
    }

    /// Point mutation at the given rate.
    pub fn mutate<R: Rng>(&self, individual: Chromosome, rate: f64, rng: &mut R) -> Chromosome {
        point_mutation(individual, rate, self.processors, rng)
    }
}
