//! Generational GA loop.
//!
//! # State machine
//!
//! ```text
//! INITIALIZED ──► EVOLVING (× max_generations) ──► TERMINATED
//! ```
//!
//! Each generation: evaluate → validity check → `N/2` rounds of
//! select/crossover/mutate → replace. No elitism: the whole population is
//! replaced, so the best fitness can drop between generations.

use std::ops::ControlFlow;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::chromosome::Chromosome;
use super::problem::LoadBalancingProblem;
use super::selection::RouletteWheel;
use crate::error::ScheduleError;
use crate::validation::validate_config;

/// GA parameters.
///
/// Deserializes from partial documents; missing fields take defaults.
///
/// # Example
/// ```
/// use u_loadbalance::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(20)
///     .with_max_generations(50)
///     .with_mutation_rate(0.1)
///     .with_seed(42);
/// assert_eq!(config.population_size, 20);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    /// Population size `N` (even, at least 2).
    pub population_size: usize,
    /// Number of generations `G`.
    pub max_generations: usize,
    /// Per-offspring mutation probability `m`. Not range-checked.
    pub mutation_rate: f64,
    /// RNG seed. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            max_generations: 100,
            mutation_rate: 0.1,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the generation count.
    pub fn with_max_generations(mut self, generations: usize) -> Self {
        self.max_generations = generations;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets a fixed seed for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Summary of one evaluated generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Generation number (1-based).
    pub generation: usize,
    /// Highest fitness in the population.
    pub best_fitness: u64,
    /// Max load of the fittest member.
    pub best_max_load: u64,
    /// Mean fitness.
    pub mean_fitness: f64,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaResult {
    /// Fittest chromosome of the final population (first on ties).
    pub best: Chromosome,
    /// Fitness of `best`.
    pub best_fitness: u64,
    /// Minimized maximum load: `baseline - best_fitness`.
    pub max_load: u64,
    /// Generations evaluated (fewer than configured if an observer stopped the run).
    pub generations: usize,
    /// Per-generation statistics, oldest first.
    pub history: Vec<GenerationStats>,
}

/// Runs the generational GA.
///
/// # Example
/// ```
/// use u_loadbalance::ga::{GaConfig, GaRunner, LoadBalancingProblem};
///
/// let problem = LoadBalancingProblem::from_durations(&[4, 4, 4, 4], 2).unwrap();
/// let config = GaConfig::default()
///     .with_population_size(20)
///     .with_max_generations(30)
///     .with_seed(7);
/// let result = GaRunner::run(&problem, &config).unwrap();
/// assert_eq!(result.best.len(), 4);
/// assert!(result.max_load >= 8);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs with an RNG seeded from `config.seed` (or the OS).
    pub fn run(
        problem: &LoadBalancingProblem,
        config: &GaConfig,
    ) -> Result<GaResult, ScheduleError> {
        let mut rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        Self::run_with_rng(problem, config, &mut rng)
    }

    /// Runs with a caller-owned random stream. `config.seed` is ignored.
    pub fn run_with_rng<R: Rng>(
        problem: &LoadBalancingProblem,
        config: &GaConfig,
        rng: &mut R,
    ) -> Result<GaResult, ScheduleError> {
        Self::run_with_observer(problem, config, rng, |_| ControlFlow::Continue(()))
    }

    /// Runs, reporting each generation to `observer`.
    ///
    /// The observer sees a generation's stats after its validity check and
    /// before breeding. Returning `ControlFlow::Break` ends the run at that
    /// generation boundary; the result then reflects the population that was
    /// just evaluated.
    #[instrument(
        skip_all,
        fields(
            tasks = problem.task_count(),
            processors = problem.processors(),
            population = config.population_size,
            generations = config.max_generations,
        )
    )]
    pub fn run_with_observer<R, F>(
        problem: &LoadBalancingProblem,
        config: &GaConfig,
        rng: &mut R,
        mut observer: F,
    ) -> Result<GaResult, ScheduleError>
    where
        R: Rng,
        F: FnMut(&GenerationStats) -> ControlFlow<()>,
    {
        validate_config(config)?;
        if !(0.0..=1.0).contains(&config.mutation_rate) {
            tracing::warn!(
                mutation_rate = config.mutation_rate,
                "Mutation rate outside [0, 1] is used as-is"
            );
        }

        tracing::info!("Generating initial population");
        let mut population = problem.generate_population(config.population_size, rng);
        for (i, chromosome) in population.iter().enumerate() {
            tracing::trace!(index = i + 1, genes = ?chromosome.genes(), "Initial chromosome");
        }

        let mut history = Vec::with_capacity(config.max_generations);

        for generation in 1..=config.max_generations {
            let fitness = problem.evaluate_all(&population);
            let stats = summarize(problem, generation, &fitness);
            tracing::debug!(
                generation,
                best_fitness = stats.best_fitness,
                best_max_load = stats.best_max_load,
                "Generation evaluated"
            );

            // Unsigned fitness: non-positive means zero.
            if stats.best_fitness == 0 {
                tracing::error!(generation, "Best fitness is not positive; aborting run");
                return Err(ScheduleError::InvalidPopulationFitness {
                    generation,
                    best_fitness: stats.best_fitness,
                });
            }

            let flow = observer(&stats);
            history.push(stats);
            if flow.is_break() {
                tracing::info!(generation, "Run stopped by observer");
                return Ok(Self::finish(problem, population, history));
            }

            population = breed(problem, &population, &fitness, config.mutation_rate, rng)?;
        }

        Ok(Self::finish(problem, population, history))
    }

    fn finish(
        problem: &LoadBalancingProblem,
        mut population: Vec<Chromosome>,
        history: Vec<GenerationStats>,
    ) -> GaResult {
        let fitness = problem.evaluate_all(&population);
        let best_idx = first_best(&fitness);
        let best_fitness = fitness[best_idx];
        let best = population.swap_remove(best_idx);
        let max_load = problem.baseline() - best_fitness;

        tracing::info!(
            generations = history.len(),
            best_fitness,
            max_load,
            "Run finished"
        );

        GaResult {
            best,
            best_fitness,
            max_load,
            generations: history.len(),
            history,
        }
    }
}

/// Builds the next population of the same size.
fn breed<R: Rng>(
    problem: &LoadBalancingProblem,
    population: &[Chromosome],
    fitness: &[u64],
    mutation_rate: f64,
    rng: &mut R,
) -> Result<Vec<Chromosome>, ScheduleError> {
    let wheel = RouletteWheel::new(fitness)?;
    let mut next = Vec::with_capacity(population.len());
    for _ in 0..population.len() / 2 {
        let (parent1, parent2) = wheel.select_pair(population, rng);
        let (child1, child2) = problem.crossover(&parent1, &parent2, rng);
        next.push(problem.mutate(child1, mutation_rate, rng));
        next.push(problem.mutate(child2, mutation_rate, rng));
    }
    Ok(next)
}

fn summarize(
    problem: &LoadBalancingProblem,
    generation: usize,
    fitness: &[u64],
) -> GenerationStats {
    let best_fitness = fitness[first_best(fitness)];
    let mean_fitness = fitness.iter().map(|&f| f as f64).sum::<f64>() / fitness.len() as f64;
    GenerationStats {
        generation,
        best_fitness,
        best_max_load: problem.baseline() - best_fitness,
        mean_fitness,
    }
}

/// Index of the first maximal value. `fitness` must be non-empty.
fn first_best(fitness: &[u64]) -> usize {
    let mut best = 0;
    for (i, &f) in fitness.iter().enumerate() {
        if f > fitness[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(population: usize, generations: usize, rate: f64, seed: u64) -> GaConfig {
        GaConfig::default()
            .with_population_size(population)
            .with_max_generations(generations)
            .with_mutation_rate(rate)
            .with_seed(seed)
    }

    #[test]
    fn test_first_best_is_stable() {
        assert_eq!(first_best(&[3, 7, 7, 1]), 1);
        assert_eq!(first_best(&[0, 0, 0]), 0);
        assert_eq!(first_best(&[5]), 0);
    }

    #[test]
    fn test_breed_keeps_size_and_gene_domain() {
        let problem = LoadBalancingProblem::from_durations(&[3, 9, 1, 4, 7, 2, 8], 4).unwrap();
        for rate in [0.0, 0.3, 1.0] {
            let mut rng = SmallRng::seed_from_u64(42);
            let mut population = problem.generate_population(10, &mut rng);
            for generation in 0..40 {
                let fitness = problem.evaluate_all(&population);
                let next = breed(&problem, &population, &fitness, rate, &mut rng).unwrap();
                assert_eq!(next.len(), 10, "rate {rate}, generation {generation}");
                for chromosome in &next {
                    assert!(
                        chromosome.is_valid(7, 4),
                        "rate {rate}, generation {generation}: {chromosome:?}"
                    );
                }
                population = next;
            }
        }
    }

    #[test]
    fn test_breed_with_single_task() {
        // No interior cut point: offspring are copies, still valid
        let problem = LoadBalancingProblem::from_durations(&[5], 3).unwrap();
        let mut rng = SmallRng::seed_from_u64(42);
        let population = problem.generate_population(4, &mut rng);
        let fitness = problem.evaluate_all(&population);
        let next = breed(&problem, &population, &fitness, 1.0, &mut rng).unwrap();
        assert_eq!(next.len(), 4);
        assert!(next.iter().all(|c| c.is_valid(1, 3)));
    }

    #[test]
    fn test_equal_tasks_converge_to_perfect_balance() {
        let problem = LoadBalancingProblem::from_durations(&[4, 4, 4, 4], 2).unwrap();
        for seed in 0..10 {
            let result = GaRunner::run(&problem, &config(20, 30, 0.1, seed)).unwrap();
            assert_eq!(result.max_load, 8, "seed {seed}");
            assert_eq!(problem.processor_loads(&result.best), vec![8, 8]);
        }
    }

    #[test]
    fn test_single_task_without_generations() {
        let problem = LoadBalancingProblem::from_durations(&[10], 3).unwrap();
        let result = GaRunner::run(&problem, &config(4, 0, 0.1, 42)).unwrap();
        assert_eq!(result.max_load, 10);
        assert_eq!(result.best_fitness, 0);
        assert_eq!(result.generations, 0);
        assert!(result.history.is_empty());
        assert!(result.best.is_valid(1, 3));
    }

    #[test]
    fn test_single_task_trips_validity_check() {
        // One task always carries the whole baseline, so fitness is 0 everywhere.
        let problem = LoadBalancingProblem::from_durations(&[10], 3).unwrap();
        let err = GaRunner::run(&problem, &config(4, 5, 0.1, 42)).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::InvalidPopulationFitness {
                generation: 1,
                best_fitness: 0
            }
        );
    }

    #[test]
    fn test_single_processor_trips_validity_check() {
        let problem = LoadBalancingProblem::from_durations(&[1, 2, 3], 1).unwrap();
        let err = GaRunner::run(&problem, &config(10, 3, 0.5, 42)).unwrap_err();
        assert!(matches!(
            err,
            ScheduleError::InvalidPopulationFitness { generation: 1, .. }
        ));
    }

    #[test]
    fn test_six_tasks_three_processors_near_optimal() {
        let problem = LoadBalancingProblem::from_durations(&[1, 2, 3, 4, 5, 6], 3).unwrap();
        let mut loads = Vec::new();
        for seed in 0..30 {
            let result = GaRunner::run(&problem, &config(20, 50, 0.1, seed)).unwrap();
            assert!(result.max_load >= 7);
            assert!(result.max_load <= 10, "seed {seed}: {}", result.max_load);
            assert_eq!(result.generations, 50);
            loads.push(result.max_load);
        }
        assert!(loads.contains(&7), "optimum never reached: {loads:?}");
        let mean = loads.iter().sum::<u64>() as f64 / loads.len() as f64;
        assert!(mean <= 9.0, "mean max load {mean}");
    }

    #[test]
    fn test_deterministic_under_seed() {
        let problem = LoadBalancingProblem::from_durations(&[7, 3, 9, 1, 4, 4, 2], 3).unwrap();
        let cfg = config(16, 25, 0.3, 1234);
        let a = GaRunner::run(&problem, &cfg).unwrap();
        let b = GaRunner::run(&problem, &cfg).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_run_with_rng_matches_seeded_run() {
        let problem = LoadBalancingProblem::from_durations(&[5, 8, 2, 6], 2).unwrap();
        let cfg = config(8, 10, 0.2, 99);
        let seeded = GaRunner::run(&problem, &cfg).unwrap();
        let mut rng = SmallRng::seed_from_u64(99);
        let explicit = GaRunner::run_with_rng(&problem, &cfg, &mut rng).unwrap();
        assert_eq!(seeded, explicit);
    }

    #[test]
    fn test_history_and_result_consistency() {
        let problem = LoadBalancingProblem::from_durations(&[3, 5, 2, 8, 1], 2).unwrap();
        let result = GaRunner::run(&problem, &config(12, 15, 0.2, 42)).unwrap();
        assert_eq!(result.history.len(), 15);
        for (i, stats) in result.history.iter().enumerate() {
            assert_eq!(stats.generation, i + 1);
            assert!(stats.best_fitness > 0);
            assert_eq!(stats.best_fitness + stats.best_max_load, problem.baseline());
            assert!(stats.mean_fitness <= stats.best_fitness as f64);
        }
        assert_eq!(result.max_load, problem.max_load(&result.best));
        assert_eq!(result.best_fitness, problem.evaluate(&result.best));
    }

    #[test]
    fn test_best_fitness_not_monotonic() {
        // Without elitism a generation can lose the previous best.
        let problem =
            LoadBalancingProblem::from_durations(&[1, 2, 3, 4, 5, 6, 7, 8], 3).unwrap();
        let dropped = (0..50).any(|seed| {
            let result = GaRunner::run(&problem, &config(4, 30, 1.0, seed)).unwrap();
            result
                .history
                .windows(2)
                .any(|w| w[1].best_fitness < w[0].best_fitness)
        });
        assert!(dropped);
    }

    #[test]
    fn test_observer_stops_at_generation_boundary() {
        let problem = LoadBalancingProblem::from_durations(&[2, 2, 3, 3], 2).unwrap();
        let mut rng = SmallRng::seed_from_u64(42);
        let mut seen = Vec::new();
        let result = GaRunner::run_with_observer(&problem, &config(6, 20, 0.1, 0), &mut rng, |s| {
            seen.push(s.generation);
            if s.generation == 4 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })
        .unwrap();
        assert_eq!(seen, vec![1, 2, 3, 4]);
        assert_eq!(result.generations, 4);
        assert_eq!(result.history.len(), 4);
    }

    #[test]
    fn test_population_size_validated() {
        let problem = LoadBalancingProblem::from_durations(&[1, 2], 2).unwrap();
        let err = GaRunner::run(&problem, &config(5, 3, 0.1, 0)).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidInput(_)));
    }

    #[test]
    fn test_config_from_partial_json() {
        let config: GaConfig =
            serde_json::from_str(r#"{"population_size": 20, "seed": 5}"#).unwrap();
        assert_eq!(config.population_size, 20);
        assert_eq!(config.seed, Some(5));
        assert_eq!(config.max_generations, 100);
        assert_eq!(config.mutation_rate, 0.1);
    }
}
