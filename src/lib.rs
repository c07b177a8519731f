//! Evolutionary load balancing for the U-Engine ecosystem.
//!
//! Assigns tasks with fixed durations to identical processors, minimizing
//! the maximum processor load (makespan, `P||C_max`) with a generational
//! genetic algorithm. The search is approximate: no optimality guarantee.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Task`, `TaskSet`
//! - **`ga`**: Chromosome encoding, fitness, selection, crossover, mutation,
//!   and the generation loop (`GaRunner`)
//! - **`kpi`**: Load indicators of a finished assignment
//! - **`validation`**: Input integrity checks (empty task list, zero processors,
//!   population size)
//! - **`error`**: `ScheduleError`
//!
//! # Example
//!
//! ```
//! use u_loadbalance::ga::{GaConfig, GaRunner, LoadBalancingProblem};
//! use u_loadbalance::kpi::LoadKpi;
//!
//! let problem = LoadBalancingProblem::from_durations(&[1, 2, 3, 4, 5, 6], 3)?;
//! let config = GaConfig::default()
//!     .with_population_size(20)
//!     .with_max_generations(50)
//!     .with_mutation_rate(0.1)
//!     .with_seed(42);
//!
//! let result = GaRunner::run(&problem, &config)?;
//! let kpi = LoadKpi::calculate(&problem, &result.best);
//! assert_eq!(kpi.max_load, result.max_load);
//! assert!(result.max_load >= kpi.lower_bound);
//! # Ok::<(), u_loadbalance::error::ScheduleError>(())
//! ```
//!
//! # References
//!
//! - Graham (1969), "Bounds on multiprocessing timing anomalies"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod error;
pub mod ga;
pub mod kpi;
pub mod models;
pub mod validation;

pub use error::ScheduleError;
