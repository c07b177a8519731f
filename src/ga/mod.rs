//! GA-based load balancing.
//!
//! A generational genetic algorithm for `P||C_max`: assign tasks to
//! identical processors so the most loaded processor finishes earliest.
//!
//! # Encoding
//!
//! One gene per task holding its processor index (see [`Chromosome`]).
//!
//! # Pipeline (per generation)
//!
//! population → fitness → parent pairs → offspring → mutated offspring → next population
//!
//! # Reference
//! Hou, Ansari & Ren (1994), "A genetic algorithm for multiprocessor scheduling"

mod chromosome;
mod problem;
mod runner;
mod selection;

pub use chromosome::{Chromosome, point_mutation, single_point_crossover, splice};
pub use problem::LoadBalancingProblem;
pub use runner::{GaConfig, GaResult, GaRunner, GenerationStats};
pub use selection::{RouletteWheel, select_parents};
