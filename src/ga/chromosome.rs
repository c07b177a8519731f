//! Processor-assignment chromosome.
//!
//! # Encoding
//!
//! One gene per task, in task order. Gene `i` is the index of the processor
//! that runs task `i`, always in `[0, P)`.
//!
//! ```text
//! tasks:      [4, 4, 4, 4]
//! chromosome: [0, 1, 1, 0]   → P0 = 8, P1 = 8
//! ```
//!
//! # Reference
//! Goldberg (1989), "Genetic Algorithms in Search, Optimization and Machine Learning", Ch. 1

use std::ops::Index;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Task-to-processor assignment vector.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Chromosome {
    genes: Vec<usize>,
}

impl Chromosome {
    /// Wraps an explicit gene vector.
    pub fn new(genes: Vec<usize>) -> Self {
        Self { genes }
    }

    /// Creates a random chromosome: each gene uniform in `[0, processors)`.
    ///
    /// # Panics
    /// If `processors` is 0 and `task_count` is non-zero (empty range).
    pub fn random<R: Rng>(task_count: usize, processors: usize, rng: &mut R) -> Self {
        let genes = (0..task_count)
            .map(|_| rng.random_range(0..processors))
            .collect();
        Self { genes }
    }

    /// Processor index per task.
    pub fn genes(&self) -> &[usize] {
        &self.genes
    }

    /// Consumes the chromosome, returning its genes.
    pub fn into_genes(self) -> Vec<usize> {
        self.genes
    }

    /// Number of genes (`T`).
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Whether the chromosome has no genes.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Whether every gene is a valid processor index and the length matches.
    pub fn is_valid(&self, task_count: usize, processors: usize) -> bool {
        self.genes.len() == task_count && self.genes.iter().all(|&p| p < processors)
    }
}

impl Index<usize> for Chromosome {
    type Output = usize;

    fn index(&self, index: usize) -> &usize {
        &self.genes[index]
    }
}

impl From<Vec<usize>> for Chromosome {
    fn from(genes: Vec<usize>) -> Self {
        Self::new(genes)
    }
}

// ======================== Crossover operators ========================

/// Single-point crossover.
///
/// Draws the cut point uniformly from `[1, T-1]` and splices the parents
/// (see [`splice`]). Parents are not modified.
///
/// With fewer than two genes there is no interior cut point; the parents
/// are passed through unchanged as the two offspring.
pub fn single_point_crossover<R: Rng>(
    p1: &Chromosome,
    p2: &Chromosome,
    rng: &mut R,
) -> (Chromosome, Chromosome) {
    let len = p1.len().min(p2.len());
    if len < 2 {
        return (p1.clone(), p2.clone());
    }
    let point = rng.random_range(1..len);
    splice(p1, p2, point)
}

/// Splices two parents at `point`.
///
/// `c1 = p1[..point] ++ p2[point..]`, `c2 = p2[..point] ++ p1[point..]`.
/// `point` is clamped to the parents' common length.
pub fn splice(p1: &Chromosome, p2: &Chromosome, point: usize) -> (Chromosome, Chromosome) {
    let point = point.min(p1.len()).min(p2.len());
    let c1: Vec<usize> = p1.genes[..point]
        .iter()
        .chain(&p2.genes[point..])
        .copied()
        .collect();
    let c2: Vec<usize> = p2.genes[..point]
        .iter()
        .chain(&p1.genes[point..])
        .copied()
        .collect();
    (Chromosome::new(c1), Chromosome::new(c2))
}

// ======================== Mutation operators ========================

/// Point mutation: with probability `rate`, redraws one random gene.
///
/// The new processor is uniform in `[0, processors)` and may equal the old
/// one. At most one gene changes per call. `rate` is compared against a
/// uniform draw from `[0, 1)`, so values `<= 0` never mutate and values
/// `>= 1` always do.
pub fn point_mutation<R: Rng>(
    mut chromosome: Chromosome,
    rate: f64,
    processors: usize,
    rng: &mut R,
) -> Chromosome {
    if chromosome.is_empty() || processors == 0 {
        return chromosome;
    }
    if rng.random::<f64>() < rate {
        let idx = rng.random_range(0..chromosome.genes.len());
        chromosome.genes[idx] = rng.random_range(0..processors);
    }
    chromosome
}
