//! Fitness-proportional parent selection.
//!
//! Each member is drawn with weight `fitness + 1`, so zero-fitness members
//! keep a non-zero chance and the weight sum is never zero.
//!
//! # Reference
//! Holland (1975), "Adaptation in Natural and Artificial Systems" (roulette wheel)

use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;

use super::Chromosome;
use crate::error::ScheduleError;

/// Roulette wheel over a population with its parallel fitness vector.
#[derive(Debug, Clone)]
pub struct RouletteWheel {
    index: WeightedIndex<u64>,
}

impl RouletteWheel {
    /// Builds the wheel with weights `fitness + 1`.
    ///
    /// Fails on an empty fitness vector or when the weights overflow `u64`.
    pub fn new(fitness: &[u64]) -> Result<Self, ScheduleError> {
        let weights = fitness
            .iter()
            .map(|&f| f.checked_add(1))
            .collect::<Option<Vec<u64>>>()
            .ok_or_else(|| ScheduleError::Selection("fitness weight overflows u64".into()))?;
        let index =
            WeightedIndex::new(&weights).map_err(|e| ScheduleError::Selection(e.to_string()))?;
        Ok(Self { index })
    }

    /// Draws one population index.
    pub fn spin<R: Rng>(&self, rng: &mut R) -> usize {
        self.index.sample(rng)
    }

    /// Draws two parents with replacement, returning owned copies.
    pub fn select_pair<R: Rng>(
        &self,
        population: &[Chromosome],
        rng: &mut R,
    ) -> (Chromosome, Chromosome) {
        let first = self.spin(rng);
        let second = self.spin(rng);
        (population[first].clone(), population[second].clone())
    }
}

/// Draws two parents from `population` weighted by `fitness + 1`.
///
/// `fitness` must be parallel to `population`. Builds a fresh wheel on each
/// call; the generation loop reuses one [`RouletteWheel`] per generation.
pub fn select_parents<R: Rng>(
    population: &[Chromosome],
    fitness: &[u64],
    rng: &mut R,
) -> Result<(Chromosome, Chromosome), ScheduleError> {
    if population.len() != fitness.len() {
        return Err(ScheduleError::Selection(format!(
            "population has {} members but {} fitness values",
            population.len(),
            fitness.len()
        )));
    }
    let wheel = RouletteWheel::new(fitness)?;
    Ok(wheel.select_pair(population, rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn population() -> Vec<Chromosome> {
        vec![
            Chromosome::new(vec![0, 0]),
            Chromosome::new(vec![0, 1]),
            Chromosome::new(vec![1, 1]),
        ]
    }

    #[test]
    fn test_select_returns_members() {
        let pop = population();
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..50 {
            let (a, b) = select_parents(&pop, &[0, 5, 0], &mut rng).unwrap();
            assert!(pop.contains(&a));
            assert!(pop.contains(&b));
        }
    }

    #[test]
    fn test_all_zero_fitness_still_samples() {
        let pop = population();
        let wheel = RouletteWheel::new(&[0, 0, 0]).unwrap();
        let mut rng = SmallRng::seed_from_u64(42);
        let mut seen = [false; 3];
        for _ in 0..300 {
            seen[wheel.spin(&mut rng)] = true;
        }
        assert_eq!(seen, [true; 3]);
        let (a, _) = wheel.select_pair(&pop, &mut rng);
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn test_bias_towards_fitter() {
        let wheel = RouletteWheel::new(&[0, 99, 0]).unwrap();
        let mut rng = SmallRng::seed_from_u64(42);
        let hits = (0..1000).filter(|_| wheel.spin(&mut rng) == 1).count();
        // Expected share 100/102
        assert!(hits > 900, "fit member drawn only {hits} times");
    }

    #[test]
    fn test_length_mismatch() {
        let pop = population();
        let mut rng = SmallRng::seed_from_u64(42);
        let err = select_parents(&pop, &[1, 2], &mut rng).unwrap_err();
        assert!(matches!(err, ScheduleError::Selection(_)));
    }

    #[test]
    fn test_weight_overflow() {
        let err = RouletteWheel::new(&[u64::MAX]).unwrap_err();
        assert!(matches!(err, ScheduleError::Selection(_)));
        let err = RouletteWheel::new(&[u64::MAX - 1, u64::MAX - 1]).unwrap_err();
        assert!(matches!(err, ScheduleError::Selection(_)));
    }

    #[test]
    fn test_empty_population() {
        assert!(RouletteWheel::new(&[]).is_err());
    }
}
