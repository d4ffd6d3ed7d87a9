//! Selection strategies for the GA.
//!
//! Selection forms the next population from the evaluated offspring.
//! All strategies assume **minimization** (lower fitness = better), and an
//! individual with worst fitness (`+inf`) loses against any finite one.
//!
//! # References
//!
//! - Miller & Goldberg (1995), "Genetic Algorithms, Tournament Selection,
//!   and the Effects of Noise"
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use super::types::Individual;
use rand::Rng;

/// Selection strategy.
///
/// # Examples
///
/// ```
/// use u_fuzzy::ga::Selection;
///
/// // Tournament with size 3 (moderate selection pressure)
/// let sel = Selection::Tournament(3);
///
/// // Truncation: keep the k best
/// let sel = Selection::Best;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Tournament selection: sample `k` individuals with replacement, keep
    /// the best. Repeated once per selected slot.
    ///
    /// Higher `k` = stronger selection pressure.
    ///
    /// # Complexity
    /// O(k) per selection
    Tournament(usize),

    /// Truncation selection: the `k` lowest-fitness individuals, best first.
    ///
    /// # Complexity
    /// O(n log n) per call
    Best,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(3)
    }
}

impl Selection {
    /// Selects `k` indices from the population.
    ///
    /// Tournament selection may pick the same index several times.
    /// [`Selection::Best`] returns at most `population.len()` distinct indices.
    ///
    /// # Panics
    /// Panics if `population` is empty.
    pub fn select<I: Individual, R: Rng>(
        &self,
        population: &[I],
        k: usize,
        rng: &mut R,
    ) -> Vec<usize> {
        assert!(
            !population.is_empty(),
            "cannot select from empty population"
        );

        match self {
            Selection::Tournament(size) => (0..k)
                .map(|_| tournament(population, *size, rng))
                .collect(),
            Selection::Best => select_best(population, k),
        }
    }
}

/// Indices of the `k` best individuals, best first.
///
/// Ties keep their population order.
pub fn select_best<I: Individual>(population: &[I], k: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..population.len()).collect();
    order.sort_by(|&a, &b| {
        population[a]
            .fitness()
            .partial_cmp(&population[b].fitness())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    order.truncate(k);
    order
}

/// Tournament selection: pick k random individuals, return best.
fn tournament<I: Individual, R: Rng>(population: &[I], k: usize, rng: &mut R) -> usize {
    let k = k.max(1);
    let n = population.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if population[idx].fitness() < population[best_idx].fitness() {
            best_idx = idx;
        }
    }
    best_idx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[derive(Clone)]
    struct TestInd {
        fit: f64,
    }

    impl Individual for TestInd {
        type Fitness = f64;
        fn fitness(&self) -> f64 {
            self.fit
        }
        fn set_fitness(&mut self, f: f64) {
            self.fit = f;
        }
    }

    fn make_population(fitnesses: &[f64]) -> Vec<TestInd> {
        fitnesses.iter().map(|&f| TestInd { fit: f }).collect()
    }

    #[test]
    fn test_tournament_favors_best() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0]);
        let mut rng = create_rng(42);

        let mut counts = [0u32; 4];
        let n = 10000;
        for idx in Selection::Tournament(4).select(&pop, n, &mut rng) {
            counts[idx] += 1;
        }
        // Index 2 (fitness=1.0) should dominate
        let best_count = counts[2];
        assert!(
            best_count > 6000,
            "expected best to be selected >60% of the time, got {best_count}/{n}"
        );
    }

    #[test]
    fn test_tournament_size_1_is_random() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0]);
        let mut rng = create_rng(42);

        let mut counts = [0u32; 4];
        for idx in Selection::Tournament(1).select(&pop, 10000, &mut rng) {
            counts[idx] += 1;
        }
        for &c in &counts {
            assert!(c > 1500, "expected uniform, got counts: {counts:?}");
        }
    }

    #[test]
    fn test_infinite_fitness_loses() {
        let pop = make_population(&[f64::INFINITY, 3.0]);
        let mut rng = create_rng(7);
        let picks = Selection::Tournament(3).select(&pop, 2000, &mut rng);
        let inf_count = picks.iter().filter(|&&i| i == 0).count();
        // Only an all-infinite tournament (p = 1/8) can return index 0
        assert!(inf_count < 400, "infinite fitness chosen {inf_count} times");
    }

    #[test]
    fn test_select_returns_k() {
        let pop = make_population(&[3.0, 2.0, 1.0]);
        let mut rng = create_rng(1);
        assert_eq!(Selection::Tournament(3).select(&pop, 50, &mut rng).len(), 50);
        assert_eq!(Selection::Best.select(&pop, 50, &mut rng).len(), 3);
    }

    #[test]
    fn test_select_best_sorted() {
        let pop = make_population(&[4.0, f64::INFINITY, 1.0, 2.5]);
        assert_eq!(select_best(&pop, 1), vec![2]);
        assert_eq!(select_best(&pop, 4), vec![2, 3, 0, 1]);
    }

    #[test]
    fn test_single_individual() {
        let pop = make_population(&[5.0]);
        let mut rng = create_rng(42);

        assert_eq!(Selection::Tournament(3).select(&pop, 2, &mut rng), vec![0, 0]);
        assert_eq!(Selection::Best.select(&pop, 1, &mut rng), vec![0]);
    }

    #[test]
    fn test_equal_fitness() {
        let pop = make_population(&[5.0, 5.0, 5.0, 5.0]);
        let mut rng = create_rng(42);

        let mut counts = [0u32; 4];
        for idx in Selection::Tournament(2).select(&pop, 10000, &mut rng) {
            counts[idx] += 1;
        }
        for &c in &counts {
            assert!(
                c > 1500,
                "expected roughly uniform with equal fitness, got {counts:?}"
            );
        }
    }

    #[test]
    #[should_panic(expected = "cannot select from empty population")]
    fn test_empty_population_panics() {
        let pop: Vec<TestInd> = vec![];
        let mut rng = create_rng(42);
        Selection::Tournament(3).select(&pop, 1, &mut rng);
    }
}
