//! Chromosome encoding of the tunable membership functions.
//!
//! 39 genes, split into 11 contiguous segments, one per tuned label:
//!
//! | genes  | variable           | label        | shape       |
//! |--------|--------------------|--------------|-------------|
//! | 0..4   | `angle`            | left         | trapezoid   |
//! | 4..7   | `angle`            | center       | triangle    |
//! | 7..11  | `angle`            | right        | trapezoid   |
//! | 11..15 | `angular_velocity` | left         | trapezoid   |
//! | 15..18 | `angular_velocity` | zero         | triangle    |
//! | 18..22 | `angular_velocity` | right        | trapezoid   |
//! | 22..26 | `force`            | strong_left  | trapezoid   |
//! | 26..29 | `force`            | light_left   | triangle    |
//! | 29..32 | `force`            | neutral      | triangle    |
//! | 32..35 | `force`            | light_right  | triangle    |
//! | 35..39 | `force`            | strong_right | trapezoid   |
//!
//! Each segment is sorted ascending before it is read as breakpoints.

use rand::Rng;

use crate::controller::{self, PendulumController, ANGLE, ANGULAR_VELOCITY, FORCE};
use crate::error::{FuzzyError, FuzzyResult};
use crate::fuzzy::{LinguisticVariable, MembershipFunction, MembershipKind};
use crate::ga::Individual;

/// Total number of genes.
pub const CHROMOSOME_LEN: usize = 39;

/// One tuned label inside the gene vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub variable: &'static str,
    pub label: &'static str,
    pub kind: MembershipKind,
    pub start: usize,
}

impl Segment {
    const fn new(variable: &'static str, label: &'static str, kind: MembershipKind, start: usize) -> Self {
        Self {
            variable,
            label,
            kind,
            start,
        }
    }

    /// Gene range covered by this segment.
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.start + self.kind.arity()
    }
}

use MembershipKind::{Trapezoidal as Trap, Triangular as Tri};

/// Segment layout, in gene order.
pub const LAYOUT: [Segment; 11] = [
    Segment::new(ANGLE, "left", Trap, 0),
    Segment::new(ANGLE, "center", Tri, 4),
    Segment::new(ANGLE, "right", Trap, 7),
    Segment::new(ANGULAR_VELOCITY, "left", Trap, 11),
    Segment::new(ANGULAR_VELOCITY, "zero", Tri, 15),
    Segment::new(ANGULAR_VELOCITY, "right", Trap, 18),
    Segment::new(FORCE, "strong_left", Trap, 22),
    Segment::new(FORCE, "light_left", Tri, 26),
    Segment::new(FORCE, "neutral", Tri, 29),
    Segment::new(FORCE, "light_right", Tri, 32),
    Segment::new(FORCE, "strong_right", Trap, 35),
];

/// A candidate parameter vector with its fitness (lower is better).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chromosome {
    genes: Vec<f64>,
    fitness: f64,
}

/// The 11 membership functions a chromosome decodes to, in layout order.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedChromosome {
    pub terms: Vec<(Segment, MembershipFunction)>,
}

impl Chromosome {
    /// Wraps a gene vector. Fitness starts at `+inf` (unevaluated).
    pub fn new(genes: Vec<f64>) -> FuzzyResult<Self> {
        if genes.len() != CHROMOSOME_LEN {
            return Err(FuzzyError::InvalidChromosome(format!(
                "expected {CHROMOSOME_LEN} genes, got {}",
                genes.len()
            )));
        }
        Ok(Self {
            genes,
            fitness: f64::INFINITY,
        })
    }

    /// Wraps genes produced by an operator that preserves length.
    pub(crate) fn from_genes(genes: Vec<f64>) -> Self {
        debug_assert_eq!(genes.len(), CHROMOSOME_LEN, "operator changed chromosome length");
        Self {
            genes,
            fitness: f64::INFINITY,
        }
    }

    /// Draws every gene uniformly from `[lo, hi)`.
    pub fn random<R: Rng>(lo: f64, hi: f64, rng: &mut R) -> Self {
        Self::from_genes((0..CHROMOSOME_LEN).map(|_| rng.random_range(lo..hi)).collect())
    }

    /// The hand-authored angle, angular-velocity and force breakpoints.
    pub fn hand_tuned() -> Self {
        #[rustfmt::skip]
        let genes = vec![
            -90.0, -90.0, -45.0, 0.0,     -45.0, 0.0, 45.0,     0.0, 45.0, 90.0, 90.0,
            -100.0, -100.0, -50.0, 0.0,   -50.0, 0.0, 50.0,     0.0, 50.0, 100.0, 100.0,
            -100.0, -100.0, -50.0, -25.0,
            -50.0, -25.0, 0.0,
            -25.0, 0.0, 25.0,
            0.0, 25.0, 50.0,
            25.0, 50.0, 100.0, 100.0,
        ];
        Self::from_genes(genes)
    }

    pub fn genes(&self) -> &[f64] {
        &self.genes
    }

    pub fn genes_mut(&mut self) -> &mut [f64] {
        &mut self.genes
    }

    /// Decodes every segment into a membership function.
    ///
    /// # Errors
    /// [`FuzzyError::InvalidChromosome`] if a segment holds non-finite genes.
    pub fn decode(&self) -> FuzzyResult<DecodedChromosome> {
        let terms = LAYOUT
            .iter()
            .map(|seg| {
                MembershipFunction::from_unsorted(seg.kind, &self.genes[seg.range()])
                    .map(|f| (*seg, f))
                    .map_err(|e| {
                        FuzzyError::InvalidChromosome(format!(
                            "{}.{}: {e}",
                            seg.variable, seg.label
                        ))
                    })
            })
            .collect::<FuzzyResult<Vec<_>>>()?;
        Ok(DecodedChromosome { terms })
    }

    /// Decodes into a two-input controller with the 9-rule table.
    pub fn to_controller(&self) -> FuzzyResult<PendulumController> {
        let decoded = self.decode()?;
        PendulumController::from_variables(
            decoded.variable(ANGLE, controller::angle_universe()?)?,
            decoded.variable(ANGULAR_VELOCITY, controller::angular_velocity_universe()?)?,
            decoded.variable(FORCE, controller::force_universe()?)?,
        )
    }
}

impl DecodedChromosome {
    /// Collects the decoded labels of `name` into a variable over `universe`.
    pub fn variable(
        &self,
        name: &str,
        universe: crate::fuzzy::Universe,
    ) -> FuzzyResult<LinguisticVariable> {
        self.terms
            .iter()
            .filter(|(seg, _)| seg.variable == name)
            .try_fold(LinguisticVariable::new(name, universe), |var, (seg, f)| {
                var.with_term(seg.label, *f)
            })
    }

    /// Membership function of `variable.label`.
    pub fn term(&self, variable: &str, label: &str) -> Option<&MembershipFunction> {
        self.terms
            .iter()
            .find(|(seg, _)| seg.variable == variable && seg.label == label)
            .map(|(_, f)| f)
    }
}

impl Individual for Chromosome {
    type Fitness = f64;

    fn fitness(&self) -> f64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }
}
