//! Computational-basis projectors

use crate::outcome::ResolvedOutcome;
use num_complex::Complex64;

/// Diagonal 0/1 projector `|o⟩⟨o|` over the measured qubits
///
/// Built fresh for every collapse from the resolved outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct Projector {
    dimension: usize,
    outcome: usize,
    matrix: Vec<Complex64>,
}

impl Projector {
    /// Projector of side `2^num_measured` onto `outcome`
    pub fn new(outcome: &ResolvedOutcome, num_measured: usize) -> Self {
        let dimension = 1usize << num_measured;
        let index = outcome.index();
        let mut matrix = vec![Complex64::new(0.0, 0.0); dimension * dimension];
        matrix[index * dimension + index] = Complex64::new(1.0, 0.0);

        Self {
            dimension,
            outcome: index,
            matrix,
        }
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    #[inline]
    pub fn outcome(&self) -> usize {
        self.outcome
    }

    /// Row-major matrix elements
    pub fn matrix(&self) -> &[Complex64] {
        &self.matrix
    }
}
