//! Unitary propagator of a circuit
//!
//! A propagator `U` maps input states to output states, `|ψ_out⟩ = U |ψ_in⟩`.
//! It carries no probability distribution of its own. Operators applied to it
//! compose on the left, so a non-unitary operator (such as a projector) leaves a
//! matrix that is tagged as a propagator but no longer unitary.

use crate::error::{Result, StateError};
use crate::local_operator::MAX_QUBITS;
use num_complex::Complex64;

/// Row-major 2^n × 2^n propagator matrix
#[derive(Debug, Clone, PartialEq)]
pub struct UnitaryMatrix {
    num_qubits: usize,
    dimension: usize,
    matrix: Vec<Complex64>,
}

impl UnitaryMatrix {
    /// Identity propagator on `num_qubits` qubits
    pub fn identity(num_qubits: usize) -> Result<Self> {
        if num_qubits > MAX_QUBITS / 2 {
            return Err(StateError::TooManyQubits {
                num_qubits,
                max_qubits: MAX_QUBITS / 2,
            });
        }

        let dimension = 1usize << num_qubits;
        let mut matrix = vec![Complex64::new(0.0, 0.0); dimension * dimension];
        for i in 0..dimension {
            matrix[i * dimension + i] = Complex64::new(1.0, 0.0);
        }

        Ok(Self {
            num_qubits,
            dimension,
            matrix,
        })
    }

    /// Wrap a row-major matrix of side 2^num_qubits without checking unitarity
    pub fn from_matrix(num_qubits: usize, matrix: Vec<Complex64>) -> Result<Self> {
        if num_qubits > MAX_QUBITS / 2 {
            return Err(StateError::TooManyQubits {
                num_qubits,
                max_qubits: MAX_QUBITS / 2,
            });
        }

        let dimension = 1usize << num_qubits;
        if matrix.len() != dimension * dimension {
            return Err(StateError::DimensionMismatch {
                expected: dimension * dimension,
                actual: matrix.len(),
            });
        }

        Ok(Self {
            num_qubits,
            dimension,
            matrix,
        })
    }

    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        self.matrix[row * self.dimension + col]
    }

    pub fn matrix(&self) -> &[Complex64] {
        &self.matrix
    }

    /// Check U†U = I within `tolerance`
    pub fn is_unitary(&self, tolerance: f64) -> bool {
        let dim = self.dimension;
        for i in 0..dim {
            for j in 0..dim {
                let mut sum = Complex64::new(0.0, 0.0);
                for k in 0..dim {
                    sum += self.get(k, i).conj() * self.get(k, j);
                }
                let expected = if i == j { 1.0 } else { 0.0 };
                if (sum - Complex64::new(expected, 0.0)).norm() > tolerance {
                    return false;
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_is_unitary() {
        let u = UnitaryMatrix::identity(2).unwrap();
        assert_eq!(u.dimension(), 4);
        assert!(u.is_unitary(1e-12));
    }

    #[test]
    fn test_projector_is_not_unitary() {
        let zero = Complex64::new(0.0, 0.0);
        let one = Complex64::new(1.0, 0.0);
        let u = UnitaryMatrix::from_matrix(1, vec![one, zero, zero, zero]).unwrap();
        assert!(!u.is_unitary(1e-12));
    }

    #[test]
    fn test_from_matrix_dimension_mismatch() {
        assert!(UnitaryMatrix::from_matrix(1, vec![Complex64::new(1.0, 0.0); 3]).is_err());
    }
}
