//! Density matrix representation for mixed quantum states
//!
//! A density matrix ρ is a positive semi-definite, Hermitian matrix with Tr(ρ) = 1.
//! For pure states: ρ = |ψ⟩⟨ψ|
//! For mixed states: ρ = Σᵢ pᵢ |ψᵢ⟩⟨ψᵢ|
//!
//! # Example
//!
//! ```
//! use qcollapse_state::DensityMatrix;
//!
//! let dm = DensityMatrix::maximally_mixed(1).unwrap();
//! assert!((dm.purity() - 0.5).abs() < 1e-10);
//! ```

use crate::error::{Result, StateError};
use crate::local_operator::MAX_QUBITS;
use crate::partial_trace;
use num_complex::Complex64;
use std::fmt;

/// Density matrix representation of a quantum state
///
/// Stores the full 2^n × 2^n density matrix in row-major order.
/// Memory usage: O(4^n) complex numbers.
#[derive(Clone, PartialEq)]
pub struct DensityMatrix {
    /// Number of qubits
    num_qubits: usize,

    /// Dimension (2^num_qubits)
    dimension: usize,

    /// Density matrix elements in row-major order
    /// Length: dimension²
    matrix: Vec<Complex64>,
}

impl DensityMatrix {
    /// Create a new density matrix initialized to |0...0⟩⟨0...0|
    ///
    /// # Errors
    /// Returns error if num_qubits is too large for memory
    pub fn new(num_qubits: usize) -> Result<Self> {
        let dimension = checked_dimension(num_qubits)?;

        let mut matrix = vec![Complex64::new(0.0, 0.0); dimension * dimension];
        matrix[0] = Complex64::new(1.0, 0.0);

        Ok(Self {
            num_qubits,
            dimension,
            matrix,
        })
    }

    /// Wrap a row-major matrix of side 2^num_qubits
    pub fn from_matrix(num_qubits: usize, matrix: Vec<Complex64>) -> Result<Self> {
        let dimension = checked_dimension(num_qubits)?;

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

    /// Create density matrix from a pure state vector
    ///
    /// Computes ρ = |ψ⟩⟨ψ| from amplitudes
    pub fn from_state_vector(num_qubits: usize, amplitudes: &[Complex64]) -> Result<Self> {
        let dimension = checked_dimension(num_qubits)?;

        if amplitudes.len() != dimension {
            return Err(StateError::DimensionMismatch {
                expected: dimension,
                actual: amplitudes.len(),
            });
        }

        let mut matrix = vec![Complex64::new(0.0, 0.0); dimension * dimension];

        // ρᵢⱼ = ψᵢ ψⱼ*
        for i in 0..dimension {
            for j in 0..dimension {
                matrix[i * dimension + j] = amplitudes[i] * amplitudes[j].conj();
            }
        }

        Ok(Self {
            num_qubits,
            dimension,
            matrix,
        })
    }

    /// Create maximally mixed state: ρ = I/2^n
    pub fn maximally_mixed(num_qubits: usize) -> Result<Self> {
        let dimension = checked_dimension(num_qubits)?;
        let mut matrix = vec![Complex64::new(0.0, 0.0); dimension * dimension];

        let value = Complex64::new(1.0 / dimension as f64, 0.0);
        for i in 0..dimension {
            matrix[i * dimension + i] = value;
        }

        Ok(Self {
            num_qubits,
            dimension,
            matrix,
        })
    }

    /// Get number of qubits
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Get matrix dimension (2^num_qubits)
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Get a matrix element ρᵢⱼ
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        self.matrix[row * self.dimension + col]
    }

    /// Get reference to the full matrix data
    pub fn matrix(&self) -> &[Complex64] {
        &self.matrix
    }

    /// Consume the density matrix and return its row-major elements
    pub fn into_matrix(self) -> Vec<Complex64> {
        self.matrix
    }

    /// Calculate the purity: Tr(ρ²)
    ///
    /// Returns 1 for pure states, < 1 for mixed states.
    pub fn purity(&self) -> f64 {
        let dim = self.dimension;
        let mut trace = Complex64::new(0.0, 0.0);

        for i in 0..dim {
            for j in 0..dim {
                trace += self.get(i, j) * self.get(j, i);
            }
        }

        trace.re
    }

    /// Calculate trace: Tr(ρ)
    pub fn trace(&self) -> f64 {
        let mut tr = Complex64::new(0.0, 0.0);
        for i in 0..self.dimension {
            tr += self.get(i, i);
        }
        tr.re
    }

    /// Rescale so that Tr(ρ) = 1
    ///
    /// Matrices with a zero or negative trace are left untouched.
    pub fn normalize(&mut self) {
        let trace = self.trace();
        if trace > 0.0 {
            let inv = 1.0 / trace;
            for elem in self.matrix.iter_mut() {
                *elem *= inv;
            }
        }
    }

    /// Check if the density matrix is valid (Hermitian, positive diagonal, trace 1)
    pub fn is_valid(&self, tolerance: f64) -> bool {
        if (self.trace() - 1.0).abs() > tolerance {
            return false;
        }

        for i in 0..self.dimension {
            for j in (i + 1)..self.dimension {
                let diff = (self.get(i, j) - self.get(j, i).conj()).norm();
                if diff > tolerance {
                    return false;
                }
            }
        }

        (0..self.dimension).all(|i| self.get(i, i).re >= -tolerance)
    }

    /// Reduced density matrix over the `kept` qubits
    ///
    /// See [`partial_trace::reduce`].
    pub fn partial_trace(&self, kept: &[usize]) -> Result<Self> {
        partial_trace::reduce(self, kept)
    }
}

/// Side of the matrix for `num_qubits`, bounded so that dimension² stays addressable
fn checked_dimension(num_qubits: usize) -> Result<usize> {
    if num_qubits > MAX_QUBITS / 2 {
        return Err(StateError::TooManyQubits {
            num_qubits,
            max_qubits: MAX_QUBITS / 2,
        });
    }
    Ok(1usize << num_qubits)
}

impl fmt::Debug for DensityMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DensityMatrix {{ qubits: {}, dim: {}, trace: {:.4}, purity: {:.4} }}",
            self.num_qubits,
            self.dimension,
            self.trace(),
            self.purity()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    #[test]
    fn test_new_density_matrix() {
        let dm = DensityMatrix::new(2).unwrap();
        assert_eq!(dm.num_qubits(), 2);
        assert_eq!(dm.dimension(), 4);
        assert!((dm.trace() - 1.0).abs() < TOL);
        assert!((dm.purity() - 1.0).abs() < TOL);
    }

    #[test]
    fn test_from_state_vector() {
        let amplitudes = vec![
            Complex64::new(1.0 / 2.0_f64.sqrt(), 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(1.0 / 2.0_f64.sqrt(), 0.0),
        ];

        let dm = DensityMatrix::from_state_vector(2, &amplitudes).unwrap();
        assert!((dm.purity() - 1.0).abs() < TOL);
        assert!(dm.is_valid(TOL));
    }

    #[test]
    fn test_maximally_mixed() {
        let dm = DensityMatrix::maximally_mixed(2).unwrap();
        assert!((dm.trace() - 1.0).abs() < TOL);
        assert!((dm.purity() - 0.25).abs() < TOL);
    }

    #[test]
    fn test_normalize() {
        let matrix = vec![
            Complex64::new(0.2, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.2, 0.0),
        ];
        let mut dm = DensityMatrix::from_matrix(1, matrix).unwrap();
        dm.normalize();
        assert!((dm.trace() - 1.0).abs() < TOL);
        assert!((dm.get(0, 0).re - 0.5).abs() < TOL);
    }

    #[test]
    fn test_normalize_tiny_trace() {
        let zero = Complex64::new(0.0, 0.0);
        let matrix = vec![zero, zero, zero, Complex64::new(1e-15, 0.0)];
        let mut dm = DensityMatrix::from_matrix(1, matrix).unwrap();
        dm.normalize();
        assert!((dm.trace() - 1.0).abs() < TOL);
        assert!((dm.get(1, 1).re - 1.0).abs() < TOL);
    }

    #[test]
    fn test_normalize_zero_trace_unchanged() {
        let mut dm = DensityMatrix::from_matrix(1, vec![Complex64::new(0.0, 0.0); 4]).unwrap();
        dm.normalize();
        assert_eq!(dm.trace(), 0.0);
    }

    #[test]
    fn test_too_many_qubits() {
        let expected = StateError::TooManyQubits {
            num_qubits: 64,
            max_qubits: MAX_QUBITS / 2,
        };
        assert_eq!(DensityMatrix::new(64).unwrap_err(), expected);
        assert_eq!(DensityMatrix::from_matrix(64, vec![]).unwrap_err(), expected);
        assert_eq!(DensityMatrix::from_state_vector(64, &[]).unwrap_err(), expected);
        assert_eq!(DensityMatrix::maximally_mixed(64).unwrap_err(), expected);
        assert!(matches!(
            DensityMatrix::from_matrix(MAX_QUBITS / 2 + 1, vec![]),
            Err(StateError::TooManyQubits { .. })
        ));
    }

    #[test]
    fn test_from_matrix_dimension_mismatch() {
        let result = DensityMatrix::from_matrix(2, vec![Complex64::new(1.0, 0.0); 4]);
        assert_eq!(
            result.unwrap_err(),
            StateError::DimensionMismatch {
                expected: 16,
                actual: 4
            }
        );
    }
}
