//! Pure-state amplitude vector

use crate::error::{Result, StateError};
use crate::local_operator::MAX_QUBITS;
use num_complex::Complex64;

/// Quantum state vector
///
/// Amplitudes are indexed with qubit 0 as the most significant bit, so
/// `amplitudes()[0b01]` on two qubits is the amplitude of `|01⟩`.
///
/// # Example
///
/// ```
/// use qcollapse_state::StateVector;
///
/// let state = StateVector::new(2).unwrap();
/// assert_eq!(state.num_qubits(), 2);
/// assert_eq!(state.dimension(), 4);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    /// Number of qubits
    num_qubits: usize,

    /// Amplitudes, length 2^num_qubits
    amplitudes: Vec<Complex64>,
}

impl StateVector {
    /// Create a new state vector initialized to |0...0⟩
    ///
    /// # Errors
    /// Returns error if num_qubits is too large
    pub fn new(num_qubits: usize) -> Result<Self> {
        if num_qubits > MAX_QUBITS {
            return Err(StateError::TooManyQubits {
                num_qubits,
                max_qubits: MAX_QUBITS,
            });
        }

        let mut amplitudes = vec![Complex64::new(0.0, 0.0); 1 << num_qubits];
        amplitudes[0] = Complex64::new(1.0, 0.0);

        Ok(Self {
            num_qubits,
            amplitudes,
        })
    }

    /// Create a state vector from raw amplitude data
    ///
    /// The amplitudes are taken as given; call [`StateVector::normalize`] if needed.
    ///
    /// # Errors
    /// Returns error if the amplitude count is not 2^num_qubits
    pub fn from_amplitudes(num_qubits: usize, amplitudes: Vec<Complex64>) -> Result<Self> {
        if num_qubits > MAX_QUBITS {
            return Err(StateError::TooManyQubits {
                num_qubits,
                max_qubits: MAX_QUBITS,
            });
        }

        let dimension = 1 << num_qubits;
        if amplitudes.len() != dimension {
            return Err(StateError::DimensionMismatch {
                expected: dimension,
                actual: amplitudes.len(),
            });
        }

        Ok(Self {
            num_qubits,
            amplitudes,
        })
    }

    /// Computational basis state |index⟩
    pub fn basis_state(num_qubits: usize, index: usize) -> Result<Self> {
        let mut state = Self::new(num_qubits)?;
        let dimension = state.dimension();
        if index >= dimension {
            return Err(StateError::DimensionMismatch {
                expected: dimension,
                actual: index + 1,
            });
        }
        state.amplitudes[0] = Complex64::new(0.0, 0.0);
        state.amplitudes[index] = Complex64::new(1.0, 0.0);
        Ok(state)
    }

    /// Equal superposition over all 2^n basis states
    pub fn uniform_superposition(num_qubits: usize) -> Result<Self> {
        let mut state = Self::new(num_qubits)?;
        let amplitude = Complex64::new(1.0 / (state.dimension() as f64).sqrt(), 0.0);
        state.amplitudes.fill(amplitude);
        Ok(state)
    }

    /// Get the number of qubits
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Get the state dimension (2^num_qubits)
    #[inline]
    pub fn dimension(&self) -> usize {
        self.amplitudes.len()
    }

    /// Get a reference to the state amplitudes
    #[inline]
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Conjugated amplitudes, the row vector ⟨ψ|
    pub fn bra(&self) -> Vec<Complex64> {
        self.amplitudes.iter().map(|a| a.conj()).collect()
    }

    /// Compute the L2 norm of the state vector
    pub fn norm(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum::<f64>().sqrt()
    }

    /// Normalize the state vector
    ///
    /// Scales all amplitudes so that the norm equals 1. Zero vectors are
    /// left untouched.
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            let inv_norm = 1.0 / norm;
            for amplitude in self.amplitudes.iter_mut() {
                *amplitude *= inv_norm;
            }
        }
    }

    /// Check if the state is normalized (|norm - 1| < epsilon)
    pub fn is_normalized(&self, epsilon: f64) -> bool {
        (self.norm() - 1.0).abs() < epsilon
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_initial_state() {
        let state = StateVector::new(3).unwrap();
        let amplitudes = state.amplitudes();

        assert_eq!(amplitudes[0], Complex64::new(1.0, 0.0));
        for amplitude in &amplitudes[1..] {
            assert_eq!(*amplitude, Complex64::new(0.0, 0.0));
        }
    }

    #[test]
    fn test_normalize() {
        let amplitudes = vec![Complex64::new(1.0, 0.0); 4];

        let mut state = StateVector::from_amplitudes(2, amplitudes).unwrap();
        state.normalize();

        assert_relative_eq!(state.norm(), 1.0, epsilon = 1e-10);
        assert_relative_eq!(state.amplitudes()[0].norm(), 0.5, epsilon = 1e-10);
    }

    #[test]
    fn test_basis_and_superposition() {
        let state = StateVector::basis_state(2, 3).unwrap();
        assert_eq!(state.amplitudes()[3], Complex64::new(1.0, 0.0));
        assert_eq!(state.amplitudes()[0], Complex64::new(0.0, 0.0));
        assert!(StateVector::basis_state(2, 4).is_err());

        let plus = StateVector::uniform_superposition(2).unwrap();
        assert!(plus.is_normalized(1e-12));
        assert_relative_eq!(plus.amplitudes()[2].re, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_bra_is_conjugate() {
        let amplitudes = vec![Complex64::new(0.6, 0.0), Complex64::new(0.0, 0.8)];
        let state = StateVector::from_amplitudes(1, amplitudes).unwrap();
        assert_eq!(state.bra()[1], Complex64::new(0.0, -0.8));
    }

    #[test]
    fn test_dimension_mismatch() {
        let amplitudes = vec![Complex64::new(1.0, 0.0)];
        let result = StateVector::from_amplitudes(2, amplitudes);
        assert_eq!(
            result,
            Err(StateError::DimensionMismatch {
                expected: 4,
                actual: 1
            })
        );
    }

    #[test]
    fn test_too_many_qubits() {
        assert!(matches!(
            StateVector::new(MAX_QUBITS + 1),
            Err(StateError::TooManyQubits { .. })
        ));
    }
}
