//! Backend-tagged quantum state container

use crate::density_matrix::DensityMatrix;
use crate::error::Result;
use crate::state_vector::StateVector;
use crate::unitary_matrix::UnitaryMatrix;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tensor representation backing a [`QuantumState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    /// Complex amplitude vector of length 2^n
    StateVector,
    /// 2^n × 2^n density matrix
    DensityMatrix,
    /// 2^n × 2^n circuit propagator
    UnitaryMatrix,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Backend::StateVector => "state_vector",
            Backend::DensityMatrix => "density_matrix",
            Backend::UnitaryMatrix => "unitary_matrix",
        };
        f.write_str(name)
    }
}

/// A quantum state in one of the supported backend representations
///
/// Payload shape and qubit count are kept consistent by the constructors of
/// the individual representations.
#[derive(Debug, Clone, PartialEq)]
pub enum QuantumState {
    StateVector(StateVector),
    DensityMatrix(DensityMatrix),
    UnitaryMatrix(UnitaryMatrix),
}

impl QuantumState {
    /// |0...0⟩ (or the identity propagator) on `num_qubits` qubits
    pub fn zero_state(backend: Backend, num_qubits: usize) -> Result<Self> {
        Ok(match backend {
            Backend::StateVector => Self::StateVector(StateVector::new(num_qubits)?),
            Backend::DensityMatrix => Self::DensityMatrix(DensityMatrix::new(num_qubits)?),
            Backend::UnitaryMatrix => Self::UnitaryMatrix(UnitaryMatrix::identity(num_qubits)?),
        })
    }

    pub fn from_state_vector(num_qubits: usize, amplitudes: Vec<Complex64>) -> Result<Self> {
        Ok(Self::StateVector(StateVector::from_amplitudes(
            num_qubits, amplitudes,
        )?))
    }

    pub fn from_density_matrix(num_qubits: usize, matrix: Vec<Complex64>) -> Result<Self> {
        Ok(Self::DensityMatrix(DensityMatrix::from_matrix(
            num_qubits, matrix,
        )?))
    }

    pub fn from_unitary(num_qubits: usize, matrix: Vec<Complex64>) -> Result<Self> {
        Ok(Self::UnitaryMatrix(UnitaryMatrix::from_matrix(
            num_qubits, matrix,
        )?))
    }

    /// Backend tag of this state
    pub fn backend(&self) -> Backend {
        match self {
            Self::StateVector(_) => Backend::StateVector,
            Self::DensityMatrix(_) => Backend::DensityMatrix,
            Self::UnitaryMatrix(_) => Backend::UnitaryMatrix,
        }
    }

    pub fn num_qubits(&self) -> usize {
        match self {
            Self::StateVector(sv) => sv.num_qubits(),
            Self::DensityMatrix(dm) => dm.num_qubits(),
            Self::UnitaryMatrix(u) => u.num_qubits(),
        }
    }

    /// Flat payload: amplitudes, or row-major matrix elements
    pub fn data(&self) -> &[Complex64] {
        match self {
            Self::StateVector(sv) => sv.amplitudes(),
            Self::DensityMatrix(dm) => dm.matrix(),
            Self::UnitaryMatrix(u) => u.matrix(),
        }
    }

    /// Column vector |ψ⟩, state-vector backend only
    pub fn ket(&self) -> Option<&[Complex64]> {
        match self {
            Self::StateVector(sv) => Some(sv.amplitudes()),
            _ => None,
        }
    }

    /// Row vector ⟨ψ|, state-vector backend only
    pub fn bra(&self) -> Option<Vec<Complex64>> {
        match self {
            Self::StateVector(sv) => Some(sv.bra()),
            _ => None,
        }
    }

    /// Density-like matrix: |ψ⟩⟨ψ| or ρ
    ///
    /// Returns `None` for propagators, which carry no probability distribution.
    pub fn to_density_matrix(&self) -> Result<Option<DensityMatrix>> {
        match self {
            Self::StateVector(sv) => Ok(Some(DensityMatrix::from_state_vector(
                sv.num_qubits(),
                sv.amplitudes(),
            )?)),
            Self::DensityMatrix(dm) => Ok(Some(dm.clone())),
            Self::UnitaryMatrix(_) => Ok(None),
        }
    }

    /// Total probability: ‖ψ‖² or Tr(ρ). `None` for propagators.
    pub fn total_probability(&self) -> Option<f64> {
        match self {
            Self::StateVector(sv) => Some(sv.norm().powi(2)),
            Self::DensityMatrix(dm) => Some(dm.trace()),
            Self::UnitaryMatrix(_) => None,
        }
    }

    /// Rescale to unit total probability; propagators are left unchanged
    pub fn normalize(&mut self) {
        match self {
            Self::StateVector(sv) => sv.normalize(),
            Self::DensityMatrix(dm) => dm.normalize(),
            Self::UnitaryMatrix(_) => {}
        }
    }
}

impl From<StateVector> for QuantumState {
    fn from(state: StateVector) -> Self {
        Self::StateVector(state)
    }
}

impl From<DensityMatrix> for QuantumState {
    fn from(state: DensityMatrix) -> Self {
        Self::DensityMatrix(state)
    }
}

impl From<UnitaryMatrix> for QuantumState {
    fn from(state: UnitaryMatrix) -> Self {
        Self::UnitaryMatrix(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::error::StateError;

    #[test]
    fn test_zero_state_per_backend() {
        for backend in [
            Backend::StateVector,
            Backend::DensityMatrix,
            Backend::UnitaryMatrix,
        ] {
            let state = QuantumState::zero_state(backend, 2).unwrap();
            assert_eq!(state.backend(), backend);
            assert_eq!(state.num_qubits(), 2);
        }
    }

    #[test]
    fn test_views() {
        let state = QuantumState::from(StateVector::uniform_superposition(1).unwrap());
        assert_eq!(state.ket().unwrap().len(), 2);
        assert_eq!(state.bra().unwrap().len(), 2);
        assert_relative_eq!(state.total_probability().unwrap(), 1.0, epsilon = 1e-12);

        let rho = state.to_density_matrix().unwrap().unwrap();
        assert_relative_eq!(rho.get(0, 1).re, 0.5, epsilon = 1e-12);

        let u = QuantumState::zero_state(Backend::UnitaryMatrix, 1).unwrap();
        assert!(u.ket().is_none());
        assert!(u.to_density_matrix().unwrap().is_none());
        assert!(u.total_probability().is_none());
    }

    #[test]
    fn test_normalize_density_matrix() {
        let zero = Complex64::new(0.0, 0.0);
        let mut state = QuantumState::from_density_matrix(
            1,
            vec![Complex64::new(0.25, 0.0), zero, zero, zero],
        )
        .unwrap();
        state.normalize();
        assert_relative_eq!(state.total_probability().unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_oversized_density_matrix_is_rejected() {
        assert!(matches!(
            QuantumState::from_density_matrix(64, vec![]),
            Err(StateError::TooManyQubits { num_qubits: 64, .. })
        ));
        assert!(matches!(
            QuantumState::zero_state(Backend::DensityMatrix, 40),
            Err(StateError::TooManyQubits { num_qubits: 40, .. })
        ));
    }

    #[test]
    fn test_backend_display() {
        assert_eq!(Backend::UnitaryMatrix.to_string(), "unitary_matrix");
    }
}
