//! Quantum state representations for projective collapse
//!
//! This crate provides the state containers and tensor primitives that the
//! collapse operator is built on:
//!
//! - **State vector**: 2^n complex amplitudes
//! - **Density matrix**: 2^n × 2^n row-major matrix
//! - **Unitary propagator**: 2^n × 2^n row-major circuit matrix
//!
//! plus local-operator application per backend and partial trace onto an
//! arbitrary qubit subset. Qubit 0 is the most significant bit of every basis
//! index.
//!
//! # Example
//!
//! ```
//! use qcollapse_state::{Backend, QuantumState, StateVector};
//!
//! let state = QuantumState::from(StateVector::uniform_superposition(2).unwrap());
//! assert_eq!(state.backend(), Backend::StateVector);
//!
//! let rho = state.to_density_matrix().unwrap().unwrap();
//! let marginal = rho.partial_trace(&[1]).unwrap();
//! assert!((marginal.get(0, 0).re - 0.5).abs() < 1e-12);
//! ```

pub mod density_matrix;
pub mod error;
pub mod local_operator;
pub mod partial_trace;
pub mod precision;
pub mod state;
pub mod state_vector;
pub mod unitary_matrix;

pub use density_matrix::DensityMatrix;
pub use error::{Result, StateError};
pub use precision::Precision;
pub use state::{Backend, QuantumState};
pub use state_vector::StateVector;
pub use unitary_matrix::UnitaryMatrix;
