//! Error types for quantum state operations

use thiserror::Error;

/// Errors that can occur while building or transforming quantum states
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StateError {
    /// Invalid qubit index
    #[error("Invalid qubit index {index} for {num_qubits}-qubit state")]
    InvalidQubitIndex { index: usize, num_qubits: usize },

    /// The same qubit appears twice in an operator's target list
    #[error("Qubit {index} appears more than once in the target list")]
    DuplicateQubit { index: usize },

    /// Invalid state dimension
    #[error("Invalid state dimension {dimension}, expected power of 2")]
    InvalidDimension { dimension: usize },

    /// State with no probability mass where a distribution is required
    #[error("State cannot be normalized, total probability = {norm}")]
    NotNormalized { norm: f64 },

    /// Dimension mismatch
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Too many qubits to allocate a dense payload
    #[error("{num_qubits} qubits exceed the supported maximum of {max_qubits}")]
    TooManyQubits { num_qubits: usize, max_qubits: usize },
}

/// Result type for state operations
pub type Result<T> = std::result::Result<T, StateError>;
