//! Error types for the collapse operator

use qcollapse_state::{Backend, StateError};
use thiserror::Error;

/// Errors raised while configuring or applying a collapse
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CollapseError {
    /// Measurement basis other than Z
    #[error("unsupported measurement basis '{0}', only the computational (z) basis is implemented")]
    UnsupportedBasis(String),

    /// A forced outcome is required but none was configured
    #[error("desired_result cannot be None in the {backend} backend")]
    OutcomeRequired { backend: Backend },

    /// The forced outcome has (numerically) zero probability
    #[error("it is infeasible for the state in qubits {qubits:?} to collapse to state |{bits}>")]
    InfeasibleOutcome { qubits: Vec<usize>, bits: String },

    /// The forced outcome needs more bits than there are measured qubits
    #[error("the desired result {outcome} is too large for {num_qubits} measured qubit(s)")]
    OutcomeTooLarge { outcome: u64, num_qubits: usize },

    /// A desired result string that is not a base-2 number
    #[error("invalid desired result bitstring '{0}'")]
    InvalidBitstring(String),

    /// Measured qubit outside the register
    #[error("invalid qubit index {index} for {num_qubits}-qubit state")]
    InvalidQubitIndex { index: usize, num_qubits: usize },

    /// Selecting all qubits without knowing how many there are
    #[error("the total number of qubits is required to select all qubits")]
    MissingQubitCount,

    /// No qubits to measure
    #[error("at least one qubit must be selected for collapse")]
    EmptySelection,

    #[error(transparent)]
    State(#[from] StateError),
}

/// Coarse classification of [`CollapseError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Rejected at construction
    Configuration,
    /// A required input is missing for this backend
    Precondition,
    /// Physically unreachable outcome
    Infeasible,
    /// Outcome does not fit the measured register
    Range,
    /// Malformed caller input
    Input,
    /// Failure inside a state primitive
    State,
}

impl CollapseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CollapseError::UnsupportedBasis(_) => ErrorKind::Configuration,
            CollapseError::OutcomeRequired { .. } => ErrorKind::Precondition,
            CollapseError::InfeasibleOutcome { .. } => ErrorKind::Infeasible,
            CollapseError::OutcomeTooLarge { .. } => ErrorKind::Range,
            CollapseError::InvalidBitstring(_)
            | CollapseError::InvalidQubitIndex { .. }
            | CollapseError::MissingQubitCount
            | CollapseError::EmptySelection => ErrorKind::Input,
            CollapseError::State(_) => ErrorKind::State,
        }
    }
}

/// Result type for collapse operations
pub type Result<T> = std::result::Result<T, CollapseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infeasible_message_names_qubits_and_bits() {
        let err = CollapseError::InfeasibleOutcome {
            qubits: vec![0, 2],
            bits: "01".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "it is infeasible for the state in qubits [0, 2] to collapse to state |01>"
        );
        assert_eq!(err.kind(), ErrorKind::Infeasible);
    }

    #[test]
    fn test_state_error_is_wrapped() {
        let err: CollapseError = StateError::InvalidDimension { dimension: 3 }.into();
        assert_eq!(err.kind(), ErrorKind::State);
        assert_eq!(
            err.to_string(),
            "Invalid state dimension 3, expected power of 2"
        );
    }

    #[test]
    fn test_outcome_required_names_backend() {
        let err = CollapseError::OutcomeRequired {
            backend: Backend::UnitaryMatrix,
        };
        assert!(err.to_string().contains("unitary_matrix"));
        assert_eq!(err.kind(), ErrorKind::Precondition);
    }
}
