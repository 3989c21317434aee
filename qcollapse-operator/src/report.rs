//! Observable side products of a collapse: the verbose report and warnings

use serde::{Deserialize, Serialize};
use std::fmt;

/// Verbose summary of a probabilistic collapse
///
/// Displays as `qubits [0, 1] collapse to the state |01> with probability 0.25`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollapseReport {
    pub qubits: Vec<usize>,
    pub bits: String,
    pub probability: f64,
}

impl fmt::Display for CollapseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "qubits {:?} collapse to the state |{}> with probability {}",
            self.qubits, self.bits, self.probability
        )
    }
}

/// Non-fatal conditions raised during a collapse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollapseWarning {
    /// A projector was folded into a propagator
    NonUnitaryPropagator,
}

impl fmt::Display for CollapseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollapseWarning::NonUnitaryPropagator => f.write_str(
                "the unitary matrix of a circuit containing a collapse is no longer unitary",
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_line() {
        let report = CollapseReport {
            qubits: vec![0, 1],
            bits: "01".to_string(),
            probability: 0.25,
        };
        assert_eq!(
            report.to_string(),
            "qubits [0, 1] collapse to the state |01> with probability 0.25"
        );
    }

    #[test]
    fn test_report_json() {
        let report = CollapseReport {
            qubits: vec![2],
            bits: "1".to_string(),
            probability: 0.5,
        };
        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(json, r#"{"qubits":[2],"bits":"1","probability":0.5}"#);
        let back: CollapseReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}
