//! Measurement basis selection

use crate::error::{CollapseError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Basis a collapse projects onto
///
/// Only the computational basis exists today; any other token is rejected when
/// the operator is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MeasureBasis {
    /// Computational (Pauli-Z eigen) basis
    #[default]
    Z,
}

impl MeasureBasis {
    /// Parse a basis token: `z`, `Z`, `computational_basis` or `computational basis`
    pub fn parse(token: &str) -> Result<Self> {
        match token.trim() {
            "z" | "Z" | "computational_basis" | "computational basis" => Ok(MeasureBasis::Z),
            other => Err(CollapseError::UnsupportedBasis(other.to_string())),
        }
    }
}

impl FromStr for MeasureBasis {
    type Err = CollapseError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for MeasureBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeasureBasis::Z => f.write_str("z"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepted_tokens() {
        for token in ["z", "Z", "computational_basis", "computational basis"] {
            assert_eq!(MeasureBasis::parse(token).unwrap(), MeasureBasis::Z);
        }
    }

    #[test]
    fn test_rejected_tokens() {
        for token in ["x", "y", "bell", ""] {
            let err = token.parse::<MeasureBasis>().unwrap_err();
            assert_eq!(err, CollapseError::UnsupportedBasis(token.to_string()));
        }
    }
}
