//! Desired outcomes and their resolution against a measured register

use crate::error::{CollapseError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A caller-forced measurement outcome
///
/// Either the integer value of the outcome, or its base-2 rendering where the
/// leftmost digit belongs to the lowest-indexed measured qubit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DesiredOutcome {
    Index(u64),
    Bits(String),
}

impl DesiredOutcome {
    /// Integer value of the outcome
    ///
    /// # Errors
    /// [`CollapseError::InvalidBitstring`] if a bitstring is empty, holds
    /// anything but `0`/`1`, or does not fit in 64 bits.
    pub fn value(&self) -> Result<u64> {
        match self {
            DesiredOutcome::Index(value) => Ok(*value),
            DesiredOutcome::Bits(bits) => {
                let valid = !bits.is_empty() && bits.bytes().all(|b| b == b'0' || b == b'1');
                if !valid {
                    return Err(CollapseError::InvalidBitstring(bits.clone()));
                }
                u64::from_str_radix(bits, 2)
                    .map_err(|_| CollapseError::InvalidBitstring(bits.clone()))
            }
        }
    }
}

impl From<u64> for DesiredOutcome {
    fn from(value: u64) -> Self {
        DesiredOutcome::Index(value)
    }
}

impl From<&str> for DesiredOutcome {
    fn from(bits: &str) -> Self {
        DesiredOutcome::Bits(bits.to_string())
    }
}

impl From<String> for DesiredOutcome {
    fn from(bits: String) -> Self {
        DesiredOutcome::Bits(bits)
    }
}

impl fmt::Display for DesiredOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DesiredOutcome::Index(value) => write!(f, "{}", value),
            DesiredOutcome::Bits(bits) => f.write_str(bits),
        }
    }
}

/// An outcome checked against the number of measured qubits
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedOutcome {
    value: u64,
    bits: String,
}

impl ResolvedOutcome {
    /// Check that `value` fits in `num_measured` bits and render it
    ///
    /// # Example
    /// ```
    /// use qcollapse_operator::ResolvedOutcome;
    ///
    /// let outcome = ResolvedOutcome::new(1, 3).unwrap();
    /// assert_eq!(outcome.bits(), "001");
    /// assert!(ResolvedOutcome::new(5, 1).is_err());
    /// ```
    pub fn new(value: u64, num_measured: usize) -> Result<Self> {
        let needed = (u64::BITS - value.leading_zeros()) as usize;
        if needed > num_measured {
            return Err(CollapseError::OutcomeTooLarge {
                outcome: value,
                num_qubits: num_measured,
            });
        }

        Ok(Self {
            value,
            bits: format!("{:0width$b}", value, width = num_measured),
        })
    }

    #[inline]
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Index into a marginal probability vector or projector
    #[inline]
    pub fn index(&self) -> usize {
        self.value as usize
    }

    /// Zero-padded binary rendering, one digit per measured qubit
    #[inline]
    pub fn bits(&self) -> &str {
        &self.bits
    }

    pub fn into_bits(self) -> String {
        self.bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitstring_and_integer_agree() {
        assert_eq!(DesiredOutcome::from("01").value().unwrap(), 1);
        assert_eq!(DesiredOutcome::from(1u64).value().unwrap(), 1);
        assert_eq!(DesiredOutcome::from("110").value().unwrap(), 6);
    }

    #[test]
    fn test_invalid_bitstrings() {
        for bits in ["", "012", "1b", " 1"] {
            assert_eq!(
                DesiredOutcome::from(bits).value(),
                Err(CollapseError::InvalidBitstring(bits.to_string()))
            );
        }
        let too_long = "1".repeat(65);
        assert!(DesiredOutcome::from(too_long).value().is_err());
    }

    #[test]
    fn test_resolution_pads_to_width() {
        let outcome = ResolvedOutcome::new(0, 2).unwrap();
        assert_eq!(outcome.bits(), "00");
        let outcome = ResolvedOutcome::new(5, 4).unwrap();
        assert_eq!(outcome.bits(), "0101");
        assert_eq!(outcome.index(), 5);
    }

    #[test]
    fn test_too_large() {
        assert_eq!(
            ResolvedOutcome::new(5, 1),
            Err(CollapseError::OutcomeTooLarge {
                outcome: 5,
                num_qubits: 1
            })
        );
        assert!(ResolvedOutcome::new(3, 2).is_ok());
        assert!(ResolvedOutcome::new(4, 2).is_err());
    }

    #[test]
    fn test_serde_untagged() {
        let json = serde_json::to_string(&DesiredOutcome::from("10")).unwrap();
        assert_eq!(json, "\"10\"");
        let back: DesiredOutcome = serde_json::from_str("3").unwrap();
        assert_eq!(back, DesiredOutcome::Index(3));
    }
}
