//! Numeric precision setting
//!
//! Payloads are always stored as `Complex64`. The precision selects the real type
//! that derived probabilities are rounded through, mirroring a single- or
//! double-precision complex runtime.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Complex dtype of the simulated runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    /// complex64 amplitudes with float32 probabilities
    Single,
    /// complex128 amplitudes with float64 probabilities
    #[default]
    Double,
}

impl Precision {
    /// Name of the complex dtype
    pub fn complex_dtype(self) -> &'static str {
        match self {
            Precision::Single => "complex64",
            Precision::Double => "complex128",
        }
    }

    /// Name of the real dtype paired with the complex dtype
    pub fn real_dtype(self) -> &'static str {
        match self {
            Precision::Single => "float32",
            Precision::Double => "float64",
        }
    }

    /// Round a real value to this precision
    #[inline]
    pub fn round(self, value: f64) -> f64 {
        match self {
            Precision::Single => value as f32 as f64,
            Precision::Double => value,
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.complex_dtype())
    }
}
