//! Per-call execution context: random source and numeric precision

use qcollapse_state::Precision;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random generator and precision used by [`crate::Collapse::apply`]
///
/// Carrying these explicitly keeps collapses reproducible and lets independent
/// contexts run concurrently.
///
/// # Example
/// ```
/// use qcollapse_operator::CollapseContext;
/// use qcollapse_state::Precision;
///
/// let ctx = CollapseContext::seeded(7).with_precision(Precision::Single);
/// assert_eq!(ctx.precision(), Precision::Single);
/// ```
#[derive(Debug, Clone)]
pub struct CollapseContext<R = StdRng> {
    rng: R,
    precision: Precision,
}

impl CollapseContext<StdRng> {
    /// Deterministic context for reproducible results
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Context seeded from operating-system entropy
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Seeded when `seed` is given, entropy otherwise
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl<R: Rng> CollapseContext<R> {
    /// Wrap any generator, at double precision
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            precision: Precision::default(),
        }
    }

    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    #[inline]
    pub fn precision(&self) -> Precision {
        self.precision
    }

    #[inline]
    pub fn rng(&mut self) -> &mut R {
        &mut self.rng
    }

    pub fn into_rng(self) -> R {
        self.rng
    }
}

impl Default for CollapseContext<StdRng> {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_contexts_agree() {
        let mut a = CollapseContext::seeded(42);
        let mut b = CollapseContext::from_seed_option(Some(42));
        let xa: u64 = a.rng().gen();
        let xb: u64 = b.rng().gen();
        assert_eq!(xa, xb);
        assert_eq!(a.precision(), Precision::Double);
    }
}
