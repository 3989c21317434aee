//! Categorical sampling of measurement outcomes
//!
//! Uses the alias method (Walker's algorithm): O(n) setup, then O(1) per draw
//! with two uniforms from the caller's generator.
//!
//! Reference: Walker, A. J. (1977). "An Efficient Method for Generating
//! Discrete Random Variables with General Distributions"

use crate::error::{CollapseError, Result};
use qcollapse_state::StateError;
use rand::Rng;

/// Alias table over a discrete probability distribution
#[derive(Debug, Clone)]
pub struct AliasTable {
    /// Acceptance threshold for each column
    prob: Vec<f64>,

    /// Fallback index for each column
    alias: Vec<usize>,
}

impl AliasTable {
    /// Build a table from probabilities summing to ~1
    ///
    /// # Errors
    /// Returns an error for an empty distribution.
    pub fn new(probabilities: &[f64]) -> Result<Self> {
        let n = probabilities.len();
        if n == 0 {
            return Err(CollapseError::State(StateError::InvalidDimension { dimension: 0 }));
        }

        let mut prob = vec![0.0; n];
        let mut alias = vec![0; n];
        let mut scaled: Vec<f64> = probabilities.iter().map(|&p| p * n as f64).collect();

        let mut small = Vec::new();
        let mut large = Vec::new();
        for (i, &p) in scaled.iter().enumerate() {
            if p < 1.0 {
                small.push(i);
            } else {
                large.push(i);
            }
        }

        loop {
            let (s, l) = match (small.pop(), large.pop()) {
                (Some(s), Some(l)) => (s, l),
                (s, l) => {
                    small.extend(s);
                    large.extend(l);
                    break;
                }
            };

            prob[s] = scaled[s];
            alias[s] = l;

            scaled[l] = (scaled[l] + scaled[s]) - 1.0;
            if scaled[l] < 1.0 {
                small.push(l);
            } else {
                large.push(l);
            }
        }

        // Leftovers are floating-point residue of columns that are full
        for l in large {
            prob[l] = 1.0;
        }
        for s in small {
            prob[s] = 1.0;
        }

        Ok(Self { prob, alias })
    }

    /// Number of outcomes
    pub fn len(&self) -> usize {
        self.prob.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prob.is_empty()
    }

    /// Draw one outcome index
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let n = self.prob.len();
        let i = ((rng.gen::<f64>() * n as f64) as usize).min(n - 1);

        if rng.gen::<f64>() < self.prob[i] {
            i
        } else {
            self.alias[i]
        }
    }
}

/// Draw a single outcome from `probabilities`
pub fn sample_categorical<R: Rng + ?Sized>(probabilities: &[f64], rng: &mut R) -> Result<usize> {
    Ok(AliasTable::new(probabilities)?.sample(rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn frequencies(probabilities: &[f64], shots: usize, seed: u64) -> Vec<f64> {
        let table = AliasTable::new(probabilities).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut counts = vec![0usize; probabilities.len()];
        for _ in 0..shots {
            counts[table.sample(&mut rng)] += 1;
        }
        counts.iter().map(|&c| c as f64 / shots as f64).collect()
    }

    #[test]
    fn test_alias_table_uniform() {
        for freq in frequencies(&[0.25; 4], 10000, 42) {
            assert!((freq - 0.25).abs() < 0.03, "Frequency {} too far from 0.25", freq);
        }
    }

    #[test]
    fn test_alias_table_nonuniform() {
        let probabilities = [0.5, 0.3, 0.15, 0.05];
        let freqs = frequencies(&probabilities, 10000, 123);
        for (i, (&prob, &freq)) in probabilities.iter().zip(freqs.iter()).enumerate() {
            assert!(
                (freq - prob).abs() < 0.03,
                "Outcome {} frequency {} too far from {}",
                i,
                freq,
                prob
            );
        }
    }

    #[test]
    fn test_zero_probability_never_drawn() {
        let freqs = frequencies(&[0.0, 1.0, 0.0, 0.0], 2000, 7);
        assert_eq!(freqs[1], 1.0);
    }

    #[test]
    fn test_empty_distribution() {
        assert!(AliasTable::new(&[]).is_err());
    }
}
