//! Application of a local operator to selected qubit positions
//!
//! A local operator `O` acting on `k` qubits is a `2^k × 2^k` row-major matrix.
//! Applying it to positions `[q0, q1, …]` of an `n`-qubit register means applying
//! `O ⊗ I` after permuting the register so that `q0` becomes the most significant
//! acted bit. Qubit 0 is the most significant bit of a full basis index.
//!
//! One entry point exists per backend:
//!
//! - state vector: `ψ → O ψ`
//! - density matrix: `ρ → O ρ O†`
//! - unitary propagator: `U → O U`

use crate::error::{Result, StateError};
use num_complex::Complex64;

/// Largest register the dense backends will address
pub const MAX_QUBITS: usize = 30;

/// Bit mask of `qubit` inside a full basis index of an `num_qubits` register
#[inline]
pub fn qubit_mask(qubit: usize, num_qubits: usize) -> usize {
    1usize << (num_qubits - 1 - qubit)
}

/// Precomputed index arithmetic for a set of acted qubits
///
/// `offsets[l]` is the full-register index contribution of local basis state `l`,
/// and `bases` enumerates every full index whose acted bits are all zero. Any full
/// index decomposes uniquely as `base + offsets[l]`.
#[derive(Debug, Clone)]
pub(crate) struct LocalLayout {
    pub(crate) dimension: usize,
    pub(crate) local_dimension: usize,
    pub(crate) offsets: Vec<usize>,
    pub(crate) bases: Vec<usize>,
}

impl LocalLayout {
    pub(crate) fn new(qubits: &[usize], num_qubits: usize) -> Result<Self> {
        if num_qubits > MAX_QUBITS {
            return Err(StateError::TooManyQubits {
                num_qubits,
                max_qubits: MAX_QUBITS,
            });
        }

        let mut acted_mask = 0usize;
        for &qubit in qubits {
            if qubit >= num_qubits {
                return Err(StateError::InvalidQubitIndex {
                    index: qubit,
                    num_qubits,
                });
            }
            let mask = qubit_mask(qubit, num_qubits);
            if acted_mask & mask != 0 {
                return Err(StateError::DuplicateQubit { index: qubit });
            }
            acted_mask |= mask;
        }

        let k = qubits.len();
        let dimension = 1usize << num_qubits;
        let local_dimension = 1usize << k;

        let offsets = (0..local_dimension)
            .map(|local| {
                qubits
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| (local >> (k - 1 - j)) & 1 == 1)
                    .fold(0usize, |acc, (_, &q)| acc | qubit_mask(q, num_qubits))
            })
            .collect();

        let bases = (0..dimension).filter(|i| i & acted_mask == 0).collect();

        Ok(Self {
            dimension,
            local_dimension,
            offsets,
            bases,
        })
    }

    fn check_operator(&self, operator: &[Complex64]) -> Result<()> {
        let expected = self.local_dimension * self.local_dimension;
        if operator.len() != expected {
            return Err(StateError::DimensionMismatch {
                expected,
                actual: operator.len(),
            });
        }
        Ok(())
    }

    /// `output = (O ⊗ I) input` for a single column vector
    fn apply_vector(&self, operator: &[Complex64], input: &[Complex64], output: &mut [Complex64]) {
        let ld = self.local_dimension;
        for &base in &self.bases {
            for row in 0..ld {
                let mut sum = Complex64::new(0.0, 0.0);
                for col in 0..ld {
                    let elem = operator[row * ld + col];
                    if elem.re != 0.0 || elem.im != 0.0 {
                        sum += elem * input[base + self.offsets[col]];
                    }
                }
                output[base + self.offsets[row]] = sum;
            }
        }
    }

    /// Left-multiply every column of a row-major `dimension × dimension` matrix
    fn apply_left(&self, operator: &[Complex64], matrix: &[Complex64]) -> Vec<Complex64> {
        let dim = self.dimension;
        let mut result = vec![Complex64::new(0.0, 0.0); dim * dim];
        let mut column = vec![Complex64::new(0.0, 0.0); dim];
        let mut projected = vec![Complex64::new(0.0, 0.0); dim];

        for c in 0..dim {
            for r in 0..dim {
                column[r] = matrix[r * dim + c];
            }
            self.apply_vector(operator, &column, &mut projected);
            for r in 0..dim {
                result[r * dim + c] = projected[r];
            }
        }

        result
    }

    /// Right-multiply by `O†`: row `r` of `A O†` is `conj(O conj(row_r))`
    fn apply_right_adjoint(&self, operator: &[Complex64], matrix: &[Complex64]) -> Vec<Complex64> {
        let dim = self.dimension;
        let mut result = vec![Complex64::new(0.0, 0.0); dim * dim];
        let mut row = vec![Complex64::new(0.0, 0.0); dim];
        let mut projected = vec![Complex64::new(0.0, 0.0); dim];

        for r in 0..dim {
            for c in 0..dim {
                row[c] = matrix[r * dim + c].conj();
            }
            self.apply_vector(operator, &row, &mut projected);
            for c in 0..dim {
                result[r * dim + c] = projected[c].conj();
            }
        }

        result
    }
}

fn check_len(actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return Err(StateError::DimensionMismatch { expected, actual });
    }
    Ok(())
}

/// Apply `operator` to `qubits` of a state vector: `ψ → O ψ`
///
/// # Errors
/// Returns an error if a qubit is out of range or repeated, or if the operator
/// or amplitude lengths do not match the register.
pub fn apply_state_vector(
    amplitudes: &[Complex64],
    operator: &[Complex64],
    qubits: &[usize],
    num_qubits: usize,
) -> Result<Vec<Complex64>> {
    let layout = LocalLayout::new(qubits, num_qubits)?;
    layout.check_operator(operator)?;
    check_len(amplitudes.len(), layout.dimension)?;

    let mut result = vec![Complex64::new(0.0, 0.0); layout.dimension];
    layout.apply_vector(operator, amplitudes, &mut result);
    Ok(result)
}

/// Apply `operator` to `qubits` of a density matrix: `ρ → O ρ O†`
pub fn apply_density_matrix(
    matrix: &[Complex64],
    operator: &[Complex64],
    qubits: &[usize],
    num_qubits: usize,
) -> Result<Vec<Complex64>> {
    let layout = LocalLayout::new(qubits, num_qubits)?;
    layout.check_operator(operator)?;
    check_len(matrix.len(), layout.dimension * layout.dimension)?;

    let left = layout.apply_left(operator, matrix);
    Ok(layout.apply_right_adjoint(operator, &left))
}

/// Apply `operator` to `qubits` of a unitary propagator: `U → O U`
///
/// The result is only unitary when `operator` is.
pub fn apply_unitary_matrix(
    matrix: &[Complex64],
    operator: &[Complex64],
    qubits: &[usize],
    num_qubits: usize,
) -> Result<Vec<Complex64>> {
    let layout = LocalLayout::new(qubits, num_qubits)?;
    layout.check_operator(operator)?;
    check_len(matrix.len(), layout.dimension * layout.dimension)?;

    Ok(layout.apply_left(operator, matrix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn c(re: f64) -> Complex64 {
        Complex64::new(re, 0.0)
    }

    fn pauli_x() -> Vec<Complex64> {
        vec![c(0.0), c(1.0), c(1.0), c(0.0)]
    }

    #[test]
    fn test_qubit_zero_is_most_significant() {
        // X on qubit 0 of |00⟩ gives |10⟩ = index 2
        let state = vec![c(1.0), c(0.0), c(0.0), c(0.0)];
        let out = apply_state_vector(&state, &pauli_x(), &[0], 2).unwrap();
        assert_relative_eq!(out[2].re, 1.0);
        assert_relative_eq!(out[0].re, 0.0);

        let out = apply_state_vector(&state, &pauli_x(), &[1], 2).unwrap();
        assert_relative_eq!(out[1].re, 1.0);
    }

    #[test]
    fn test_non_contiguous_two_qubit_operator() {
        // |001⟩ with a swap-like permutation |01⟩ ↔ |10⟩ on qubits (0, 2) gives |100⟩
        let mut swap = vec![c(0.0); 16];
        swap[0] = c(1.0);
        swap[1 * 4 + 2] = c(1.0);
        swap[2 * 4 + 1] = c(1.0);
        swap[15] = c(1.0);

        let mut state = vec![c(0.0); 8];
        state[0b001] = c(1.0);
        let out = apply_state_vector(&state, &swap, &[0, 2], 3).unwrap();
        assert_relative_eq!(out[0b100].re, 1.0);
        assert_relative_eq!(out.iter().map(|a| a.norm_sqr()).sum::<f64>(), 1.0);
    }

    #[test]
    fn test_operator_qubit_order_matters() {
        // Projector onto local |01⟩: qubit order decides which full index survives
        let mut proj = vec![c(0.0); 16];
        proj[1 * 4 + 1] = c(1.0);
        let state = vec![c(0.5); 4];

        let forward = apply_state_vector(&state, &proj, &[0, 1], 2).unwrap();
        assert_relative_eq!(forward[0b01].re, 0.5);
        assert_relative_eq!(forward[0b10].re, 0.0);

        let reversed = apply_state_vector(&state, &proj, &[1, 0], 2).unwrap();
        assert_relative_eq!(reversed[0b10].re, 0.5);
        assert_relative_eq!(reversed[0b01].re, 0.0);
    }

    #[test]
    fn test_density_matrix_conjugation() {
        // X ρ X† on |0⟩⟨0| gives |1⟩⟨1|
        let rho = vec![c(1.0), c(0.0), c(0.0), c(0.0)];
        let out = apply_density_matrix(&rho, &pauli_x(), &[0], 1).unwrap();
        assert_relative_eq!(out[3].re, 1.0);
        assert_relative_eq!(out[0].re, 0.0);
    }

    #[test]
    fn test_density_matrix_complex_operator() {
        // S = diag(1, i) on |+⟩⟨+| rotates the coherence to -i/2
        let s = vec![c(1.0), c(0.0), c(0.0), Complex64::new(0.0, 1.0)];
        let rho = vec![c(0.5); 4];
        let out = apply_density_matrix(&rho, &s, &[0], 1).unwrap();
        assert_relative_eq!(out[1].im, -0.5);
        assert_relative_eq!(out[2].im, 0.5);
        assert_relative_eq!(out[3].re, 0.5);
    }

    #[test]
    fn test_unitary_left_multiplication() {
        let identity = vec![c(1.0), c(0.0), c(0.0), c(1.0)];
        let out = apply_unitary_matrix(&identity, &pauli_x(), &[0], 1).unwrap();
        assert_eq!(out, pauli_x());
    }

    #[test]
    fn test_invalid_inputs() {
        let state = vec![c(1.0), c(0.0)];
        assert_eq!(
            apply_state_vector(&state, &pauli_x(), &[1], 1),
            Err(StateError::InvalidQubitIndex {
                index: 1,
                num_qubits: 1
            })
        );
        assert!(matches!(
            apply_state_vector(&state, &[c(1.0)], &[0], 1),
            Err(StateError::DimensionMismatch { .. })
        ));
        let two = vec![c(1.0), c(0.0), c(0.0), c(0.0)];
        assert_eq!(
            apply_state_vector(&two, &vec![c(0.0); 16], &[1, 1], 2),
            Err(StateError::DuplicateQubit { index: 1 })
        );
    }
}
