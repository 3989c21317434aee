//! Partial trace onto an arbitrary subset of qubits
//!
//! The kept qubits need not be contiguous. The reduced matrix is indexed with the
//! first kept qubit as its most significant bit, so passing the kept qubits in
//! ascending order yields the usual `|q_a q_b …⟩` ordering.

use crate::density_matrix::DensityMatrix;
use crate::error::{Result, StateError};
use crate::local_operator::LocalLayout;
use num_complex::Complex64;

/// Reduce `rho` to the marginal density matrix over `kept` qubits
///
/// Computes `ρ_kept[a, b] = Σ_t ρ[(a, t), (b, t)]` where `t` ranges over the
/// computational basis of the traced-out qubits.
///
/// # Errors
/// Returns an error if a kept qubit is out of range or repeated.
pub fn reduce(rho: &DensityMatrix, kept: &[usize]) -> Result<DensityMatrix> {
    let num_qubits = rho.num_qubits();
    let layout = LocalLayout::new(kept, num_qubits)?;
    let dim = layout.dimension;
    let reduced_dim = layout.local_dimension;
    let matrix = rho.matrix();

    let mut reduced = vec![Complex64::new(0.0, 0.0); reduced_dim * reduced_dim];
    for &base in &layout.bases {
        for a in 0..reduced_dim {
            let row = (base + layout.offsets[a]) * dim;
            for b in 0..reduced_dim {
                reduced[a * reduced_dim + b] += matrix[row + base + layout.offsets[b]];
            }
        }
    }

    DensityMatrix::from_matrix(kept.len(), reduced)
}

/// Diagonal of the reduced density matrix: the unnormalized marginal probabilities
pub fn marginal_diagonal(rho: &DensityMatrix, kept: &[usize]) -> Result<Vec<f64>> {
    let reduced = reduce(rho, kept)?;
    Ok((0..reduced.dimension()).map(|i| reduced.get(i, i).re).collect())
}

/// Unnormalized marginal probabilities of a pure state over `kept` qubits
///
/// Equal to [`marginal_diagonal`] of `|ψ⟩⟨ψ|` but sums `|ψ_i|²` directly, so the
/// 4^n density matrix is never built.
pub fn marginal_populations(
    amplitudes: &[Complex64],
    num_qubits: usize,
    kept: &[usize],
) -> Result<Vec<f64>> {
    let layout = LocalLayout::new(kept, num_qubits)?;
    if amplitudes.len() != layout.dimension {
        return Err(StateError::DimensionMismatch {
            expected: layout.dimension,
            actual: amplitudes.len(),
        });
    }

    let mut populations = vec![0.0; layout.local_dimension];
    for &base in &layout.bases {
        for (population, &offset) in populations.iter_mut().zip(&layout.offsets) {
            *population += amplitudes[base + offset].norm_sqr();
        }
    }

    Ok(populations)
}
