//! Qubit selection and index normalization

use crate::error::{CollapseError, Result};
use smallvec::SmallVec;

/// Sorted, deduplicated measured qubits; most measurements touch only a few
pub type QubitIndices = SmallVec<[usize; 4]>;

/// Which qubits a collapse acts on
///
/// # Example
/// ```
/// use qcollapse_operator::QubitSelector;
///
/// let selector = QubitSelector::from(vec![2usize, 0, 2]);
/// assert_eq!(selector.resolve(None).unwrap().as_slice(), &[0, 2]);
///
/// let all = QubitSelector::All;
/// assert_eq!(all.resolve(Some(3)).unwrap().as_slice(), &[0, 1, 2]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum QubitSelector {
    /// Every qubit of the register
    #[default]
    All,
    /// One qubit
    Single(usize),
    /// Explicit list, in any order, duplicates allowed
    List(Vec<usize>),
}

impl QubitSelector {
    /// Resolve to a sorted list of unique indices
    ///
    /// `num_qubits` is mandatory for [`QubitSelector::All`]; when given, every
    /// index is also checked against it.
    pub fn resolve(&self, num_qubits: Option<usize>) -> Result<QubitIndices> {
        let mut indices: QubitIndices = match self {
            QubitSelector::All => {
                let n = num_qubits.ok_or(CollapseError::MissingQubitCount)?;
                (0..n).collect()
            }
            QubitSelector::Single(q) => SmallVec::from_slice(&[*q]),
            QubitSelector::List(list) => SmallVec::from_slice(list),
        };

        indices.sort_unstable();
        indices.dedup();

        if indices.is_empty() {
            return Err(CollapseError::EmptySelection);
        }

        if let Some(n) = num_qubits {
            check_in_range(&indices, n)?;
        }

        Ok(indices)
    }
}

/// Every index must address a qubit of an `num_qubits` register
pub(crate) fn check_in_range(indices: &[usize], num_qubits: usize) -> Result<()> {
    match indices.iter().find(|&&q| q >= num_qubits) {
        Some(&index) => Err(CollapseError::InvalidQubitIndex { index, num_qubits }),
        None => Ok(()),
    }
}

impl From<usize> for QubitSelector {
    fn from(qubit: usize) -> Self {
        QubitSelector::Single(qubit)
    }
}

impl From<Vec<usize>> for QubitSelector {
    fn from(qubits: Vec<usize>) -> Self {
        QubitSelector::List(qubits)
    }
}

impl From<&[usize]> for QubitSelector {
    fn from(qubits: &[usize]) -> Self {
        QubitSelector::List(qubits.to_vec())
    }
}

impl<const N: usize> From<[usize; N]> for QubitSelector {
    fn from(qubits: [usize; N]) -> Self {
        QubitSelector::List(qubits.to_vec())
    }
}
