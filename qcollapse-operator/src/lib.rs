//! Projective measurement collapse for quantum states
//!
//! This crate simulates a single-shot computational-basis measurement of a
//! chosen subset of qubits. Given a [`QuantumState`](qcollapse_state::QuantumState)
//! backed by a state vector, a density matrix or a unitary propagator, a
//! [`Collapse`] operator:
//!
//! 1. computes the marginal distribution of the measured qubits by partial trace,
//! 2. samples an outcome or validates a forced one,
//! 3. projects the state onto that outcome and renormalizes it.
//!
//! Propagators carry no distribution, so they can only be collapsed onto a
//! forced outcome; the result is tagged as a propagator but is no longer unitary.
//!
//! # Example
//!
//! ```
//! use qcollapse_operator::{Collapse, CollapseContext};
//! use qcollapse_state::{QuantumState, StateVector};
//!
//! let state = QuantumState::from(StateVector::uniform_superposition(2).unwrap());
//! let collapse = Collapse::builder().num_qubits(2).verbose(true).build().unwrap();
//!
//! let mut ctx = CollapseContext::seeded(42);
//! let collapsed = collapse.apply(&state, &mut ctx).unwrap();
//!
//! assert_eq!(collapsed.bits.len(), 2);
//! println!("{}", collapsed.report.unwrap());
//! ```

pub mod basis;
pub mod collapse;
pub mod context;
pub mod error;
pub mod outcome;
pub mod projector;
pub mod qubits;
pub mod report;
pub mod sampling;

pub use basis::MeasureBasis;
pub use collapse::{Collapse, CollapseBuilder, Collapsed, StateOperator, FEASIBILITY_EPSILON};
pub use context::CollapseContext;
pub use error::{CollapseError, ErrorKind, Result};
pub use outcome::{DesiredOutcome, ResolvedOutcome};
pub use projector::Projector;
pub use qubits::{QubitIndices, QubitSelector};
pub use report::{CollapseReport, CollapseWarning};
pub use sampling::AliasTable;
