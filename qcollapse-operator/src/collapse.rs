//! Projective Z-basis collapse of a quantum state
//!
//! A [`Collapse`] is configured once (measured qubits, basis, optional forced
//! outcome, verbosity) and then applied to any number of states. Each call
//! returns a new state; the input is only read.
//!
//! Two paths share the projection and normalization step:
//!
//! - [`Collapse::collapse_to`] is a pure function of the state and a supplied
//!   outcome, and is the one to use when the result must be reproducible.
//! - [`Collapse::apply`] draws the outcome from the marginal distribution using
//!   the context's generator when no outcome was forced.
//!
//! # Example
//!
//! ```
//! use qcollapse_operator::{Collapse, CollapseContext};
//! use qcollapse_state::{QuantumState, StateVector};
//!
//! let state = QuantumState::from(StateVector::uniform_superposition(2).unwrap());
//! let collapse = Collapse::builder().qubits(vec![0usize]).desired_result("1").build().unwrap();
//!
//! let mut ctx = CollapseContext::seeded(1);
//! let collapsed = collapse.apply(&state, &mut ctx).unwrap();
//! assert_eq!(collapsed.bits, "1");
//! assert!((collapsed.probability.unwrap() - 0.5).abs() < 1e-12);
//! ```

use crate::basis::MeasureBasis;
use crate::context::CollapseContext;
use crate::error::{CollapseError, Result};
use crate::outcome::{DesiredOutcome, ResolvedOutcome};
use crate::projector::Projector;
use crate::qubits::{check_in_range, QubitIndices, QubitSelector};
use crate::report::{CollapseReport, CollapseWarning};
use crate::sampling;
use qcollapse_state::{
    local_operator, partial_trace, Backend, Precision, QuantumState, StateError,
};
use rand::Rng;

/// Forced outcomes at or below this marginal probability are unreachable
pub const FEASIBILITY_EPSILON: f64 = 1e-20;

/// An operator mapping a state to a new state
pub trait StateOperator {
    fn forward<R: Rng>(
        &self,
        state: &QuantumState,
        ctx: &mut CollapseContext<R>,
    ) -> Result<QuantumState>;
}

/// Outcome of a single collapse
#[derive(Debug, Clone, PartialEq)]
pub struct Collapsed {
    /// Projected state, normalized unless it is a propagator
    pub state: QuantumState,

    /// Integer outcome over the measured qubits
    pub outcome: u64,

    /// Outcome rendered with one digit per measured qubit
    pub bits: String,

    /// Marginal probability of the outcome; `None` for propagators
    pub probability: Option<f64>,

    /// Measured qubits in ascending order
    pub qubits: Vec<usize>,

    /// Non-fatal conditions raised while collapsing
    pub warnings: Vec<CollapseWarning>,

    /// Present when the operator is verbose and the backend is probabilistic
    pub report: Option<CollapseReport>,
}

impl Collapsed {
    /// Value of one measured qubit in the outcome, `None` if it was not measured
    pub fn qubit_value(&self, qubit: usize) -> Option<u8> {
        let position = self.qubits.iter().position(|&q| q == qubit)?;
        let shift = self.qubits.len() - 1 - position;
        Some(((self.outcome >> shift) & 1) as u8)
    }
}

/// Configured projective measurement
#[derive(Debug, Clone, PartialEq)]
pub struct Collapse {
    qubits: QubitIndices,
    basis: MeasureBasis,
    desired_result: Option<DesiredOutcome>,
    verbose: bool,
}

impl Collapse {
    /// Build a collapse operator
    ///
    /// # Arguments
    /// * `qubits` - Qubits to collapse; [`QubitSelector::All`] needs `num_qubits`
    /// * `num_qubits` - Register size, if known
    /// * `desired_result` - Forced outcome, or `None` to sample
    /// * `verbose` - Report the outcome and its probability
    /// * `basis` - Basis token, see [`MeasureBasis::parse`]
    ///
    /// # Errors
    /// [`CollapseError::UnsupportedBasis`] for any basis other than Z, plus the
    /// selector errors of [`QubitSelector::resolve`].
    pub fn new(
        qubits: impl Into<QubitSelector>,
        num_qubits: Option<usize>,
        desired_result: Option<DesiredOutcome>,
        verbose: bool,
        basis: &str,
    ) -> Result<Self> {
        let basis = MeasureBasis::parse(basis)?;
        let qubits = qubits.into().resolve(num_qubits)?;

        Ok(Self {
            qubits,
            basis,
            desired_result,
            verbose,
        })
    }

    pub fn builder() -> CollapseBuilder {
        CollapseBuilder::default()
    }

    /// Measured qubits, sorted and unique
    pub fn qubits(&self) -> &[usize] {
        &self.qubits
    }

    pub fn basis(&self) -> MeasureBasis {
        self.basis
    }

    pub fn desired_result(&self) -> Option<&DesiredOutcome> {
        self.desired_result.as_ref()
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Collapse `state`, sampling the outcome unless one was forced
    ///
    /// Propagators require a forced outcome. Sampled outcomes are not checked
    /// for feasibility.
    pub fn apply<R: Rng>(
        &self,
        state: &QuantumState,
        ctx: &mut CollapseContext<R>,
    ) -> Result<Collapsed> {
        let forced = self.forced_outcome()?;
        self.check_register(state)?;

        if let Some(value) = forced {
            return self.collapse_forced(state, value, ctx.precision());
        }

        let probabilities = self.marginals(state, ctx.precision())?;
        let index = sampling::sample_categorical(&probabilities, ctx.rng())?;
        let outcome = ResolvedOutcome::new(index as u64, self.qubits.len())?;
        self.project(state, outcome, Some(probabilities[index]))
    }

    /// Collapse `state` onto `outcome` deterministically
    ///
    /// Ignores any configured desired result. Fails if the outcome does not fit
    /// the measured qubits or has marginal probability ≤ [`FEASIBILITY_EPSILON`].
    pub fn collapse_to(&self, state: &QuantumState, outcome: u64) -> Result<Collapsed> {
        self.check_register(state)?;
        self.collapse_forced(state, outcome, Precision::default())
    }

    /// Draw an outcome from the marginal distribution without collapsing
    pub fn sample_outcome<R: Rng>(
        &self,
        state: &QuantumState,
        ctx: &mut CollapseContext<R>,
    ) -> Result<u64> {
        self.check_register(state)?;
        let probabilities = self.marginals(state, ctx.precision())?;
        Ok(sampling::sample_categorical(&probabilities, ctx.rng())? as u64)
    }

    /// Normalized marginal distribution over the measured qubits
    ///
    /// Entry `i` is the probability of observing `i` on the measured qubits,
    /// with the lowest-indexed qubit as the most significant bit.
    pub fn marginal_probabilities(
        &self,
        state: &QuantumState,
        precision: Precision,
    ) -> Result<Vec<f64>> {
        self.check_register(state)?;
        self.marginals(state, precision)
    }

    fn forced_outcome(&self) -> Result<Option<u64>> {
        self.desired_result
            .as_ref()
            .map(DesiredOutcome::value)
            .transpose()
    }

    fn check_register(&self, state: &QuantumState) -> Result<()> {
        check_in_range(&self.qubits, state.num_qubits())
    }

    fn collapse_forced(
        &self,
        state: &QuantumState,
        value: u64,
        precision: Precision,
    ) -> Result<Collapsed> {
        let outcome = ResolvedOutcome::new(value, self.qubits.len())?;

        if state.backend() == Backend::UnitaryMatrix {
            return self.collapse_propagator(state, outcome);
        }

        let probabilities = self.marginals(state, precision)?;
        let probability = probabilities[outcome.index()];
        if probability.is_nan() || probability <= FEASIBILITY_EPSILON {
            return Err(CollapseError::InfeasibleOutcome {
                qubits: self.qubits.to_vec(),
                bits: outcome.into_bits(),
            });
        }

        self.project(state, outcome, Some(probability))
    }

    fn collapse_propagator(
        &self,
        state: &QuantumState,
        outcome: ResolvedOutcome,
    ) -> Result<Collapsed> {
        let warning = CollapseWarning::NonUnitaryPropagator;
        tracing::warn!(qubits = ?self.qubits, "{}", warning);

        let projector = Projector::new(&outcome, self.qubits.len());
        let projected = self.apply_projector(state, &projector)?;

        Ok(Collapsed {
            state: projected,
            outcome: outcome.value(),
            bits: outcome.into_bits(),
            probability: None,
            qubits: self.qubits.to_vec(),
            warnings: vec![warning],
            report: None,
        })
    }

    fn marginals(&self, state: &QuantumState, precision: Precision) -> Result<Vec<f64>> {
        let populations = match state {
            QuantumState::StateVector(sv) => {
                partial_trace::marginal_populations(sv.amplitudes(), sv.num_qubits(), &self.qubits)?
            }
            QuantumState::DensityMatrix(rho) => partial_trace::marginal_diagonal(rho, &self.qubits)?,
            QuantumState::UnitaryMatrix(_) => {
                return Err(CollapseError::OutcomeRequired {
                    backend: state.backend(),
                })
            }
        };

        let diagonal: Vec<f64> = populations
            .into_iter()
            .map(|p| precision.round(p.max(0.0)))
            .collect();

        let total: f64 = diagonal.iter().sum();
        if total.is_nan() || total <= 0.0 {
            return Err(StateError::NotNormalized { norm: total }.into());
        }

        let probabilities: Vec<f64> = diagonal
            .into_iter()
            .map(|p| precision.round(p / total))
            .collect();

        tracing::debug!(
            qubits = ?self.qubits,
            dtype = precision.real_dtype(),
            ?probabilities,
            "marginal probabilities"
        );

        Ok(probabilities)
    }

    fn project(
        &self,
        state: &QuantumState,
        outcome: ResolvedOutcome,
        probability: Option<f64>,
    ) -> Result<Collapsed> {
        let report = match (self.verbose, probability) {
            (true, Some(probability)) => {
                let report = CollapseReport {
                    qubits: self.qubits.to_vec(),
                    bits: outcome.bits().to_string(),
                    probability,
                };
                tracing::info!("{}", report);
                Some(report)
            }
            _ => None,
        };

        let projector = Projector::new(&outcome, self.qubits.len());
        let mut projected = self.apply_projector(state, &projector)?;
        projected.normalize();

        Ok(Collapsed {
            state: projected,
            outcome: outcome.value(),
            bits: outcome.into_bits(),
            probability,
            qubits: self.qubits.to_vec(),
            warnings: Vec::new(),
            report,
        })
    }

    fn apply_projector(&self, state: &QuantumState, projector: &Projector) -> Result<QuantumState> {
        let n = state.num_qubits();
        let op = projector.matrix();

        let projected = match state {
            QuantumState::StateVector(sv) => QuantumState::from_state_vector(
                n,
                local_operator::apply_state_vector(sv.amplitudes(), op, &self.qubits, n)?,
            )?,
            QuantumState::DensityMatrix(dm) => QuantumState::from_density_matrix(
                n,
                local_operator::apply_density_matrix(dm.matrix(), op, &self.qubits, n)?,
            )?,
            QuantumState::UnitaryMatrix(u) => QuantumState::from_unitary(
                n,
                local_operator::apply_unitary_matrix(u.matrix(), op, &self.qubits, n)?,
            )?,
        };

        Ok(projected)
    }
}

impl StateOperator for Collapse {
    fn forward<R: Rng>(
        &self,
        state: &QuantumState,
        ctx: &mut CollapseContext<R>,
    ) -> Result<QuantumState> {
        Ok(self.apply(state, ctx)?.state)
    }
}

/// Builder for [`Collapse`]
///
/// Defaults: all qubits, no forced outcome, not verbose, Z basis.
#[derive(Debug, Clone)]
pub struct CollapseBuilder {
    selector: QubitSelector,
    num_qubits: Option<usize>,
    desired_result: Option<DesiredOutcome>,
    verbose: bool,
    basis: String,
}

impl Default for CollapseBuilder {
    fn default() -> Self {
        Self {
            selector: QubitSelector::All,
            num_qubits: None,
            desired_result: None,
            verbose: false,
            basis: MeasureBasis::Z.to_string(),
        }
    }
}

impl CollapseBuilder {
    pub fn qubits(mut self, qubits: impl Into<QubitSelector>) -> Self {
        self.selector = qubits.into();
        self
    }

    pub fn num_qubits(mut self, num_qubits: usize) -> Self {
        self.num_qubits = Some(num_qubits);
        self
    }

    pub fn desired_result(mut self, outcome: impl Into<DesiredOutcome>) -> Self {
        self.desired_result = Some(outcome.into());
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn basis(mut self, basis: impl Into<String>) -> Self {
        self.basis = basis.into();
        self
    }

    pub fn build(self) -> Result<Collapse> {
        Collapse::new(
            self.selector,
            self.num_qubits,
            self.desired_result,
            self.verbose,
            &self.basis,
        )
    }
}
