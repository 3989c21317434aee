//! Example collapsing the same register in each backend
//!
//! Shows sampled and forced collapse of a Bell state, the equivalent density
//! matrix, and a forced collapse of a propagator.

use num_complex::Complex64;
use qcollapse_operator::{Collapse, CollapseContext};
use qcollapse_state::{DensityMatrix, QuantumState, StateVector, UnitaryMatrix};

fn bell_amplitudes() -> Vec<Complex64> {
    let h = 1.0 / 2.0_f64.sqrt();
    vec![
        Complex64::new(h, 0.0),
        Complex64::new(0.0, 0.0),
        Complex64::new(0.0, 0.0),
        Complex64::new(h, 0.0),
    ]
}

fn main() {
    println!("=== Collapse Across Backends ===\n");

    let mut ctx = CollapseContext::seeded(42);

    example_state_vector(&mut ctx);
    example_density_matrix(&mut ctx);
    example_propagator(&mut ctx);
}

fn example_state_vector(ctx: &mut CollapseContext) {
    println!("Example 1: Sampled collapse of a Bell state");
    println!("-------------------------------------------");

    let sv = StateVector::from_amplitudes(2, bell_amplitudes()).unwrap();
    let state = QuantumState::from(sv);
    let collapse = Collapse::builder()
        .qubits(0usize)
        .verbose(true)
        .build()
        .unwrap();

    let collapsed = collapse.apply(&state, ctx).unwrap();
    if let Some(report) = &collapsed.report {
        println!("{}", report);
    }
    println!("Collapsed amplitudes: {:?}", collapsed.state.data());
    println!();
}

fn example_density_matrix(ctx: &mut CollapseContext) {
    println!("Example 2: Forced collapse of a density matrix");
    println!("----------------------------------------------");

    let rho = DensityMatrix::from_state_vector(2, &bell_amplitudes()).unwrap();
    let state = QuantumState::from(rho);
    let collapse = Collapse::builder()
        .qubits(vec![0usize, 1])
        .desired_result("11")
        .verbose(true)
        .build()
        .unwrap();

    match collapse.apply(&state, ctx) {
        Ok(collapsed) => println!(
            "Outcome |{}> with trace {:.4}",
            collapsed.bits,
            collapsed.state.total_probability().unwrap_or(0.0)
        ),
        Err(e) => println!("Collapse failed: {}", e),
    }

    let infeasible = Collapse::builder()
        .qubits(vec![0usize, 1])
        .desired_result("01")
        .build()
        .unwrap();
    if let Err(e) = infeasible.apply(&state, ctx) {
        println!("Expected failure: {}", e);
    }
    println!();
}

fn example_propagator(ctx: &mut CollapseContext) {
    println!("Example 3: Forced collapse of a propagator");
    println!("------------------------------------------");

    let u = QuantumState::from(UnitaryMatrix::identity(2).unwrap());
    let collapse = Collapse::builder()
        .qubits(1usize)
        .desired_result(0u64)
        .build()
        .unwrap();

    let collapsed = collapse.apply(&u, ctx).unwrap();
    for warning in &collapsed.warnings {
        println!("Warning: {}", warning);
    }
    if let QuantumState::UnitaryMatrix(projected) = &collapsed.state {
        println!("Still unitary: {}", projected.is_unitary(1e-10));
    }
}
