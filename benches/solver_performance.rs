//! Performance benchmarks for the ADRS solvers
//!
//! # What We're Measuring
//!
//! 1. **Multi-stage solver vs stage count**: R stencil sweeps per outer
//!    iteration, so time should grow linearly with R
//! 2. **Multi-stage solver vs grid size**: one sweep is O(N)
//! 3. **Forward Euler solver vs grid size**: one sweep per iteration
//! 4. **Inverse design**: normal equations = nbc + 1 forward solves
//!
//! Every solver run uses an unreachable tolerance so that exactly
//! `ITERATIONS` outer iterations are measured.
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench --bench solver_performance
//! cargo bench --bench solver_performance stages
//! cargo bench --features parallel --bench solver_performance inverse
//! ```
//!
//! # Expected Scaling
//!
//! ```text
//! stages/1 : baseline
//! stages/4 : ~4× baseline
//! stages/8 : ~8× baseline
//! ```

use adrs_rs::inverse::{ControlProblem, InverseDesign};
use adrs_rs::models::{GaussianControl, GaussianManufactured};
use adrs_rs::physics::Grid;
use adrs_rs::solver::{ForwardEulerSolver, MultiStageSolver, Scenario, Solver, SolverConfiguration};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

const ITERATIONS: usize = 1000;

fn fixed_iterations(stages: usize) -> SolverConfiguration {
    SolverConfiguration::iterative(1e-300, ITERATIONS)
        .with_stages(stages)
        .with_report_every(0)
}

fn control_scenario(points: usize) -> Scenario {
    let model = GaussianControl::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    Scenario::new(Box::new(model), Grid::unit(points).unwrap())
}

// =================================================================================================
// Benchmark Functions
// =================================================================================================

/// Multi-stage solver at N = 100 with R = 1, 2, 4, 8
fn benchmark_stage_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("Multi-stage solver stages");
    let scenario = control_scenario(100);
    let solver = MultiStageSolver::new();

    for stages in [1, 2, 4, 8] {
        let config = fixed_iterations(stages);
        group.throughput(Throughput::Elements((100 * ITERATIONS * stages) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(stages), &stages, |b, _| {
            b.iter(|| solver.solve(black_box(&scenario), black_box(&config)).unwrap())
        });
    }

    group.finish();
}

/// Multi-stage solver with four stages on N = 30, 100, 300, 1000
fn benchmark_multistage_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("Multi-stage solver grid");
    let solver = MultiStageSolver::new();
    let config = fixed_iterations(4);

    for points in [30, 100, 300, 1000] {
        let scenario = control_scenario(points);
        group.throughput(Throughput::Elements((points * ITERATIONS) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(points), &points, |b, _| {
            b.iter(|| solver.solve(black_box(&scenario), black_box(&config)).unwrap())
        });
    }

    group.finish();
}

/// Forward Euler solver on the Gaussian manufactured problem
fn benchmark_euler_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("Forward Euler solver grid");
    let solver = ForwardEulerSolver::new();
    let config = fixed_iterations(1);

    for points in [30, 100, 300, 1000] {
        let model = GaussianManufactured::default();
        let grid = Grid::unit(points).unwrap();
        let boundaries = model.boundaries(&grid);
        let scenario = Scenario::new(Box::new(model), grid).with_boundaries(boundaries);

        group.throughput(Throughput::Elements((points * ITERATIONS) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(points), &points, |b, _| {
            b.iter(|| solver.solve(black_box(&scenario), black_box(&config)).unwrap())
        });
    }

    group.finish();
}

/// Normal equations for 6 bases at N = 30 (7 forward solves)
fn benchmark_inverse_design(c: &mut Criterion) {
    let problem = ControlProblem::default();
    let target = problem
        .forward(30, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0])
        .unwrap()
        .field;
    let design = InverseDesign::new(problem, 6);

    c.bench_function("inverse design normal equations", |b| {
        b.iter(|| design.normal_equations(black_box(30), black_box(&target)).unwrap())
    });
}

criterion_group!(
    benches,
    benchmark_stage_count,
    benchmark_multistage_grid,
    benchmark_euler_grid,
    benchmark_inverse_design,
);
criterion_main!(benches);
