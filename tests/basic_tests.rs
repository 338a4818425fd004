//! Basic block behavior exercised through the simulation graph

use approx::assert_relative_eq;
use blocksim::prelude::*;

#[test]
fn test_constant_invariant_across_steps() {
    let mut sim = Simulation::new();
    let c = sim.add("c", Constant::new(5.0), &[]).unwrap();

    for _ in 0..10 {
        sim.step(0.1).unwrap();
        assert_eq!(sim.scalar(c), 5.0);
    }
}

#[test]
fn test_value_reads_idempotent_between_steps() {
    let mut sim = Simulation::new();
    let one = sim.add("one", Constant::new(1.0), &[]).unwrap();
    let int = sim.add("int", Integrator::new(0.0), &[one]).unwrap();

    sim.step(0.5).unwrap();
    let first = sim.value(int);
    for _ in 0..5 {
        assert_eq!(sim.value(int), first);
    }
}

#[test]
fn test_step_block_window() {
    // value=2 over [1, 3), default 0, ticked with dt=1: 0,2,2,0,0
    let mut sim = Simulation::new();
    let s = sim.add("s", Step::gated(2.0, 1.0, 3.0), &[]).unwrap();

    let mut outputs = vec![sim.scalar(s)];
    for _ in 0..4 {
        sim.step(1.0).unwrap();
        outputs.push(sim.scalar(s));
    }
    assert_eq!(outputs, vec![0.0, 2.0, 2.0, 0.0, 0.0]);
}

#[test]
fn test_step_block_without_off_time() {
    let mut sim = Simulation::new();
    let s = sim.add("s", Step::new(1.0, 2.0), &[]).unwrap();

    sim.step(1.0).unwrap();
    assert_eq!(sim.scalar(s), 0.0);
    for _ in 0..50 {
        sim.step(1.0).unwrap();
        assert_eq!(sim.scalar(s), 1.0);
    }
}

#[test]
fn test_integrator_accumulates_constant() {
    // value after n steps of size dt is c * n * dt
    let mut sim = Simulation::new();
    let c = sim.add("c", Constant::new(5.0), &[]).unwrap();
    let int = sim.add("int", Integrator::new(0.0), &[c]).unwrap();

    for _ in 0..10 {
        sim.step(0.1).unwrap();
    }
    assert_relative_eq!(sim.scalar(int), 5.0, epsilon = 1e-12);
}

#[test]
fn test_combinators_compose() {
    let mut sim = Simulation::new();
    let a = sim.add("a", Constant::new(3.0), &[]).unwrap();
    let b = sim.add("b", Constant::new(4.0), &[]).unwrap();
    let neg = sim.add("neg", UnaryFn::new(|x| -x), &[a]).unwrap();
    let prod = sim.add("prod", BinaryFn::new(|x, y| x * y), &[a, b]).unwrap();
    let sum = sim
        .add("sum", NaryFn::new(3, |xs| xs.iter().sum()), &[neg, prod, b])
        .unwrap();

    // outputs are seeded at registration, before any stepping
    assert_eq!(sim.scalar(neg), -3.0);
    assert_eq!(sim.scalar(prod), 12.0);
    assert_eq!(sim.scalar(sum), 13.0);

    sim.step(1.0).unwrap();
    assert_eq!(sim.scalar(sum), 13.0);
}

#[test]
fn test_logger_seeds_then_appends_per_step() {
    let mut sim = Simulation::new();
    let c = sim.add("c", Constant::new(2.0), &[]).unwrap();
    let int = sim.add("int", Integrator::new(0.0), &[c]).unwrap();
    let log = sim.add("log", Logger::scalar(), &[int]).unwrap();

    sim.run(|s| s.steps() >= 3, 1.0).unwrap();

    // entry 0 is the construction-time seed, entry k the value after step k
    assert_eq!(sim.recorded(log).unwrap(), &[0.0, 2.0, 4.0, 6.0]);
}

#[test]
fn test_recorded_unavailable_until_finalized() {
    let mut sim = Simulation::new();
    let c = sim.add("c", Constant::new(1.0), &[]).unwrap();
    let log = sim.add("log", Logger::scalar(), &[c]).unwrap();

    assert!(sim.recorded(log).is_none());
    sim.step(1.0).unwrap();
    assert!(sim.recorded(log).is_none());

    sim.finalize().unwrap();
    assert_eq!(sim.recorded(log).unwrap(), &[1.0, 1.0]);
    // non-logger blocks have no recording
    assert!(sim.recorded(c).is_none());
}

#[test]
fn test_logger_passes_extracted_value_through() {
    let mut sim = Simulation::new();
    let c = sim.add("c", Constant::new(7.0), &[]).unwrap();
    let log = sim.add("log", Logger::scalar(), &[c]).unwrap();
    let gain = sim.add("gain", UnaryFn::new(|x| 2.0 * x), &[log]).unwrap();

    sim.step(1.0).unwrap();
    assert_eq!(sim.scalar(gain), 14.0);
}

#[test]
fn test_record_into_scalar_combinator_yields_nan() {
    let mut sim = Simulation::new();
    let zero = sim.add("zero", Constant::new(0.0), &[]).unwrap();
    let body = sim
        .add(
            "body",
            BlockKind::model(Planar3Dof::new(1.0, 1.0)),
            &[zero, zero, zero],
        )
        .unwrap();
    let gain = sim.add("gain", UnaryFn::new(|x| 2.0 * x), &[body]).unwrap();

    sim.step(0.1).unwrap();
    assert!(sim.scalar(gain).is_nan());
    // the record itself is still intact
    assert!(sim.value(body).field("z").is_some());
}
