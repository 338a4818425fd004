//! Minimal scenario: a constant source integrated over one second.
//!
//! Run with: cargo run --example simple_integration

use blocksim::prelude::*;

fn main() -> Result<(), SimError> {
    tracing_subscriber::fmt::init();

    let mut sim = Simulation::new();
    let source = sim.add("source", Constant::new(5.0), &[])?;
    let integral = sim.add("integral", Integrator::new(0.0), &[source])?;
    let log = sim.add("integral-log", Logger::scalar(), &[integral])?;

    sim.run(|s| s.steps() >= 10, 0.1)?;

    println!("integral of 5.0 over {:.1}s = {}", sim.time(), sim.scalar(integral));

    if let Some(history) = sim.recorded(log) {
        for (step, v) in history.iter().enumerate() {
            println!("step {:>2}: {:.2}", step, v);
        }
    }
    Ok(())
}
