//! Thrust-vectoring rocket under PID gimbal control.
//!
//! A step-profile engine lifts a planar rigid body off the pad; a lateral
//! disturbance kicks it sideways mid-burn; a PID controller assembled from
//! primitive blocks steers the gimbal angle back through the feedback
//! terminal. Logged channels are written as CSV for external plotting.
//!
//! Run with: cargo run --example thrust_vectoring_rocket

use blocksim::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    // engine and airframe
    let engine_thrust = 15.0; // N
    let burn_time = 30.0; // s
    let moment_arm = 0.3; // m
    let mass = 0.5; // kg
    let pitch_inertia = 0.05; // kg m^2

    // gimbal loop
    let gain_p = 0.02;
    let gain_i = 0.01;
    let gain_d = 0.05;
    let max_gimbal = 10.0_f64.to_radians();

    let mut sim = Simulation::new();

    let gimbal = sim.add("gimbal", Feedback::new(0.0), &[])?;

    let thrust = sim.add("thrust", Step::gated(engine_thrust, 0.0, burn_time), &[])?;
    let thrust_x = sim.add(
        "thrust-x",
        BinaryFn::new(|t, a: f64| t * (-a).sin()),
        &[thrust, gimbal],
    )?;
    let thrust_z = sim.add(
        "thrust-z",
        BinaryFn::new(|t, a: f64| t * (-a).cos()),
        &[thrust, gimbal],
    )?;

    let disturbance = sim.add("disturbance", Step::gated(0.05, 6.0, 8.0), &[])?;
    let lateral = sim.add(
        "lateral",
        BinaryFn::new(|x, y| x + y),
        &[thrust_x, disturbance],
    )?;
    let moment = sim.add("moment", UnaryFn::new(move |x| x * moment_arm), &[lateral])?;

    let rocket = sim.add(
        "rocket",
        BlockKind::model(Planar3Dof::new(mass, pitch_inertia)),
        &[lateral, thrust_z, moment],
    )?;

    let altitude = sim.add("altitude", Logger::channel("z"), &[rocket])?;
    let downrange = sim.add("downrange", Logger::channel("x"), &[rocket])?;
    let attitude = sim.add("attitude", Logger::channel("theta"), &[rocket])?;
    let pitch_rate = sim.add("pitch-rate", Logger::channel("q"), &[rocket])?;

    let attitude_integral = sim.add("attitude-integral", Integrator::new(0.0), &[attitude])?;

    let p_term = sim.add("p", UnaryFn::new(move |x| x * gain_p), &[attitude])?;
    let i_term = sim.add("i", UnaryFn::new(move |x| x * gain_i), &[attitude_integral])?;
    let d_term = sim.add("d", UnaryFn::new(move |x| x * gain_d), &[pitch_rate])?;
    let pid = sim.add(
        "pid",
        NaryFn::new(3, |terms| terms.iter().sum()),
        &[p_term, i_term, d_term],
    )?;
    let steering = sim.add(
        "steering",
        UnaryFn::new(move |x| x.clamp(-max_gimbal, max_gimbal)),
        &[pid],
    )?;
    sim.bind(gimbal, steering)?;

    let steering_log = sim.add("steering-log", Logger::scalar(), &[steering])?;

    // fly until touchdown
    sim.run(|s| s.value(rocket).field("z").unwrap_or(0.0) < 0.0, 0.1)?;

    println!(
        "touchdown after {:.1}s ({} steps), downrange {:.1} m",
        sim.time(),
        sim.steps(),
        sim.scalar(downrange),
    );

    for (id, path, label) in [
        (altitude, "rocket_z.csv", "z"),
        (downrange, "rocket_x.csv", "x"),
        (attitude, "theta.csv", "theta"),
        (steering_log, "steering.csv", "gimbal"),
    ] {
        if let Some(history) = sim.recorded(id) {
            save_csv(path, label, history)?;
            println!("wrote {path}");
        }
    }
    Ok(())
}
