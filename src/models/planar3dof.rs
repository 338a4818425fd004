//! Planar rigid-body pitch-plane model.

use std::f64::consts::TAU;

use nalgebra::{Rotation2, Vector2};

use crate::block::Block;
use crate::value::{Record, Value};

/// Planar three-degree-of-freedom rigid body (surge, heave, pitch).
///
/// Inputs are the body-frame force components `Fx`, `Fz` and the pitch
/// moment `My`, in that order. The output record carries earth-frame
/// position (`x`, `z`), body-frame acceleration (`a_x`, `a_z`), earth-frame
/// velocity (`v_x`, `v_z`), pitch attitude `theta` (wrapped to ±2π) and
/// pitch rate `q`.
///
/// # Example
///
/// ```ignore
/// let rocket = sim.add(
///     "rocket",
///     BlockKind::model(Planar3Dof::new(0.5, 0.05)),
///     &[fx, fz, my],
/// )?;
/// ```
#[derive(Debug, Clone)]
pub struct Planar3Dof {
    mass: f64,
    inertia: f64,
    gravity: f64,
    /// Body-frame velocity (u, w).
    vel_body: Vector2<f64>,
    /// Earth-frame position (x, z).
    pos: Vector2<f64>,
    /// Earth-frame velocity.
    vel_earth: Vector2<f64>,
    /// Body-frame acceleration.
    accel_body: Vector2<f64>,
    pitch: f64,
    pitch_rate: f64,
}

impl Planar3Dof {
    /// Create a body at rest at the origin.
    ///
    /// # Panics
    ///
    /// Panics if `mass` or `inertia` is not positive.
    pub fn new(mass: f64, inertia: f64) -> Self {
        assert!(mass > 0.0, "mass must be positive");
        assert!(inertia > 0.0, "pitch inertia must be positive");

        Self {
            mass,
            inertia,
            gravity: -9.81,
            vel_body: Vector2::zeros(),
            pos: Vector2::zeros(),
            vel_earth: Vector2::zeros(),
            accel_body: Vector2::zeros(),
            pitch: 0.0,
            pitch_rate: 0.0,
        }
    }

    /// Replace the default gravitational acceleration (-9.81, z up).
    pub fn with_gravity(mut self, gravity: f64) -> Self {
        self.gravity = gravity;
        self
    }
}

impl Block for Planar3Dof {
    fn num_inputs(&self) -> usize {
        3
    }

    fn value(&self) -> Value {
        Record::new()
            .with("x", self.pos.x)
            .with("z", self.pos.y)
            .with("a_x", self.accel_body.x)
            .with("a_z", self.accel_body.y)
            .with("v_x", self.vel_earth.x)
            .with("v_z", self.vel_earth.y)
            .with("theta", self.pitch)
            .with("q", self.pitch_rate)
            .into()
    }

    fn advance(&mut self, dt: f64, inputs: &[Value]) {
        let fx = inputs[0].scalar_or_nan();
        let fz = inputs[1].scalar_or_nan();
        let my = inputs[2].scalar_or_nan();

        // Specific force plus gravity resolved into the body frame.
        self.accel_body = Vector2::new(
            fx / self.mass - self.gravity * self.pitch.sin(),
            fz / self.mass + self.gravity * self.pitch.cos(),
        );

        // Body-frame velocity rates, with the rotational coupling terms.
        let vel_rate = Vector2::new(
            self.accel_body.x - self.pitch_rate * self.vel_body.y,
            self.accel_body.y + self.pitch_rate * self.vel_body.x,
        );

        self.pitch_rate += my / self.inertia * dt;
        self.pitch += self.pitch_rate * dt;
        if self.pitch > TAU {
            self.pitch -= TAU;
        }
        if self.pitch < -TAU {
            self.pitch += TAU;
        }

        self.vel_body += vel_rate * dt;

        // Position advances on the previous earth-frame velocity plus the
        // in-step acceleration contribution.
        self.pos += self.vel_earth * dt + self.accel_body * (dt * dt / 2.0);
        self.vel_earth = Rotation2::new(-self.pitch) * self.vel_body;
    }
}
