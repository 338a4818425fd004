//! Signal source blocks (zero inputs).

use crate::block::Block;
use crate::value::Value;

/// Constant signal source.
///
/// # Example
///
/// ```ignore
/// let c = Constant::new(5.0);
/// assert_eq!(c.value().scalar(), Some(5.0));
/// ```
#[derive(Debug, Clone)]
pub struct Constant {
    output: f64,
}

impl Constant {
    pub fn new(value: f64) -> Self {
        Self { output: value }
    }
}

impl Block for Constant {
    fn num_inputs(&self) -> usize {
        0
    }

    fn value(&self) -> Value {
        Value::Scalar(self.output)
    }
}

/// Time-gated step source.
///
/// Emits `active` while the accumulated elapsed time t satisfies
/// `on <= t < off`, and `default` otherwise. Without an off-time the block
/// stays active indefinitely once `on` is reached. Elapsed time accumulates
/// across advances, so the gate follows simulated time, not wall time.
///
/// # Example
///
/// ```ignore
/// // 2.0 over the window [1, 3), 0.0 outside it
/// let thrust = Step::gated(2.0, 1.0, 3.0);
/// ```
#[derive(Debug, Clone)]
pub struct Step {
    active: f64,
    default: f64,
    on: f64,
    off: Option<f64>,
    elapsed: f64,
    output: f64,
}

impl Step {
    /// Step that switches on at `on` and stays active indefinitely.
    pub fn new(active: f64, on: f64) -> Self {
        let mut step = Self {
            active,
            default: 0.0,
            on,
            off: None,
            elapsed: 0.0,
            output: 0.0,
        };
        step.output = step.eval();
        step
    }

    /// Step active over the window `[on, off)`. An empty window never
    /// activates.
    pub fn gated(active: f64, on: f64, off: f64) -> Self {
        let mut step = Self {
            active,
            default: 0.0,
            on,
            off: Some(off),
            elapsed: 0.0,
            output: 0.0,
        };
        step.output = step.eval();
        step
    }

    /// Replace the default (inactive) output value.
    pub fn with_default(mut self, default: f64) -> Self {
        self.default = default;
        self.output = self.eval();
        self
    }

    fn eval(&self) -> f64 {
        let past_on = self.elapsed >= self.on;
        let before_off = self.off.map_or(true, |off| self.elapsed < off);
        if past_on && before_off {
            self.active
        } else {
            self.default
        }
    }
}

impl Block for Step {
    fn num_inputs(&self) -> usize {
        0
    }

    fn value(&self) -> Value {
        Value::Scalar(self.output)
    }

    fn advance(&mut self, dt: f64, _inputs: &[Value]) {
        self.elapsed += dt;
        self.output = self.eval();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_invariant_across_advances() {
        let mut c = Constant::new(5.0);
        for _ in 0..10 {
            c.advance(0.1, &[]);
            assert_eq!(c.value().scalar(), Some(5.0));
        }
    }

    #[test]
    fn test_step_window() {
        // on=1, off=3, dt=1: outputs at elapsed 0,1,2,3,4 are 0,2,2,0,0
        let mut step = Step::gated(2.0, 1.0, 3.0);
        let mut outputs = vec![step.value().scalar().unwrap()];
        for _ in 0..4 {
            step.advance(1.0, &[]);
            outputs.push(step.value().scalar().unwrap());
        }
        assert_eq!(outputs, vec![0.0, 2.0, 2.0, 0.0, 0.0]);
    }

    #[test]
    fn test_step_unbounded() {
        let mut step = Step::new(1.0, 2.0);
        step.advance(1.0, &[]);
        assert_eq!(step.value().scalar(), Some(0.0));
        for _ in 0..100 {
            step.advance(1.0, &[]);
            assert_eq!(step.value().scalar(), Some(1.0));
        }
    }

    #[test]
    fn test_step_active_at_construction() {
        // on-time already reached at elapsed 0
        let step = Step::new(3.0, 0.0);
        assert_eq!(step.value().scalar(), Some(3.0));
    }

    #[test]
    fn test_step_custom_default() {
        let mut step = Step::gated(2.0, 1.0, 3.0).with_default(-1.0);
        assert_eq!(step.value().scalar(), Some(-1.0));
        step.advance(1.0, &[]);
        assert_eq!(step.value().scalar(), Some(2.0));
    }

    #[test]
    fn test_step_empty_window_never_activates() {
        let mut step = Step::gated(2.0, 3.0, 3.0);
        for _ in 0..6 {
            step.advance(1.0, &[]);
            assert_eq!(step.value().scalar(), Some(0.0));
        }
    }
}
