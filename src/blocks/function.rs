//! Pure combinator blocks applying a function to upstream values.

use std::fmt;

use crate::block::Block;
use crate::value::Value;

/// Unary combinator: `y = f(u)`.
///
/// # Example
///
/// ```ignore
/// let gain = UnaryFn::new(|x| 2.0 * x);
/// ```
pub struct UnaryFn {
    func: Box<dyn Fn(f64) -> f64>,
    output: f64,
}

impl UnaryFn {
    pub fn new(func: impl Fn(f64) -> f64 + 'static) -> Self {
        Self {
            func: Box::new(func),
            output: 0.0,
        }
    }

    fn eval(&mut self, inputs: &[Value]) {
        self.output = (self.func)(inputs[0].scalar_or_nan());
    }
}

impl fmt::Debug for UnaryFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnaryFn")
            .field("output", &self.output)
            .field("func", &"<closure>")
            .finish()
    }
}

impl Block for UnaryFn {
    fn num_inputs(&self) -> usize {
        1
    }

    fn value(&self) -> Value {
        Value::Scalar(self.output)
    }

    fn init(&mut self, inputs: &[Value]) {
        self.eval(inputs);
    }

    fn advance(&mut self, _dt: f64, inputs: &[Value]) {
        self.eval(inputs);
    }
}

/// Binary combinator: `y = f(u1, u2)`.
pub struct BinaryFn {
    func: Box<dyn Fn(f64, f64) -> f64>,
    output: f64,
}

impl BinaryFn {
    pub fn new(func: impl Fn(f64, f64) -> f64 + 'static) -> Self {
        Self {
            func: Box::new(func),
            output: 0.0,
        }
    }

    fn eval(&mut self, inputs: &[Value]) {
        self.output = (self.func)(inputs[0].scalar_or_nan(), inputs[1].scalar_or_nan());
    }
}

impl fmt::Debug for BinaryFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinaryFn")
            .field("output", &self.output)
            .field("func", &"<closure>")
            .finish()
    }
}

impl Block for BinaryFn {
    fn num_inputs(&self) -> usize {
        2
    }

    fn value(&self) -> Value {
        Value::Scalar(self.output)
    }

    fn init(&mut self, inputs: &[Value]) {
        self.eval(inputs);
    }

    fn advance(&mut self, _dt: f64, inputs: &[Value]) {
        self.eval(inputs);
    }
}

/// N-ary combinator: `y = f(u1, ..., uN)`.
///
/// The arity is declared up front and checked against the wiring at
/// registration time, so a mismatched function never runs.
pub struct NaryFn {
    arity: usize,
    func: Box<dyn Fn(&[f64]) -> f64>,
    scratch: Vec<f64>,
    output: f64,
}

impl NaryFn {
    pub fn new(arity: usize, func: impl Fn(&[f64]) -> f64 + 'static) -> Self {
        Self {
            arity,
            func: Box::new(func),
            scratch: Vec::with_capacity(arity),
            output: 0.0,
        }
    }

    fn eval(&mut self, inputs: &[Value]) {
        self.scratch.clear();
        self.scratch.extend(inputs.iter().map(Value::scalar_or_nan));
        self.output = (self.func)(&self.scratch);
    }
}

impl fmt::Debug for NaryFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NaryFn")
            .field("arity", &self.arity)
            .field("output", &self.output)
            .field("func", &"<closure>")
            .finish()
    }
}

impl Block for NaryFn {
    fn num_inputs(&self) -> usize {
        self.arity
    }

    fn value(&self) -> Value {
        Value::Scalar(self.output)
    }

    fn init(&mut self, inputs: &[Value]) {
        self.eval(inputs);
    }

    fn advance(&mut self, _dt: f64, inputs: &[Value]) {
        self.eval(inputs);
    }
}
