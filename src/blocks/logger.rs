//! Logger block: records one extracted scalar per step.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};

use crate::block::Block;
use crate::value::Value;

/// Observer block appending one extracted scalar per step to an append-only
/// sequence.
///
/// The sequence is seeded with one sample taken from the upstream output at
/// registration time, so entry 0 is the pre-run value and entry k the value
/// after step k. The recorded sequence is handed to external consumers only
/// after the run finalizes, either through
/// [`crate::Simulation::recorded`] or through an attached sink.
///
/// # Example
///
/// ```ignore
/// // record the "z" channel of a model block
/// let altitude = sim.add("altitude", Logger::channel("z"), &[rocket])?;
/// ```
pub struct Logger {
    extract: Box<dyn Fn(&Value) -> f64>,
    current: f64,
    history: Vec<f64>,
    sink: Option<Box<dyn FnMut(&[f64])>>,
}

impl Logger {
    /// Logger with an arbitrary extraction function.
    pub fn new(extract: impl Fn(&Value) -> f64 + 'static) -> Self {
        Self {
            extract: Box::new(extract),
            current: 0.0,
            history: Vec::new(),
            sink: None,
        }
    }

    /// Logger for scalar upstream signals. Records collapse to NaN.
    pub fn scalar() -> Self {
        Self::new(|v| v.scalar_or_nan())
    }

    /// Logger extracting one named channel of a record upstream. A missing
    /// channel records NaN.
    pub fn channel(name: &'static str) -> Self {
        Self::new(move |v| v.field(name).unwrap_or(f64::NAN))
    }

    /// Attach a consumer invoked once with the full sequence at
    /// finalization.
    pub fn with_sink(mut self, sink: impl FnMut(&[f64]) + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Recorded sequence so far. Entry 0 is the registration seed.
    pub fn history(&self) -> &[f64] {
        &self.history
    }

    fn sample(&mut self, inputs: &[Value]) {
        self.current = (self.extract)(&inputs[0]);
        self.history.push(self.current);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("current", &self.current)
            .field("samples", &self.history.len())
            .field("extract", &"<closure>")
            .finish()
    }
}

impl Block for Logger {
    fn num_inputs(&self) -> usize {
        1
    }

    fn value(&self) -> Value {
        Value::Scalar(self.current)
    }

    fn init(&mut self, inputs: &[Value]) {
        self.sample(inputs);
    }

    fn advance(&mut self, _dt: f64, inputs: &[Value]) {
        self.sample(inputs);
    }

    fn finalize(&mut self) {
        if let Some(sink) = self.sink.as_mut() {
            sink(&self.history);
        }
    }
}

/// Write a recorded sequence as a two-column CSV file.
///
/// # CSV Format
///
/// ```csv
/// step,z
/// 0,0.0
/// 1,1.4
/// ```
pub fn save_csv(filename: &str, label: &str, data: &[f64]) -> io::Result<()> {
    let mut w = BufWriter::new(File::create(filename)?);
    writeln!(w, "step,{}", label)?;
    for (step, v) in data.iter().enumerate() {
        writeln!(w, "{},{}", step, v)?;
    }
    w.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_then_append() {
        let mut log = Logger::scalar();
        log.init(&[Value::Scalar(1.0)]);
        log.advance(0.1, &[Value::Scalar(2.0)]);
        log.advance(0.1, &[Value::Scalar(3.0)]);
        assert_eq!(log.history(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_channel_extraction() {
        use crate::value::Record;

        let mut log = Logger::channel("z");
        log.init(&[Record::new().with("z", -2.5).into()]);
        assert_eq!(log.value().scalar(), Some(-2.5));
    }

    #[test]
    fn test_sink_receives_history_at_finalize() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let seen: Rc<RefCell<Vec<f64>>> = Rc::new(RefCell::new(Vec::new()));
        let seen_by_sink = Rc::clone(&seen);

        let mut log = Logger::scalar().with_sink(move |h| {
            seen_by_sink.borrow_mut().extend_from_slice(h);
        });
        log.init(&[Value::Scalar(1.0)]);
        log.advance(0.1, &[Value::Scalar(2.0)]);
        log.finalize();

        assert_eq!(*seen.borrow(), vec![1.0, 2.0]);
    }
}
