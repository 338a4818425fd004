//! Feedback loop terminal: the sanctioned one-step delay that closes cycles.

use crate::block::{Block, BlockId};
use crate::value::Value;

/// Loop terminal closing a feedback cycle with a one-step delay.
///
/// The upstream reference is unknown at construction and bound exactly once
/// afterwards. The terminal reports its initial value until it has been
/// advanced twice; from then on it reports the previous step's upstream
/// value. Its back-edge is invisible to the scheduler, which keeps the
/// evaluation graph acyclic.
#[derive(Debug, Clone)]
pub struct Feedback {
    current: Value,
    latched: Value,
    advances: u64,
    target: Option<BlockId>,
}

impl Feedback {
    /// Create a terminal reporting `initial` until the loop has settled.
    pub fn new(initial: impl Into<Value>) -> Self {
        let initial = initial.into();
        Self {
            latched: initial.clone(),
            current: initial,
            advances: 0,
            target: None,
        }
    }

    /// The bound upstream block, if any.
    pub fn target(&self) -> Option<BlockId> {
        self.target
    }

    /// Bind the upstream reference. Returns false when already bound; the
    /// graph turns that into a `Reconfiguration` fault.
    pub(crate) fn bind(&mut self, target: BlockId) -> bool {
        if self.target.is_some() {
            return false;
        }
        self.target = Some(target);
        true
    }

    /// Capture the upstream output as it stood at the end of the previous
    /// step. The graph calls this before any block advances, so the delay
    /// holds no matter where the terminal lands in the evaluation order.
    pub(crate) fn latch(&mut self, upstream: Value) {
        self.latched = upstream;
    }
}

impl Block for Feedback {
    fn num_inputs(&self) -> usize {
        0
    }

    fn value(&self) -> Value {
        self.current.clone()
    }

    fn advance(&mut self, _dt: f64, _inputs: &[Value]) {
        self.advances += 1;
        if self.advances >= 2 {
            self.current = self.latched.clone();
        }
    }
}
