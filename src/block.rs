//! Core block capability and graph handles.

use crate::value::Value;

/// Non-owning handle to a block in its owning [`crate::Simulation`] graph.
///
/// Handles are plain indices into the graph's block table. The graph is the
/// sole owner of every block; handles stay valid for the graph's lifetime
/// and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockId(pub(crate) usize);

/// Core capability implemented by every block variant.
///
/// The scheduler guarantees that `advance` for step k receives the
/// step-k-fresh outputs of the block's declared upstream blocks, in
/// declaration order. Feedback terminals are the one exception: they see
/// the previous step's upstream value through the graph's latch pass.
///
/// # Example
///
/// ```ignore
/// struct Doubler {
///     output: f64,
/// }
///
/// impl Block for Doubler {
///     fn num_inputs(&self) -> usize { 1 }
///     fn value(&self) -> Value { Value::Scalar(self.output) }
///     fn advance(&mut self, _dt: f64, inputs: &[Value]) {
///         self.output = 2.0 * inputs[0].scalar_or_nan();
///     }
/// }
/// ```
pub trait Block {
    /// Number of upstream inputs this block declares. Checked against the
    /// wiring at registration time.
    fn num_inputs(&self) -> usize;

    /// Current output.
    ///
    /// Must not mutate; repeated reads between advances return the same
    /// value.
    fn value(&self) -> Value;

    /// Advance internal state by one time increment `dt`.
    ///
    /// `inputs` holds the current outputs of the declared upstream blocks.
    /// Stateless blocks recompute their cached output here. Default is a
    /// no-op.
    fn advance(&mut self, dt: f64, inputs: &[Value]) {
        let _ = (dt, inputs);
    }

    /// One-time registration hook, invoked with the upstream outputs as
    /// they are at construction time, before any stepping. Used to seed
    /// initial outputs. Default is a no-op.
    fn init(&mut self, inputs: &[Value]) {
        let _ = inputs;
    }

    /// One-time post-run hook, invoked in registration order after the
    /// termination predicate first holds. Must not advance simulation
    /// state.
    fn finalize(&mut self) {}
}
