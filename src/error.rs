//! Fault taxonomy for graph assembly and stepping.

use thiserror::Error;

/// Errors raised while assembling or driving a simulation graph.
///
/// Configuration faults (unbound or rebound feedback terminals, arity
/// mismatches, cyclic dependencies) are detected before any stepping occurs.
/// State faults indicate caller misuse of the Assembling -> Running ->
/// Finalized lifecycle. All are fatal to the run.
#[derive(Error, Debug)]
pub enum SimError {
    /// A feedback terminal was never bound to an upstream block.
    #[error("feedback terminal '{0}' was never bound")]
    Unconfigured(String),

    /// A feedback terminal was bound a second time.
    #[error("feedback terminal '{0}' is already bound")]
    Reconfiguration(String),

    /// A block's declared input count does not match its wiring.
    #[error("block '{name}' expects {expected} input(s), got {got}")]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },

    /// The non-feedback dependency edges contain a cycle.
    #[error("cyclic dependency involving block '{0}'")]
    CyclicDependency(String),

    /// Registration or binding was attempted after the first step.
    #[error("graph is closed to assembly; cannot register or bind '{0}'")]
    AssemblyClosed(String),

    /// The graph was stepped or finalized after finalization.
    #[error("simulation already finalized")]
    SimulationFinalized,

    /// `run` or `step` was given a non-positive time increment.
    #[error("time step {0} must be strictly positive")]
    InvalidTimestep(f64),

    /// A handle did not refer to a feedback terminal.
    #[error("block '{0}' is not a feedback terminal")]
    NotAFeedbackTerminal(String),
}
