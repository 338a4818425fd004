//! BlockKind enum for dispatch of heterogeneous block variants.
//!
//! The graph stores every block as a `BlockKind`, keeping the set of
//! variants closed for the scheduler while the `Model` variant lets
//! domain-specific dynamics plug in through the capability trait without
//! touching the engine.

use crate::block::Block;
use crate::blocks::{BinaryFn, Constant, Feedback, Integrator, Logger, NaryFn, Step, UnaryFn};
use crate::value::Value;

/// Macro to reduce boilerplate for Block trait method delegation
macro_rules! dispatch_method {
    ($self:ident, $method:ident, $($args:expr),*) => {
        match $self {
            BlockKind::Constant(b) => b.$method($($args),*),
            BlockKind::Step(b) => b.$method($($args),*),
            BlockKind::UnaryFn(b) => b.$method($($args),*),
            BlockKind::BinaryFn(b) => b.$method($($args),*),
            BlockKind::NaryFn(b) => b.$method($($args),*),
            BlockKind::Integrator(b) => b.$method($($args),*),
            BlockKind::Feedback(b) => b.$method($($args),*),
            BlockKind::Logger(b) => b.$method($($args),*),
            BlockKind::Model(b) => b.$method($($args),*),
        }
    };
}

/// Tagged union over the block variants.
///
/// Dispatch goes through match expressions rather than vtables; the one
/// open escape hatch is [`BlockKind::Model`] for user-supplied dynamics.
///
/// # Example
///
/// ```ignore
/// let blocks: Vec<BlockKind> = vec![
///     Constant::new(1.0).into(),
///     Integrator::new(0.0).into(),
/// ];
/// ```
pub enum BlockKind {
    // Sources
    Constant(Constant),
    Step(Step),

    // Pure combinators
    UnaryFn(UnaryFn),
    BinaryFn(BinaryFn),
    NaryFn(NaryFn),

    // Stateful primitives
    Integrator(Integrator),
    Feedback(Feedback),
    Logger(Logger),

    /// Opaque domain model dispatched through the capability trait.
    Model(Box<dyn Block>),
}

impl BlockKind {
    /// Wrap a domain-specific model block.
    pub fn model(block: impl Block + 'static) -> Self {
        BlockKind::Model(Box::new(block))
    }
}

impl Block for BlockKind {
    fn num_inputs(&self) -> usize {
        dispatch_method!(self, num_inputs,)
    }

    fn value(&self) -> Value {
        dispatch_method!(self, value,)
    }

    fn advance(&mut self, dt: f64, inputs: &[Value]) {
        dispatch_method!(self, advance, dt, inputs)
    }

    fn init(&mut self, inputs: &[Value]) {
        dispatch_method!(self, init, inputs)
    }

    fn finalize(&mut self) {
        dispatch_method!(self, finalize,)
    }
}

// From implementations for automatic conversion

impl From<Constant> for BlockKind {
    fn from(block: Constant) -> Self {
        BlockKind::Constant(block)
    }
}

impl From<Step> for BlockKind {
    fn from(block: Step) -> Self {
        BlockKind::Step(block)
    }
}

impl From<UnaryFn> for BlockKind {
    fn from(block: UnaryFn) -> Self {
        BlockKind::UnaryFn(block)
    }
}

impl From<BinaryFn> for BlockKind {
    fn from(block: BinaryFn) -> Self {
        BlockKind::BinaryFn(block)
    }
}

impl From<NaryFn> for BlockKind {
    fn from(block: NaryFn) -> Self {
        BlockKind::NaryFn(block)
    }
}

impl From<Integrator> for BlockKind {
    fn from(block: Integrator) -> Self {
        BlockKind::Integrator(block)
    }
}

impl From<Feedback> for BlockKind {
    fn from(block: Feedback) -> Self {
        BlockKind::Feedback(block)
    }
}

impl From<Logger> for BlockKind {
    fn from(block: Logger) -> Self {
        BlockKind::Logger(block)
    }
}

impl From<Box<dyn Block>> for BlockKind {
    fn from(block: Box<dyn Block>) -> Self {
        BlockKind::Model(block)
    }
}
