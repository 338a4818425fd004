//! blocksim - discrete-time block-diagram simulation engine
//!
//! Models dynamical systems as a directed graph of computational blocks
//! advanced synchronously in fixed time steps. Blocks declare direct
//! references to their upstream blocks at construction; the owning graph
//! computes a dependency-ordered schedule once, drives it step by step,
//! and finalizes every block when a caller-supplied termination predicate
//! holds. Feedback loops close through a dedicated one-step-delay terminal,
//! which keeps the evaluation graph acyclic.
//!
//! # Example
//!
//! ```rust,ignore
//! use blocksim::prelude::*;
//!
//! let mut sim = Simulation::new();
//! let source = sim.add("source", Constant::new(5.0), &[])?;
//! let integral = sim.add("integral", Integrator::new(0.0), &[source])?;
//! let log = sim.add("log", Logger::scalar(), &[integral])?;
//!
//! sim.run(|s| s.steps() >= 10, 0.1)?;
//! assert!((sim.scalar(integral) - 5.0).abs() < 1e-9);
//! ```

pub mod block;
pub mod block_kind;
pub mod blocks;
pub mod error;
pub mod models;
pub mod simulation;
pub mod value;

pub use block::{Block, BlockId};
pub use block_kind::BlockKind;
pub use blocks::*;
pub use error::SimError;
pub use simulation::Simulation;
pub use value::{Record, Value};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::block::{Block, BlockId};
    pub use crate::block_kind::BlockKind;
    pub use crate::blocks::*;
    pub use crate::error::SimError;
    pub use crate::models::Planar3Dof;
    pub use crate::simulation::Simulation;
    pub use crate::value::{Record, Value};
}
