//! Domain-specific model blocks.
//!
//! Models implement the [`crate::Block`] capability and plug into a graph
//! through [`crate::BlockKind::model`]; the scheduler treats them like any
//! other block.

mod planar3dof;

pub use planar3dof::Planar3Dof;
