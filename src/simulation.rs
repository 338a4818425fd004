//! Simulation graph: block ownership, scheduling and the run driver.
//!
//! The graph owns every block in an arena indexed by [`BlockId`]. Blocks
//! register at construction, declaring direct references to the blocks they
//! read from, so the dependency graph exists implicitly once the topology
//! is wired. One evaluation order is computed when assembly closes and
//! reused for every step.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use tracing::{debug, info};

use crate::block::{Block, BlockId};
use crate::block_kind::BlockKind;
use crate::error::SimError;
use crate::value::Value;

/// Lifecycle phase of the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Assembling,
    Running,
    Finalized,
}

struct Entry {
    name: String,
    kind: BlockKind,
    deps: Vec<BlockId>,
}

/// Owner of all blocks and driver of the step loop.
///
/// Lifecycle: **Assembling** (blocks register) -> **Running** (the step
/// loop executes against a cached dependency-ordered schedule) ->
/// **Finalized** (every block's finalize hook has run; no further stepping
/// permitted). The transition out of Assembling validates the wiring:
/// every feedback terminal must be bound and the non-feedback dependency
/// edges must form a DAG.
///
/// # Example
///
/// ```ignore
/// let mut sim = Simulation::new();
/// let source = sim.add("source", Constant::new(5.0), &[])?;
/// let integral = sim.add("integral", Integrator::new(0.0), &[source])?;
/// sim.run(|s| s.steps() >= 10, 0.1)?;
/// assert!((sim.scalar(integral) - 5.0).abs() < 1e-12);
/// ```
pub struct Simulation {
    entries: Vec<Entry>,
    phase: Phase,
    /// Evaluation order over the forward-dependency DAG, cached when
    /// assembly closes.
    order: Vec<usize>,
    /// Feedback terminal slots, registration order.
    loops: Vec<usize>,
    /// (terminal slot, bound upstream) pairs for the pre-advance latch
    /// pass, resolved when assembly closes.
    latches: Vec<(usize, BlockId)>,
    time: f64,
    steps: u64,
    scratch: Vec<Value>,
}

impl Simulation {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            phase: Phase::Assembling,
            order: Vec::new(),
            loops: Vec::new(),
            latches: Vec::new(),
            time: 0.0,
            steps: 0,
            scratch: Vec::new(),
        }
    }

    /// Number of registered blocks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Simulated time accumulated so far.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Number of completed steps.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Register a block together with its upstream references.
    ///
    /// Registration order is construction order; it breaks scheduling ties
    /// between independent blocks and is the order finalize hooks run in.
    /// The block's declared input count must match `deps`.
    ///
    /// # Panics
    ///
    /// Panics if a handle in `deps` does not belong to this graph.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        block: impl Into<BlockKind>,
        deps: &[BlockId],
    ) -> Result<BlockId, SimError> {
        let name = name.into();
        if self.phase != Phase::Assembling {
            return Err(SimError::AssemblyClosed(name));
        }
        assert!(
            deps.iter().all(|d| d.0 < self.entries.len()),
            "upstream handle out of range"
        );

        let mut kind = block.into();
        let expected = kind.num_inputs();
        if deps.len() != expected {
            return Err(SimError::ArityMismatch {
                name,
                expected,
                got: deps.len(),
            });
        }

        // Seed the block from the upstream outputs as they stand right now;
        // upstreams are always registered first, so their outputs exist.
        let inputs: Vec<Value> = deps.iter().map(|d| self.entries[d.0].kind.value()).collect();
        kind.init(&inputs);

        let id = BlockId(self.entries.len());
        if matches!(kind, BlockKind::Feedback(_)) {
            self.loops.push(id.0);
        }
        self.entries.push(Entry {
            name,
            kind,
            deps: deps.to_vec(),
        });
        Ok(id)
    }

    /// Bind a feedback terminal to its upstream block, exactly once.
    ///
    /// This is the one sanctioned way to close a cycle: the edge stays
    /// invisible to the scheduler and the terminal reports the upstream
    /// value with a one-step delay.
    pub fn bind(&mut self, terminal: BlockId, upstream: BlockId) -> Result<(), SimError> {
        assert!(
            terminal.0 < self.entries.len() && upstream.0 < self.entries.len(),
            "block handle out of range"
        );
        if self.phase != Phase::Assembling {
            return Err(SimError::AssemblyClosed(self.entries[terminal.0].name.clone()));
        }
        let entry = &mut self.entries[terminal.0];
        match &mut entry.kind {
            BlockKind::Feedback(fb) => {
                if fb.bind(upstream) {
                    Ok(())
                } else {
                    Err(SimError::Reconfiguration(entry.name.clone()))
                }
            }
            _ => Err(SimError::NotAFeedbackTerminal(entry.name.clone())),
        }
    }

    /// Current output of a block, readable at any point between steps.
    pub fn value(&self, id: BlockId) -> Value {
        self.entries[id.0].kind.value()
    }

    /// Scalar output of a block; records collapse to NaN.
    pub fn scalar(&self, id: BlockId) -> f64 {
        self.value(id).scalar_or_nan()
    }

    /// Diagnostic name of a block.
    pub fn name(&self, id: BlockId) -> &str {
        &self.entries[id.0].name
    }

    /// Recorded sequence of a logger block.
    ///
    /// Returns None until the run has finalized, and for non-logger blocks.
    pub fn recorded(&self, id: BlockId) -> Option<&[f64]> {
        if self.phase != Phase::Finalized {
            return None;
        }
        match &self.entries[id.0].kind {
            BlockKind::Logger(l) => Some(l.history()),
            _ => None,
        }
    }

    /// Close assembly: verify feedback bindings, build and cache the
    /// evaluation order, transition to Running.
    fn close_assembly(&mut self) -> Result<(), SimError> {
        self.latches.clear();
        for &idx in &self.loops {
            if let BlockKind::Feedback(fb) = &self.entries[idx].kind {
                match fb.target() {
                    Some(target) => self.latches.push((idx, target)),
                    None => return Err(SimError::Unconfigured(self.entries[idx].name.clone())),
                }
            }
        }

        self.order = self.evaluation_order()?;
        self.phase = Phase::Running;
        debug!(
            "assembly closed: {} blocks, {} feedback terminals",
            self.entries.len(),
            self.loops.len()
        );
        Ok(())
    }

    /// Kahn's algorithm over the forward dependency edges, ties between
    /// independent blocks broken by registration order. Feedback back-edges
    /// are not part of the graph.
    fn evaluation_order(&self) -> Result<Vec<usize>, SimError> {
        let n = self.entries.len();
        let mut in_degree = vec![0usize; n];
        let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); n];

        for (idx, entry) in self.entries.iter().enumerate() {
            for dep in &entry.deps {
                adjacency[dep.0].push(idx);
                in_degree[idx] += 1;
            }
        }

        let mut ready: BinaryHeap<Reverse<usize>> = in_degree
            .iter()
            .enumerate()
            .filter(|(_, &deg)| deg == 0)
            .map(|(idx, _)| Reverse(idx))
            .collect();

        let mut order = Vec::with_capacity(n);
        while let Some(Reverse(idx)) = ready.pop() {
            order.push(idx);
            for &next in &adjacency[idx] {
                in_degree[next] -= 1;
                if in_degree[next] == 0 {
                    ready.push(Reverse(next));
                }
            }
        }

        if order.len() < n {
            // Every unscheduled block sits on a cycle (or downstream of
            // one); report the first by registration order.
            for (idx, &deg) in in_degree.iter().enumerate() {
                if deg > 0 {
                    return Err(SimError::CyclicDependency(self.entries[idx].name.clone()));
                }
            }
        }
        Ok(order)
    }

    /// Advance the whole graph by one step of size `dt`.
    ///
    /// Feedback terminals first latch their upstream's previous-step
    /// output; every block then advances in dependency order, each reading
    /// step-fresh upstream values.
    pub fn step(&mut self, dt: f64) -> Result<(), SimError> {
        if self.phase == Phase::Finalized {
            return Err(SimError::SimulationFinalized);
        }
        if dt <= 0.0 {
            return Err(SimError::InvalidTimestep(dt));
        }
        if self.phase == Phase::Assembling {
            self.close_assembly()?;
        }

        for i in 0..self.latches.len() {
            let (idx, target) = self.latches[i];
            let upstream = self.entries[target.0].kind.value();
            if let BlockKind::Feedback(fb) = &mut self.entries[idx].kind {
                fb.latch(upstream);
            }
        }

        for i in 0..self.order.len() {
            let idx = self.order[i];
            self.scratch.clear();
            for d in 0..self.entries[idx].deps.len() {
                let dep = self.entries[idx].deps[d];
                let v = self.entries[dep.0].kind.value();
                self.scratch.push(v);
            }
            let Entry { kind, .. } = &mut self.entries[idx];
            kind.advance(dt, &self.scratch);
        }

        self.time += dt;
        self.steps += 1;
        Ok(())
    }

    /// Drive the step loop until `done` holds, then finalize.
    ///
    /// The predicate is evaluated against live block state before every
    /// step including the first, so a predicate already true at time zero
    /// yields zero steps. No upper bound on step count is enforced.
    pub fn run(
        &mut self,
        mut done: impl FnMut(&Simulation) -> bool,
        dt: f64,
    ) -> Result<(), SimError> {
        if dt <= 0.0 {
            return Err(SimError::InvalidTimestep(dt));
        }
        if self.phase == Phase::Finalized {
            return Err(SimError::SimulationFinalized);
        }
        if self.phase == Phase::Assembling {
            self.close_assembly()?;
        }

        while !done(self) {
            self.step(dt)?;
        }
        self.finalize()?;
        info!("run complete: {} steps, t = {}", self.steps, self.time);
        Ok(())
    }

    /// Invoke every block's finalize hook in registration order and close
    /// the graph. Stepping or finalizing again afterwards is a fault.
    pub fn finalize(&mut self) -> Result<(), SimError> {
        if self.phase == Phase::Finalized {
            return Err(SimError::SimulationFinalized);
        }
        for entry in &mut self.entries {
            entry.kind.finalize();
        }
        self.phase = Phase::Finalized;
        debug!("finalized {} blocks", self.entries.len());
        Ok(())
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}
