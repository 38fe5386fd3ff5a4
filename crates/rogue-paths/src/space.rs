use rogue_core::{Cell, Direction, Range};

use crate::path::Step;

// ---------------------------------------------------------------------------
// Internal node for the A* arena
// ---------------------------------------------------------------------------

/// One search node, stored in a per-cell arena. The parent is an arena
/// index, so the tree has no pointers and cannot form cycles.
#[derive(Clone)]
pub(crate) struct Node {
    pub(crate) g: i32,
    pub(crate) f: i32,
    pub(crate) parent: usize,
    pub(crate) action: Option<Direction>,
    pub(crate) generation: u32,
    pub(crate) open: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: 0,
            f: 0,
            parent: usize::MAX,
            action: None,
            generation: 0,
            open: false,
        }
    }
}

/// Reference into the node arena, ordered by `f` then insertion order
/// for use in `BinaryHeap`.
#[derive(Clone, Copy, Eq, PartialEq)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) f: i32,
    pub(crate) seq: u64,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest f first, and among
        // equal f the earliest pushed.
        other.f.cmp(&self.f).then(other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// Explorer scratch
// ---------------------------------------------------------------------------

/// A persistent path segment: one step plus the index of the segment it
/// extends. Branches share their common prefix.
#[derive(Clone, Copy)]
pub(crate) struct Segment {
    pub(crate) parent: usize,
    pub(crate) step: Option<Step>,
    pub(crate) cell: Cell,
    pub(crate) cost: i32,
    pub(crate) depth: usize,
}

// ---------------------------------------------------------------------------
// FrontierPolicy
// ---------------------------------------------------------------------------

/// What the optimal search does when it finds a cell that is already queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FrontierPolicy {
    /// Replace the queued entry when the new route is strictly cheaper.
    #[default]
    Relax,
    /// Never re-enqueue a cell once discovered. Faster, but may return a
    /// costlier path than the optimum.
    FirstDiscovery,
}

// ---------------------------------------------------------------------------
// SearchSpace
// ---------------------------------------------------------------------------

/// Owner of the scratch memory used by the searches over one grid rectangle.
///
/// The node arena is reused between calls and invalidated lazily with a
/// generation counter, so repeated queries do not reallocate.
pub struct SearchSpace {
    pub(crate) rng: Range,
    pub(crate) width: usize,
    pub(crate) policy: FrontierPolicy,
    // A* caches
    pub(crate) astar_nodes: Vec<Node>,
    pub(crate) astar_generation: u32,
    // explorer caches
    pub(crate) segments: Vec<Segment>,
    // shared scratch buffer for neighbor queries
    pub(crate) nbuf: Vec<Step>,
}

impl SearchSpace {
    /// Create a search space for the given grid rectangle.
    pub fn new(rng: Range) -> Self {
        let w = rng.cols().max(0) as usize;
        Self {
            rng,
            width: w,
            policy: FrontierPolicy::default(),
            astar_nodes: vec![Node::default(); rng.len()],
            astar_generation: 0,
            segments: Vec::new(),
            nbuf: Vec::with_capacity(4),
        }
    }

    /// Builder: set the frontier policy.
    pub fn with_policy(mut self, policy: FrontierPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the frontier policy used by later searches.
    pub fn set_policy(&mut self, policy: FrontierPolicy) {
        self.policy = policy;
    }

    /// The current frontier policy.
    #[inline]
    pub fn policy(&self) -> FrontierPolicy {
        self.policy
    }

    /// Replace the underlying range.
    ///
    /// Caches are kept when the new range fits into the existing arena;
    /// only the generation is bumped so stale nodes are ignored.
    pub fn set_range(&mut self, rng: Range) {
        let new_len = rng.len();
        self.rng = rng;
        self.width = rng.cols().max(0) as usize;

        if new_len <= self.astar_nodes.len() {
            self.astar_generation = self.astar_generation.wrapping_add(1);
            return;
        }

        self.astar_nodes.clear();
        self.astar_nodes.resize(new_len, Node::default());
        self.astar_generation = 0;
    }

    /// The grid rectangle being used.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Convert a `Cell` to a flat index. Returns `None` if out of range.
    #[inline]
    pub(crate) fn idx(&self, c: Cell) -> Option<usize> {
        if !self.rng.contains(c) {
            return None;
        }
        let col = (c.col - self.rng.min.col) as usize;
        let row = (c.row - self.rng.min.row) as usize;
        Some(row * self.width + col)
    }

    /// Convert a flat index back to a `Cell`.
    #[inline]
    pub(crate) fn cell(&self, idx: usize) -> Cell {
        let col = (idx % self.width) as i32 + self.rng.min.col;
        let row = (idx / self.width) as i32 + self.rng.min.row;
        Cell::new(row, col)
    }
}
