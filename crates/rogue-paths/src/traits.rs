use rogue_core::Cell;

use crate::path::Step;

/// Minimal search interface: enumerates the legal moves out of a cell.
pub trait Pather {
    /// Append the legal steps out of `c` into `buf`. The caller clears `buf`
    /// before calling. Steps are appended in [`rogue_core::Direction::ALL`] order.
    fn neighbors(&self, c: Cell, buf: &mut Vec<Step>);
}

/// Pather with weighted (positive-cost) moves.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` into the adjacent `to`. Must be > 0.
    fn cost(&self, from: Cell, to: Cell) -> i32;
}

/// Full A* pather with an admissible heuristic.
pub trait AstarPather: WeightedPather {
    /// Heuristic estimate of the cost from `from` to `to`.
    /// Must never overestimate the true cost (admissible).
    fn estimate(&self, from: Cell, to: Cell) -> i32;
}

/// Pather for the depth-limited explorer.
pub trait FrontierPather: WeightedPather {
    /// Whether `c` is unexplored territory where a branch may stop.
    fn is_frontier(&self, c: Cell) -> bool;

    /// Amount subtracted from a branch's cost when it stops on a frontier.
    fn frontier_bonus(&self) -> i32;
}
