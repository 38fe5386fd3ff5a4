use std::fmt;

use rogue_core::{Cell, Direction};

/// Sentinel cost meaning "no path".
pub const UNREACHABLE: i32 = i32::MAX;

/// One move of a plan: go `dir`, arriving at `cell`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    pub cell: Cell,
    pub dir: Direction,
}

impl Step {
    /// The step leaving `from` in direction `dir`.
    #[inline]
    pub fn from_cell(from: Cell, dir: Direction) -> Self {
        Self {
            cell: from.step(dir),
            dir,
        }
    }

    /// The cell this step leaves from.
    #[inline]
    pub fn origin(self) -> Cell {
        self.cell.step(self.dir.opposite())
    }
}

/// The outcome of a search: an ordered list of steps and its total cost.
///
/// An unreachable goal is represented by an empty path with cost
/// [`UNREACHABLE`], never by an error.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    pub steps: Vec<Step>,
    pub cost: i32,
}

impl Path {
    /// The "no path" result.
    pub const fn unreachable() -> Self {
        Self {
            steps: Vec::new(),
            cost: UNREACHABLE,
        }
    }

    /// The zero-move path (start is already where it needs to be).
    pub const fn trivial() -> Self {
        Self {
            steps: Vec::new(),
            cost: 0,
        }
    }

    /// Whether the goal was reached.
    #[inline]
    pub fn is_reachable(&self) -> bool {
        self.cost != UNREACHABLE
    }

    /// Number of moves.
    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the path has no moves.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The first move, if any.
    #[inline]
    pub fn first(&self) -> Option<Step> {
        self.steps.first().copied()
    }

    /// The cell the path ends on, if it has any moves.
    #[inline]
    pub fn end(&self) -> Option<Cell> {
        self.steps.last().map(|s| s.cell)
    }

    /// The sequence of directions.
    pub fn directions(&self) -> impl Iterator<Item = Direction> + '_ {
        self.steps.iter().map(|s| s.dir)
    }
}

impl Default for Path {
    fn default() -> Self {
        Self::unreachable()
    }
}

impl fmt::Display for Path {
    /// Directions as letters, e.g. `NEESS`. Unreachable paths print `-`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_reachable() {
            return write!(f, "-");
        }
        for d in self.directions() {
            write!(f, "{d}")?;
        }
        Ok(())
    }
}
