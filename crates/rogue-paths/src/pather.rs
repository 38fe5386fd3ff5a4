use std::collections::HashSet;

use rogue_core::{Cell, CostModel, TerrainGrid, UnknownPolicy};

use crate::distance::manhattan;
use crate::path::Step;
use crate::traits::{AstarPather, FrontierPather, Pather, WeightedPather};

/// Pather over a [`TerrainGrid`] priced by a [`CostModel`].
///
/// A cell can be entered when it is in bounds, not a wall, priced under the
/// current [`UnknownPolicy`], and inside the permitted set when one is given.
/// An empty permitted set means no restriction.
#[derive(Clone, Copy)]
pub struct TerrainPather<'a> {
    grid: &'a TerrainGrid,
    costs: &'a CostModel,
    unknown: UnknownPolicy,
    permitted: Option<&'a HashSet<Cell>>,
}

impl<'a> TerrainPather<'a> {
    pub fn new(grid: &'a TerrainGrid, costs: &'a CostModel) -> Self {
        Self {
            grid,
            costs,
            unknown: UnknownPolicy::Impassable,
            permitted: None,
        }
    }

    pub fn with_unknown(mut self, unknown: UnknownPolicy) -> Self {
        self.unknown = unknown;
        self
    }

    pub fn with_permitted(mut self, permitted: Option<&'a HashSet<Cell>>) -> Self {
        self.permitted = permitted.filter(|p| !p.is_empty());
        self
    }

    fn enter_cost(&self, c: Cell) -> Option<i32> {
        let tile = self.grid.at(c)?;
        if self.permitted.is_some_and(|p| !p.contains(&c)) {
            return None;
        }
        self.costs.cost(tile, self.unknown)
    }
}

impl Pather for TerrainPather<'_> {
    fn neighbors(&self, c: Cell, buf: &mut Vec<Step>) {
        for (dir, n) in c.neighbors_4() {
            if self.enter_cost(n).is_some() {
                buf.push(Step { cell: n, dir });
            }
        }
    }
}

impl WeightedPather for TerrainPather<'_> {
    fn cost(&self, _from: Cell, to: Cell) -> i32 {
        // Only called on cells `neighbors` produced.
        self.enter_cost(to).unwrap_or(i32::MAX)
    }
}

impl AstarPather for TerrainPather<'_> {
    fn estimate(&self, from: Cell, to: Cell) -> i32 {
        manhattan(from, to) * self.costs.min_step_cost_for(self.unknown)
    }
}

impl FrontierPather for TerrainPather<'_> {
    fn is_frontier(&self, c: Cell) -> bool {
        self.grid.tile_at(c).is_unknown()
    }

    fn frontier_bonus(&self) -> i32 {
        self.costs.frontier_bonus
    }
}
