use std::collections::HashSet;

use rand::{Rng, RngExt};
use rogue_core::{Cell, CostModel, Range, TerrainGrid, UnknownPolicy};

use crate::distance::depth_limit;
use crate::path::Path;
use crate::pather::TerrainPather;
use crate::space::{FrontierPolicy, SearchSpace};

/// Which search [`Planner::plan`] runs against each goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    /// A* over known terrain only.
    Optimal,
    /// Depth-limited exploration that may step into unknown cells.
    Bounded,
}

/// Runs one search per goal and keeps the cheapest result.
pub struct Planner<R: Rng> {
    rng: R,
    space: SearchSpace,
    costs: CostModel,
    last_attempts: usize,
}

impl<R: Rng> Planner<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            space: SearchSpace::new(Range::default()),
            costs: CostModel::default(),
            last_attempts: 0,
        }
    }

    /// Use `costs` for every later search. Non-positive costs are raised
    /// to 1.
    pub fn with_costs(mut self, costs: CostModel) -> Self {
        if let Err(e) = costs.validate() {
            log::warn!("{e}; clamping terrain costs to at least 1");
        }
        self.costs = costs.clamped();
        self
    }

    pub fn with_frontier_policy(mut self, policy: FrontierPolicy) -> Self {
        self.space.set_policy(policy);
        self
    }

    #[inline]
    pub fn costs(&self) -> &CostModel {
        &self.costs
    }

    /// Number of searches the last [`plan`](Self::plan) call ran.
    #[inline]
    pub fn last_attempts(&self) -> usize {
        self.last_attempts
    }

    /// Cheapest path from `start` to any of `goals`.
    ///
    /// `None` goals are skipped. Ties keep the earliest goal. A non-empty
    /// `permitted` set restricts which cells may be entered. Returns
    /// [`Path::unreachable`] when no goal can be reached.
    pub fn plan<I>(
        &mut self,
        grid: &TerrainGrid,
        start: Cell,
        goals: I,
        permitted: Option<&HashSet<Cell>>,
        strategy: Strategy,
    ) -> Path
    where
        I: IntoIterator,
        I::Item: Into<Option<Cell>>,
    {
        self.last_attempts = 0;
        let mut goals: Vec<Cell> = goals.into_iter().filter_map(Into::<Option<Cell>>::into).collect();
        if goals.is_empty() {
            return Path::unreachable();
        }

        if self.space.range() != grid.bounds() {
            self.space.set_range(grid.bounds());
        }

        let mut best = Path::unreachable();
        match strategy {
            Strategy::Optimal => {
                let pather = TerrainPather::new(grid, &self.costs).with_permitted(permitted);
                for goal in goals {
                    self.last_attempts += 1;
                    let path = self.space.astar_path(&pather, start, goal);
                    log::trace!("astar {start} -> {goal}: {path} ({})", path.cost);
                    if path.cost < best.cost {
                        best = path;
                    }
                }
            }
            Strategy::Bounded => {
                let limit = depth_limit(grid.rows(), grid.cols());
                if goals.len() > limit {
                    goals = (0..limit)
                        .map(|_| goals[self.rng.random_range(0..goals.len())])
                        .collect();
                    log::trace!("sampled {limit} exploration goals");
                }
                let pather = TerrainPather::new(grid, &self.costs)
                    .with_unknown(UnknownPolicy::Penalized)
                    .with_permitted(permitted);
                for goal in goals {
                    self.last_attempts += 1;
                    let found = self.space.explore(&pather, start, goal, limit);
                    if found.path.is_empty() && start != goal {
                        continue;
                    }
                    if found.path.cost < best.cost {
                        best = found.path;
                    }
                }
            }
        }

        log::trace!(
            "plan {strategy:?} from {start}: {} attempts, best {best}",
            self.last_attempts
        );
        best
    }
}
