use std::collections::BinaryHeap;

use rogue_core::Cell;

use crate::SearchSpace;
use crate::path::{Path, Step};
use crate::space::{FrontierPolicy, NodeRef};
use crate::traits::AstarPather;

impl SearchSpace {
    /// Compute the lowest-cost path from `from` to `to` using A*.
    ///
    /// Nodes are popped by `g + estimate`, ties by insertion order, and the
    /// goal is tested on pop, so with a consistent estimate the first goal
    /// popped carries an optimal cost (under [`FrontierPolicy::Relax`]).
    ///
    /// Returns [`Path::trivial`] when `from == to` and [`Path::unreachable`]
    /// when either end is outside the range or the frontier runs dry.
    pub fn astar_path<P: AstarPather>(&mut self, pather: &P, from: Cell, to: Cell) -> Path {
        let (Some(start_idx), Some(goal_idx)) = (self.idx(from), self.idx(to)) else {
            return Path::unreachable();
        };

        if start_idx == goal_idx {
            return Path::trivial();
        }

        // Bump generation to lazily invalidate all nodes.
        self.astar_generation = self.astar_generation.wrapping_add(1);
        let cur_gen = self.astar_generation;
        let relax = self.policy == FrontierPolicy::Relax;

        // Initialise the start node.
        {
            let node = &mut self.astar_nodes[start_idx];
            node.g = 0;
            node.f = pather.estimate(from, to);
            node.parent = usize::MAX;
            node.action = None;
            node.generation = cur_gen;
            node.open = true;
        }

        let mut seq: u64 = 0;
        let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
        open.push(NodeRef {
            idx: start_idx,
            f: self.astar_nodes[start_idx].f,
            seq,
        });

        let mut nbuf = std::mem::take(&mut self.nbuf);

        let found = 'search: loop {
            let Some(current) = open.pop() else {
                break 'search false;
            };

            let ci = current.idx;

            // Skip stale entries.
            if self.astar_nodes[ci].generation != cur_gen || !self.astar_nodes[ci].open {
                continue;
            }

            if ci == goal_idx {
                break 'search true;
            }

            self.astar_nodes[ci].open = false;
            let current_g = self.astar_nodes[ci].g;
            let current_cell = self.cell(ci);

            nbuf.clear();
            pather.neighbors(current_cell, &mut nbuf);

            for &Step { cell: nc, dir } in nbuf.iter() {
                let Some(ni) = self.idx(nc) else {
                    continue;
                };
                let tentative_g = current_g.saturating_add(pather.cost(current_cell, nc));

                let n = &mut self.astar_nodes[ni];
                if n.generation == cur_gen {
                    // Already explored or queued this generation.
                    if !relax || !n.open || tentative_g >= n.g {
                        continue;
                    }
                } else {
                    n.generation = cur_gen;
                }

                n.g = tentative_g;
                n.f = tentative_g.saturating_add(pather.estimate(nc, to));
                n.parent = ci;
                n.action = Some(dir);
                n.open = true;

                seq += 1;
                open.push(NodeRef { idx: ni, f: n.f, seq });
            }
        };

        self.nbuf = nbuf;

        if !found {
            return Path::unreachable();
        }

        // Reconstruct path by walking parent indices back to the start.
        let cost = self.astar_nodes[goal_idx].g;
        let mut steps = Vec::new();
        let mut ci = goal_idx;
        while let Some(dir) = self.astar_nodes[ci].action {
            steps.push(Step {
                cell: self.cell(ci),
                dir,
            });
            ci = self.astar_nodes[ci].parent;
        }
        steps.reverse();
        Path { steps, cost }
    }
}
