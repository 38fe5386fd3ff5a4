use std::cmp::Ordering;
use std::collections::HashMap;

use rogue_core::{Cell, Direction};

use crate::SearchSpace;
use crate::distance::manhattan;
use crate::path::{Path, Step};
use crate::space::Segment;
use crate::traits::FrontierPather;

/// Result of a bounded exploration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exploration {
    /// The cheapest completed branch. Never unreachable; at worst the
    /// zero-move path.
    pub path: Path,
    /// Number of moves in the longest branch walked.
    pub depth: usize,
    /// Number of completed branches that survived pruning.
    pub branches: usize,
}

const ROOT: usize = usize::MAX;

impl SearchSpace {
    /// Depth-limited walk from `from` toward `to`.
    ///
    /// Every move must strictly shrink the Manhattan gap to `to`, so all
    /// routes to a cell share one depth and no branch can revisit a cell.
    /// A branch stops on a frontier cell (cost `parent - frontier_bonus`),
    /// after `depth_limit` moves, or when no shrinking move is legal.
    ///
    /// The walk runs layer by layer over a shared segment arena. Within a
    /// layer, a branch reaching a cell that another branch reached no more
    /// cheaply is dropped. The returned path is the cheapest completed
    /// branch, ties going to the one first in N, S, W, E expansion order.
    pub fn explore<P: FrontierPather>(
        &mut self,
        pather: &P,
        from: Cell,
        to: Cell,
        depth_limit: usize,
    ) -> Exploration {
        if !self.rng.contains(from) {
            return Exploration {
                path: Path::trivial(),
                depth: 0,
                branches: 0,
            };
        }

        let mut segments = std::mem::take(&mut self.segments);
        let mut nbuf = std::mem::take(&mut self.nbuf);
        segments.clear();
        segments.push(Segment {
            parent: ROOT,
            step: None,
            cell: from,
            cost: 0,
            depth: 0,
        });

        let mut layer: Vec<usize> = vec![0];
        let mut candidates: Vec<usize> = Vec::new();
        let mut best_at: HashMap<Cell, usize> = HashMap::new();
        let mut best: Option<usize> = None;
        let mut depth = 0;
        let mut branches = 0;

        while !layer.is_empty() {
            candidates.clear();
            best_at.clear();

            for &si in &layer {
                let Segment {
                    cell, cost, depth: d, ..
                } = segments[si];
                depth = depth.max(d);

                if d >= depth_limit {
                    branches += 1;
                    offer(&segments, si, &mut best);
                    continue;
                }

                let gap = manhattan(cell, to);
                nbuf.clear();
                pather.neighbors(cell, &mut nbuf);
                let mut expanded = false;

                for &step in nbuf.iter() {
                    if manhattan(step.cell, to) >= gap {
                        continue;
                    }
                    expanded = true;

                    if pather.is_frontier(step.cell) {
                        let ci = segments.len();
                        segments.push(Segment {
                            parent: si,
                            step: Some(step),
                            cell: step.cell,
                            cost: cost - pather.frontier_bonus(),
                            depth: d + 1,
                        });
                        depth = depth.max(d + 1);
                        branches += 1;
                        offer(&segments, ci, &mut best);
                        continue;
                    }

                    let child_cost = cost.saturating_add(pather.cost(cell, step.cell));
                    let ci = segments.len();
                    segments.push(Segment {
                        parent: si,
                        step: Some(step),
                        cell: step.cell,
                        cost: child_cost,
                        depth: d + 1,
                    });
                    candidates.push(ci);
                    match best_at.get(&step.cell) {
                        Some(&prev) if segments[prev].cost <= child_cost => {}
                        _ => {
                            best_at.insert(step.cell, ci);
                        }
                    }
                }

                if !expanded {
                    branches += 1;
                    offer(&segments, si, &mut best);
                }
            }

            // Candidates were pushed in expansion order; keep that order
            // among the survivors.
            layer.clear();
            layer.extend(
                candidates
                    .iter()
                    .copied()
                    .filter(|&ci| best_at.get(&segments[ci].cell) == Some(&ci)),
            );
        }

        let path = match best {
            Some(bi) => rebuild(&segments, bi),
            None => Path::trivial(),
        };
        log::trace!(
            "explore {from} -> {to}: {} branches, depth {depth}, best {path} ({})",
            branches,
            path.cost
        );

        self.segments = segments;
        self.nbuf = nbuf;
        Exploration {
            path,
            depth,
            branches,
        }
    }
}

/// Record completed branch `si` if it beats the current best.
fn offer(segments: &[Segment], si: usize, best: &mut Option<usize>) {
    let better = best.is_none_or(|bi| compare_branches(segments, si, bi) == Ordering::Less);
    if better {
        *best = Some(si);
    }
}

/// Directions from the root to segment `si`.
fn directions(segments: &[Segment], mut si: usize) -> Vec<Direction> {
    let mut dirs = Vec::with_capacity(segments[si].depth);
    while let Some(step) = segments[si].step {
        dirs.push(step.dir);
        si = segments[si].parent;
    }
    dirs.reverse();
    dirs
}

/// Order two completed branches: cheaper first, then earlier in expansion
/// order (lexicographic over directions).
fn compare_branches(segments: &[Segment], a: usize, b: usize) -> Ordering {
    segments[a]
        .cost
        .cmp(&segments[b].cost)
        .then_with(|| directions(segments, a).cmp(&directions(segments, b)))
}

fn rebuild(segments: &[Segment], mut si: usize) -> Path {
    let cost = segments[si].cost;
    let mut steps: Vec<Step> = Vec::with_capacity(segments[si].depth);
    while let Some(step) = segments[si].step {
        steps.push(step);
        si = segments[si].parent;
    }
    steps.reverse();
    Path { steps, cost }
}
