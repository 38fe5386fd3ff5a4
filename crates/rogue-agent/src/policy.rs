use std::collections::HashSet;

use rand::Rng;
use rogue_core::{Cell, Direction};
use rogue_paths::{Path, Planner, Step, Strategy};

use crate::knowledge::{Knowledge, StrengthCheck};
use crate::memory::{AgentMemory, Percept, PlanState};

/// One link of the goal-selection chain, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Goal {
    Hostiles,
    PowerUps,
    Agents,
    Boss,
    ExploreSafe,
    /// Last resort: explore without avoiding unsafe cells.
    ExploreAny,
}

impl Goal {
    /// The chain, highest priority first.
    pub const CHAIN: [Goal; 6] = [
        Goal::Hostiles,
        Goal::PowerUps,
        Goal::Agents,
        Goal::Boss,
        Goal::ExploreSafe,
        Goal::ExploreAny,
    ];

    /// Whether this link explores rather than heads for a known target.
    #[inline]
    pub fn is_exploration(self) -> bool {
        matches!(self, Goal::ExploreSafe | Goal::ExploreAny)
    }
}

/// Search strategies used by the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PolicyConfig {
    /// Used for hostiles, power-ups, agents and the boss.
    pub target_strategy: Strategy,
    /// Used for both exploration links.
    pub explore_strategy: Strategy,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            target_strategy: Strategy::Optimal,
            explore_strategy: Strategy::Bounded,
        }
    }
}

/// Outcome of one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub memory: AgentMemory,
    /// The move to make, or `None` when nothing could be planned.
    pub action: Option<Direction>,
}

/// Per-turn decision maker: follows a cached plan, or runs the goal chain
/// to make a new one.
pub struct Policy<K: Knowledge, R: Rng> {
    knowledge: K,
    planner: Planner<R>,
    config: PolicyConfig,
}

impl<K: Knowledge, R: Rng> Policy<K, R> {
    pub fn new(knowledge: K, planner: Planner<R>) -> Self {
        Self {
            knowledge,
            planner,
            config: PolicyConfig::default(),
        }
    }

    pub fn with_config(mut self, config: PolicyConfig) -> Self {
        self.config = config;
        self
    }

    pub fn knowledge(&self) -> &K {
        &self.knowledge
    }

    pub fn planner(&self) -> &Planner<R> {
        &self.planner
    }

    /// Decide this turn's move.
    ///
    /// A blocked cached step is dropped and the chain is re-run, at most
    /// once per turn.
    pub fn step(&mut self, mut memory: AgentMemory, percept: &Percept<'_>) -> Turn {
        memory.observe(percept);
        self.knowledge.tell_percepts(percept.objects);

        let mut replanned = false;
        loop {
            if let Some(next) = memory.plan.front().copied() {
                if is_blocked(next, percept) {
                    log::debug!(
                        "turn {}: cached step {} to {} is blocked, replanning",
                        memory.turn,
                        next.dir,
                        next.cell
                    );
                    memory.clear_plan();
                } else {
                    memory.plan.pop_front();
                    if memory.plan.is_empty() {
                        memory.state = PlanState::Idle;
                    }
                    return Turn {
                        memory,
                        action: Some(next.dir),
                    };
                }
            } else {
                memory.state = PlanState::Idle;
            }

            if replanned {
                break;
            }
            replanned = true;

            let Some((goal, path)) = self.choose(&memory, percept) else {
                break;
            };
            log::debug!(
                "turn {}: following {goal:?} from {} via {path} (cost {})",
                memory.turn,
                percept.location,
                path.cost
            );
            memory.plan = path.steps.into();
            memory.state = PlanState::Following(goal);
        }

        log::debug!("turn {}: no goal reachable from {}", memory.turn, percept.location);
        Turn {
            memory,
            action: None,
        }
    }

    /// Run the chain and return the first link that yields a usable path.
    fn choose(&mut self, memory: &AgentMemory, percept: &Percept<'_>) -> Option<(Goal, Path)> {
        let strength = percept.strength;
        let safe: HashSet<Cell> = percept
            .grid
            .bounds()
            .iter()
            .filter(|&c| self.knowledge.is_safe(c))
            .collect();

        for goal in Goal::CHAIN {
            let targets: Vec<Cell> = match goal {
                Goal::Hostiles => {
                    if !self.knowledge.has_enough_strength_for(StrengthCheck::Monster, strength) {
                        continue;
                    }
                    memory.monsters.iter().copied().collect()
                }
                Goal::PowerUps => {
                    if self
                        .knowledge
                        .has_enough_strength_for(StrengthCheck::Sufficient, strength)
                    {
                        continue;
                    }
                    memory.power_ups.iter().copied().collect()
                }
                Goal::Agents => memory.agents.iter().copied().collect(),
                Goal::Boss => memory.boss.into_iter().collect(),
                Goal::ExploreSafe => memory
                    .unvisited
                    .iter()
                    .copied()
                    .filter(|c| safe.contains(c))
                    .collect(),
                Goal::ExploreAny => memory.unvisited.iter().copied().collect(),
            };
            // A target underfoot yields a zero-move path, which would hide
            // every other target in the set.
            let targets: Vec<Cell> = targets
                .into_iter()
                .filter(|&c| c != percept.location)
                .collect();
            if targets.is_empty() {
                continue;
            }

            let strategy = if goal.is_exploration() {
                self.config.explore_strategy
            } else {
                self.config.target_strategy
            };

            let path = if goal == Goal::ExploreAny {
                self.planner.plan(
                    percept.grid,
                    percept.location,
                    targets.iter().copied(),
                    None,
                    strategy,
                )
            } else {
                let mut permitted = safe.clone();
                permitted.extend(targets.iter().copied());
                self.planner.plan(
                    percept.grid,
                    percept.location,
                    targets.iter().copied(),
                    Some(&permitted),
                    strategy,
                )
            };
            log::trace!(
                "{goal:?}: {} targets, {} attempts, {path}",
                targets.len(),
                self.planner.last_attempts()
            );

            if !path.is_reachable() || path.is_empty() {
                continue;
            }
            if goal == Goal::Boss {
                let left = strength.saturating_sub(path.cost);
                if !self.knowledge.has_enough_strength_for(StrengthCheck::Boss, left) {
                    log::debug!("boss at cost {} would leave strength {left}", path.cost);
                    continue;
                }
            }
            return Some((goal, path));
        }
        None
    }
}

/// A cached step is stale when it enters a wall or does not leave from
/// where the agent stands.
fn is_blocked(step: Step, percept: &Percept<'_>) -> bool {
    step.origin() != percept.location || percept.grid.tile_at(step.cell).is_wall()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rogue_core::TerrainGrid;

    use super::*;
    use crate::knowledge::{KnowledgeBase, MapObject};

    fn policy() -> Policy<KnowledgeBase, StdRng> {
        Policy::new(KnowledgeBase::default(), Planner::new(StdRng::seed_from_u64(3)))
    }

    fn percept<'a>(
        grid: &'a TerrainGrid,
        location: (i32, i32),
        strength: i32,
        objects: &'a [(Cell, MapObject)],
    ) -> Percept<'a> {
        Percept {
            location: location.into(),
            strength,
            grid,
            objects,
        }
    }

    fn open_grid() -> TerrainGrid {
        TerrainGrid::parse("PPPPP PPPPP PPPPP PPPPP PPPPP").unwrap()
    }

    #[test]
    fn strong_agent_engages_hostiles_first() {
        let grid = open_grid();
        let objects = [
            (Cell::new(0, 3), MapObject::Monster { strength: 40 }),
            (Cell::new(2, 0), MapObject::PowerUp { delta: 10 }),
        ];
        let mut p = policy();
        let turn = p.step(AgentMemory::new(5, 5), &percept(&grid, (0, 0), 50, &objects));
        assert_eq!(turn.action, Some(Direction::East));
        assert_eq!(turn.memory.state, PlanState::Following(Goal::Hostiles));
        assert_eq!(turn.memory.plan.len(), 2);
    }

    #[test]
    fn weak_agent_seeks_power_ups() {
        let grid = open_grid();
        let objects = [
            (Cell::new(0, 3), MapObject::Monster { strength: 40 }),
            (Cell::new(2, 0), MapObject::PowerUp { delta: 10 }),
        ];
        let mut p = policy();
        let turn = p.step(AgentMemory::new(5, 5), &percept(&grid, (0, 0), 20, &objects));
        assert_eq!(turn.action, Some(Direction::South));
        assert_eq!(turn.memory.state, PlanState::Following(Goal::PowerUps));
    }

    #[test]
    fn other_agents_before_boss() {
        let grid = open_grid();
        let objects = [
            (Cell::new(4, 4), MapObject::Boss),
            (Cell::new(0, 2), MapObject::Agent),
        ];
        let mut p = policy();
        let turn = p.step(AgentMemory::new(5, 5), &percept(&grid, (0, 0), 120, &objects));
        assert_eq!(turn.memory.state, PlanState::Following(Goal::Agents));
        assert_eq!(turn.action, Some(Direction::East));
    }

    #[test]
    fn boss_needs_strength_left_after_travel() {
        let grid = open_grid();
        let objects = [(Cell::new(4, 4), MapObject::Boss)];

        // 100 - 8 = 92 >= 90
        let mut p = policy();
        let turn = p.step(AgentMemory::new(5, 5), &percept(&grid, (0, 0), 100, &objects));
        assert_eq!(turn.memory.state, PlanState::Following(Goal::Boss));
        assert_eq!(turn.memory.plan.len(), 7);

        // 95 - 8 = 87 < 90
        let mut p = policy();
        let turn = p.step(AgentMemory::new(5, 5), &percept(&grid, (0, 0), 95, &objects));
        assert_eq!(turn.memory.state, PlanState::Following(Goal::ExploreSafe));
        assert!(turn.action.is_some());
    }

    #[test]
    fn safety_filter_blocks_path_through_monster() {
        // The only way to the power-up runs through the monster.
        let grid = TerrainGrid::parse("PPPP WPWP PPWP WWWP").unwrap();
        let objects = [
            (Cell::new(1, 1), MapObject::Monster { strength: 50 }),
            (Cell::new(2, 0), MapObject::PowerUp { delta: 10 }),
        ];
        let mut memory = AgentMemory::new(4, 4);
        memory.unvisited = BTreeSet::from([Cell::new(0, 3)]);
        let mut p = policy();
        let turn = p.step(memory, &percept(&grid, (0, 0), 10, &objects));
        // Strength 10 cannot take the monster; the power-up is only
        // reachable past it.
        assert_ne!(turn.memory.state, PlanState::Following(Goal::PowerUps));
        assert_eq!(turn.memory.state, PlanState::Following(Goal::ExploreSafe));
        assert_eq!(turn.action, Some(Direction::East));
    }

    #[test]
    fn path_may_end_on_but_not_cross_unsafe_cells() {
        let grid = open_grid();
        // Another agent stands between us and the monster: go around it,
        // then end on the monster.
        let objects = [
            (Cell::new(0, 1), MapObject::Agent),
            (Cell::new(0, 2), MapObject::Monster { strength: 5 }),
        ];
        let mut p = policy();
        let turn = p.step(AgentMemory::new(5, 5), &percept(&grid, (0, 0), 40, &objects));
        assert_eq!(turn.memory.state, PlanState::Following(Goal::Hostiles));
        assert_eq!(turn.action, Some(Direction::South));
        let cells: Vec<Cell> = turn.memory.plan.iter().map(|s| s.cell).collect();
        assert!(!cells.contains(&Cell::new(0, 1)));
        assert_eq!(cells.last(), Some(&Cell::new(0, 2)));
    }

    #[test]
    fn cached_plan_is_followed_then_released() {
        let grid = open_grid();
        let objects = [(Cell::new(0, 3), MapObject::PowerUp { delta: 10 })];
        let mut p = policy();

        let turn = p.step(AgentMemory::new(5, 5), &percept(&grid, (0, 0), 20, &objects));
        assert_eq!(turn.action, Some(Direction::East));
        assert_eq!(turn.memory.state, PlanState::Following(Goal::PowerUps));

        // A new, closer power-up does not interrupt the cached plan.
        let closer = [
            (Cell::new(0, 3), MapObject::PowerUp { delta: 10 }),
            (Cell::new(1, 1), MapObject::PowerUp { delta: 10 }),
        ];
        let turn = p.step(turn.memory, &percept(&grid, (0, 1), 20, &closer));
        assert_eq!(turn.action, Some(Direction::East));
        assert_eq!(turn.memory.state, PlanState::Following(Goal::PowerUps));

        let turn = p.step(turn.memory, &percept(&grid, (0, 2), 20, &objects));
        assert_eq!(turn.action, Some(Direction::East));
        assert_eq!(turn.memory.state, PlanState::Idle);
        assert!(turn.memory.plan.is_empty());
        assert_eq!(turn.memory.turn, 3);
    }

    #[test]
    fn blocked_step_triggers_replan() {
        let grid = TerrainGrid::parse("PWP PPP PPP").unwrap();
        let objects = [(Cell::new(2, 0), MapObject::PowerUp { delta: 10 })];
        let mut memory = AgentMemory::new(3, 3);
        memory.plan = [Step::from_cell(Cell::new(0, 0), Direction::East)].into();
        memory.state = PlanState::Following(Goal::ExploreSafe);

        let mut p = policy();
        let turn = p.step(memory, &percept(&grid, (0, 0), 20, &objects));
        assert_eq!(turn.action, Some(Direction::South));
        assert_eq!(turn.memory.state, PlanState::Following(Goal::PowerUps));
    }

    #[test]
    fn stale_plan_is_discarded() {
        let grid = open_grid();
        let objects = [(Cell::new(0, 2), MapObject::PowerUp { delta: 10 })];
        let mut memory = AgentMemory::new(5, 5);
        // Left over from a turn where the agent stood elsewhere.
        memory.plan = [Step::from_cell(Cell::new(3, 3), Direction::North)].into();
        memory.state = PlanState::Following(Goal::ExploreAny);

        let mut p = policy();
        let turn = p.step(memory, &percept(&grid, (0, 0), 20, &objects));
        assert_eq!(turn.action, Some(Direction::East));
        assert_eq!(turn.memory.state, PlanState::Following(Goal::PowerUps));
    }

    #[test]
    fn last_resort_ignores_safety() {
        let grid = TerrainGrid::parse("PPPP PPPP PPPP PPPP").unwrap();
        let objects = [(Cell::new(0, 2), MapObject::Monster { strength: 60 })];
        let mut memory = AgentMemory::new(4, 4);
        memory.unvisited = BTreeSet::from([Cell::new(0, 2)]);

        let mut p = policy();
        let turn = p.step(memory, &percept(&grid, (0, 0), 10, &objects));
        assert_eq!(turn.memory.state, PlanState::Following(Goal::ExploreAny));
        assert_eq!(turn.action, Some(Direction::East));
    }

    #[test]
    fn target_underfoot_does_not_hide_others() {
        let grid = open_grid();
        let objects = [
            (Cell::new(0, 0), MapObject::PowerUp { delta: 5 }),
            (Cell::new(2, 0), MapObject::PowerUp { delta: 5 }),
        ];
        let mut p = policy();
        let turn = p.step(AgentMemory::new(5, 5), &percept(&grid, (0, 0), 20, &objects));
        assert_eq!(turn.memory.state, PlanState::Following(Goal::PowerUps));
        assert_eq!(turn.action, Some(Direction::South));
        assert_eq!(turn.memory.plan.back().map(|s| s.cell), Some(Cell::new(2, 0)));
    }

    #[test]
    fn nothing_to_do_yields_no_action() {
        let grid = TerrainGrid::parse("P").unwrap();
        let mut p = policy();
        let turn = p.step(AgentMemory::new(1, 1), &percept(&grid, (0, 0), 50, &[]));
        assert_eq!(turn.action, None);
        assert_eq!(turn.memory.state, PlanState::Idle);
        assert_eq!(turn.memory.coverage(), 1.0);
    }

    #[test]
    fn optimal_exploration_config() {
        let grid = TerrainGrid::parse("PPPP PPPP PPPP PPPP").unwrap();
        let mut memory = AgentMemory::new(4, 4);
        memory.unvisited = BTreeSet::from([Cell::new(3, 0)]);
        let mut p = policy().with_config(PolicyConfig {
            explore_strategy: Strategy::Optimal,
            ..PolicyConfig::default()
        });
        let turn = p.step(memory, &percept(&grid, (0, 0), 50, &[]));
        assert_eq!(turn.memory.plan.len(), 2);
        assert_eq!(turn.action, Some(Direction::South));
    }
}
