use std::collections::{BTreeSet, VecDeque};

use rogue_core::{Cell, Range, TerrainGrid};
use rogue_paths::Step;

use crate::knowledge::MapObject;
use crate::policy::Goal;

/// What the agent senses at the start of a turn.
#[derive(Debug, Clone, Copy)]
pub struct Percept<'a> {
    pub location: Cell,
    pub strength: i32,
    /// The agent's current view of the map. Unobserved cells are Unknown.
    pub grid: &'a TerrainGrid,
    /// Objects visible this turn, excluding the agent itself.
    pub objects: &'a [(Cell, MapObject)],
}

/// Whether a plan is cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlanState {
    #[default]
    Idle,
    Following(Goal),
}

/// Per-agent state carried from one turn to the next.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentMemory {
    pub visited: BTreeSet<Cell>,
    pub unvisited: BTreeSet<Cell>,
    /// Remaining steps of the cached plan.
    pub plan: VecDeque<Step>,
    pub state: PlanState,
    pub monsters: BTreeSet<Cell>,
    pub power_ups: BTreeSet<Cell>,
    pub boss: Option<Cell>,
    pub agents: BTreeSet<Cell>,
    pub turn: u64,
}

impl AgentMemory {
    /// Fresh memory for a `rows × cols` map with every cell unvisited.
    pub fn new(rows: i32, cols: i32) -> Self {
        Self {
            visited: BTreeSet::new(),
            unvisited: Range::sized(rows, cols).iter().collect(),
            plan: VecDeque::new(),
            state: PlanState::Idle,
            monsters: BTreeSet::new(),
            power_ups: BTreeSet::new(),
            boss: None,
            agents: BTreeSet::new(),
            turn: 0,
        }
    }

    /// Record the agent's position and refresh the visible objects.
    pub fn observe(&mut self, percept: &Percept<'_>) {
        self.turn += 1;
        self.unvisited.remove(&percept.location);
        self.visited.insert(percept.location);

        self.monsters.clear();
        self.power_ups.clear();
        self.agents.clear();
        self.boss = None;
        for &(cell, obj) in percept.objects {
            match obj {
                MapObject::Monster { .. } => {
                    self.monsters.insert(cell);
                }
                MapObject::Boss => self.boss = Some(cell),
                MapObject::PowerUp { .. } => {
                    self.power_ups.insert(cell);
                }
                MapObject::Agent => {
                    self.agents.insert(cell);
                }
            }
        }
    }

    /// Drop the cached plan.
    pub fn clear_plan(&mut self) {
        self.plan.clear();
        self.state = PlanState::Idle;
    }

    /// Fraction of cells visited so far.
    pub fn coverage(&self) -> f64 {
        let total = self.visited.len() + self.unvisited.len();
        if total == 0 {
            return 0.0;
        }
        self.visited.len() as f64 / total as f64
    }
}
