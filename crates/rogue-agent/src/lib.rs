//! **rogue-agent**: turn-by-turn decision making for an exploring agent.
//!
//! [`Policy::step`] threads an [`AgentMemory`] through one turn. It follows
//! the cached plan while it is still valid, otherwise it walks the goal
//! chain (hostiles, power-ups, other agents, the boss, then exploration)
//! and asks a [`rogue_paths::Planner`] for a path to each goal set in turn.
//! Safety and strength questions go through the [`Knowledge`] trait.

pub mod knowledge;
pub mod memory;
pub mod policy;

pub use knowledge::{Knowledge, KnowledgeBase, MapObject, StrengthCheck, Thresholds};
pub use memory::{AgentMemory, Percept, PlanState};
pub use policy::{Goal, Policy, PolicyConfig, Turn};
