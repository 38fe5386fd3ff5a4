//! What the agent believes about the cells and objects around it.

use std::collections::HashMap;

use rogue_core::Cell;

/// An object observed on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MapObject {
    /// A static or roaming monster.
    Monster { strength: i32 },
    Boss,
    PowerUp { delta: i32 },
    /// Another agent.
    Agent,
}

impl MapObject {
    /// Whether the object makes its cell unsafe to walk through.
    #[inline]
    pub fn is_hostile(self) -> bool {
        matches!(self, MapObject::Monster { .. } | MapObject::Boss | MapObject::Agent)
    }
}

/// The strength question asked before engaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrengthCheck {
    Monster,
    Boss,
    /// Strong enough that power-ups are no longer worth chasing.
    Sufficient,
}

/// Safety and strength queries the decision policy depends on.
pub trait Knowledge {
    /// Replace what is known about objects with this turn's observation.
    fn tell_percepts(&mut self, objects: &[(Cell, MapObject)]);

    /// Whether `cell` can be walked through without engaging anything.
    fn is_safe(&self, cell: Cell) -> bool;

    fn has_enough_strength_for(&self, check: StrengthCheck, strength: i32) -> bool;
}

/// Strength thresholds used by [`KnowledgeBase`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Thresholds {
    /// Monsters are engaged above this strength (exclusive).
    pub monster: i32,
    /// The boss is engaged at this strength or more.
    pub boss: i32,
    /// Power-ups are ignored at this strength or more.
    pub sufficient: i32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            monster: 30,
            boss: 90,
            sufficient: 100,
        }
    }
}

/// Rule-based [`Knowledge`]: a cell is unsafe while it holds a monster,
/// the boss or another agent.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    thresholds: Thresholds,
    objects: HashMap<Cell, MapObject>,
}

impl KnowledgeBase {
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            objects: HashMap::new(),
        }
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// The object last seen at `cell`.
    pub fn object_at(&self, cell: Cell) -> Option<MapObject> {
        self.objects.get(&cell).copied()
    }
}

impl Knowledge for KnowledgeBase {
    fn tell_percepts(&mut self, objects: &[(Cell, MapObject)]) {
        self.objects.clear();
        self.objects.extend(objects.iter().copied());
    }

    fn is_safe(&self, cell: Cell) -> bool {
        self.objects.get(&cell).is_none_or(|o| !o.is_hostile())
    }

    fn has_enough_strength_for(&self, check: StrengthCheck, strength: i32) -> bool {
        match check {
            StrengthCheck::Monster => strength > self.thresholds.monster,
            StrengthCheck::Boss => strength >= self.thresholds.boss,
            StrengthCheck::Sufficient => strength >= self.thresholds.sufficient,
        }
    }
}
