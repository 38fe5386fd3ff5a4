//! Terrain categories and the cost model that prices them.

use std::fmt;

use crate::error::GridError;

/// Terrain category of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerrainKind {
    Path,
    Sand,
    Mountain,
    Wall,
    #[default]
    Unknown,
}

impl TerrainKind {
    /// Parse the single-letter map form (`P`, `S`, `M`, `W`, `U`), either case.
    pub fn from_char(ch: char) -> Option<Self> {
        match ch.to_ascii_uppercase() {
            'P' => Some(TerrainKind::Path),
            'S' => Some(TerrainKind::Sand),
            'M' => Some(TerrainKind::Mountain),
            'W' => Some(TerrainKind::Wall),
            'U' => Some(TerrainKind::Unknown),
            _ => None,
        }
    }

    /// Single-letter map form.
    pub const fn as_char(self) -> char {
        match self {
            TerrainKind::Path => 'P',
            TerrainKind::Sand => 'S',
            TerrainKind::Mountain => 'M',
            TerrainKind::Wall => 'W',
            TerrainKind::Unknown => 'U',
        }
    }

    /// Whether this is a wall.
    #[inline]
    pub const fn is_wall(self) -> bool {
        matches!(self, TerrainKind::Wall)
    }

    /// Whether the terrain has not been observed yet.
    #[inline]
    pub const fn is_unknown(self) -> bool {
        matches!(self, TerrainKind::Unknown)
    }
}

impl fmt::Display for TerrainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// How unobserved cells are priced, chosen per search call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnknownPolicy {
    /// Unknown cells cannot be entered. Used by the optimal search.
    #[default]
    Impassable,
    /// Unknown cells can be entered at [`CostModel::unknown_penalty`].
    Penalized,
}

/// Per-step traversal cost for each terrain category.
///
/// The cost of a move is the cost of the cell being entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CostModel {
    pub path: i32,
    pub sand: i32,
    pub mountain: i32,
    /// Cost of entering an Unknown cell under [`UnknownPolicy::Penalized`].
    pub unknown_penalty: i32,
    /// Amount subtracted when an exploration branch ends on an Unknown cell.
    pub frontier_bonus: i32,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            path: 1,
            sand: 3,
            mountain: 10,
            unknown_penalty: 100,
            frontier_bonus: 1,
        }
    }
}

impl CostModel {
    /// Traversal cost of `tile`, or `None` if it cannot be entered.
    pub const fn cost(&self, tile: TerrainKind, unknown: UnknownPolicy) -> Option<i32> {
        match tile {
            TerrainKind::Path => Some(self.path),
            TerrainKind::Sand => Some(self.sand),
            TerrainKind::Mountain => Some(self.mountain),
            TerrainKind::Wall => None,
            TerrainKind::Unknown => match unknown {
                UnknownPolicy::Impassable => None,
                UnknownPolicy::Penalized => Some(self.unknown_penalty),
            },
        }
    }

    /// Cheapest cost of any single step over known terrain.
    ///
    /// Scaling Manhattan distance by this keeps the A* estimate admissible.
    pub fn min_step_cost(&self) -> i32 {
        self.path.min(self.sand).min(self.mountain).max(1)
    }

    /// Cheapest cost of any single step under `unknown`. Under
    /// [`UnknownPolicy::Penalized`] the unknown penalty counts too.
    pub fn min_step_cost_for(&self, unknown: UnknownPolicy) -> i32 {
        match unknown {
            UnknownPolicy::Impassable => self.min_step_cost(),
            UnknownPolicy::Penalized => self.min_step_cost().min(self.unknown_penalty.max(1)),
        }
    }

    /// Copy with every traversal cost raised to at least 1.
    pub fn clamped(self) -> Self {
        Self {
            path: self.path.max(1),
            sand: self.sand.max(1),
            mountain: self.mountain.max(1),
            unknown_penalty: self.unknown_penalty.max(1),
            ..self
        }
    }

    /// Reject non-positive costs, which would break the search ordering.
    pub fn validate(&self) -> Result<(), GridError> {
        for (tile, cost) in [
            (TerrainKind::Path, self.path),
            (TerrainKind::Sand, self.sand),
            (TerrainKind::Mountain, self.mountain),
            (TerrainKind::Unknown, self.unknown_penalty),
        ] {
            if cost <= 0 {
                return Err(GridError::InvalidCost { tile, cost });
            }
        }
        Ok(())
    }
}
