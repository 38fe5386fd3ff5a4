use thiserror::Error;

use crate::terrain::TerrainKind;

/// Precondition violations raised while building a grid or cost model.
///
/// Search outcomes never use this type; an unreachable goal is a value,
/// not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid has no cells")]
    Empty,
    #[error("row {row} has {found} columns, expected {expected}")]
    NonRectangular {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("invalid tile {ch:?} at ({row},{col})")]
    InvalidTile { ch: char, row: usize, col: usize },
    #[error("grid of {rows}x{cols} cells is too large")]
    TooLarge { rows: usize, cols: usize },
    #[error("traversal cost {cost} for {tile:?} must be positive")]
    InvalidCost { tile: TerrainKind, cost: i32 },
}
