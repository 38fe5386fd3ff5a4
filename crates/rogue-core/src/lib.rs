//! **rogue-core**: core types for the exploration planner.
//!
//! This crate provides the foundational types shared by the search and
//! agent crates: grid geometry, terrain categories with their traversal
//! costs, and the read-only terrain grid the searches run over.

pub mod error;
pub mod geom;
pub mod grid;
pub mod terrain;

pub use error::GridError;
pub use geom::{Cell, Direction, Range, RangeIter};
pub use grid::TerrainGrid;
pub use terrain::{CostModel, TerrainKind, UnknownPolicy};
