//! Path search for a 4-connected terrain grid.
//!
//! Two searches share one reusable [`SearchSpace`]:
//!
//! - **A\*** lowest-cost search over known terrain ([`SearchSpace::astar_path`])
//! - **Bounded exploration**, a depth-limited walk that may end on unknown
//!   cells ([`SearchSpace::explore`])
//!
//! [`Planner`] runs either search once per goal and keeps the cheapest
//! result.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | neighbour enumeration |
//! | [`WeightedPather`] : [`Pather`] | step costs |
//! | [`AstarPather`] : [`WeightedPather`] | A* |
//! | [`FrontierPather`] : [`WeightedPather`] | exploration |
//!
//! [`TerrainPather`] implements all four over a [`rogue_core::TerrainGrid`].

mod astar;
mod distance;
mod explore;
mod path;
mod pather;
mod planner;
mod space;
mod traits;

pub use distance::{depth_limit, manhattan};
pub use explore::Exploration;
pub use path::{Path, Step, UNREACHABLE};
pub use pather::TerrainPather;
pub use planner::{Planner, Strategy};
pub use space::{FrontierPolicy, SearchSpace};
pub use traits::{AstarPather, FrontierPather, Pather, WeightedPather};
