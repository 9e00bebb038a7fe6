//! Search domains and the generic grid searches that consume them.
//!
//! - **A\*** shortest path ([`PathRange::astar_path`])
//! - **Dijkstra** multi-source cost maps ([`PathRange::dijkstra_map`])
//! - **BFS** bounded uniform-cost floods ([`PathRange::bfs_map`])
//!
//! All searches run through [`PathRange`], which owns and reuses its caches
//! so that repeated per-turn queries do not allocate after warm-up.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | BFS floods |
//! | [`WeightedPather`] : [`Pather`] | Dijkstra |
//! | [`AstarPather`] : [`WeightedPather`] | A* |

mod astar;
mod bfs;
mod dijkstra;
mod distance;
mod neighbors;
mod pathrange;
mod traits;

pub use distance::{chebyshev, manhattan};
pub use neighbors::{Neighbors, push_cardinal};
pub use pathrange::{PathNode, PathRange, UNREACHABLE};
pub use traits::{AstarPather, Pather, WeightedPather};

#[cfg(test)]
mod testgrid;
